//! Price and discount arithmetic for the quotation form.
//!
//! Totals are stored at full precision; rounding only happens in
//! [`format_rupiah`] when a value is rendered.

use thousands::Separable;

pub const MIN_DISCOUNT: f64 = 0.0;
pub const MAX_DISCOUNT: f64 = 100.0;

/// `unit_price - (discount_percent / 100) * unit_price`.
pub fn total(unit_price: u64, discount_percent: f64) -> f64 {
    let price = unit_price as f64;
    price - (discount_percent / 100.0) * price
}

/// Clamps a discount into `[0, 100]`. NaN becomes 0.
pub fn clamp_discount(value: f64) -> f64 {
    if value.is_nan() {
        MIN_DISCOUNT
    } else {
        value.clamp(MIN_DISCOUNT, MAX_DISCOUNT)
    }
}

/// Reads the discount field the way a browser `parseInt` would: optional
/// sign, then leading digits, anything after is ignored. Unparseable input
/// is 0. The result is clamped.
pub fn parse_discount_input(raw: &str) -> f64 {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return MIN_DISCOUNT;
    }
    // More digits than fit in f64 exactly still clamp to 100.
    let magnitude = digits.parse::<f64>().unwrap_or(MAX_DISCOUNT);
    clamp_discount(if negative { -magnitude } else { magnitude })
}

/// Strips everything that is not an ASCII digit and parses the rest.
/// Empty or overflowing input is 0, so `Rp90.000` reads back as 90000.
pub fn parse_price_input(raw: &str) -> u64 {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// Indonesian rupiah with no fractional digits, e.g. `Rp90.000`.
pub fn format_rupiah(amount: f64) -> String {
    if !amount.is_finite() {
        return "Rp0".to_string();
    }
    let rounded = amount.round();
    let whole = rounded.abs() as u64;
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}Rp{}", whole.separate_with_dots())
}
