use super::entities::{Country, Item, Port};

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Countries whose name or code contains `query`, ignoring case.
pub fn filter_countries<'a>(countries: &'a [Country], query: &str) -> Vec<&'a Country> {
    let needle = query.trim().to_lowercase();
    countries
        .iter()
        .filter(|country| {
            contains_folded(&country.name, &needle) || contains_folded(&country.code, &needle)
        })
        .collect()
}

pub fn filter_ports<'a>(ports: &'a [Port], query: &str) -> Vec<&'a Port> {
    let needle = query.trim().to_lowercase();
    ports
        .iter()
        .filter(|port| contains_folded(&port.name, &needle))
        .collect()
}

pub fn filter_items<'a>(items: &'a [Item], query: &str) -> Vec<&'a Item> {
    let needle = query.trim().to_lowercase();
    items
        .iter()
        .filter(|item| contains_folded(&item.name, &needle))
        .collect()
}
