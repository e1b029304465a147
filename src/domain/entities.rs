use serde::{Deserialize, Serialize};

pub type CountryId = i64;
pub type PortId = i64;
pub type ItemId = i64;

/// A country as served by the catalogue (`/negaras`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Country {
    #[serde(rename = "id_negara")]
    pub id: CountryId,
    #[serde(rename = "nama_negara")]
    pub name: String,
    #[serde(rename = "kode_negara")]
    pub code: String,
}

impl Country {
    pub fn label(&self) -> String {
        format!("{} - {}", self.code, self.name)
    }
}

/// A port belonging to one country (`/pelabuhans`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Port {
    #[serde(rename = "id_pelabuhan")]
    pub id: PortId,
    #[serde(rename = "nama_pelabuhan")]
    pub name: String,
    #[serde(rename = "id_negara")]
    pub country_id: CountryId,
}

impl Port {
    pub fn label(&self) -> String {
        self.name.clone()
    }
}

/// Goods offered at one port (`/barangs`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "id_barang")]
    pub id: ItemId,
    #[serde(rename = "nama_barang")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "id_pelabuhan")]
    pub port_id: PortId,
    /// Unit price in whole rupiah.
    #[serde(rename = "harga", deserialize_with = "amount_from_json")]
    pub price: u64,
    /// Kept optional so "absent" and "explicitly zero" stay distinguishable.
    #[serde(rename = "diskon", default, skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<f64>,
}

impl Item {
    pub fn label(&self) -> String {
        format!("{} - {}", self.id, self.name)
    }
}

/// The three catalogue collections, in cascade order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    Countries,
    Ports,
    Items,
}

impl Resource {
    pub fn name(&self) -> &'static str {
        match self {
            Resource::Countries => "countries",
            Resource::Ports => "ports",
            Resource::Items => "items",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts a price sent as an integer, a float or a numeric string.
/// Fractions round to the nearest unit and negatives clamp to zero.
fn amount_from_json<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct Amount;

    impl<'de> serde::de::Visitor<'de> for Amount {
        type Value = u64;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a non-negative amount as number or string")
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value)
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.max(0) as u64)
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            if value.is_finite() {
                Ok(value.max(0.0).round() as u64)
            } else {
                Err(E::custom("amount is not finite"))
            }
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            let trimmed = value.trim();
            if let Ok(whole) = trimmed.parse::<i64>() {
                return self.visit_i64(whole);
            }
            trimmed
                .parse::<f64>()
                .map_err(|_| E::custom(format!("invalid amount `{value}`")))
                .and_then(|float| self.visit_f64(float))
        }
    }

    deserializer.deserialize_any(Amount)
}
