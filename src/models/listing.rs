//! Listing models: the upstream item summary and its normalized projection.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// String field that also accepts numbers; any other type becomes `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Nested object that degrades to `None` when it does not fit the schema.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// List that treats `null` or a non-array as empty and drops bad entries.
fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(entries) => entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// Monetary amount as returned upstream (`value` is a decimal string).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Amount {
    #[serde(default, deserialize_with = "lenient_string")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub currency: Option<String>,
}

impl Amount {
    /// Render as `"<currency> <amount>"`, or `"Unknown"` when both are blank.
    pub fn display(amount: Option<&Amount>) -> String {
        let currency = amount.and_then(|a| a.currency.as_deref()).unwrap_or("");
        let value = amount.and_then(|a| a.value.as_deref()).unwrap_or("");
        let rendered = format!("{} {}", currency, value);
        let trimmed = rendered.trim();
        if trimmed.is_empty() {
            "Unknown".to_string()
        } else {
            trimmed.to_string()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(default, deserialize_with = "lenient_string")]
    pub image_url: Option<String>,
}

/// One shipping option on an item summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingOption {
    #[serde(default, deserialize_with = "lenient")]
    pub shipping_cost: Option<Amount>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub min_estimated_delivery_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub max_estimated_delivery_date: Option<String>,
}

/// Item summary from the Browse search endpoint.
///
/// Every field is optional and a field of the wrong type reads as missing, so
/// any JSON object parses; defaults are applied once, in
/// [`crate::services::normalize`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawListing {
    #[serde(default, deserialize_with = "lenient_string")]
    pub item_id: Option<String>,
    /// ISO-8601 with timezone, e.g. `2025-03-01T10:15:00.000Z`
    #[serde(default, deserialize_with = "lenient_string")]
    pub item_creation_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub price: Option<Amount>,
    #[serde(default, deserialize_with = "lenient")]
    pub image: Option<Image>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub item_web_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub shipping_options: Vec<ShippingOption>,
}

/// Delivery estimate taken from the first shipping option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    pub cost: String,
    pub min_date: Option<String>,
    pub max_date: Option<String>,
}

/// Listing shape handed to the downstream consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedListing {
    pub title: String,
    pub price: String,
    pub image: Option<String>,
    pub url: Option<String>,
    pub delivery: Option<Delivery>,
}
