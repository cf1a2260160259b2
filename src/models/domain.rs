use serde::{Deserialize, Deserializer, Serialize};

/// A submitted purchase receipt
///
/// Every field is optional on the wire: missing or `null` fields decode to
/// their empty value and unknown fields are ignored. Values are kept as the raw
/// text the client sent; the scoring rules do their own parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Receipt {
    #[serde(deserialize_with = "null_as_default")]
    pub retailer: String,
    #[serde(rename = "purchaseDate", deserialize_with = "null_as_default")]
    pub purchase_date: String,
    #[serde(rename = "purchaseTime", deserialize_with = "null_as_default")]
    pub purchase_time: String,
    #[serde(deserialize_with = "null_items_as_default")]
    pub items: Vec<Item>,
    #[serde(deserialize_with = "null_as_default")]
    pub total: String,
}

/// A single line item on a receipt
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    #[serde(rename = "shortDescription", deserialize_with = "null_as_default")]
    pub short_description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub price: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A `null` list is empty, and a `null` entry is an empty item
fn null_items_as_default<'de, D>(deserializer: D) -> Result<Vec<Item>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Option::<Vec<Option<Item>>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(items.into_iter().map(Option::unwrap_or_default).collect())
}

impl Item {
    pub fn new(short_description: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            short_description: short_description.into(),
            price: price.into(),
        }
    }
}
