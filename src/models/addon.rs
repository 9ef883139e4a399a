use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An optional paid extra (decoration package, catering, ...) selectable with
/// a quantity. The backend also publishes the facility rates through this
/// catalog, keyed by well-known names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOn {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// An add-on picked by the customer, with the desired quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOnSelection {
    pub add_on: AddOn,
    pub quantity: u32,
}

/// A page of entities as returned by the backend list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityPage<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: Option<i64>,
    #[serde(default)]
    pub total_pages: Option<i64>,
}
