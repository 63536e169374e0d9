//! Read models for the host's order data.
//!
//! Only the fields the notification handlers use are modelled. The host owns
//! the full order; these structs are what `OrderReader` hands back.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    /// Variant the item was bought as. Custom items carry none.
    #[serde(default)]
    pub variant_id: Option<String>,
    pub quantity: u32,
    /// Unit price in minor currency units.
    pub unit_price: i64,
}

impl LineItem {
    /// Unit price in major units with two decimals, as the email template shows it.
    pub fn display_price(&self) -> String {
        format_major_units(self.unit_price)
    }
}

/// An order with its items and customer loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub customer: Customer,
    pub items: Vec<LineItem>,
    /// Order total in minor units, as reported by the host.
    pub total: i64,
    #[serde(default)]
    pub billing_address: Option<JsonValue>,
}

/// A downloadable file attached to a product variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductMedia {
    pub id: String,
    pub variant_id: String,
    /// Key of the private file in host file storage.
    pub file_key: String,
}

fn format_major_units(minor: i64) -> String {
    let sign = if minor < 0 { "-" } else { "" };
    let abs = minor.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}
