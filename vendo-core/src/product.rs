use serde::{Deserialize, Serialize};

/// A catalog entry. Identifiers are assigned by the store (AUTOINCREMENT,
/// never reused); stock is read-only from the cart side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
}
