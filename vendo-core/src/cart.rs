use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One requested (product, quantity) pair in a create/update call.
///
/// `qty <= 0` acts as a removal marker on update and is rejected on create.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    pub product_id: i64,
    pub qty: i64,
}

/// One persisted cart line. Name and price are captured at write time and
/// never re-read from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub product_id: i64,
    pub name: String,
    pub price: f64,
    pub qty: i64,
}

impl CartLine {
    pub fn subtotal(&self) -> f64 {
        self.price * self.qty as f64
    }
}

/// A validated, priced line list ready to be persisted. Totals are always
/// the exact sums over `items`.
#[derive(Debug, Clone, PartialEq)]
pub struct CartDraft {
    pub items: Vec<CartLine>,
    pub total_amount: f64,
    pub total_items: i64,
}

impl CartDraft {
    /// Build a draft from validated lines, computing totals from scratch.
    pub fn from_lines(items: Vec<CartLine>) -> Self {
        let total_amount = items.iter().map(|l| l.subtotal()).sum();
        let total_items = items.iter().map(|l| l.qty).sum();
        Self {
            items,
            total_amount,
            total_items,
        }
    }
}

/// A persisted cart snapshot. Line order is request order; duplicate
/// product ids are kept as separate lines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    pub id: i64,
    pub items: Vec<CartLine>,
    pub total_amount: f64,
    pub total_items: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_totals_are_exact_sums() {
        let draft = CartDraft::from_lines(vec![
            CartLine {
                product_id: 1,
                name: "Red Shirt".to_string(),
                price: 10.5,
                qty: 2,
            },
            CartLine {
                product_id: 2,
                name: "Blue Hat".to_string(),
                price: 4.25,
                qty: 3,
            },
        ]);

        assert_eq!(draft.total_amount, 10.5 * 2.0 + 4.25 * 3.0);
        assert_eq!(draft.total_items, 5);
    }

    #[test]
    fn test_empty_draft_has_zero_totals() {
        let draft = CartDraft::from_lines(Vec::new());
        assert_eq!(draft.total_amount, 0.0);
        assert_eq!(draft.total_items, 0);
        assert!(draft.items.is_empty());
    }

    #[test]
    fn test_line_order_survives_serialization() {
        let lines = vec![
            CartLine {
                product_id: 7,
                name: "B".to_string(),
                price: 1.0,
                qty: 1,
            },
            CartLine {
                product_id: 3,
                name: "A".to_string(),
                price: 2.0,
                qty: 1,
            },
        ];
        let json = serde_json::to_string(&lines).unwrap();
        let back: Vec<CartLine> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, lines);
        assert_eq!(back[0].product_id, 7);
    }
}
