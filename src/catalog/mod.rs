//! Item catalog
//!
//! Read-only lookup table of purchasable items, supplied to the wallet
//! service at startup.

use rust_decimal::Decimal;
use serde::Serialize;

/// Purchasable item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
    pub price: Decimal,
}

impl Item {
    pub fn new(id: u64, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }
}

/// Immutable item catalog
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: Vec<Item>,
}

impl ItemCatalog {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// Catalog the server starts with
    pub fn seeded() -> Self {
        Self::new(vec![
            Item::new(1, "The Great Gatsby (Book)", Decimal::new(5000, 2)),
            Item::new(2, "Coffee Mug", Decimal::new(2550, 2)),
            Item::new(3, "Notebook (Premium)", Decimal::new(1000, 2)),
            Item::new(4, "Mystery Box (Low Risk)", Decimal::new(4999, 2)),
            Item::new(5, "Pen Set (Ballpoint)", Decimal::new(1500, 2)),
        ])
    }

    pub fn get(&self, item_id: u64) -> Option<&Item> {
        self.items.iter().find(|item| item.id == item_id)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }
}
