//! Locally held cart state.
//!
//! [`CartState`] is the app shell's in-memory mirror of the server cart. It
//! is owned explicitly by whoever drives the UI and is passed by mutable
//! reference into the checkout flow, which clears it only when an order is
//! actually paid for (or placed as cash on delivery).

use constructo_core::{Price, ProductId};

use crate::api::types::{CartEntry, CartSnapshot};

/// One line of the local cart, flattened for display.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub brand: Option<String>,
    pub image: String,
    pub unit_price: Price,
    pub quantity: u32,
}

impl CartLine {
    /// Price of this line (unit price times quantity).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price * self.quantity
    }
}

impl From<CartEntry> for CartLine {
    fn from(entry: CartEntry) -> Self {
        Self {
            product_id: entry.product_id,
            name: entry.product.name,
            brand: entry.product.brand,
            image: entry.product.image,
            unit_price: entry.product.price,
            quantity: entry.quantity,
        }
    }
}

/// The local mirror of the server cart.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    lines: Vec<CartLine>,
    total: Price,
}

impl CartState {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the local state with a fresh server snapshot.
    pub fn apply(&mut self, snapshot: CartSnapshot) {
        self.lines = snapshot.items.into_iter().map(CartLine::from).collect();
        self.total = snapshot.total;
    }

    /// The cart lines in server order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The subtotal as reported by the server.
    #[must_use]
    pub fn total(&self) -> Price {
        self.total
    }

    /// Total number of items across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Drop all lines and zero the total. Idempotent.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.total = Price::ZERO;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::types::Product;

    fn product(id: &str, price: i64) -> Product {
        Product {
            id: id.into(),
            name: format!("Product {id}"),
            description: String::new(),
            price: Price::from_rupees(price),
            original_price: None,
            category: "cement".to_string(),
            sku: format!("SKU-{id}"),
            image: String::new(),
            images: Vec::new(),
            rating: 0.0,
            review_count: 0,
            stock: 100,
            brand: None,
            specifications: None,
            created_at: chrono::DateTime::UNIX_EPOCH.naive_utc(),
        }
    }

    fn snapshot() -> CartSnapshot {
        CartSnapshot {
            items: vec![
                CartEntry {
                    product_id: "p-1".into(),
                    quantity: 2,
                    product: product("p-1", 450),
                },
                CartEntry {
                    product_id: "p-2".into(),
                    quantity: 1,
                    product: product("p-2", 3100),
                },
            ],
            total: Price::from_rupees(4000),
        }
    }

    #[test]
    fn test_apply_snapshot() {
        let mut cart = CartState::new();
        assert!(cart.is_empty());

        cart.apply(snapshot());
        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total(), Price::from_rupees(4000));
        assert_eq!(cart.lines()[0].line_total(), Price::from_rupees(900));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut cart = CartState::new();
        cart.apply(snapshot());

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::ZERO);

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::ZERO);
    }
}
