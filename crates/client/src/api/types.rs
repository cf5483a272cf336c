//! Wire types for the Constructo backend API.
//!
//! Field names and shapes follow the backend's JSON exactly; the few renames
//! (`razorpay_*`) keep gateway vocabulary off the Rust-facing names.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use constructo_core::{
    CategoryId, Email, GatewayOrderId, GatewayPaymentId, OrderId, OrderStatus, PaymentMethod,
    Price, ProductId, ReviewId, UserId,
};

// =============================================================================
// Auth
// =============================================================================

/// An authenticated Constructo user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub created_at: NaiveDateTime,
}

// =============================================================================
// Catalog
// =============================================================================

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub image: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Pre-discount price, when the product is on sale.
    #[serde(default)]
    pub original_price: Option<Price>,
    pub category: String,
    pub sku: String,
    pub image: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default = "default_stock")]
    pub stock: u32,
    #[serde(default)]
    pub brand: Option<String>,
    /// Free-form key/value specifications, category dependent.
    #[serde(default)]
    pub specifications: Option<serde_json::Value>,
    pub created_at: NaiveDateTime,
}

fn default_stock() -> u32 {
    100
}

/// A customer review on a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub user_id: UserId,
    pub user_name: String,
    pub rating: u8,
    pub comment: String,
    pub created_at: NaiveDateTime,
}

// =============================================================================
// Cart
// =============================================================================

/// A cart line as the server stores it, with the product embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    pub product_id: ProductId,
    pub quantity: u32,
    pub product: Product,
}

/// The server's view of the cart after any read or mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub items: Vec<CartEntry>,
    pub total: Price,
}

// =============================================================================
// Orders
// =============================================================================

/// A shipping address as entered at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub full_name: String,
    pub phone: String,
    pub address_line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

/// An order line, denormalized at order creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub price: Price,
    pub quantity: u32,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub items: Vec<OrderItem>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub subtotal: Price,
    pub shipping_fee: Price,
    pub total: Price,
    pub status: OrderStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// =============================================================================
// Payments
// =============================================================================

/// A payment intent created at the gateway for one order's total.
///
/// `amount_paise` is the gateway-side amount in paise; the rupee total it was
/// derived from lives on the [`Order`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaymentIntent {
    #[serde(rename = "razorpay_order_id")]
    pub gateway_order_id: GatewayOrderId,
    #[serde(rename = "amount")]
    pub amount_paise: i64,
    pub currency: String,
    pub key_id: String,
}

/// Proof of payment handed back by the gateway checkout, submitted to the
/// backend for signature verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentVerification {
    #[serde(rename = "razorpay_order_id")]
    pub gateway_order_id: GatewayOrderId,
    #[serde(rename = "razorpay_payment_id")]
    pub gateway_payment_id: GatewayPaymentId,
    #[serde(rename = "razorpay_signature")]
    pub gateway_signature: String,
    pub order_id: OrderId,
}
