//! Checkout flow: address validation, order submission, and payment.
//!
//! The flow runs in two halves. [`CheckoutCoordinator::place_order`]
//! validates the address, creates the order, and either finishes immediately
//! (cash on delivery) or hands off to the payment orchestrator, which drives
//! the gateway checkout UI and verifies the result server-side.
//!
//! The local cart is cleared in exactly two places: after a cash-on-delivery
//! order is created, and after an online payment is verified. A cancelled or
//! failed payment leaves the cart intact so the buyer can retry.

pub mod address;
mod coordinator;
mod error;
mod gateway;
mod payment;
pub mod ui;

pub use address::AddressError;
pub use coordinator::CheckoutCoordinator;
pub use error::CheckoutError;
pub use gateway::{OrderService, PaymentService};
pub use payment::{CheckoutStage, PaymentConclusion, PaymentOrchestrator};

use constructo_core::{OrderId, Price};

use crate::cart::CartState;

/// Handle to a successfully placed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRef {
    pub order_id: OrderId,
}

/// How a checkout attempt ended without an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// The order is confirmed (cash on delivery, or payment verified).
    Confirmed(OrderRef),
    /// The buyer dismissed the payment UI. The order exists but is unpaid
    /// and the cart is untouched; payment can be retried.
    Cancelled { order_id: OrderId },
}

impl CheckoutOutcome {
    /// The order this outcome refers to.
    #[must_use]
    pub fn order_id(&self) -> &OrderId {
        match self {
            Self::Confirmed(order) => &order.order_id,
            Self::Cancelled { order_id } => order_id,
        }
    }
}

/// Clear the local cart for a confirmed order.
///
/// The server already emptied its own cart during order creation; this
/// brings the local mirror in line. Idempotent.
pub fn reconcile(cart: &mut CartState, order_id: OrderId) -> OrderRef {
    cart.clear();
    tracing::debug!(order_id = %order_id, "Local cart reconciled");
    OrderRef { order_id }
}

/// Shipping fee for a given subtotal.
///
/// Orders strictly above ₹5,000 ship free; everything else pays a flat ₹99.
#[must_use]
pub fn shipping_fee(subtotal: Price) -> Price {
    if subtotal > Price::from_rupees(5000) {
        Price::ZERO
    } else {
        Price::from_rupees(99)
    }
}

/// Order total for a given subtotal (subtotal plus shipping).
#[must_use]
pub fn grand_total(subtotal: Price) -> Price {
    subtotal + shipping_fee(subtotal)
}
