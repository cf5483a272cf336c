//! Checkout flow errors.

use thiserror::Error;

use constructo_core::OrderId;

use crate::api::ApiError;
use crate::checkout::address::AddressError;

/// Errors that can end a checkout attempt.
///
/// Variants that carry an [`OrderId`] refer to an order that already exists
/// server-side; the cart is left intact in every error case.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The shipping address failed validation; no order was created.
    #[error("{0}")]
    Address(#[from] AddressError),

    /// The local cart is empty; no order was created.
    #[error("Your cart is empty")]
    EmptyCart,

    /// Order creation failed; no order was created.
    #[error("failed to place order: {0}")]
    OrderCreation(#[source] ApiError),

    /// The gateway payment intent could not be created. The order exists but
    /// is unpaid; payment can be retried.
    #[error("failed to initiate payment for order {order_id}: {source}")]
    IntentCreation {
        order_id: OrderId,
        #[source]
        source: ApiError,
    },

    /// The gateway reported the payment as failed. The order exists but is
    /// unpaid; payment can be retried.
    #[error("payment failed for order {order_id}: {reason}")]
    Gateway { order_id: OrderId, reason: String },

    /// The gateway accepted the payment but server-side verification failed.
    /// Money may have moved; this is never retried automatically and the
    /// buyer is told to contact support.
    #[error("payment verification failed for order {order_id}; please contact support")]
    Verification {
        order_id: OrderId,
        #[source]
        source: ApiError,
    },
}

impl CheckoutError {
    /// The unpaid order left behind by this error, when one exists.
    ///
    /// `Verification` deliberately returns `None`: that order must go
    /// through support, not another payment attempt.
    #[must_use]
    pub fn pending_order(&self) -> Option<&OrderId> {
        match self {
            Self::IntentCreation { order_id, .. } | Self::Gateway { order_id, .. } => {
                Some(order_id)
            }
            _ => None,
        }
    }
}
