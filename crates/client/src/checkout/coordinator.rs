//! Order submission coordinator.

use tracing::instrument;

use constructo_core::PaymentMethod;

use super::error::CheckoutError;
use super::gateway::{OrderService, PaymentService};
use super::payment::{PaymentConclusion, PaymentOrchestrator};
use super::ui::{BuyerPrefill, PaymentUi};
use super::{CheckoutOutcome, address, reconcile};
use crate::api::types::{Order, ShippingAddress};
use crate::cart::CartState;

/// Coordinates one checkout from cart to confirmed (or pending) order.
///
/// Generic over the order and payment services and the checkout surface so
/// app shells wire in [`crate::ApiClient`] plus their host binding, and
/// tests wire in fakes.
#[derive(Debug, Clone)]
pub struct CheckoutCoordinator<O, P, U> {
    orders: O,
    payment: PaymentOrchestrator<P, U>,
}

impl<O, P, U> CheckoutCoordinator<O, P, U>
where
    O: OrderService,
    P: PaymentService,
    U: PaymentUi,
{
    pub const fn new(orders: O, payments: P, ui: U) -> Self {
        Self {
            orders,
            payment: PaymentOrchestrator::new(payments, ui),
        }
    }

    /// Place an order for the current cart.
    ///
    /// Validates the address, creates the order, then settles payment. Cash
    /// on delivery confirms immediately; online payment runs the gateway
    /// flow. The local cart is cleared only on confirmation.
    ///
    /// # Errors
    ///
    /// - `Address` / `EmptyCart` before any order is created
    /// - `OrderCreation` if the backend rejects the order
    /// - the payment errors of [`Self::pay_for_order`] on the online path
    #[instrument(skip_all, fields(payment_method = %payment_method))]
    pub async fn place_order(
        &self,
        cart: &mut CartState,
        shipping_address: &ShippingAddress,
        payment_method: PaymentMethod,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        address::validate(shipping_address)?;

        let order = self
            .orders
            .create_order(shipping_address, payment_method)
            .await
            .map_err(CheckoutError::OrderCreation)?;

        match payment_method {
            PaymentMethod::Cod => {
                let order_ref = reconcile(cart, order.id);
                tracing::info!(order_id = %order_ref.order_id, "Cash-on-delivery order confirmed");
                Ok(CheckoutOutcome::Confirmed(order_ref))
            }
            PaymentMethod::Online => self.pay_for_order(cart, &order).await,
        }
    }

    /// Collect online payment for an existing unpaid order.
    ///
    /// Also the entry point for retrying payment after a cancelled or
    /// failed attempt. Clears the local cart only when payment verifies.
    ///
    /// # Errors
    ///
    /// - `IntentCreation` / `Gateway`: the order stays unpaid, retryable
    /// - `Verification`: money may have moved; the buyer is directed to
    ///   support and no retry happens here
    #[instrument(skip_all, fields(order_id = %order.id))]
    pub async fn pay_for_order(
        &self,
        cart: &mut CartState,
        order: &Order,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        let prefill = BuyerPrefill {
            name: order.shipping_address.full_name.clone(),
            contact: order.shipping_address.phone.clone(),
        };

        match self
            .payment
            .pay_for_order(&order.id, order.total, prefill)
            .await?
        {
            PaymentConclusion::Verified => {
                let order_ref = reconcile(cart, order.id.clone());
                tracing::info!(order_id = %order_ref.order_id, "Online order confirmed");
                Ok(CheckoutOutcome::Confirmed(order_ref))
            }
            PaymentConclusion::Cancelled => Ok(CheckoutOutcome::Cancelled {
                order_id: order.id.clone(),
            }),
        }
    }
}
