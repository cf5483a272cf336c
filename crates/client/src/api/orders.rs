//! Order operations.

use serde::Serialize;
use tracing::instrument;

use constructo_core::{OrderId, PaymentMethod};

use super::{ApiClient, ApiError, types::{Order, ShippingAddress}};

#[derive(Serialize)]
struct OrderCreateRequest<'a> {
    shipping_address: &'a ShippingAddress,
    payment_method: PaymentMethod,
}

impl ApiClient {
    /// Create an order from the current server-side cart contents.
    ///
    /// The server computes subtotal, shipping fee, and total from its own
    /// cart and clears that cart as part of the call.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` with detail "Cart is empty" when there is
    /// nothing to order.
    #[instrument(skip(self, shipping_address), fields(payment_method = %payment_method))]
    pub async fn create_order(
        &self,
        shipping_address: &ShippingAddress,
        payment_method: PaymentMethod,
    ) -> Result<Order, ApiError> {
        let order: Order = self
            .post(
                "/orders",
                &OrderCreateRequest {
                    shipping_address,
                    payment_method,
                },
            )
            .await?;

        tracing::info!(order_id = %order.id, total = %order.total, "Order created");
        Ok(order)
    }

    /// List the current user's orders, newest first.
    #[instrument(skip(self))]
    pub async fn get_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.get("/orders").await
    }

    /// Fetch one of the current user's orders by id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown id or another user's
    /// order.
    #[instrument(skip(self))]
    pub async fn get_order(&self, id: &OrderId) -> Result<Order, ApiError> {
        self.get(&format!("/orders/{id}")).await
    }
}
