//! Server-side cart operations.
//!
//! The backend owns the cart; every mutation is followed by a fresh read so
//! callers always receive the server's view, never a locally patched one.

use serde::Serialize;
use tracing::instrument;

use constructo_core::ProductId;

use super::{ApiClient, ApiError, MessageResponse, types::CartSnapshot};

#[derive(Serialize)]
struct CartItemRequest<'a> {
    product_id: &'a ProductId,
    quantity: u32,
}

impl ApiClient {
    /// Fetch the current cart (requires a session).
    #[instrument(skip(self))]
    pub async fn get_cart(&self) -> Result<CartSnapshot, ApiError> {
        self.get("/cart").await
    }

    /// Add a product to the cart, incrementing the quantity if it is already
    /// present. Returns the cart after the change.
    #[instrument(skip(self))]
    pub async fn add_to_cart(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<CartSnapshot, ApiError> {
        let ack: MessageResponse = self
            .post(
                "/cart/add",
                &CartItemRequest {
                    product_id,
                    quantity,
                },
            )
            .await?;
        tracing::debug!(message = %ack.message, product_id = %product_id, "Added to cart");

        self.get_cart().await
    }

    /// Set a cart line to an exact quantity; zero removes the line. Returns
    /// the cart after the change.
    #[instrument(skip(self))]
    pub async fn update_cart_item(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<CartSnapshot, ApiError> {
        let ack: MessageResponse = self
            .put(
                "/cart/update",
                &CartItemRequest {
                    product_id,
                    quantity,
                },
            )
            .await?;
        tracing::debug!(message = %ack.message, product_id = %product_id, quantity, "Updated cart line");

        self.get_cart().await
    }

    /// Remove a product from the cart. Returns the cart after the change.
    #[instrument(skip(self))]
    pub async fn remove_from_cart(
        &self,
        product_id: &ProductId,
    ) -> Result<CartSnapshot, ApiError> {
        let ack: MessageResponse = self.delete(&format!("/cart/remove/{product_id}")).await?;
        tracing::debug!(message = %ack.message, product_id = %product_id, "Removed from cart");

        self.get_cart().await
    }

    /// Empty the cart. Returns the (empty) cart after the change.
    #[instrument(skip(self))]
    pub async fn clear_cart(&self) -> Result<CartSnapshot, ApiError> {
        let ack: MessageResponse = self.delete("/cart/clear").await?;
        tracing::debug!(message = %ack.message, "Cleared cart");

        self.get_cart().await
    }
}
