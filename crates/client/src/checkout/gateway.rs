//! Service traits the checkout flow depends on.
//!
//! [`crate::ApiClient`] implements both; tests substitute scripted fakes.

use async_trait::async_trait;

use constructo_core::{PaymentMethod, Price};

use crate::api::{ApiClient, ApiError};
use crate::api::types::{Order, PaymentIntent, PaymentVerification, ShippingAddress};

/// Creates orders from the server-side cart.
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Create an order for the current cart contents.
    async fn create_order(
        &self,
        address: &ShippingAddress,
        payment_method: PaymentMethod,
    ) -> Result<Order, ApiError>;
}

/// Creates and verifies gateway payments.
#[async_trait]
pub trait PaymentService: Send + Sync {
    /// Create a payment intent for the given rupee amount.
    async fn create_intent(&self, amount: Price) -> Result<PaymentIntent, ApiError>;

    /// Verify gateway proof of payment server-side.
    async fn verify(&self, verification: &PaymentVerification) -> Result<(), ApiError>;
}

#[async_trait]
impl<T: OrderService + ?Sized> OrderService for std::sync::Arc<T> {
    async fn create_order(
        &self,
        address: &ShippingAddress,
        payment_method: PaymentMethod,
    ) -> Result<Order, ApiError> {
        (**self).create_order(address, payment_method).await
    }
}

#[async_trait]
impl<T: PaymentService + ?Sized> PaymentService for std::sync::Arc<T> {
    async fn create_intent(&self, amount: Price) -> Result<PaymentIntent, ApiError> {
        (**self).create_intent(amount).await
    }

    async fn verify(&self, verification: &PaymentVerification) -> Result<(), ApiError> {
        (**self).verify(verification).await
    }
}

#[async_trait]
impl OrderService for ApiClient {
    async fn create_order(
        &self,
        address: &ShippingAddress,
        payment_method: PaymentMethod,
    ) -> Result<Order, ApiError> {
        Self::create_order(self, address, payment_method).await
    }
}

#[async_trait]
impl PaymentService for ApiClient {
    async fn create_intent(&self, amount: Price) -> Result<PaymentIntent, ApiError> {
        self.create_payment_intent(amount).await
    }

    async fn verify(&self, verification: &PaymentVerification) -> Result<(), ApiError> {
        self.verify_payment(verification).await
    }
}
