//! Payment gateway operations.
//!
//! The backend proxies the gateway: it creates gateway orders, exposes the
//! publishable key, and verifies payment signatures server-side. The client
//! never sees the gateway secret.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use constructo_core::Price;

use super::{ApiClient, ApiError, types::{PaymentIntent, PaymentVerification}};

#[derive(Serialize)]
struct CreateIntentRequest {
    amount: Price,
}

#[derive(Deserialize)]
struct CheckoutKeyResponse {
    key_id: String,
}

impl ApiClient {
    /// Create a payment intent at the gateway for the given rupee amount.
    ///
    /// The backend converts the amount to paise and returns the gateway
    /// order id plus the publishable key needed to open checkout.
    #[instrument(skip(self))]
    pub async fn create_payment_intent(&self, amount: Price) -> Result<PaymentIntent, ApiError> {
        let intent: PaymentIntent = self
            .post("/payments/create-order", &CreateIntentRequest { amount })
            .await?;

        tracing::info!(
            gateway_order_id = %intent.gateway_order_id,
            amount_paise = intent.amount_paise,
            "Payment intent created"
        );
        Ok(intent)
    }

    /// Submit gateway proof of payment for server-side signature
    /// verification.
    ///
    /// On success the server marks the order confirmed. A failure here means
    /// the payment may have been captured without the order being confirmed,
    /// so callers must not treat it as a retryable gateway error.
    #[instrument(skip(self, verification), fields(order_id = %verification.order_id))]
    pub async fn verify_payment(&self, verification: &PaymentVerification) -> Result<(), ApiError> {
        let _ack: super::MessageResponse = self.post("/payments/verify", verification).await?;
        tracing::info!(order_id = %verification.order_id, "Payment verified");
        Ok(())
    }

    /// Fetch the gateway publishable key.
    #[instrument(skip(self))]
    pub async fn get_checkout_key(&self) -> Result<String, ApiError> {
        let response: CheckoutKeyResponse = self.get("/payments/key").await?;
        Ok(response.key_id)
    }
}
