//! Online payment orchestration.
//!
//! Drives one payment attempt for an already-created order: create the
//! gateway intent, present the checkout surface, verify the proof of
//! payment server-side. Each attempt walks the stage machine below exactly
//! once; retries start a new attempt from `Idle`.

use tracing::instrument;

use constructo_core::{OrderId, Price};

use super::error::CheckoutError;
use super::gateway::PaymentService;
use super::ui::{BuyerPrefill, PaymentPrompt, PaymentUi, PaymentUiError};
use crate::api::types::PaymentVerification;

/// Where one payment attempt currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStage {
    /// Nothing started.
    Idle,
    /// The backend order exists.
    OrderCreated,
    /// The gateway payment intent exists.
    IntentCreated,
    /// The checkout surface is open; waiting on the buyer.
    AwaitingGatewayResult,
    /// Proof of payment submitted for server-side verification.
    Verifying,
    /// Verification succeeded; the order is paid.
    Verified,
    /// The gateway accepted payment but verification failed.
    VerificationFailed,
    /// The buyer dismissed the checkout surface.
    Cancelled,
    /// The gateway reported the payment as failed.
    GatewayError,
}

impl CheckoutStage {
    /// Whether the attempt can go no further.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Verified | Self::VerificationFailed | Self::Cancelled | Self::GatewayError
        )
    }

    /// Whether reaching this stage clears the local cart.
    ///
    /// Only a verified payment does; every other terminal stage leaves the
    /// cart intact so the buyer can retry.
    #[must_use]
    pub const fn clears_cart(self) -> bool {
        matches!(self, Self::Verified)
    }
}

/// How a payment attempt ended without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentConclusion {
    /// Payment verified; the order is paid.
    Verified,
    /// The buyer dismissed the checkout surface. Benign; the order stays
    /// unpaid and payment can be retried.
    Cancelled,
}

/// Runs the intent / present / verify sequence for one order.
#[derive(Debug, Clone)]
pub struct PaymentOrchestrator<P, U> {
    payments: P,
    ui: U,
}

impl<P: PaymentService, U: PaymentUi> PaymentOrchestrator<P, U> {
    pub const fn new(payments: P, ui: U) -> Self {
        Self { payments, ui }
    }

    /// Collect and verify an online payment for an existing order.
    ///
    /// # Errors
    ///
    /// - `IntentCreation` if the gateway intent could not be created
    /// - `Gateway` if the gateway reported the payment as failed
    /// - `Verification` if proof of payment did not verify server-side; the
    ///   verify request is made exactly once and never retried here
    ///
    /// A dismissed checkout surface is not an error; it concludes the
    /// attempt as [`PaymentConclusion::Cancelled`].
    #[instrument(skip_all, fields(order_id = %order_id, amount = %amount))]
    pub async fn pay_for_order(
        &self,
        order_id: &OrderId,
        amount: Price,
        prefill: BuyerPrefill,
    ) -> Result<PaymentConclusion, CheckoutError> {
        let mut stage = CheckoutStage::OrderCreated;

        let intent = match self.payments.create_intent(amount).await {
            Ok(intent) => intent,
            Err(source) => {
                return Err(CheckoutError::IntentCreation {
                    order_id: order_id.clone(),
                    source,
                });
            }
        };
        stage = advance(stage, CheckoutStage::IntentCreated);

        let prompt = PaymentPrompt::from_intent(&intent, prefill);
        stage = advance(stage, CheckoutStage::AwaitingGatewayResult);

        let payment = match self.ui.present(prompt).await {
            Ok(payment) => payment,
            Err(PaymentUiError::Cancelled) => {
                advance(stage, CheckoutStage::Cancelled);
                tracing::info!(order_id = %order_id, "Payment dismissed by the buyer");
                return Ok(PaymentConclusion::Cancelled);
            }
            Err(PaymentUiError::Gateway(reason)) => {
                advance(stage, CheckoutStage::GatewayError);
                return Err(CheckoutError::Gateway {
                    order_id: order_id.clone(),
                    reason,
                });
            }
        };
        stage = advance(stage, CheckoutStage::Verifying);

        let verification = PaymentVerification {
            gateway_order_id: payment.gateway_order_id,
            gateway_payment_id: payment.gateway_payment_id,
            gateway_signature: payment.gateway_signature,
            order_id: order_id.clone(),
        };

        match self.payments.verify(&verification).await {
            Ok(()) => {
                advance(stage, CheckoutStage::Verified);
                Ok(PaymentConclusion::Verified)
            }
            Err(source) => {
                advance(stage, CheckoutStage::VerificationFailed);
                tracing::error!(
                    order_id = %order_id,
                    error = %source,
                    "Payment verification failed after gateway success"
                );
                Err(CheckoutError::Verification {
                    order_id: order_id.clone(),
                    source,
                })
            }
        }
    }
}

fn advance(from: CheckoutStage, to: CheckoutStage) -> CheckoutStage {
    tracing::debug!(?from, ?to, "Checkout stage advanced");
    to
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_only_verified_clears_cart() {
        assert!(CheckoutStage::Verified.clears_cart());
        assert!(!CheckoutStage::Cancelled.clears_cart());
        assert!(!CheckoutStage::VerificationFailed.clears_cart());
        assert!(!CheckoutStage::GatewayError.clears_cart());
        assert!(!CheckoutStage::Verifying.clears_cart());
    }

    #[test]
    fn test_terminal_stages() {
        assert!(CheckoutStage::Verified.is_terminal());
        assert!(CheckoutStage::Cancelled.is_terminal());
        assert!(CheckoutStage::VerificationFailed.is_terminal());
        assert!(CheckoutStage::GatewayError.is_terminal());
        assert!(!CheckoutStage::Idle.is_terminal());
        assert!(!CheckoutStage::AwaitingGatewayResult.is_terminal());
    }
}
