//! Payment checkout UI abstraction.
//!
//! Opening the gateway's checkout surface is inherently host-specific: a
//! native app hands the intent to the gateway SDK, a web shell opens the
//! gateway's JS widget. [`PaymentUi`] is the seam between the orchestrator
//! and those surfaces; [`native`] and [`web`] bind it to channel-driven
//! hosts.

pub mod native;
pub mod web;

use async_trait::async_trait;
use thiserror::Error;

use constructo_core::{GatewayOrderId, GatewayPaymentId};

use crate::api::types::PaymentIntent;

/// Buyer details prefilled into the checkout surface.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BuyerPrefill {
    pub name: String,
    pub contact: String,
}

/// Everything a checkout surface needs to open for one payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentPrompt {
    pub gateway_order_id: GatewayOrderId,
    pub amount_paise: i64,
    pub currency: String,
    pub key_id: String,
    pub prefill: BuyerPrefill,
}

impl PaymentPrompt {
    /// Build a prompt from a freshly created payment intent.
    #[must_use]
    pub fn from_intent(intent: &PaymentIntent, prefill: BuyerPrefill) -> Self {
        Self {
            gateway_order_id: intent.gateway_order_id.clone(),
            amount_paise: intent.amount_paise,
            currency: intent.currency.clone(),
            key_id: intent.key_id.clone(),
            prefill,
        }
    }
}

/// Proof of payment produced by the checkout surface on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayPayment {
    pub gateway_order_id: GatewayOrderId,
    pub gateway_payment_id: GatewayPaymentId,
    pub gateway_signature: String,
}

/// How a checkout surface can end without proof of payment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentUiError {
    /// The buyer closed the surface without paying. Benign.
    #[error("payment dismissed by the user")]
    Cancelled,
    /// The gateway reported a failure.
    #[error("payment gateway error: {0}")]
    Gateway(String),
}

/// A host surface that can collect one gateway payment.
#[async_trait]
pub trait PaymentUi: Send + Sync {
    /// Present the checkout surface and wait for its outcome.
    async fn present(&self, prompt: PaymentPrompt) -> Result<GatewayPayment, PaymentUiError>;
}

#[async_trait]
impl<T: PaymentUi + ?Sized> PaymentUi for std::sync::Arc<T> {
    async fn present(&self, prompt: PaymentPrompt) -> Result<GatewayPayment, PaymentUiError> {
        (**self).present(prompt).await
    }
}
