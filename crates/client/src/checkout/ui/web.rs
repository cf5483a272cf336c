//! Web checkout binding.
//!
//! Web shells open the gateway's JS widget with an options object and get
//! handler callbacks back. [`WidgetCheckout`] pre-serializes the options to
//! JSON so the shell can pass them straight to the widget, and maps the
//! widget's events into [`PaymentUi`] results.

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use super::{GatewayPayment, PaymentPrompt, PaymentUi, PaymentUiError};

/// One widget-open request sent to the host shell.
#[derive(Debug)]
pub struct WidgetRequest {
    /// Gateway widget options, serialized as JSON.
    pub options_json: String,
    pub respond: oneshot::Sender<WidgetEvent>,
}

/// The widget's terminal event for one open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    /// The `handler` callback fired: the buyer paid.
    Paid {
        payment_id: String,
        signature: String,
    },
    /// `modal.ondismiss` fired: the buyer closed the widget.
    Dismissed,
    /// `payment.failed` fired.
    Failed { description: String },
}

/// [`PaymentUi`] backed by a host shell driving the gateway's JS widget.
#[derive(Debug, Clone)]
pub struct WidgetCheckout {
    open: mpsc::Sender<WidgetRequest>,
}

impl WidgetCheckout {
    /// Create the binding and the request stream the host shell consumes.
    #[must_use]
    pub fn new(buffer: usize) -> (Self, mpsc::Receiver<WidgetRequest>) {
        let (open, requests) = mpsc::channel(buffer);
        (Self { open }, requests)
    }

    fn options_json(prompt: &PaymentPrompt) -> String {
        serde_json::json!({
            "key": prompt.key_id,
            "amount": prompt.amount_paise,
            "currency": prompt.currency,
            "order_id": prompt.gateway_order_id,
            "prefill": {
                "name": prompt.prefill.name,
                "contact": prompt.prefill.contact,
            },
        })
        .to_string()
    }
}

#[async_trait]
impl PaymentUi for WidgetCheckout {
    async fn present(&self, prompt: PaymentPrompt) -> Result<GatewayPayment, PaymentUiError> {
        let options_json = Self::options_json(&prompt);
        let (respond, event) = oneshot::channel();

        self.open
            .send(WidgetRequest {
                options_json,
                respond,
            })
            .await
            .map_err(|_| PaymentUiError::Gateway("checkout host is gone".to_string()))?;

        match event.await {
            Ok(WidgetEvent::Paid {
                payment_id,
                signature,
            }) => Ok(GatewayPayment {
                gateway_order_id: prompt.gateway_order_id,
                gateway_payment_id: payment_id.into(),
                gateway_signature: signature,
            }),
            Ok(WidgetEvent::Dismissed) => Err(PaymentUiError::Cancelled),
            Ok(WidgetEvent::Failed { description }) => Err(PaymentUiError::Gateway(description)),
            Err(_) => Err(PaymentUiError::Gateway(
                "checkout widget closed without a result".to_string(),
            )),
        }
    }
}
