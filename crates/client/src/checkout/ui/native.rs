//! Native checkout binding.
//!
//! Mobile shells embed the gateway's native SDK, which takes over the screen
//! and reports back through platform callbacks. [`SdkCheckout`] bridges that
//! callback world into [`PaymentUi`]: the shell listens on the request
//! channel, launches the SDK with the prompt, and answers through the
//! per-request oneshot.

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use super::{GatewayPayment, PaymentPrompt, PaymentUi, PaymentUiError};

/// One SDK launch request sent to the host shell.
#[derive(Debug)]
pub struct SdkRequest {
    pub prompt: PaymentPrompt,
    pub respond: oneshot::Sender<SdkEvent>,
}

/// The SDK's terminal callback for one launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SdkEvent {
    /// `onPaymentSuccess`: the buyer paid.
    Paid {
        payment_id: String,
        signature: String,
    },
    /// The buyer backed out of the SDK screen.
    Cancelled,
    /// `onPaymentError`: the SDK reported a failure.
    Failed {
        code: Option<i32>,
        description: String,
    },
}

/// [`PaymentUi`] backed by a host shell driving the gateway's native SDK.
#[derive(Debug, Clone)]
pub struct SdkCheckout {
    launch: mpsc::Sender<SdkRequest>,
}

impl SdkCheckout {
    /// Create the binding and the request stream the host shell consumes.
    #[must_use]
    pub fn new(buffer: usize) -> (Self, mpsc::Receiver<SdkRequest>) {
        let (launch, requests) = mpsc::channel(buffer);
        (Self { launch }, requests)
    }
}

#[async_trait]
impl PaymentUi for SdkCheckout {
    async fn present(&self, prompt: PaymentPrompt) -> Result<GatewayPayment, PaymentUiError> {
        let gateway_order_id = prompt.gateway_order_id.clone();
        let (respond, event) = oneshot::channel();

        self.launch
            .send(SdkRequest { prompt, respond })
            .await
            .map_err(|_| PaymentUiError::Gateway("checkout host is gone".to_string()))?;

        match event.await {
            Ok(SdkEvent::Paid {
                payment_id,
                signature,
            }) => Ok(GatewayPayment {
                gateway_order_id,
                gateway_payment_id: payment_id.into(),
                gateway_signature: signature,
            }),
            Ok(SdkEvent::Cancelled) => Err(PaymentUiError::Cancelled),
            Ok(SdkEvent::Failed {
                code: Some(code),
                description,
            }) => Err(PaymentUiError::Gateway(format!(
                "{description} (code {code})"
            ))),
            Ok(SdkEvent::Failed {
                code: None,
                description,
            }) => Err(PaymentUiError::Gateway(description)),
            Err(_) => Err(PaymentUiError::Gateway(
                "checkout closed without a result".to_string(),
            )),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::checkout::ui::BuyerPrefill;

    fn prompt() -> PaymentPrompt {
        PaymentPrompt {
            gateway_order_id: "order_Nxq7".into(),
            amount_paise: 409_900,
            currency: "INR".to_string(),
            key_id: "rzp_test_abc".to_string(),
            prefill: BuyerPrefill {
                name: "Mason Rao".to_string(),
                contact: "9876543210".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_paid_event_becomes_gateway_payment() {
        let (checkout, mut requests) = SdkCheckout::new(1);

        let host = tokio::spawn(async move {
            let request = requests.recv().await.unwrap();
            assert_eq!(request.prompt.amount_paise, 409_900);
            request
                .respond
                .send(SdkEvent::Paid {
                    payment_id: "pay_Nxq8".to_string(),
                    signature: "deadbeef".to_string(),
                })
                .unwrap();
        });

        let payment = checkout.present(prompt()).await.unwrap();
        assert_eq!(payment.gateway_order_id.as_str(), "order_Nxq7");
        assert_eq!(payment.gateway_payment_id.as_str(), "pay_Nxq8");
        assert_eq!(payment.gateway_signature, "deadbeef");
        host.await.unwrap();
    }

    #[tokio::test]
    async fn test_cancelled_event_is_cancelled() {
        let (checkout, mut requests) = SdkCheckout::new(1);

        let host = tokio::spawn(async move {
            let request = requests.recv().await.unwrap();
            request.respond.send(SdkEvent::Cancelled).unwrap();
        });

        let err = checkout.present(prompt()).await.unwrap_err();
        assert_eq!(err, PaymentUiError::Cancelled);
        host.await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_event_carries_code() {
        let (checkout, mut requests) = SdkCheckout::new(1);

        let host = tokio::spawn(async move {
            let request = requests.recv().await.unwrap();
            request
                .respond
                .send(SdkEvent::Failed {
                    code: Some(2),
                    description: "Payment failed".to_string(),
                })
                .unwrap();
        });

        let err = checkout.present(prompt()).await.unwrap_err();
        assert_eq!(
            err,
            PaymentUiError::Gateway("Payment failed (code 2)".to_string())
        );
        host.await.unwrap();
    }

    #[tokio::test]
    async fn test_dropped_responder_is_gateway_error() {
        let (checkout, mut requests) = SdkCheckout::new(1);

        let host = tokio::spawn(async move {
            let request = requests.recv().await.unwrap();
            drop(request.respond);
        });

        let err = checkout.present(prompt()).await.unwrap_err();
        assert!(matches!(err, PaymentUiError::Gateway(_)));
        host.await.unwrap();
    }
}
