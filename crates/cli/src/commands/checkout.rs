//! Checkout commands.
//!
//! The online path drives the gateway checkout through a terminal host: the
//! prompt details are printed and the gateway result is read from stdin,
//! which is how test-mode payments are exercised without a mobile shell.

use clap::{Args, ValueEnum};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};

use constructo_client::api::types::ShippingAddress;
use constructo_client::checkout::ui::native::{SdkCheckout, SdkEvent, SdkRequest};
use constructo_client::{
    ApiClient, ApiError, CartState, CheckoutCoordinator, CheckoutError, CheckoutOutcome,
};
use constructo_core::{Price, PaymentMethod};

/// Errors that can occur during checkout commands.
#[derive(Debug, Error)]
pub enum CheckoutCliError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Checkout(#[from] CheckoutError),
}

#[derive(Args)]
pub struct CheckoutArgs {
    /// Full name for delivery
    #[arg(long)]
    pub name: String,

    /// Contact phone number
    #[arg(long)]
    pub phone: String,

    /// Address line 1
    #[arg(long)]
    pub line1: String,

    /// Address line 2
    #[arg(long)]
    pub line2: Option<String>,

    /// City
    #[arg(long)]
    pub city: String,

    /// State
    #[arg(long)]
    pub state: String,

    /// 6-digit pincode
    #[arg(long)]
    pub pincode: String,

    /// How to pay
    #[arg(long, value_enum, default_value_t = PaymentArg::Cod)]
    pub payment_method: PaymentArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PaymentArg {
    Cod,
    Online,
}

impl From<PaymentArg> for PaymentMethod {
    fn from(arg: PaymentArg) -> Self {
        match arg {
            PaymentArg::Cod => Self::Cod,
            PaymentArg::Online => Self::Online,
        }
    }
}

pub async fn checkout(api: &ApiClient, args: CheckoutArgs) -> Result<(), CheckoutCliError> {
    let address = ShippingAddress {
        full_name: args.name,
        phone: args.phone,
        address_line1: args.line1,
        address_line2: args.line2,
        city: args.city,
        state: args.state,
        pincode: args.pincode,
    };

    let mut cart = CartState::new();
    cart.apply(api.get_cart().await?);
    println!(
        "Placing order for {} items, subtotal {}",
        cart.item_count(),
        cart.total()
    );

    let (ui, requests) = SdkCheckout::new(1);
    let host = tokio::spawn(terminal_host(requests));
    let coordinator = CheckoutCoordinator::new(api.clone(), api.clone(), ui);

    let result = coordinator
        .place_order(&mut cart, &address, args.payment_method.into())
        .await;
    host.abort();

    print_outcome(result?);
    Ok(())
}

pub async fn pay(api: &ApiClient, order_id: &str) -> Result<(), CheckoutCliError> {
    let order = api.get_order(&order_id.into()).await?;
    println!("Retrying payment for order {}, total {}", order.id, order.total);

    let mut cart = CartState::new();
    cart.apply(api.get_cart().await?);

    let (ui, requests) = SdkCheckout::new(1);
    let host = tokio::spawn(terminal_host(requests));
    let coordinator = CheckoutCoordinator::new(api.clone(), api.clone(), ui);

    let result = coordinator.pay_for_order(&mut cart, &order).await;
    host.abort();

    print_outcome(result?);
    Ok(())
}

fn print_outcome(outcome: CheckoutOutcome) {
    match outcome {
        CheckoutOutcome::Confirmed(order) => {
            println!("Order {} confirmed", order.order_id);
        }
        CheckoutOutcome::Cancelled { order_id } => {
            println!(
                "Payment cancelled; order {order_id} is unpaid. Run `constructo pay {order_id}` to retry."
            );
        }
    }
}

/// Answer gateway checkout requests from stdin.
async fn terminal_host(mut requests: tokio::sync::mpsc::Receiver<SdkRequest>) {
    while let Some(request) = requests.recv().await {
        println!(
            "Gateway checkout for {} ({} {})",
            request.prompt.gateway_order_id,
            Price::from_paise(request.prompt.amount_paise),
            request.prompt.currency
        );
        println!("Enter payment id (blank to cancel):");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let payment_id = match lines.next_line().await {
            Ok(Some(line)) => line.trim().to_string(),
            _ => String::new(),
        };

        let event = if payment_id.is_empty() {
            SdkEvent::Cancelled
        } else {
            println!("Enter signature:");
            let signature = match lines.next_line().await {
                Ok(Some(line)) => line.trim().to_string(),
                _ => String::new(),
            };
            SdkEvent::Paid {
                payment_id,
                signature,
            }
        };

        // Receiver dropped means the attempt already ended; nothing to do
        let _ = request.respond.send(event);
    }
}
