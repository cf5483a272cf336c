//! Cart commands.

use clap::Subcommand;

use constructo_client::api::types::CartSnapshot;
use constructo_client::{ApiClient, ApiError, CartState};

#[derive(Subcommand)]
pub enum CartAction {
    /// Show the cart contents
    Show,
    /// Add a product (increments quantity if already present)
    Add {
        /// Product id
        product_id: String,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set a line to an exact quantity (0 removes it)
    Update {
        /// Product id
        product_id: String,

        /// New quantity
        #[arg(short, long)]
        quantity: u32,
    },
    /// Remove a product
    Remove {
        /// Product id
        product_id: String,
    },
    /// Empty the cart
    Clear,
}

pub async fn run(api: &ApiClient, action: CartAction) -> Result<(), ApiError> {
    let snapshot = match action {
        CartAction::Show => api.get_cart().await?,
        CartAction::Add {
            product_id,
            quantity,
        } => api.add_to_cart(&product_id.into(), quantity).await?,
        CartAction::Update {
            product_id,
            quantity,
        } => api.update_cart_item(&product_id.into(), quantity).await?,
        CartAction::Remove { product_id } => api.remove_from_cart(&product_id.into()).await?,
        CartAction::Clear => api.clear_cart().await?,
    };

    print_cart(snapshot);
    Ok(())
}

fn print_cart(snapshot: CartSnapshot) {
    let mut cart = CartState::new();
    cart.apply(snapshot);

    if cart.is_empty() {
        println!("Cart is empty");
        return;
    }

    for line in cart.lines() {
        println!(
            "{}  {} x{}  {}",
            line.product_id,
            line.name,
            line.quantity,
            line.line_total()
        );
    }
    println!("total: {}  ({} items)", cart.total(), cart.item_count());
}
