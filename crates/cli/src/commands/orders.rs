//! Order history commands.

use constructo_client::api::types::Order;
use constructo_client::{ApiClient, ApiError};

pub async fn run(api: &ApiClient, id: Option<&str>) -> Result<(), ApiError> {
    match id {
        Some(id) => {
            let order = api.get_order(&id.into()).await?;
            print_order(&order);
        }
        None => {
            for order in api.get_orders().await? {
                println!(
                    "{}  {}  {}  {}  {}",
                    order.id,
                    order.created_at.date(),
                    order.payment_method,
                    order.status,
                    order.total
                );
            }
        }
    }
    Ok(())
}

fn print_order(order: &Order) {
    println!("order {}  ({})", order.id, order.status);
    for item in &order.items {
        println!(
            "  {}  {} x{}  {}",
            item.product_id,
            item.product_name,
            item.quantity,
            item.price * item.quantity
        );
    }
    println!("subtotal: {}", order.subtotal);
    println!("shipping: {}", order.shipping_fee);
    println!("total:    {}", order.total);
    println!(
        "ship to:  {}, {}, {} {} ({})",
        order.shipping_address.address_line1,
        order.shipping_address.city,
        order.shipping_address.state,
        order.shipping_address.pincode,
        order.shipping_address.phone
    );
}
