//! End-to-end checkout flow tests.
//!
//! Each test wires the coordinator to scripted services and asserts both
//! the outcome and which backend operations ran. The invariant under test
//! throughout: the local cart is cleared only when an order is actually
//! confirmed (cash on delivery, or online payment verified).

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use constructo_client::CheckoutCoordinator;
use constructo_client::checkout::{AddressError, CheckoutError, CheckoutOutcome};
use constructo_core::{OrderId, PaymentMethod, Price};

use constructo_integration_tests::{
    PaymentBehavior, ScriptedOrders, ScriptedPayments, ScriptedSurface, SurfaceBehavior,
    cart_with_subtotal, order_fixture, valid_address,
};

type Harness = (
    Arc<ScriptedOrders>,
    Arc<ScriptedPayments>,
    Arc<ScriptedSurface>,
    CheckoutCoordinator<Arc<ScriptedOrders>, Arc<ScriptedPayments>, Arc<ScriptedSurface>>,
);

fn harness(orders: ScriptedOrders, payments: ScriptedPayments, surface: ScriptedSurface) -> Harness {
    let orders = Arc::new(orders);
    let payments = Arc::new(payments);
    let surface = Arc::new(surface);
    let coordinator =
        CheckoutCoordinator::new(orders.clone(), payments.clone(), surface.clone());
    (orders, payments, surface, coordinator)
}

// =============================================================================
// Cash on Delivery
// =============================================================================

#[tokio::test]
async fn test_cod_order_confirms_and_clears_cart() {
    let subtotal = Price::from_rupees(4000);
    let (orders, payments, surface, coordinator) = harness(
        ScriptedOrders::succeeding(subtotal),
        ScriptedPayments::succeeding(),
        ScriptedSurface::new(SurfaceBehavior::Pay),
    );

    let mut cart = cart_with_subtotal(subtotal);
    let outcome = coordinator
        .place_order(&mut cart, &valid_address(), PaymentMethod::Cod)
        .await
        .unwrap();

    assert!(matches!(outcome, CheckoutOutcome::Confirmed(_)));
    assert!(cart.is_empty());
    assert_eq!(orders.calls(), 1);

    // The payment path must never run for cash on delivery
    assert_eq!(payments.intent_calls(), 0);
    assert_eq!(payments.verify_calls(), 0);
    assert_eq!(surface.calls(), 0);
}

// =============================================================================
// Online Payment: Success
// =============================================================================

#[tokio::test]
async fn test_online_payment_verifies_and_clears_cart() {
    // Above the free-shipping threshold: total equals the subtotal
    let subtotal = Price::from_rupees(6000);
    let (orders, payments, surface, coordinator) = harness(
        ScriptedOrders::succeeding(subtotal),
        ScriptedPayments::succeeding(),
        ScriptedSurface::new(SurfaceBehavior::Pay),
    );

    let mut cart = cart_with_subtotal(subtotal);
    let outcome = coordinator
        .place_order(&mut cart, &valid_address(), PaymentMethod::Online)
        .await
        .unwrap();

    assert_eq!(outcome.order_id().as_str(), "ord-1");
    assert!(matches!(outcome, CheckoutOutcome::Confirmed(_)));
    assert!(cart.is_empty());
    assert_eq!(orders.calls(), 1);
    assert_eq!(payments.intent_calls(), 1);
    assert_eq!(payments.verify_calls(), 1);
    assert_eq!(surface.calls(), 1);

    // The verification payload ties the gateway result back to the order
    let verified = payments.verified();
    assert_eq!(verified.len(), 1);
    assert_eq!(verified[0].gateway_order_id.as_str(), "order_gw_1");
    assert_eq!(verified[0].gateway_payment_id.as_str(), "pay_gw_1");
    assert_eq!(verified[0].gateway_signature, "sig_gw_1");
    assert_eq!(verified[0].order_id.as_str(), "ord-1");
}

#[tokio::test]
async fn test_checkout_surface_receives_total_and_prefill() {
    // Below the threshold: 4,000 + 99 shipping = 4,099 total
    let subtotal = Price::from_rupees(4000);
    let (_orders, _payments, surface, coordinator) = harness(
        ScriptedOrders::succeeding(subtotal),
        ScriptedPayments::succeeding(),
        ScriptedSurface::new(SurfaceBehavior::Pay),
    );

    let mut cart = cart_with_subtotal(subtotal);
    coordinator
        .place_order(&mut cart, &valid_address(), PaymentMethod::Online)
        .await
        .unwrap();

    let prompt = surface.last_prompt().unwrap();
    assert_eq!(prompt.amount_paise, 409_900);
    assert_eq!(prompt.currency, "INR");
    assert_eq!(prompt.key_id, "rzp_test_key");
    assert_eq!(prompt.prefill.name, "Mason Rao");
    assert_eq!(prompt.prefill.contact, "9876543210");
}

// =============================================================================
// Online Payment: Cancellation
// =============================================================================

#[tokio::test]
async fn test_dismissed_payment_keeps_cart_and_order() {
    let subtotal = Price::from_rupees(4000);
    let (orders, payments, _surface, coordinator) = harness(
        ScriptedOrders::succeeding(subtotal),
        ScriptedPayments::succeeding(),
        ScriptedSurface::new(SurfaceBehavior::Dismiss),
    );

    let mut cart = cart_with_subtotal(subtotal);
    let outcome = coordinator
        .place_order(&mut cart, &valid_address(), PaymentMethod::Online)
        .await
        .unwrap();

    // Dismissal is not an error; the order exists, unpaid
    match outcome {
        CheckoutOutcome::Cancelled { order_id } => assert_eq!(order_id.as_str(), "ord-1"),
        CheckoutOutcome::Confirmed(_) => panic!("dismissed payment must not confirm"),
    }
    assert!(!cart.is_empty());
    assert_eq!(orders.calls(), 1);
    assert_eq!(payments.verify_calls(), 0);
}

#[tokio::test]
async fn test_payment_can_be_retried_after_dismissal() {
    let subtotal = Price::from_rupees(4000);
    let (_orders, _payments, _surface, coordinator) = harness(
        ScriptedOrders::succeeding(subtotal),
        ScriptedPayments::succeeding(),
        ScriptedSurface::new(SurfaceBehavior::Dismiss),
    );

    let mut cart = cart_with_subtotal(subtotal);
    let outcome = coordinator
        .place_order(&mut cart, &valid_address(), PaymentMethod::Online)
        .await
        .unwrap();
    assert!(matches!(outcome, CheckoutOutcome::Cancelled { .. }));
    assert!(!cart.is_empty());

    // Second attempt against the same unpaid order, this time paying
    let (_orders2, payments2, _surface2, retry) = harness(
        ScriptedOrders::succeeding(subtotal),
        ScriptedPayments::succeeding(),
        ScriptedSurface::new(SurfaceBehavior::Pay),
    );
    let order = order_fixture(valid_address(), PaymentMethod::Online, subtotal);
    let outcome = retry.pay_for_order(&mut cart, &order).await.unwrap();

    assert!(matches!(outcome, CheckoutOutcome::Confirmed(_)));
    assert!(cart.is_empty());
    assert_eq!(payments2.verify_calls(), 1);
}

// =============================================================================
// Online Payment: Failures
// =============================================================================

#[tokio::test]
async fn test_intent_failure_leaves_order_pending() {
    let subtotal = Price::from_rupees(4000);
    let (orders, _payments, surface, coordinator) = harness(
        ScriptedOrders::succeeding(subtotal),
        ScriptedPayments::new(
            PaymentBehavior::Fail("gateway unavailable".to_string()),
            PaymentBehavior::Succeed,
        ),
        ScriptedSurface::new(SurfaceBehavior::Pay),
    );

    let mut cart = cart_with_subtotal(subtotal);
    let err = coordinator
        .place_order(&mut cart, &valid_address(), PaymentMethod::Online)
        .await
        .unwrap_err();

    assert!(matches!(err, CheckoutError::IntentCreation { .. }));
    assert_eq!(err.pending_order().map(OrderId::as_str), Some("ord-1"));
    assert!(!cart.is_empty());
    assert_eq!(orders.calls(), 1);
    assert_eq!(surface.calls(), 0);
}

#[tokio::test]
async fn test_gateway_failure_is_retryable() {
    let subtotal = Price::from_rupees(4000);
    let (_orders, payments, _surface, coordinator) = harness(
        ScriptedOrders::succeeding(subtotal),
        ScriptedPayments::succeeding(),
        ScriptedSurface::new(SurfaceBehavior::Fail("card declined".to_string())),
    );

    let mut cart = cart_with_subtotal(subtotal);
    let err = coordinator
        .place_order(&mut cart, &valid_address(), PaymentMethod::Online)
        .await
        .unwrap_err();

    match &err {
        CheckoutError::Gateway { order_id, reason } => {
            assert_eq!(order_id.as_str(), "ord-1");
            assert_eq!(reason, "card declined");
        }
        other => panic!("expected gateway error, got {other:?}"),
    }
    assert_eq!(err.pending_order().map(OrderId::as_str), Some("ord-1"));
    assert!(!cart.is_empty());

    // A failed gateway result must never be submitted for verification
    assert_eq!(payments.verify_calls(), 0);
}

#[tokio::test]
async fn test_verification_failure_directs_to_support() {
    let subtotal = Price::from_rupees(4000);
    let (_orders, payments, _surface, coordinator) = harness(
        ScriptedOrders::succeeding(subtotal),
        ScriptedPayments::new(
            PaymentBehavior::Succeed,
            PaymentBehavior::Fail("Payment verification failed".to_string()),
        ),
        ScriptedSurface::new(SurfaceBehavior::Pay),
    );

    let mut cart = cart_with_subtotal(subtotal);
    let err = coordinator
        .place_order(&mut cart, &valid_address(), PaymentMethod::Online)
        .await
        .unwrap_err();

    assert!(matches!(err, CheckoutError::Verification { .. }));
    assert!(err.to_string().contains("contact support"));

    // Verification ran exactly once; failure is never auto-retried and is
    // not offered as a retryable pending order
    assert_eq!(payments.verify_calls(), 1);
    assert!(err.pending_order().is_none());

    // Money may have moved, but the order is unconfirmed: keep the cart
    assert!(!cart.is_empty());
}

// =============================================================================
// Pre-flight Checks
// =============================================================================

#[tokio::test]
async fn test_invalid_address_creates_no_order() {
    let subtotal = Price::from_rupees(4000);
    let (orders, payments, surface, coordinator) = harness(
        ScriptedOrders::succeeding(subtotal),
        ScriptedPayments::succeeding(),
        ScriptedSurface::new(SurfaceBehavior::Pay),
    );

    let mut address = valid_address();
    address.phone = "987654321".to_string(); // nine digits

    let mut cart = cart_with_subtotal(subtotal);
    let err = coordinator
        .place_order(&mut cart, &address, PaymentMethod::Online)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CheckoutError::Address(AddressError::InvalidPhone)
    ));
    assert_eq!(err.to_string(), "Please enter a valid phone number");
    assert!(!cart.is_empty());
    assert_eq!(orders.calls(), 0);
    assert_eq!(payments.intent_calls(), 0);
    assert_eq!(surface.calls(), 0);
}

#[tokio::test]
async fn test_empty_cart_creates_no_order() {
    let (orders, _payments, _surface, coordinator) = harness(
        ScriptedOrders::succeeding(Price::ZERO),
        ScriptedPayments::succeeding(),
        ScriptedSurface::new(SurfaceBehavior::Pay),
    );

    let mut cart = constructo_client::CartState::new();
    let err = coordinator
        .place_order(&mut cart, &valid_address(), PaymentMethod::Cod)
        .await
        .unwrap_err();

    assert!(matches!(err, CheckoutError::EmptyCart));
    assert_eq!(orders.calls(), 0);
}

#[tokio::test]
async fn test_order_creation_failure_keeps_cart() {
    let (orders, payments, _surface, coordinator) = harness(
        ScriptedOrders::failing("Cart is empty"),
        ScriptedPayments::succeeding(),
        ScriptedSurface::new(SurfaceBehavior::Pay),
    );

    let mut cart = cart_with_subtotal(Price::from_rupees(4000));
    let err = coordinator
        .place_order(&mut cart, &valid_address(), PaymentMethod::Cod)
        .await
        .unwrap_err();

    assert!(matches!(err, CheckoutError::OrderCreation(_)));
    assert!(err.pending_order().is_none());
    assert!(!cart.is_empty());
    assert_eq!(orders.calls(), 1);
    assert_eq!(payments.intent_calls(), 0);
}
