//! Scripted services and fixtures for checkout flow tests.
//!
//! The checkout coordinator is generic over its order service, payment
//! service, and checkout surface. The doubles here script each seam's
//! behavior and count calls, so tests can assert not just outcomes but
//! which backend operations ran.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p constructo-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use constructo_client::api::ApiError;
use constructo_client::api::types::{
    CartEntry, CartSnapshot, Order, OrderItem, PaymentIntent, PaymentVerification, Product,
    ShippingAddress,
};
use constructo_client::cart::CartState;
use constructo_client::checkout::ui::{GatewayPayment, PaymentPrompt, PaymentUi, PaymentUiError};
use constructo_client::checkout::{OrderService, PaymentService, shipping_fee};
use constructo_core::{OrderStatus, PaymentMethod, Price};

fn api_failure(detail: &str) -> ApiError {
    ApiError::Status {
        status: 400,
        detail: detail.to_string(),
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

// =============================================================================
// Scripted Order Service
// =============================================================================

/// [`OrderService`] double that either creates a fixture order or fails.
pub struct ScriptedOrders {
    subtotal: Price,
    fail_with: Option<String>,
    calls: AtomicUsize,
}

impl ScriptedOrders {
    /// Creates orders for a cart with the given subtotal.
    #[must_use]
    pub fn succeeding(subtotal: Price) -> Self {
        Self {
            subtotal,
            fail_with: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Rejects every order with the given detail message.
    #[must_use]
    pub fn failing(detail: &str) -> Self {
        Self {
            subtotal: Price::ZERO,
            fail_with: Some(detail.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    /// How many orders were requested.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OrderService for ScriptedOrders {
    async fn create_order(
        &self,
        address: &ShippingAddress,
        payment_method: PaymentMethod,
    ) -> Result<Order, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.fail_with {
            Some(detail) => Err(api_failure(detail)),
            None => Ok(order_fixture(address.clone(), payment_method, self.subtotal)),
        }
    }
}

// =============================================================================
// Scripted Payment Service
// =============================================================================

/// How the payment service should answer each operation.
#[derive(Debug, Clone)]
pub enum PaymentBehavior {
    Succeed,
    Fail(String),
}

/// [`PaymentService`] double with scripted intent and verify behavior.
pub struct ScriptedPayments {
    intent: PaymentBehavior,
    verify: PaymentBehavior,
    intent_calls: AtomicUsize,
    verify_calls: AtomicUsize,
    verified: Mutex<Vec<PaymentVerification>>,
}

impl ScriptedPayments {
    #[must_use]
    pub fn new(intent: PaymentBehavior, verify: PaymentBehavior) -> Self {
        Self {
            intent,
            verify,
            intent_calls: AtomicUsize::new(0),
            verify_calls: AtomicUsize::new(0),
            verified: Mutex::new(Vec::new()),
        }
    }

    /// Both operations succeed.
    #[must_use]
    pub fn succeeding() -> Self {
        Self::new(PaymentBehavior::Succeed, PaymentBehavior::Succeed)
    }

    pub fn intent_calls(&self) -> usize {
        self.intent_calls.load(Ordering::SeqCst)
    }

    pub fn verify_calls(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }

    /// The verification payloads submitted, in order.
    pub fn verified(&self) -> Vec<PaymentVerification> {
        lock(&self.verified).clone()
    }
}

#[async_trait]
impl PaymentService for ScriptedPayments {
    async fn create_intent(&self, amount: Price) -> Result<PaymentIntent, ApiError> {
        self.intent_calls.fetch_add(1, Ordering::SeqCst);
        match &self.intent {
            PaymentBehavior::Fail(detail) => Err(api_failure(detail)),
            PaymentBehavior::Succeed => Ok(PaymentIntent {
                gateway_order_id: "order_gw_1".into(),
                amount_paise: amount.to_paise(),
                currency: "INR".to_string(),
                key_id: "rzp_test_key".to_string(),
            }),
        }
    }

    async fn verify(&self, verification: &PaymentVerification) -> Result<(), ApiError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        lock(&self.verified).push(verification.clone());
        match &self.verify {
            PaymentBehavior::Fail(detail) => Err(api_failure(detail)),
            PaymentBehavior::Succeed => Ok(()),
        }
    }
}

// =============================================================================
// Scripted Checkout Surface
// =============================================================================

/// What the checkout surface does when presented.
#[derive(Debug, Clone)]
pub enum SurfaceBehavior {
    /// The buyer pays; proof is built from the presented prompt.
    Pay,
    /// The buyer dismisses the surface.
    Dismiss,
    /// The gateway reports a failure.
    Fail(String),
}

/// [`PaymentUi`] double that records the prompt and follows its script.
pub struct ScriptedSurface {
    behavior: SurfaceBehavior,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<PaymentPrompt>>,
}

impl ScriptedSurface {
    #[must_use]
    pub fn new(behavior: SurfaceBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The most recently presented prompt.
    pub fn last_prompt(&self) -> Option<PaymentPrompt> {
        lock(&self.last_prompt).clone()
    }
}

#[async_trait]
impl PaymentUi for ScriptedSurface {
    async fn present(&self, prompt: PaymentPrompt) -> Result<GatewayPayment, PaymentUiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let gateway_order_id = prompt.gateway_order_id.clone();
        *lock(&self.last_prompt) = Some(prompt);

        match &self.behavior {
            SurfaceBehavior::Pay => Ok(GatewayPayment {
                gateway_order_id,
                gateway_payment_id: "pay_gw_1".into(),
                gateway_signature: "sig_gw_1".to_string(),
            }),
            SurfaceBehavior::Dismiss => Err(PaymentUiError::Cancelled),
            SurfaceBehavior::Fail(reason) => Err(PaymentUiError::Gateway(reason.clone())),
        }
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// A cart holding one line whose price equals the given subtotal.
#[must_use]
pub fn cart_with_subtotal(subtotal: Price) -> CartState {
    let mut cart = CartState::new();
    cart.apply(CartSnapshot {
        items: vec![CartEntry {
            product_id: "prod-1".into(),
            quantity: 1,
            product: product_fixture(subtotal),
        }],
        total: subtotal,
    });
    cart
}

/// A shipping address that passes validation.
#[must_use]
pub fn valid_address() -> ShippingAddress {
    ShippingAddress {
        full_name: "Mason Rao".to_string(),
        phone: "9876543210".to_string(),
        address_line1: "14 Industrial Estate".to_string(),
        address_line2: None,
        city: "Pune".to_string(),
        state: "Maharashtra".to_string(),
        pincode: "411001".to_string(),
    }
}

fn product_fixture(price: Price) -> Product {
    Product {
        id: "prod-1".into(),
        name: "OPC 53 Cement Bag".to_string(),
        description: "50kg bag".to_string(),
        price,
        original_price: None,
        category: "cement".to_string(),
        sku: "CEM-OPC53-50".to_string(),
        image: String::new(),
        images: Vec::new(),
        rating: 0.0,
        review_count: 0,
        stock: 100,
        brand: None,
        specifications: None,
        created_at: chrono::DateTime::UNIX_EPOCH.naive_utc(),
    }
}

/// An order as the backend would return it for the given cart subtotal.
#[must_use]
pub fn order_fixture(
    shipping_address: ShippingAddress,
    payment_method: PaymentMethod,
    subtotal: Price,
) -> Order {
    let fee = shipping_fee(subtotal);
    let now = chrono::DateTime::UNIX_EPOCH.naive_utc();
    Order {
        id: "ord-1".into(),
        items: vec![OrderItem {
            product_id: "prod-1".into(),
            product_name: "OPC 53 Cement Bag".to_string(),
            price: subtotal,
            quantity: 1,
        }],
        shipping_address,
        payment_method,
        subtotal,
        shipping_fee: fee,
        total: subtotal + fee,
        status: OrderStatus::Pending,
        created_at: now,
        updated_at: now,
    }
}
