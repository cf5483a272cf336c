//! Constructo storefront client library.
//!
//! Typed access to the Constructo e-commerce API (categories, products,
//! reviews, cart, orders, payments) plus the checkout flow that coordinates
//! order placement and online payment.
//!
//! # Architecture
//!
//! - [`api::ApiClient`] - thin REST wrappers over the backend; the server is
//!   the source of truth for cart contents, order status, and payment state
//! - [`cart::CartState`] / [`session::AuthState`] - explicitly owned local
//!   state containers, injected where needed rather than ambient singletons
//! - [`checkout`] - address validation, the order submission coordinator,
//!   and the payment orchestrator behind service/UI capabilities so shells
//!   and tests can swap in their own bindings
//!
//! # Example
//!
//! ```rust,ignore
//! use constructo_client::{ApiClient, CartState, CheckoutCoordinator, ClientConfig};
//! use constructo_client::checkout::ui::native::SdkCheckout;
//! use constructo_core::PaymentMethod;
//!
//! let config = ClientConfig::from_env()?;
//! let api = ApiClient::new(&config)?;
//!
//! let mut cart = CartState::new();
//! cart.apply(api.get_cart().await?);
//!
//! let coordinator = CheckoutCoordinator::new(api.clone(), api.clone(), sdk_checkout);
//! let outcome = coordinator
//!     .place_order(&mut cart, &address, PaymentMethod::Online)
//!     .await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod session;

pub use api::{ApiClient, ApiError};
pub use cart::{CartLine, CartState};
pub use checkout::{CheckoutCoordinator, CheckoutError, CheckoutOutcome, OrderRef};
pub use config::{ClientConfig, ConfigError};
pub use session::AuthState;
