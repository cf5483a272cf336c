//! Constructo CLI - storefront client for the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! constructo categories
//! constructo products --category cement --sort-by price
//!
//! # Authenticate (prints a token to export for later commands)
//! constructo login -e mason@example.com -p secret
//!
//! # Build a cart and check out
//! constructo cart add prod-123 -q 2
//! constructo checkout --name "Mason Rao" --phone 9876543210 \
//!     --line1 "14 Industrial Estate" --city Pune --state Maharashtra \
//!     --pincode 411001 --payment-method cod
//! ```
//!
//! # Environment Variables
//!
//! - `CONSTRUCTO_API_URL` - Backend base URL (required)
//! - `CONSTRUCTO_SESSION_TOKEN` - Token from a previous `login`
//! - `RUST_LOG` - Log filter (e.g., `constructo_client=debug`)

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use constructo_client::{ApiClient, ClientConfig};

mod commands;

#[derive(Parser)]
#[command(name = "constructo")]
#[command(author, version, about = "Constructo storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new account
    Register(commands::auth::RegisterArgs),
    /// Log in and print a session token
    Login(commands::auth::LoginArgs),
    /// Show the currently authenticated user
    Whoami,
    /// End the current session
    Logout,
    /// List product categories
    Categories,
    /// List products, optionally filtered
    Products(commands::catalog::ProductsArgs),
    /// Show one product with its reviews
    Product {
        /// Product id
        id: String,
    },
    /// Post a review for a product
    Review(commands::catalog::ReviewArgs),
    /// Inspect or modify the cart
    Cart {
        #[command(subcommand)]
        action: commands::cart::CartAction,
    },
    /// List past orders or show one
    Orders {
        /// Order id (omit to list all)
        id: Option<String>,
    },
    /// Place an order for the current cart
    Checkout(commands::checkout::CheckoutArgs),
    /// Retry payment for an unpaid online order
    Pay {
        /// Order id
        id: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;
    let api = ApiClient::new(&config)?;

    match cli.command {
        Commands::Register(args) => commands::auth::register(&api, &args).await?,
        Commands::Login(args) => commands::auth::login(&api, &args).await?,
        Commands::Whoami => commands::auth::whoami(&api).await?,
        Commands::Logout => commands::auth::logout(&api).await?,
        Commands::Categories => commands::catalog::categories(&api).await?,
        Commands::Products(args) => commands::catalog::products(&api, &args).await?,
        Commands::Product { id } => commands::catalog::product(&api, &id).await?,
        Commands::Review(args) => commands::catalog::review(&api, &args).await?,
        Commands::Cart { action } => commands::cart::run(&api, action).await?,
        Commands::Orders { id } => commands::orders::run(&api, id.as_deref()).await?,
        Commands::Checkout(args) => commands::checkout::checkout(&api, args).await?,
        Commands::Pay { id } => commands::checkout::pay(&api, &id).await?,
    }
    Ok(())
}
