//! Authentication commands.
//!
//! The CLI is stateless between invocations: `login` prints the session
//! token, and later commands pick it up from `CONSTRUCTO_SESSION_TOKEN`.

use clap::Args;
use secrecy::ExposeSecret;
use thiserror::Error;

use constructo_client::{ApiClient, ApiError, AuthState};
use constructo_core::{Email, EmailError};

/// Errors that can occur during auth commands.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Args)]
pub struct RegisterArgs {
    /// Email address
    #[arg(short, long)]
    pub email: String,

    /// Password
    #[arg(short, long)]
    pub password: String,

    /// Display name
    #[arg(short, long)]
    pub name: String,

    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,
}

#[derive(Args)]
pub struct LoginArgs {
    /// Email address
    #[arg(short, long)]
    pub email: String,

    /// Password
    #[arg(short, long)]
    pub password: String,
}

pub async fn register(api: &ApiClient, args: &RegisterArgs) -> Result<(), AuthError> {
    let email = Email::parse(&args.email)?;

    let mut auth = AuthState::signed_out();
    auth.sign_in(
        api.register(&email, &args.password, &args.name, args.phone.as_deref())
            .await?,
    );

    println!("Registered:");
    print_user(&auth);
    print_token_hint(api);
    Ok(())
}

pub async fn login(api: &ApiClient, args: &LoginArgs) -> Result<(), AuthError> {
    let email = Email::parse(&args.email)?;

    let mut auth = AuthState::signed_out();
    auth.sign_in(api.login(&email, &args.password).await?);

    println!("Logged in:");
    print_user(&auth);
    print_token_hint(api);
    Ok(())
}

pub async fn whoami(api: &ApiClient) -> Result<(), AuthError> {
    let mut auth = AuthState::signed_out();
    auth.sign_in(api.current_user().await?);
    print_user(&auth);
    Ok(())
}

fn print_user(auth: &AuthState) {
    let Some(user) = auth.user() else {
        println!("Not signed in");
        return;
    };
    println!("{} <{}>", user.name, user.email);
    if let Some(phone) = &user.phone {
        println!("phone: {phone}");
    }
}

pub async fn logout(api: &ApiClient) -> Result<(), AuthError> {
    api.logout().await?;
    println!("Logged out; unset CONSTRUCTO_SESSION_TOKEN");
    Ok(())
}

fn print_token_hint(api: &ApiClient) {
    // Surface the token once so the user can export it; every other path
    // keeps it redacted.
    if let Some(token) = api.session_token() {
        println!("export CONSTRUCTO_SESSION_TOKEN={}", token.expose_secret());
    }
}
