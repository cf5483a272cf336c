//! Authentication operations.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use constructo_core::Email;

use super::{ApiClient, ApiError, types::User};

#[derive(Serialize)]
struct RegisterRequest<'a> {
    email: &'a str,
    password: &'a str,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<&'a str>,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Login/registration response carrying the session token.
#[derive(Deserialize)]
struct SessionResponse {
    user: User,
    token: String,
}

impl ApiClient {
    /// Register a new account and start a session.
    ///
    /// On success the returned token is stored on the client and attached to
    /// subsequent requests.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` with the server detail when the email is
    /// already registered.
    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        email: &Email,
        password: &str,
        name: &str,
        phone: Option<&str>,
    ) -> Result<User, ApiError> {
        let response: SessionResponse = self
            .post(
                "/auth/register",
                &RegisterRequest {
                    email: email.as_str(),
                    password,
                    name,
                    phone,
                },
            )
            .await?;

        self.set_session_token(SecretString::from(response.token));
        tracing::info!(user_id = %response.user.id, "Registered new account");
        Ok(response.user)
    }

    /// Log in with email and password, starting a session.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` for bad credentials.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &Email, password: &str) -> Result<User, ApiError> {
        let response: SessionResponse = self
            .post(
                "/auth/login",
                &LoginRequest {
                    email: email.as_str(),
                    password,
                },
            )
            .await?;

        self.set_session_token(SecretString::from(response.token));
        tracing::info!(user_id = %response.user.id, "Logged in");
        Ok(response.user)
    }

    /// End the current session.
    ///
    /// The local token is dropped even if the server call fails; the session
    /// is unusable either way.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), ApiError> {
        let result: Result<super::MessageResponse, ApiError> =
            self.post_empty("/auth/logout").await;
        self.clear_session_token();
        result.map(|_| ())
    }

    /// Fetch the currently authenticated user.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` when no valid session is held.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.get("/auth/me").await
    }
}
