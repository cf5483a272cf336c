//! Locally held authentication state.

use crate::api::types::User;

/// The app shell's view of who is signed in.
///
/// The session token itself lives on the [`crate::ApiClient`]; this holds
/// only the profile for display. Long-lived shells keep one instance across
/// screens; short-lived ones (like the CLI auth commands) build it per
/// invocation from a fresh profile fetch.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    user: Option<User>,
}

impl AuthState {
    /// The signed-out state.
    #[must_use]
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// Record a successful login or registration.
    pub fn sign_in(&mut self, user: User) {
        self.user = Some(user);
    }

    /// Drop the signed-in user.
    pub fn sign_out(&mut self) {
        self.user = None;
    }

    /// The signed-in user, if any.
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Whether a user is signed in.
    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }
}
