//! Auth Calls
//!
//! Sign-up, sign-in and sign-out against `/auth/*`.

use serde_json::Value;

use super::{ApiClient, HttpMethod, Transport};
use crate::error::ApiError;
use crate::models::{Credentials, LoginResponse};

/// Which form the auth view is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    SignIn,
    SignUp,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::SignIn => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::SignIn,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            AuthMode::SignIn => "Welcome Back",
            AuthMode::SignUp => "Join Us",
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            AuthMode::SignIn => "Sign In",
            AuthMode::SignUp => "Create Account",
        }
    }

    pub fn switch_prompt(self) -> &'static str {
        match self {
            AuthMode::SignIn => "Don't have an account? Sign up",
            AuthMode::SignUp => "Already have an account? Sign in",
        }
    }
}

impl<T: Transport> ApiClient<T> {
    /// `POST /auth/signup`. Does not start a session.
    pub async fn signup(&self, credentials: &Credentials) -> Result<Value, ApiError> {
        let request = self.anonymous(HttpMethod::Post, "/auth/signup").json(credentials)?;
        self.execute(request).await
    }

    /// `POST /auth/login`. A returned token is attached to the session.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let request = self.anonymous(HttpMethod::Post, "/auth/login").json(credentials)?;
        let value = self.execute(request).await?;
        let response: LoginResponse = serde_json::from_value(value).unwrap_or_default();

        match response.token.as_deref().filter(|t| !t.is_empty()) {
            Some(token) => {
                self.session().attach(token);
                log::info!("[AUTH] Signed in as {}", credentials.username);
            }
            None => log::warn!("[AUTH] Login succeeded without a token"),
        }
        Ok(response)
    }

    /// Drop the session token locally. No request is made.
    pub fn logout(&self) {
        self.session().clear();
        log::info!("[AUTH] Signed out");
    }
}

/// Run the auth form's submit: sign in, or sign up and then sign in with the
/// same credentials. A failed sign-up stops before the login call.
pub async fn authenticate<T: Transport>(
    client: &ApiClient<T>,
    mode: AuthMode,
    credentials: &Credentials,
) -> Result<(), ApiError> {
    if mode == AuthMode::SignUp {
        client.signup(credentials).await?;
    }
    client.login(credentials).await?;
    Ok(())
}
