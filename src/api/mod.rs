//! Student API Client
//!
//! One method per remote operation, organized by domain. The client owns the
//! injected [`Session`] and attaches its bearer token to student calls.

mod auth;
mod students;
mod transport;

#[cfg(test)]
pub(crate) mod testing;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config;
use crate::error::ApiError;
use crate::session::Session;

pub use auth::*;
pub use students::*;
pub use transport::*;

#[derive(Clone, Debug)]
pub struct ApiClient<T = FetchTransport> {
    base_url: String,
    session: Session,
    transport: T,
}

impl ApiClient<FetchTransport> {
    /// Client for the configured server, sending with browser `fetch`
    pub fn browser(session: Session) -> Self {
        Self::new(config::api_base_url(), session, FetchTransport)
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(base_url: impl Into<String>, session: Session, transport: T) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
            transport,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request without credentials
    fn anonymous(&self, method: HttpMethod, path: &str) -> ApiRequest {
        ApiRequest::new(method, self.url(path))
    }

    /// Request carrying the session's bearer token, if any
    fn authorized(&self, method: HttpMethod, path: &str) -> ApiRequest {
        let token = self.session.token();
        ApiRequest::new(method, self.url(path)).bearer(token.as_deref())
    }

    /// Send and interpret the response: non-2xx becomes [`ApiError::Status`],
    /// an empty 2xx body reads as JSON `null`.
    async fn execute(&self, request: ApiRequest) -> Result<Value, ApiError> {
        log::debug!("[API] {} {}", request.method.as_str(), request.url);
        let response = self.transport.send(&request).await.map_err(|e| {
            log::error!("[API] {} {} failed: {}", request.method.as_str(), request.url, e);
            e
        })?;

        if !response.is_success() {
            let err = ApiError::from_response(response.status, &response.body);
            log::warn!("[API] {} {} -> {}: {}", request.method.as_str(), request.url, response.status, err);
            return Err(err);
        }

        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn execute_as<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        let value = self.execute(request).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }
}
