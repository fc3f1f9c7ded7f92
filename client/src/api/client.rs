use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method};

use crate::config;
use crate::credentials::{CredentialStore, MemoryStore, TOKEN_KEY};

use super::approvals::DecodedBody;
use super::types::ApiError;

pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
    credentials: Arc<dyn CredentialStore>,
    attempt_timeout: Option<Duration>,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
            credentials: Arc::new(MemoryStore::new()),
            attempt_timeout: None,
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Self::new()
        }
    }

    pub fn with_credentials(mut self, credentials: Arc<dyn CredentialStore>) -> Self {
        self.credentials = credentials;
        self
    }

    /// Upper bound for each individual HTTP attempt. Unset leaves the
    /// transport default in place.
    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = Some(timeout);
        self
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.client
    }

    pub(crate) fn attempt_timeout(&self) -> Option<Duration> {
        self.attempt_timeout
    }

    pub(crate) fn resolved_base_url(&self) -> String {
        match &self.base_url {
            Some(base) => base.clone(),
            None => config::api_base_url(),
        }
    }

    pub(crate) fn bearer_token(&self) -> Result<String, ApiError> {
        self.credentials
            .get_item(TOKEN_KEY)
            .ok_or(ApiError::AuthenticationRequired)
    }

    pub(crate) fn auth_headers(&self) -> Result<HeaderMap, ApiError> {
        let token = self.bearer_token()?;
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            format!("Bearer {}", token)
                .parse()
                .map_err(|_| ApiError::RequestFailed("invalid token format".into()))?,
        );
        Ok(headers)
    }

    pub(crate) async fn map_json_response<T>(
        &self,
        method: Method,
        response: reqwest::Response,
    ) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();
        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| ApiError::InvalidResponse(e.to_string()));
        }

        let raw = response.text().await.unwrap_or_default();
        let body = DecodedBody::from_raw(raw);
        if status.is_client_error() {
            Err(ApiError::ClientRejected {
                method,
                status,
                message: body.message(status),
            })
        } else {
            Err(ApiError::RequestFailed(format!(
                "{} returned {}: {}",
                method,
                status,
                body.message(status)
            )))
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}
