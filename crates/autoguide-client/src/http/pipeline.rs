//! Request pipeline wrapping every outgoing API call.
//!
//! Outbound: attach the stored bearer token when it is still valid; an
//! expired token is cleared as a side effect and the request goes out
//! unauthenticated rather than being blocked. Inbound: a 401 for a request
//! that carried a token clears the stored session and, when the client
//! requires authentication globally, starts the one-shot login redirect.
//! The error is re-raised to the caller either way.
//!
//! The token is read straight from storage here, not through the session
//! store, so the pipeline can be constructed independently of it.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use autoguide_auth::jwt::codec;
use autoguide_core::config::api::ApiConfig;
use autoguide_core::error::AppError;
use autoguide_core::result::AppResult;
use autoguide_core::traits::storage::{SessionStorage, TOKEN_KEY, clear_session_keys};

use crate::router::Navigator;

/// Bearer-injecting HTTP client for the AutoGuide backend.
#[derive(Debug, Clone)]
pub struct RequestPipeline {
    client: reqwest::Client,
    base_url: String,
    storage: Arc<dyn SessionStorage>,
    navigator: Arc<Navigator>,
    require_auth: bool,
}

impl RequestPipeline {
    /// Creates a pipeline from API configuration.
    pub fn new(
        config: &ApiConfig,
        storage: Arc<dyn SessionStorage>,
        navigator: Arc<Navigator>,
        require_auth: bool,
    ) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            storage,
            navigator,
            require_auth,
        })
    }

    /// GET a JSON resource.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        self.execute_json(Method::GET, path, &[], None::<&()>).await
    }

    /// GET a JSON resource with query parameters.
    pub async fn get_json_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<T> {
        self.execute_json(Method::GET, path, query, None::<&()>)
            .await
    }

    /// POST a JSON body and parse the JSON response.
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        self.execute_json(Method::POST, path, &[], Some(body)).await
    }

    /// PUT a JSON body and parse the JSON response.
    pub async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        self.execute_json(Method::PUT, path, &[], Some(body)).await
    }

    /// PATCH a JSON body and parse the JSON response.
    pub async fn patch_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        self.execute_json(Method::PATCH, path, &[], Some(body))
            .await
    }

    /// DELETE a resource, ignoring any response body.
    pub async fn delete(&self, path: &str) -> AppResult<()> {
        let (response, had_token) = self.dispatch(Method::DELETE, path, &[], None::<&()>).await?;
        self.check_status(response, had_token).await?;
        Ok(())
    }

    async fn execute_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> AppResult<T> {
        let (response, had_token) = self.dispatch(method, path, query, body).await?;
        let response = self.check_status(response, had_token).await?;
        Ok(response.json().await?)
    }

    /// Outbound stage plus the network call. The token decision is made
    /// before the request is dispatched.
    async fn dispatch<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> AppResult<(reqwest::Response, bool)> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method, url);

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let token = self.outbound_token();
        let had_token = token.is_some();
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = self.send(request, path).await?;
        Ok((response, had_token))
    }

    async fn send(&self, request: RequestBuilder, path: &str) -> AppResult<reqwest::Response> {
        debug!(path = %path, "Dispatching API request");
        Ok(request.send().await?)
    }

    /// Reads the stored token for this request. An expired token is cleared
    /// from storage and the request proceeds unauthenticated.
    fn outbound_token(&self) -> Option<String> {
        let token = self.storage.get(TOKEN_KEY)?;
        if token.is_empty() {
            return None;
        }
        if codec::is_expired(&token) {
            warn!("Stored token expired, clearing session before dispatch");
            clear_session_keys(self.storage.as_ref());
            return None;
        }
        Some(token)
    }

    /// Inbound stage: map non-success statuses to errors, handling 401.
    async fn check_status(
        &self,
        response: reqwest::Response,
        had_token: bool,
    ) -> AppResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = error_message(status, &response.text().await.unwrap_or_default());

        if status == StatusCode::UNAUTHORIZED && had_token {
            self.on_unauthorized();
        }

        let error = match status {
            StatusCode::UNAUTHORIZED => AppError::authentication(message),
            StatusCode::FORBIDDEN => AppError::authorization(message),
            _ => AppError::external(message),
        };
        Err(error.with_status(status.as_u16()))
    }

    /// Session cleanup and the one-shot login redirect after a 401 that
    /// carried a token.
    fn on_unauthorized(&self) {
        warn!("Backend rejected the bearer token, clearing session");
        clear_session_keys(self.storage.as_ref());

        if !self.require_auth {
            return;
        }
        if self.navigator.at_auth_location() {
            return;
        }
        self.navigator.begin_login_redirect(&self.navigator.location());
    }
}

/// Prefers the backend's `message` field, then a non-blank body, then the
/// status line, matching what the views display.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            if !message.is_empty() {
                return message.to_string();
            }
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() && !trimmed.starts_with('{') {
        return trimmed.to_string();
    }

    format!(
        "Request failed with status {}",
        status.canonical_reason().unwrap_or(status.as_str())
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_the_backend_message_field() {
        let body = r#"{"code":"ROOM_NOT_FOUND","message":"Room not found","timestamp":"2026-01-01T00:00:00Z"}"#;
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, body),
            "Room not found"
        );
    }

    #[test]
    fn error_message_falls_back_to_plain_text_bodies() {
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "upstream unavailable\n"),
            "upstream unavailable"
        );
    }

    #[test]
    fn error_message_falls_back_to_the_status_line() {
        assert_eq!(
            error_message(StatusCode::UNAUTHORIZED, ""),
            "Request failed with status Unauthorized"
        );
        assert_eq!(
            error_message(StatusCode::UNAUTHORIZED, r#"{"code":"X"}"#),
            "Request failed with status Unauthorized"
        );
    }
}
