//! HTTP client wrapper: the single choke point for backend calls.
//!
//! ARCHITECTURE
//! ============
//! Every request passes through two interceptors. The request side attaches
//! `Authorization: Bearer <token>` when an in-memory token is present. The
//! response side turns non-2xx responses into `ApiError` and runs the 401
//! eviction path: clear persisted + in-memory session, notify eviction
//! observers, and redirect to login.
//!
//! The token is cached in memory so requests never read storage. Only this
//! module reads it.
//!
//! TRADE-OFFS
//! ==========
//! A 401 while the visitor is on the login or register screen is passed
//! through untouched. That screen is already unauthenticated and shows the
//! rejection itself, and evicting there would risk a redirect loop.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use futures::future::LocalBoxFuture;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::config::ClientConfig;
use crate::util::guard::{LOGIN_ROUTE, is_auth_route};
use crate::util::navigation::Navigator;
use crate::util::storage::SessionStorage;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

/// Outbound request relative to the API base URL.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path below the base URL, starting with `/`.
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), headers: Vec::new(), body: None }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Decode` if `body` cannot be serialized.
    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status + body of a completed HTTP exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs the actual network exchange.
///
/// Implementations return `ApiError::Network` when no response was received
/// and a `RawResponse` for every status code otherwise.
pub trait Transport: Send + Sync {
    fn send(&self, url: String, request: ApiRequest) -> LocalBoxFuture<'_, Result<RawResponse, ApiError>>;
}

type EvictListener = Arc<dyn Fn() + Send + Sync>;

pub struct HttpClient {
    base_url: String,
    transport: Arc<dyn Transport>,
    navigator: Arc<dyn Navigator>,
    storage: SessionStorage,
    token: Mutex<Option<String>>,
    /// Set once an eviction has navigated to login; cleared by a new token.
    redirect_pending: AtomicBool,
    evict_listeners: Mutex<Vec<EvictListener>>,
}

impl HttpClient {
    pub fn new(
        config: &ClientConfig,
        transport: Arc<dyn Transport>,
        navigator: Arc<dyn Navigator>,
        storage: SessionStorage,
    ) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            transport,
            navigator,
            storage,
            token: Mutex::new(None),
            redirect_pending: AtomicBool::new(false),
            evict_listeners: Mutex::new(Vec::new()),
        }
    }

    /// Replace the in-memory bearer token. Called whenever the session changes.
    pub fn set_access_token(&self, token: Option<String>) {
        let token = token.filter(|t| !t.is_empty());
        if token.is_some() {
            self.redirect_pending.store(false, Ordering::SeqCst);
        }
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = token;
    }

    /// Register a callback run after every 401 eviction.
    pub fn on_evict(&self, listener: impl Fn() + Send + Sync + 'static) {
        self.evict_listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(listener));
    }

    /// Send `request` through both interceptors.
    ///
    /// # Errors
    ///
    /// Returns the classified `ApiError` for transport failures and non-2xx
    /// responses. A 401 has already been handled by the time it is returned.
    pub async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        let request = self.prepare(request);
        let url = self.url(&request.path);
        let response = self.transport.send(url, request).await?;
        self.intercept(response)
    }

    /// `GET path` and decode the JSON body.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::send`]; also `ApiError::Decode` for an unexpected body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(ApiRequest::get(path)).await?;
        decode(&response)
    }

    /// `POST path` with a JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::send`]; also `ApiError::Decode` for an unexpected body.
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let response = self.send(ApiRequest::post(path).json(body)?).await?;
        decode(&response)
    }

    /// Request interceptor.
    pub(crate) fn prepare(&self, mut request: ApiRequest) -> ApiRequest {
        let token = self.token.lock().unwrap_or_else(PoisonError::into_inner).clone();
        if let Some(token) = token {
            request.headers.retain(|(k, _)| !k.eq_ignore_ascii_case("authorization"));
            request
                .headers
                .push(("Authorization".to_owned(), format!("Bearer {token}")));
        }
        request
    }

    /// Response interceptor.
    pub(crate) fn intercept(&self, response: RawResponse) -> Result<RawResponse, ApiError> {
        if response.is_success() {
            return Ok(response);
        }
        let err = ApiError::from_status(response.status, &response.body);
        if err.is_unauthorized() {
            self.handle_unauthorized();
        }
        Err(err)
    }

    fn handle_unauthorized(&self) {
        let path = self.navigator.current_path();
        if is_auth_route(&path) {
            log::debug!("401 on auth page {path}; leaving session untouched");
            return;
        }

        log::warn!("backend returned 401; evicting session");
        self.storage.clear();
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;

        let listeners = self.evict_listeners.lock().unwrap_or_else(PoisonError::into_inner).clone();
        for listener in listeners {
            listener();
        }

        if path != LOGIN_ROUTE && !self.redirect_pending.swap(true, Ordering::SeqCst) {
            self.navigator.replace(LOGIN_ROUTE);
        }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

fn decode<T: DeserializeOwned>(response: &RawResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
}
