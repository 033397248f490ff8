//! `Transport` implementations.
//!
//! Browser build: real HTTP via `gloo-net`. Elsewhere: a stub that fails
//! every call, since the backend is only reachable from the browser.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::sync::Arc;

use futures::future::LocalBoxFuture;

use super::error::ApiError;
use super::http::{ApiRequest, RawResponse, Transport};

#[cfg(feature = "csr")]
use super::http::Method;

/// Transport used by the app for the current build target.
pub fn default_transport() -> Arc<dyn Transport> {
    #[cfg(feature = "csr")]
    {
        Arc::new(GlooTransport)
    }
    #[cfg(not(feature = "csr"))]
    {
        Arc::new(OfflineTransport)
    }
}

/// Fetch-backed transport.
#[cfg(feature = "csr")]
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

#[cfg(feature = "csr")]
impl Transport for GlooTransport {
    fn send(&self, url: String, request: ApiRequest) -> LocalBoxFuture<'_, Result<RawResponse, ApiError>> {
        Box::pin(async move {
            use gloo_net::http::Request;

            let mut builder = match request.method {
                Method::Get => Request::get(&url),
                Method::Post => Request::post(&url),
                Method::Put => Request::put(&url),
                Method::Patch => Request::patch(&url),
                Method::Delete => Request::delete(&url),
            };
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            let prepared = match &request.body {
                Some(body) => builder.json(body),
                None => builder.build(),
            }
            .map_err(|e| ApiError::Network(e.to_string()))?;

            let resp = prepared.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
            let status = resp.status();
            let body = resp.text().await.unwrap_or_else(|e| {
                log::debug!("failed to read {status} response body: {e}");
                String::new()
            });
            Ok(RawResponse { status, body })
        })
    }
}

/// Fails every request with `ApiError::Network`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineTransport;

impl Transport for OfflineTransport {
    fn send(&self, url: String, _request: ApiRequest) -> LocalBoxFuture<'_, Result<RawResponse, ApiError>> {
        Box::pin(async move { Err(ApiError::Network(format!("{url}: not available outside the browser"))) })
    }
}
