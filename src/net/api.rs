//! Typed helpers for the backend auth endpoints.
//!
//! Resource endpoints (categories, threads, replies, moderation, admin) go
//! through the same `HttpClient` and inherit bearer injection and 401
//! eviction without extra code here.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::error::ApiError;
use super::http::HttpClient;
use super::types::{AuthResponse, Credentials, UserProfile};

pub const LOGIN_ENDPOINT: &str = "/auth/login";
pub const REGISTER_ENDPOINT: &str = "/auth/register";
pub const CURRENT_USER_ENDPOINT: &str = "/auth/me";

/// `POST /auth/login`.
///
/// # Errors
///
/// Returns the backend's rejection (usually `Validation` or `Unauthorized`)
/// or a transport/decode failure.
pub async fn login(http: &HttpClient, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
    require_access_token(http.post_json(LOGIN_ENDPOINT, credentials).await?)
}

/// `POST /auth/register`. Success establishes a session like login does.
///
/// # Errors
///
/// Returns the backend's rejection (e.g. a taken username) or a
/// transport/decode failure.
pub async fn register(http: &HttpClient, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
    require_access_token(http.post_json(REGISTER_ENDPOINT, credentials).await?)
}

/// `GET /auth/me` for the profile behind the current bearer token.
///
/// # Errors
///
/// Returns `Unauthorized` when the token is missing or expired (after the
/// client has evicted the session), or a transport/decode failure.
pub async fn fetch_current_user(http: &HttpClient) -> Result<UserProfile, ApiError> {
    http.get_json(CURRENT_USER_ENDPOINT).await
}

/// An auth payload without an access token cannot establish a session.
fn require_access_token(resp: AuthResponse) -> Result<AuthResponse, ApiError> {
    if resp.access_token.trim().is_empty() {
        return Err(ApiError::Decode("auth response carried an empty access token".to_owned()));
    }
    Ok(resp)
}
