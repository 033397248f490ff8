//! Scripted transport and fixtures shared by unit tests.

use std::sync::Mutex;

use futures::future::LocalBoxFuture;

use super::error::ApiError;
use super::http::{ApiRequest, RawResponse, Transport};
use super::types::{Role, UserProfile, UserStatus};

/// Replays queued responses in order; `200 {}` once the queue is empty.
pub(crate) struct MockTransport {
    responses: Mutex<Vec<Result<RawResponse, ApiError>>>,
    sent: Mutex<Vec<(String, ApiRequest)>>,
}

impl MockTransport {
    pub(crate) fn new(responses: Vec<RawResponse>) -> Self {
        Self::with_results(responses.into_iter().map(Ok).collect())
    }

    pub(crate) fn with_results(responses: Vec<Result<RawResponse, ApiError>>) -> Self {
        Self { responses: Mutex::new(responses), sent: Mutex::new(Vec::new()) }
    }

    pub(crate) fn push(&self, response: RawResponse) {
        self.responses.lock().unwrap().push(Ok(response));
    }

    pub(crate) fn sent(&self) -> Vec<(String, ApiRequest)> {
        self.sent.lock().unwrap().clone()
    }
}

impl Transport for MockTransport {
    fn send(&self, url: String, request: ApiRequest) -> LocalBoxFuture<'_, Result<RawResponse, ApiError>> {
        self.sent.lock().unwrap().push((url, request));
        let mut responses = self.responses.lock().unwrap();
        let next = if responses.is_empty() { Ok(RawResponse::new(200, "{}")) } else { responses.remove(0) };
        Box::pin(async move { next })
    }
}

pub(crate) fn profile(username: &str, role: Role) -> UserProfile {
    UserProfile {
        id: format!("id-{username}"),
        username: username.to_owned(),
        role,
        status: UserStatus::Active,
        thread_count: 0,
        reply_count: 0,
        created_at: None,
    }
}

/// Successful login/register body for `user`.
pub(crate) fn auth_ok(access: &str, refresh: &str, user: &UserProfile) -> RawResponse {
    let body = serde_json::json!({
        "access_token": access,
        "refresh_token": refresh,
        "token_type": "Bearer",
        "expires_in": 900,
        "user": user,
    });
    RawResponse::new(200, body.to_string())
}

pub(crate) fn unauthorized() -> RawResponse {
    RawResponse::new(401, r#"{"message":"token expired","code":"UNAUTHORIZED"}"#)
}
