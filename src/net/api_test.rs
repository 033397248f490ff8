use super::*;
use crate::config::ClientConfig;
use crate::net::http::{Method, RawResponse};
use crate::net::test_support::{MockTransport, auth_ok, profile};
use crate::net::types::Role;
use crate::util::navigation::MemoryNavigator;
use crate::util::storage::{MemoryStorage, SessionStorage};
use futures::executor::block_on;
use std::sync::Arc;

fn client(transport: Arc<MockTransport>, path: &str) -> HttpClient {
    HttpClient::new(
        &ClientConfig { api_base_url: "http://api.test".to_owned() },
        transport,
        Arc::new(MemoryNavigator::new(path)),
        SessionStorage::new(Arc::new(MemoryStorage::new())),
    )
}

#[test]
fn login_posts_credentials_and_decodes_auth_response() {
    let user = profile("owl", Role::User);
    let transport = Arc::new(MockTransport::new(vec![auth_ok("at", "rt", &user)]));
    let http = client(transport.clone(), "/login");

    let resp = block_on(login(&http, &Credentials::new("owl", "pw"))).unwrap();

    assert_eq!(resp.access_token, "at");
    assert_eq!(resp.user, user);
    let (url, req) = &transport.sent()[0];
    assert_eq!(url, "http://api.test/auth/login");
    assert_eq!(req.method, Method::Post);
    assert_eq!(req.body, Some(serde_json::json!({"username": "owl", "password": "pw"})));
}

#[test]
fn register_hits_register_endpoint() {
    let user = profile("newbie", Role::User);
    let transport = Arc::new(MockTransport::new(vec![auth_ok("at", "rt", &user)]));
    let http = client(transport.clone(), "/register");

    block_on(register(&http, &Credentials::new("newbie", "pw"))).unwrap();

    assert_eq!(transport.sent()[0].0, "http://api.test/auth/register");
}

#[test]
fn login_rejection_keeps_server_message() {
    let transport = Arc::new(MockTransport::new(vec![RawResponse::new(
        401,
        r#"{"message":"Invalid username or password","code":"INVALID_CREDENTIALS"}"#,
    )]));
    let http = client(transport, "/login");

    let err = block_on(login(&http, &Credentials::new("owl", "nope"))).unwrap_err();

    assert_eq!(err.user_message("Login failed"), "Invalid username or password");
}

#[test]
fn fetch_current_user_gets_profile() {
    let user = profile("mod", Role::Moderator);
    let body = serde_json::to_string(&user).unwrap();
    let transport = Arc::new(MockTransport::new(vec![RawResponse::new(200, body)]));
    let http = client(transport.clone(), "/moderation");

    assert_eq!(block_on(fetch_current_user(&http)).unwrap(), user);
    assert_eq!(transport.sent()[0].1.method, Method::Get);
    assert_eq!(transport.sent()[0].0, "http://api.test/auth/me");
}

#[test]
fn login_rejects_empty_access_token() {
    let user = profile("owl", Role::User);
    let transport = Arc::new(MockTransport::new(vec![auth_ok("", "rt", &user)]));
    let http = client(transport, "/login");

    let err = block_on(login(&http, &Credentials::new("owl", "pw"))).unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn register_rejects_blank_access_token() {
    let user = profile("newbie", Role::User);
    let transport = Arc::new(MockTransport::new(vec![auth_ok("  ", "rt", &user)]));
    let http = client(transport, "/register");

    let err = block_on(register(&http, &Credentials::new("newbie", "pw"))).unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
}
