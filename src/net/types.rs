//! Wire DTOs for the auth endpoints and the persisted user profile.
//!
//! DESIGN
//! ======
//! These types mirror backend JSON payloads so the profile can be stored and
//! restored with serde without a separate persistence schema.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Account role. Closed set; drives route access and landing pages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Moderator,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::User, Role::Moderator, Role::Admin];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Moderator => "moderator",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Moderation status of an account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Suspended,
    Banned,
}

/// Cached profile of the signed-in user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique user identifier (UUID string).
    pub id: String,
    /// Anonymous handle chosen at registration.
    pub username: String,
    pub role: Role,
    pub status: UserStatus,
    /// Number of threads started by this user.
    #[serde(default)]
    pub thread_count: u32,
    /// Number of replies posted by this user.
    #[serde(default)]
    pub reply_count: u32,
    /// Account creation timestamp (RFC 3339), if the backend sends it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Body returned by both `POST /auth/login` and `POST /auth/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Usually `"Bearer"`.
    pub token_type: String,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
    pub user: UserProfile,
}

/// Username + password pair sent to the login and register endpoints.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Error payload the backend attaches to non-2xx responses.
///
/// Both fields are optional; the UI shows `message` verbatim when present.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

impl ErrorBody {
    /// Parse an error body, yielding empty detail when it is not our JSON shape.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }
}
