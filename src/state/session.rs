//! Session state container for the running app instance.
//!
//! SYSTEM CONTEXT
//! ==============
//! `SessionStore` owns "who is logged in". It is seeded from persisted
//! storage at construction, mutated only by login, register, logout, and 401
//! eviction, and read by route guards and components through `snapshot` or
//! a subscription. The Leptos layer mirrors it into an `RwSignal<Session>`.
//!
//! INVARIANTS
//! ==========
//! - Token and user are set and cleared together; a subscriber never sees
//!   one without the other.
//! - `is_authenticated` is derived from the token on every call.
//! - Every transition writes storage, then the HTTP client's in-memory
//!   token, then swaps the whole triple under one lock and notifies once.
//! - After a 401 eviction the HTTP client owns the redirect to login;
//!   `evicted` stays set until a session is installed or cleared.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::net::api;
use crate::net::error::ApiError;
use crate::net::http::HttpClient;
use crate::net::types::{AuthResponse, Credentials, Role, UserProfile};
use crate::util::storage::SessionStorage;

/// The (access token, refresh token, user) triple.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub access_token: Option<String>,
    /// Persisted for a future refresh flow; never exchanged by this client.
    pub refresh_token: Option<String>,
    pub user: Option<UserProfile>,
}

impl Session {
    /// An empty token counts as absent, the same as in storage and the
    /// HTTP client.
    pub fn from_auth(resp: AuthResponse) -> Self {
        let Some(access_token) = Some(resp.access_token).filter(|t| !t.is_empty()) else {
            return Self::default();
        };
        Self {
            access_token: Some(access_token),
            refresh_token: Some(resp.refresh_token).filter(|t| !t.is_empty()),
            user: Some(resp.user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// Role of the signed-in user, `None` when anonymous.
    pub fn role(&self) -> Option<Role> {
        if !self.is_authenticated() {
            return None;
        }
        self.user.as_ref().map(|u| u.role)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .field("user", &self.user)
            .finish()
    }
}

pub type SubscriptionId = u64;

type Subscriber = Arc<dyn Fn(&Session) + Send + Sync>;

struct Shared {
    session: Mutex<Session>,
    subscribers: Mutex<Vec<(SubscriptionId, Subscriber)>>,
    next_id: AtomicU64,
    evicted: AtomicBool,
}

impl Shared {
    fn current(&self) -> Session {
        self.session.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Swap the whole triple; notify only if something changed.
    fn replace(&self, next: Session) {
        {
            let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
            if *session == next {
                return;
            }
            *session = next.clone();
        }
        let subscribers = self.subscribers.lock().unwrap_or_else(PoisonError::into_inner).clone();
        for (_, subscriber) in subscribers {
            subscriber(&next);
        }
    }
}

pub struct SessionStore {
    shared: Arc<Shared>,
    http: Arc<HttpClient>,
    storage: SessionStorage,
}

impl SessionStore {
    /// Load the persisted session and wire eviction from `http` back into
    /// this store. No network call.
    pub fn new(http: Arc<HttpClient>, storage: SessionStorage) -> Self {
        let session = load_session(&storage);
        http.set_access_token(session.access_token.clone());

        let shared = Arc::new(Shared {
            session: Mutex::new(session),
            subscribers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            evicted: AtomicBool::new(false),
        });

        let weak = Arc::downgrade(&shared);
        http.on_evict(move || {
            if let Some(shared) = weak.upgrade() {
                // Set before notifying so guards reacting to the reset see it.
                shared.evicted.store(true, Ordering::SeqCst);
                shared.replace(Session::default());
            }
        });

        Self { shared, http, storage }
    }

    pub fn snapshot(&self) -> Session {
        self.shared.current()
    }

    pub fn is_authenticated(&self) -> bool {
        self.shared.current().is_authenticated()
    }

    pub fn role(&self) -> Option<Role> {
        self.shared.current().role()
    }

    /// Whether the current anonymous state came from a 401 eviction, in
    /// which case the HTTP client has already navigated to login.
    pub fn evicted(&self) -> bool {
        self.shared.evicted.load(Ordering::SeqCst)
    }

    /// Client for resource calls; carries this session's bearer token.
    pub fn http(&self) -> &Arc<HttpClient> {
        &self.http
    }

    /// Call `subscriber` with the new triple after every change.
    pub fn subscribe(&self, subscriber: impl Fn(&Session) + Send + Sync + 'static) -> SubscriptionId {
        let id = self.shared.next_id.fetch_add(1, Ordering::Relaxed);
        self.shared
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(subscriber)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.shared.subscribers.lock().unwrap_or_else(PoisonError::into_inner);
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        subscribers.len() != before
    }

    /// Authenticate and install the returned session.
    ///
    /// # Errors
    ///
    /// Propagates the backend or transport error unchanged; the session is
    /// not touched on failure.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ApiError> {
        let credentials = Credentials::new(username, password);
        match api::login(&self.http, &credentials).await {
            Ok(resp) => {
                log::info!("signed in as {} ({})", resp.user.username, resp.user.role);
                Ok(self.set_session(resp))
            }
            Err(e) => {
                log::debug!("login rejected: {e}");
                Err(e)
            }
        }
    }

    /// Create an account; success signs the new account in.
    ///
    /// # Errors
    ///
    /// Propagates the backend or transport error unchanged; the session is
    /// not touched on failure.
    pub async fn register(&self, username: &str, password: &str) -> Result<Session, ApiError> {
        let credentials = Credentials::new(username, password);
        match api::register(&self.http, &credentials).await {
            Ok(resp) => {
                log::info!("registered and signed in as {}", resp.user.username);
                Ok(self.set_session(resp))
            }
            Err(e) => {
                log::debug!("registration rejected: {e}");
                Err(e)
            }
        }
    }

    /// Install an auth payload in storage, the HTTP client, and state.
    pub fn set_session(&self, resp: AuthResponse) -> Session {
        let session = Session::from_auth(resp);
        self.storage.set_access_token(session.access_token.as_deref());
        self.storage.set_refresh_token(session.refresh_token.as_deref());
        self.storage.set_user(session.user.as_ref());
        self.http.set_access_token(session.access_token.clone());
        self.shared.evicted.store(false, Ordering::SeqCst);
        self.shared.replace(session.clone());
        session
    }

    /// User-initiated sign out.
    pub fn logout(&self) {
        if self.is_authenticated() {
            log::info!("signed out");
        }
        self.clear_session();
    }

    /// Reset all three slots, durable and in-memory. Idempotent.
    pub fn clear_session(&self) {
        self.storage.clear();
        self.http.set_access_token(None);
        self.shared.evicted.store(false, Ordering::SeqCst);
        self.shared.replace(Session::default());
    }

    /// Re-fetch the signed-in user's profile, keeping both tokens.
    ///
    /// Returns `Ok(None)` without a network call when anonymous. A response
    /// that arrives after the session changed is discarded.
    ///
    /// # Errors
    ///
    /// Propagates the backend or transport error. A 401 has already evicted
    /// the session by the time it is returned.
    pub async fn refresh_profile(&self) -> Result<Option<UserProfile>, ApiError> {
        let before = self.snapshot();
        if !before.is_authenticated() {
            return Ok(None);
        }
        let user = api::fetch_current_user(&self.http).await?;

        let current = self.snapshot();
        if current.access_token != before.access_token {
            log::debug!("session changed while refreshing profile; discarding");
            return Ok(None);
        }
        self.storage.set_user(Some(&user));
        self.shared.replace(Session { user: Some(user.clone()), ..current });
        Ok(Some(user))
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("session", &self.snapshot())
            .finish_non_exhaustive()
    }
}

/// Read the persisted triple. Anything short of token + decodable user is
/// treated as anonymous and purged.
fn load_session(storage: &SessionStorage) -> Session {
    let access_token = storage.access_token();
    let refresh_token = storage.refresh_token();
    let user = storage.user();

    match (access_token, user) {
        (Some(access_token), Some(user)) => {
            log::info!("restored session for {}", user.username);
            Session { access_token: Some(access_token), refresh_token, user: Some(user) }
        }
        (None, None) if refresh_token.is_none() => Session::default(),
        _ => {
            log::warn!("discarding incomplete persisted session");
            storage.clear();
            Session::default()
        }
    }
}
