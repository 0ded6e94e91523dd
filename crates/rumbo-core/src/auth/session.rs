//! Session lifecycle management.
//!
//! `SessionManager` owns the in-memory session and is the single source of
//! truth for "is a user logged in". It orchestrates login, registration and
//! logout against the HTTP gateway and the secure store, decodes token
//! claims, and publishes every state change on a watch channel that the
//! navigation guard (and any screen) can subscribe to.
//!
//! State transitions are all-or-nothing: a failed operation leaves the
//! previous state untouched, and local logout never waits on the network.

use std::sync::{Arc, Mutex as StdMutex, MutexGuard, PoisonError};

use thiserror::Error;
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

use crate::api::{ApiError, AuthApi, RegisterReply};
use crate::models::{RegisterData, User};
use crate::storage::{SecureStore, StoreKey};

use super::token;
use super::validate;

/// The session state machine.
///
/// `Unknown` lasts from process start until the store has been consulted;
/// the navigation guard holds off until it settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unknown,
    Authenticated(User),
    Unauthenticated,
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }
}

/// Failure taxonomy surfaced to the screens. The display form of each
/// variant is the user-facing message.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Missing or malformed input, rejected before any network call.
    #[error("{0}")]
    Validation(String),

    /// The server rejected the operation, or the login reply carried no
    /// token.
    #[error("{0}")]
    Auth(String),

    /// Transport failure: timeout, refused connection, unreachable host.
    #[error("{0}")]
    Network(String),

    /// The server answered with something the client cannot read.
    #[error("{0}")]
    ServerFormat(String),
}

/// Map a gateway failure onto the user-facing taxonomy. Transport errors
/// get the screens' friendlier wording; server-declared errors keep the
/// message the server sent.
fn classify(e: ApiError) -> SessionError {
    match e {
        ApiError::Status { message, .. } => SessionError::Auth(message),
        ApiError::Timeout => SessionError::Network(
            "The connection took too long. Check your internet connection".to_string(),
        ),
        ApiError::Connect(_) => SessionError::Network(
            "Could not reach the server. Check your connection and the server address".to_string(),
        ),
        ApiError::Network(detail) => SessionError::Network(format!("Network error: {}", detail)),
        ApiError::InvalidResponse(_) => {
            SessionError::ServerFormat("The server response was not valid JSON".to_string())
        }
    }
}

pub struct SessionManager {
    store: Arc<dyn SecureStore>,
    api: Arc<dyn AuthApi>,
    state: watch::Sender<SessionState>,
    /// Message of the most recent failed login/register, for the screens.
    last_error: StdMutex<Option<String>>,
    /// Serializes bootstrap/login/register/logout so a second concurrent
    /// call queues behind the first instead of interleaving.
    op_lock: Mutex<()>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SecureStore>, api: Arc<dyn AuthApi>) -> Self {
        let (state, _) = watch::channel(SessionState::Unknown);
        Self {
            store,
            api,
            state,
            last_error: StdMutex::new(None),
            op_lock: Mutex::new(()),
        }
    }

    /// Subscribe to session state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().user().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Message of the most recent failed operation, if any.
    pub fn last_error(&self) -> Option<String> {
        self.error_slot().clone()
    }

    fn error_slot(&self) -> MutexGuard<'_, Option<String>> {
        self.last_error.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, err: SessionError) -> SessionError {
        *self.error_slot() = Some(err.to_string());
        err
    }

    /// Settle the session state from the store, once, at process start.
    ///
    /// Both keys present and the token decodable: the session is restored.
    /// A token that cannot be decoded (malformed or expired) poisons the
    /// stored pair, so both keys are removed before settling logged-out.
    /// A missing key settles logged-out without touching the store.
    pub async fn bootstrap(&self) {
        let _op = self.op_lock.lock().await;

        let token = self.store.get(StoreKey::Token).await;
        let email = self.store.get(StoreKey::Email).await;

        let (token, email) = match (token, email) {
            (Some(token), Some(email)) => (token, email),
            _ => {
                debug!("No stored session");
                self.state.send_replace(SessionState::Unauthenticated);
                return;
            }
        };

        match token::decode_claims(&token) {
            Ok(claims) => {
                info!(user = %claims.sub, "Session restored from storage");
                self.state.send_replace(SessionState::Authenticated(User {
                    id: claims.sub,
                    email,
                    token,
                }));
            }
            Err(e) => {
                warn!(error = %e, "Stored token is unusable, clearing session");
                self.store.remove(StoreKey::Token).await;
                self.store.remove(StoreKey::Email).await;
                self.state.send_replace(SessionState::Unauthenticated);
            }
        }
    }

    /// Sign in. On success the token and the normalized email are
    /// persisted and the state flips to `Authenticated`; on any failure the
    /// previous state and the store are left exactly as they were.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), SessionError> {
        let _op = self.op_lock.lock().await;
        *self.error_slot() = None;

        let email = validate::normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(self.record(SessionError::Validation(
                "Please complete all fields".to_string(),
            )));
        }
        if !validate::is_valid_email(&email) {
            return Err(self.record(SessionError::Validation(
                "Please enter a valid email".to_string(),
            )));
        }
        if !validate::is_valid_password(password) {
            return Err(self.record(SessionError::Validation(format!(
                "Password must be at least {} characters",
                validate::MIN_PASSWORD_LENGTH
            ))));
        }

        debug!(email = %email, "Attempting login");

        let reply = match self.api.login(&email, password).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "Login request failed");
                return Err(self.record(classify(e)));
            }
        };

        let token = match reply.token {
            Some(token) if !token.is_empty() => token,
            _ => {
                warn!("Login reply carried no token");
                return Err(self.record(SessionError::Auth(
                    "No token received from the server".to_string(),
                )));
            }
        };

        let claims = match token::decode_claims(&token) {
            Ok(claims) => claims,
            Err(e) => {
                warn!(error = %e, "Login reply token could not be decoded");
                return Err(self.record(SessionError::ServerFormat(
                    "The server returned a token that could not be read".to_string(),
                )));
            }
        };

        // Persist, then publish. Nothing above this point has touched the
        // store or the in-memory state.
        self.store.set(StoreKey::Token, &token).await;
        self.store.set(StoreKey::Email, &email).await;

        info!(user = %claims.sub, email = %email, "Login successful");
        self.state.send_replace(SessionState::Authenticated(User {
            id: claims.sub,
            email,
            token,
        }));
        Ok(())
    }

    /// Create an account. A side call: the session state never changes,
    /// and the server's reply is returned for the screen to display.
    pub async fn register(&self, data: &RegisterData) -> Result<RegisterReply, SessionError> {
        let _op = self.op_lock.lock().await;
        *self.error_slot() = None;

        let email = validate::normalize_email(&data.email);
        if data.first_name.trim().is_empty()
            || data.last_name.trim().is_empty()
            || email.is_empty()
            || data.password.is_empty()
        {
            return Err(self.record(SessionError::Validation(
                "Please complete all fields".to_string(),
            )));
        }
        if !validate::is_valid_email(&email) {
            return Err(self.record(SessionError::Validation(
                "Please enter a valid email".to_string(),
            )));
        }
        if !validate::is_valid_password(&data.password) {
            return Err(self.record(SessionError::Validation(format!(
                "Password must be at least {} characters",
                validate::MIN_PASSWORD_LENGTH
            ))));
        }

        let payload = RegisterData {
            first_name: data.first_name.trim().to_string(),
            last_name: data.last_name.trim().to_string(),
            email,
            password: data.password.clone(),
        };

        debug!(email = %payload.email, "Attempting registration");

        match self.api.register(&payload).await {
            Ok(reply) => {
                info!(email = %payload.email, "Registration successful");
                Ok(reply)
            }
            Err(e) => {
                warn!(error = %e, "Registration request failed");
                Err(self.record(classify(e)))
            }
        }
    }

    /// Tear down the session.
    ///
    /// The remote invalidation call is detached best-effort: its failure is
    /// logged and dropped, and the local teardown (store wipe plus state
    /// flip) never waits on it. The user can always leave a broken session.
    pub async fn logout(&self) {
        let _op = self.op_lock.lock().await;

        // Capture the token before the store is wiped so the remote call
        // cannot race the cleanup.
        let token = self.state.borrow().user().map(|u| u.token.clone());

        if let Some(token) = token {
            let api = Arc::clone(&self.api);
            tokio::spawn(async move {
                match api.logout(&token).await {
                    Ok(()) => debug!("Remote logout acknowledged"),
                    Err(e) => {
                        warn!(error = %e, "Remote logout failed, session is already gone locally")
                    }
                }
            });
        }

        self.store.remove(StoreKey::Token).await;
        self.store.remove(StoreKey::Email).await;
        self.state.send_replace(SessionState::Unauthenticated);
        info!("Logged out");
    }
}

// ============================================================================
// Tests
// ============================================================================
