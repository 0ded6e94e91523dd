//! Core library for the rumbo travel client.
//!
//! Everything the screens need to sign a user in, keep them signed in, and
//! talk to the booking service:
//!
//! - `storage`: fail-safe secure key-value storage for the token and email
//! - `api`: the HTTP gateway and typed auth endpoints
//! - `auth`: the session state machine, token claims, and input checks
//! - `nav`: route table, router, and the session-driven redirect guard
//! - `models`: user, registration, and trip data types
//! - `config`: on-disk configuration with environment overrides

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod nav;
pub mod storage;

pub use api::{ApiClient, ApiError, AuthApi};
pub use auth::{SessionError, SessionManager, SessionState};
pub use config::Config;
pub use models::User;
pub use nav::{Route, Router};
pub use storage::{SecureStore, StoreKey};
