//! Authentication and session lifecycle.
//!
//! This module provides:
//! - `SessionManager`: the session state machine and the single source of
//!   truth for "is a user logged in"
//! - `token`: claims-only JWT decoding with local expiry enforcement
//! - `validate`: the input checks the screens apply before any network call

pub mod session;
pub mod token;
pub mod validate;

pub use session::{SessionError, SessionManager, SessionState};
pub use token::{Claims, TokenError};
