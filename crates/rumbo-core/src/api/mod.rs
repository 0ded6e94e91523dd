//! HTTP gateway module for the rumbo travel service.
//!
//! This module provides the `ApiClient` for communicating with the booking
//! service API: login, registration, best-effort logout, and the
//! authenticated data reads the screens consume.
//!
//! Authenticated requests carry a JWT bearer token read from the secure
//! store; the `AuthApi` trait is the seam the session layer depends on.

pub mod client;
pub mod error;

pub use client::{ApiClient, AuthApi, LoginReply, Payload, RegisterReply, RequestOptions};
pub use error::ApiError;
