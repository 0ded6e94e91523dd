//! Data models for the rumbo travel client.
//!
//! This module contains the data structures shared between the session
//! layer and the screens:
//!
//! - `User`: the in-memory record of a signed-in session
//! - `RegisterData`: the account-creation payload
//! - `Trip`: a bookable trip as the catalog endpoint returns it
//!
//! Wire names follow the service's Spanish field names via serde renames.

pub mod trip;
pub mod user;

pub use trip::Trip;
pub use user::{RegisterData, User};
