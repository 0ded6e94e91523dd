//! Navigation: the route table, the router, and the session guard.
//!
//! `Router` carries the current route and a readiness flag on a watch
//! channel. `guard` subscribes to both the session state and the route and
//! forces redirects so that protected screens are unreachable while logged
//! out, and auth screens unreachable while logged in.

pub mod guard;
pub mod route;
pub mod router;

pub use route::{Route, RouteGroup};
pub use router::{NavState, Router};
