//! Route state with idempotent replacement.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use super::route::Route;

/// Navigation state carried on the watch channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavState {
    pub route: Route,
    /// Set once the first screen is mounted. The guard never acts before.
    pub ready: bool,
}

/// Cheaply cloneable handle to the navigation state.
///
/// `replace` models history replacement: the abandoned route is not kept,
/// so backing out of a redirect cannot resurrect a screen the session no
/// longer allows.
#[derive(Clone)]
pub struct Router {
    state: Arc<watch::Sender<NavState>>,
}

impl Router {
    pub fn new(initial: Route) -> Self {
        let (tx, _) = watch::channel(NavState {
            route: initial,
            ready: false,
        });
        Self { state: Arc::new(tx) }
    }

    /// Subscribe to navigation changes.
    pub fn subscribe(&self) -> watch::Receiver<NavState> {
        self.state.subscribe()
    }

    pub fn current(&self) -> Route {
        self.state.borrow().route
    }

    pub fn is_ready(&self) -> bool {
        self.state.borrow().ready
    }

    /// Replace the current route. Replacing with the route already active
    /// is a no-op that notifies nobody, so redirect rules cannot loop.
    pub fn replace(&self, route: Route) {
        self.state.send_if_modified(|nav| {
            if nav.route == route {
                return false;
            }
            debug!(from = ?nav.route, to = ?route, "Route replaced");
            nav.route = route;
            true
        });
    }

    /// Mark the navigation subsystem mounted. Idempotent.
    pub fn set_ready(&self) {
        self.state.send_if_modified(|nav| {
            if nav.ready {
                return false;
            }
            nav.ready = true;
            true
        });
    }
}

// ============================================================================
// Tests
// ============================================================================
