//! Session-driven navigation guard.
//!
//! A single reactive rule, re-evaluated whenever the session state or the
//! route changes: logged-out users cannot sit on tab screens, logged-in
//! users cannot sit on auth screens. Applying the redirect is the only
//! side effect.

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::auth::SessionState;

use super::route::{Route, RouteGroup};
use super::router::Router;

/// Decide where the client must be, given where it is.
///
/// Returns `None` when no redirect is due: the navigation subsystem has not
/// mounted yet, the session restore has not settled, or the current route
/// is already allowed for the session state.
pub fn redirect_target(session: &SessionState, route: Route, ready: bool) -> Option<Route> {
    if !ready {
        return None;
    }
    let target = match session {
        // The restore is still in flight; settling re-triggers the rule.
        SessionState::Unknown => return None,
        SessionState::Unauthenticated => {
            if route.group() == RouteGroup::Auth {
                return None;
            }
            Route::Login
        }
        SessionState::Authenticated(_) => {
            if route.group() != RouteGroup::Auth {
                return None;
            }
            Route::Home
        }
    };
    if target == route {
        None
    } else {
        Some(target)
    }
}

/// Spawn the guard task.
///
/// It evaluates once immediately, then on every session or route change,
/// and exits when either channel closes.
pub fn spawn(mut session_rx: watch::Receiver<SessionState>, router: Router) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut nav_rx = router.subscribe();
        loop {
            let session = session_rx.borrow_and_update().clone();
            let nav = *nav_rx.borrow_and_update();
            if let Some(target) = redirect_target(&session, nav.route, nav.ready) {
                debug!(from = ?nav.route, to = ?target, "Session guard redirecting");
                router.replace(target);
            }
            tokio::select! {
                changed = session_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                changed = nav_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }
        debug!("Session guard stopped");
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use tokio::time::timeout;

    use crate::models::User;
    use crate::nav::NavState;

    fn user() -> User {
        User {
            id: "user-1".to_string(),
            email: "ana@mail.com".to_string(),
            token: "tok".to_string(),
        }
    }

    async fn wait_for_route(rx: &mut watch::Receiver<NavState>, want: Route) {
        timeout(Duration::from_secs(1), rx.wait_for(|nav| nav.route == want))
            .await
            .expect("guard did not redirect in time")
            .expect("nav channel closed");
    }

    #[test]
    fn test_rule_holds_before_ready() {
        assert_eq!(
            redirect_target(&SessionState::Unauthenticated, Route::Home, false),
            None
        );
        assert_eq!(
            redirect_target(&SessionState::Authenticated(user()), Route::Login, false),
            None
        );
    }

    #[test]
    fn test_rule_holds_while_unknown() {
        assert_eq!(redirect_target(&SessionState::Unknown, Route::Home, true), None);
        assert_eq!(redirect_target(&SessionState::Unknown, Route::Login, true), None);
    }

    #[test]
    fn test_rule_sends_logged_out_to_login() {
        for route in [Route::Home, Route::Search, Route::Trips, Route::Saved, Route::Profile] {
            assert_eq!(
                redirect_target(&SessionState::Unauthenticated, route, true),
                Some(Route::Login),
                "{:?}",
                route
            );
        }
        assert_eq!(
            redirect_target(&SessionState::Unauthenticated, Route::Login, true),
            None
        );
        assert_eq!(
            redirect_target(&SessionState::Unauthenticated, Route::Register, true),
            None
        );
    }

    #[test]
    fn test_rule_sends_logged_in_to_home() {
        let state = SessionState::Authenticated(user());
        assert_eq!(redirect_target(&state, Route::Login, true), Some(Route::Home));
        assert_eq!(redirect_target(&state, Route::Register, true), Some(Route::Home));
        for route in [Route::Home, Route::Search, Route::Trips, Route::Saved, Route::Profile] {
            assert_eq!(redirect_target(&state, route, true), None, "{:?}", route);
        }
    }

    #[tokio::test]
    async fn test_guard_waits_for_ready() {
        let (session_tx, session_rx) = watch::channel(SessionState::Unknown);
        let router = Router::new(Route::Home);
        let task = spawn(session_rx, router.clone());

        session_tx.send_replace(SessionState::Unauthenticated);
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(router.current(), Route::Home);

        router.set_ready();
        let mut nav_rx = router.subscribe();
        wait_for_route(&mut nav_rx, Route::Login).await;

        task.abort();
    }

    #[tokio::test]
    async fn test_guard_follows_session_flips() {
        let (session_tx, session_rx) = watch::channel(SessionState::Unknown);
        let router = Router::new(Route::Home);
        router.set_ready();
        let task = spawn(session_rx, router.clone());
        let mut nav_rx = router.subscribe();

        session_tx.send_replace(SessionState::Unauthenticated);
        wait_for_route(&mut nav_rx, Route::Login).await;

        session_tx.send_replace(SessionState::Authenticated(user()));
        wait_for_route(&mut nav_rx, Route::Home).await;

        task.abort();
    }

    #[tokio::test]
    async fn test_guard_reverts_manual_route_changes() {
        let (session_tx, session_rx) = watch::channel(SessionState::Unauthenticated);
        let router = Router::new(Route::Login);
        router.set_ready();
        let task = spawn(session_rx, router.clone());
        let mut nav_rx = router.subscribe();

        // Someone steers a logged-out client onto a tab screen; the guard
        // puts it back.
        router.replace(Route::Trips);
        wait_for_route(&mut nav_rx, Route::Login).await;

        let _keep_alive = session_tx;
        task.abort();
    }

    #[tokio::test]
    async fn test_guard_exits_when_session_channel_closes() {
        let (session_tx, session_rx) = watch::channel(SessionState::Unauthenticated);
        let router = Router::new(Route::Login);
        let task = spawn(session_rx, router);

        drop(session_tx);
        timeout(Duration::from_secs(1), task)
            .await
            .expect("guard did not exit")
            .expect("guard panicked");
    }
}
