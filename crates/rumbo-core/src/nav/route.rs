//! The route table.

/// Top-level navigation partition. Auth screens are reachable only while
/// logged out; tab screens only while logged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteGroup {
    Auth,
    Tabs,
}

/// Every screen the client can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Home,
    Search,
    Trips,
    Saved,
    Profile,
}

impl Route {
    pub fn group(self) -> RouteGroup {
        match self {
            Route::Login | Route::Register => RouteGroup::Auth,
            Route::Home | Route::Search | Route::Trips | Route::Saved | Route::Profile => {
                RouteGroup::Tabs
            }
        }
    }

    /// Path as the mobile router spells it.
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Home => "/",
            Route::Search => "/search",
            Route::Trips => "/trips",
            Route::Saved => "/saved",
            Route::Profile => "/profile",
        }
    }

    /// Human-readable screen title.
    pub fn title(self) -> &'static str {
        match self {
            Route::Login => "Sign in",
            Route::Register => "Create account",
            Route::Home => "Home",
            Route::Search => "Search",
            Route::Trips => "My trips",
            Route::Saved => "Saved",
            Route::Profile => "Profile",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups() {
        assert_eq!(Route::Login.group(), RouteGroup::Auth);
        assert_eq!(Route::Register.group(), RouteGroup::Auth);
        for route in [
            Route::Home,
            Route::Search,
            Route::Trips,
            Route::Saved,
            Route::Profile,
        ] {
            assert_eq!(route.group(), RouteGroup::Tabs, "{:?}", route);
        }
    }

    #[test]
    fn test_paths_are_distinct() {
        let all = [
            Route::Login,
            Route::Register,
            Route::Home,
            Route::Search,
            Route::Trips,
            Route::Saved,
            Route::Profile,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.path(), b.path(), "{:?} vs {:?}", a, b);
            }
        }
    }
}
