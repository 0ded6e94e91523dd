//! The interactive shell: one screen per route, driven by the router.
//!
//! Screens stay thin: they print, prompt, and call into `rumbo-core`.
//! Redirects come from the background session guard; after every action the
//! shell waits for any pending redirect to land before prompting again, so
//! the screen it renders is always one the session allows.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::watch;
use tokio::time::timeout;
use tracing::warn;

use rumbo_core::auth::validate;
use rumbo_core::models::RegisterData;
use rumbo_core::nav::{guard, NavState, Route, Router};
use rumbo_core::{ApiClient, Config, SessionManager, SessionState};

use crate::prompt;

/// How long to wait for the guard to apply a pending redirect before
/// prompting anyway.
const REDIRECT_SETTLE_TIMEOUT: Duration = Duration::from_secs(1);

enum ScreenResult {
    Continue,
    Quit,
}

pub struct Shell {
    config: Config,
    session: Arc<SessionManager>,
    api: ApiClient,
    router: Router,
    nav_rx: watch::Receiver<NavState>,
}

impl Shell {
    pub fn new(
        config: Config,
        session: Arc<SessionManager>,
        api: ApiClient,
        router: Router,
    ) -> Self {
        let nav_rx = router.subscribe();
        Self {
            config,
            session,
            api,
            router,
            nav_rx,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        println!("rumbo - your next trip starts here");

        loop {
            self.settle().await;

            let route = self.router.current();
            let result = match route {
                Route::Login => self.login_screen().await?,
                Route::Register => self.register_screen().await?,
                Route::Home => self.home_screen().await?,
                Route::Search | Route::Trips | Route::Saved => {
                    self.placeholder_screen(route).await?
                }
                Route::Profile => self.profile_screen().await?,
            };

            if matches!(result, ScreenResult::Quit) {
                println!("Goodbye!");
                return Ok(());
            }
        }
    }

    /// Wait until the guard has no redirect left to apply for the current
    /// session/route pair.
    async fn settle(&mut self) {
        loop {
            let nav = *self.nav_rx.borrow_and_update();
            let state = self.session.current();
            if guard::redirect_target(&state, nav.route, nav.ready).is_none() {
                return;
            }
            match timeout(REDIRECT_SETTLE_TIMEOUT, self.nav_rx.changed()).await {
                Ok(Ok(())) => continue,
                Ok(Err(_)) | Err(_) => {
                    warn!("Navigation did not settle, continuing anyway");
                    return;
                }
            }
        }
    }

    async fn login_screen(&mut self) -> Result<ScreenResult> {
        println!();
        println!("=== {} ===", Route::Login.title());
        println!("(enter your email, or type: register, quit)");

        // Prefill from env vars or config
        let prefill = std::env::var("RUMBO_EMAIL")
            .ok()
            .or_else(|| self.config.last_email.clone())
            .unwrap_or_default();

        let email = prompt::read_line_with_default("Email", &prefill)?;
        match email.as_str() {
            "register" => {
                self.router.replace(Route::Register);
                return Ok(ScreenResult::Continue);
            }
            "quit" => return Ok(ScreenResult::Quit),
            _ => {}
        }

        let password = match std::env::var("RUMBO_PASSWORD") {
            Ok(password) if !password.is_empty() => password,
            _ => prompt::read_password("Password: ")?,
        };

        println!("\nSigning in...");
        match self.session.login(&email, &password).await {
            Ok(()) => {
                println!("Signed in!");
                self.config.last_email = Some(validate::normalize_email(&email));
                if let Err(e) = self.config.save() {
                    warn!(error = %e, "Failed to save config");
                }
            }
            Err(e) => println!("Sign-in failed: {}", e),
        }
        Ok(ScreenResult::Continue)
    }

    async fn register_screen(&mut self) -> Result<ScreenResult> {
        println!();
        println!("=== {} ===", Route::Register.title());
        println!("(leave first name empty to go back)");

        let first_name = prompt::read_line("First name: ")?;
        if first_name.is_empty() {
            self.router.replace(Route::Login);
            return Ok(ScreenResult::Continue);
        }
        let last_name = prompt::read_line("Last name: ")?;
        let email = prompt::read_line("Email: ")?;
        let password = prompt::read_password("Password: ")?;

        let data = RegisterData {
            first_name,
            last_name,
            email,
            password,
        };

        println!("\nCreating account...");
        match self.session.register(&data).await {
            Ok(reply) => {
                let email = reply.email.as_deref().unwrap_or(&data.email);
                println!("Account created for {}. You can now sign in.", email);
                self.router.replace(Route::Login);
            }
            Err(e) => println!("Registration failed: {}", e),
        }
        Ok(ScreenResult::Continue)
    }

    async fn home_screen(&mut self) -> Result<ScreenResult> {
        println!();
        match self.session.user() {
            Some(user) => println!("=== {} === (signed in as {})", Route::Home.title(), user.email),
            None => println!("=== {} ===", Route::Home.title()),
        }

        println!("Loading available trips...");
        match self.api.available_trips().await {
            Ok(trips) if trips.is_empty() => println!("No trips available right now."),
            Ok(trips) => {
                for trip in &trips {
                    let (city, country) = trip.location();
                    let place = match country {
                        Some(country) => format!("{}, {}", city, country),
                        None => city,
                    };
                    println!(
                        "  {:<28} {:<14} departs {:<12} [{}]",
                        place,
                        trip.display_price(),
                        trip.departure_date,
                        trip.category
                    );
                }
            }
            Err(e) => println!("Could not load trips: {}", e),
        }

        self.tab_prompt().await
    }

    /// Tab screens with no session logic yet.
    async fn placeholder_screen(&mut self, route: Route) -> Result<ScreenResult> {
        println!();
        println!("=== {} ===", route.title());
        match route {
            Route::Search => println!("Search destinations, flights and stays."),
            Route::Trips => println!("Your booked trips will appear here."),
            Route::Saved => println!("Destinations you save will appear here."),
            _ => {}
        }
        self.tab_prompt().await
    }

    async fn profile_screen(&mut self) -> Result<ScreenResult> {
        println!();
        println!("=== {} ===", Route::Profile.title());
        match self.session.current() {
            SessionState::Authenticated(user) => {
                println!("Signed in as {} (user id {})", user.email, user.id);
            }
            _ => println!("Not signed in."),
        }

        let input = prompt::read_line("\n[logout/home/search/trips/saved/quit] > ")?;
        if input == "logout" {
            self.session.logout().await;
            println!("Signed out.");
            return Ok(ScreenResult::Continue);
        }
        Ok(self.handle_tab_command(&input))
    }

    async fn tab_prompt(&mut self) -> Result<ScreenResult> {
        let input = prompt::read_line("\n[home/search/trips/saved/profile/quit] > ")?;
        Ok(self.handle_tab_command(&input))
    }

    fn handle_tab_command(&self, input: &str) -> ScreenResult {
        match input {
            "home" => self.router.replace(Route::Home),
            "search" => self.router.replace(Route::Search),
            "trips" => self.router.replace(Route::Trips),
            "saved" => self.router.replace(Route::Saved),
            "profile" => self.router.replace(Route::Profile),
            "quit" => return ScreenResult::Quit,
            "" => {}
            other => println!("Unknown command: {}", other),
        }
        ScreenResult::Continue
    }
}
