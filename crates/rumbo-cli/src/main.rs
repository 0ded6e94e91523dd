//! rumbo - terminal client for the rumbo travel booking service.
//!
//! A thin shell over `rumbo-core`: it signs users in, keeps the session
//! alive across restarts, and lets them browse available trips. Screens
//! print and prompt; every session decision lives in the core crate, and a
//! background guard task keeps the current screen consistent with the
//! session state.

mod prompt;
mod shell;

use std::io;
use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rumbo_core::nav::{guard, Route, Router};
use rumbo_core::{storage, ApiClient, Config, SessionManager};

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();
    info!("rumbo starting");

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "Failed to load config, using defaults");
            Config::default()
        }
    };

    let store = storage::platform_default(config.storage_backend());
    let api = ApiClient::new(config.api_base_url(), Arc::clone(&store))?;
    let session = Arc::new(SessionManager::new(store, Arc::new(api.clone())));

    let router = Router::new(Route::Home);
    let guard_task = guard::spawn(session.subscribe(), router.clone());

    // Settle the session from storage before the first screen shows
    session.bootstrap().await;
    router.set_ready();

    let mut shell = shell::Shell::new(config, session, api, router);
    let result = shell.run().await;

    guard_task.abort();
    info!("rumbo shutting down");
    result
}
