//! Terminal UI for the AtlasList marketplace.
//!
//! The UI is structured as a small Elm-style loop: [`update`] folds events
//! into [`state::AppState`] and emits [`effects::UiEffect`]s, [`render`]
//! draws the current state, and [`runtime`] owns the terminal plus the
//! async tasks that execute effects.

pub mod common;
pub mod effects;
pub mod events;
pub mod render;
pub mod route;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;
pub mod views;

use anyhow::Result;
use atlas_core::api::ApiClient;
use atlas_core::config::Config;
use atlas_core::session::SessionStore;

/// Runs the TUI until the user quits.
///
/// Must be called from within a tokio runtime; request effects run on
/// spawned tasks.
pub fn run(config: &Config, store: SessionStore) -> Result<()> {
    let client = ApiClient::new(config, store.clone())?;
    let mut runtime = runtime::TuiRuntime::new(client, store)?;
    runtime.run()
}
