//! Interactive TUI mode.

use anyhow::Result;
use atlas_core::config::Config;
use atlas_core::session::SessionStore;

#[cfg(feature = "tui")]
pub fn run(config: &Config, store: SessionStore) -> Result<()> {
    atlas_tui::run(config, store)
}

#[cfg(not(feature = "tui"))]
pub fn run(_config: &Config, _store: SessionStore) -> Result<()> {
    anyhow::bail!("this build does not include the TUI; use a subcommand (see --help)")
}
