//! # CLI Module
//!
//! One function per subcommand of the `spotbrainz` binary. These functions
//! own the user-facing side: loading the token and the store, spinners,
//! status lines and tables. The actual work happens in [`crate::sync`].
//!
//! ```text
//! cli (spinners, tables, exit codes)
//!     ↓
//! sync (fetch, recommend, playlist)
//!     ↓
//! management::Store        spotify::SpotifyClient
//! ```
//!
//! ## Commands
//!
//! - [`auth`] - OAuth PKCE login, caches the token
//! - [`fetch`] - refresh tracks, albums and artists from the listening history
//! - [`recommend`] - append recommendations to the managed playlist
//! - [`purge`] - drop every collection
//! - [`info`] - record counts per collection
//! - [`show`] - print one collection as a table
//!
//! [`connect`] is the shared token-then-store setup of `fetch` and
//! `recommend`.
//!
//! Every command that talks to the API loads the token before opening the
//! store, so a missing token aborts without touching local state.

mod auth;
mod fetch;
mod info;
mod purge;
mod recommend;
mod show;

use std::{path::Path, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    Res,
    config::Config,
    error,
    management::{Store, TokenManager},
    spotify::SpotifyClient,
};

pub use auth::auth;
pub use fetch::fetch;
pub use info::info;
pub use purge::purge;
pub use recommend::recommend;
pub use show::DEFAULT_CELL_WIDTH;
pub use show::render_collection;
pub use show::show;

/// Loads the token at `token_path`, refreshing it when needed, and only then
/// opens the store.
///
/// # Errors
///
/// Fails when no usable token can be obtained, in which case the store file
/// is never opened. Also fails when the store file cannot be read.
pub async fn connect(config: &Config, token_path: &Path) -> Res<(SpotifyClient, Store)> {
    let mut token_mgr = TokenManager::load(token_path)
        .await
        .map_err(|e| format!("No token available. Please run spotbrainz auth\n Error: {}", e))?;

    let token = token_mgr
        .get_valid_token(config)
        .await
        .map_err(|e| format!("Cannot refresh token. Please run spotbrainz auth\n Error: {}", e))?;

    let store = Store::open(config.db_path.clone()).await.map_err(|e| {
        format!("Cannot open store at {}. Err: {}", config.db_path.display(), e)
    })?;

    Ok((SpotifyClient::new(config, token), store))
}

/// [`connect`] with the default token cache, exiting on failure.
async fn session(config: &Config) -> (SpotifyClient, Store) {
    match connect(config, &TokenManager::default_path()).await {
        Ok(session) => session,
        Err(e) => error!("{}", e),
    }
}

async fn open_store(config: &Config) -> Store {
    match Store::open(config.db_path.clone()).await {
        Ok(store) => store,
        Err(e) => error!(
            "Cannot open store at {}. Err: {}",
            config.db_path.display(),
            e
        ),
    }
}

async fn persist(store: &Store) {
    if let Err(e) = store.persist().await {
        error!("Cannot write store. Err: {}", e);
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
