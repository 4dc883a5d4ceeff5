//! spotbrainz library
//!
//! Caches a Spotify user's listening history (top tracks, recently played
//! tracks and the albums and artists behind them) in a local JSON document
//! store, and feeds a private playlist with recommendations seeded from
//! random samples of that cache.
//!
//! # Modules
//!
//! - `cli` - Command implementations behind the binary's subcommands
//! - `config` - Startup configuration loaded from the environment
//! - `management` - Document store and token cache
//! - `server` - Local HTTP server for the OAuth callback
//! - `spotify` - Web API client and the `MusicApi` seam
//! - `sync` - Fetch, recommend and playlist update jobs
//! - `types` - Data structures and type definitions
//! - `utils` - Reservoir sampling, PKCE helpers and record utilities

pub mod cli;
pub mod config;
pub mod management;
pub mod server;
pub mod spotify;
pub mod sync;
pub mod types;
pub mod utils;

/// Result type used across the crate. Errors are boxed so `reqwest`, store
/// and plain-string failures can all travel through `?`.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints a status line prefixed with a blue `o`.
///
/// ```
/// info!("Fetching top tracks ({})", range);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a line prefixed with a green `✓` after a step completed.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a line prefixed with a red `!` and exits with status 1.
///
/// Only the CLI layer uses this; library code returns errors instead.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a line prefixed with a yellow `!` for problems that do not stop
/// the run.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
