//! Configuration management for spotbrainz.
//!
//! Configuration is read once at startup into a [`Config`] value that is then
//! passed by reference to everything that needs it. Values come from:
//! 1. Environment variables (highest priority)
//! 2. A `.env` file in the local data directory
//! 3. Built-in defaults for everything except the client id and user id,
//!    which only the API commands require

use std::{env, path::PathBuf};

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
pub const DEFAULT_PLAYLIST_NAME: &str = "spotbrainz";
pub const DEFAULT_SCOPE: &[&str] = &[
    "playlist-read-private",
    "playlist-modify-private",
    "user-top-read",
    "user-read-recently-played",
    "user-library-read",
];

/// Runtime settings for API access, the OAuth callback server and local storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub client_id: String,
    pub user_id: String,
    pub redirect_uri: String,
    pub server_address: String,
    pub scope: String,
    pub api_url: String,
    pub auth_url: String,
    pub token_url: String,
    pub db_path: PathBuf,
    pub playlist_name: String,
}

/// Keys the API commands (`auth`, `fetch`, `recommend`) cannot run without.
pub const REQUIRED_API_KEYS: &[&str] = &["SPOTIFY_API_AUTH_CLIENT_ID", "SPOTIFY_USER_ID"];

impl Config {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values count as unset. Unset optional keys take their built-in
    /// default; unset [`REQUIRED_API_KEYS`] are left empty so local commands
    /// (`purge`, `info`, `show`) work without API credentials.
    ///
    /// # Arguments
    ///
    /// * `lookup` - Returns the raw value for a key, or `None` when unset
    ///
    /// # Example
    ///
    /// ```
    /// use spotbrainz::config::Config;
    ///
    /// let config = Config::from_lookup(|key| match key {
    ///     "SPOTIFY_API_AUTH_CLIENT_ID" => Some("client".to_string()),
    ///     "SPOTIFY_USER_ID" => Some("user".to_string()),
    ///     _ => None,
    /// });
    /// assert!(config.require_api_credentials().is_ok());
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let or_default = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        Self {
            client_id: get("SPOTIFY_API_AUTH_CLIENT_ID").unwrap_or_default(),
            user_id: get("SPOTIFY_USER_ID").unwrap_or_default(),
            redirect_uri: or_default("SPOTIFY_API_REDIRECT_URI", DEFAULT_REDIRECT_URI),
            server_address: or_default("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            scope: or_default("SPOTIFY_API_AUTH_SCOPE", &DEFAULT_SCOPE.join(" ")),
            api_url: or_default("SPOTIFY_API_URL", DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
            auth_url: or_default("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: or_default("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL),
            db_path: get("SPOTBRAINZ_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| data_dir().join("spot.json")),
            playlist_name: or_default("SPOTBRAINZ_PLAYLIST_NAME", DEFAULT_PLAYLIST_NAME),
        }
    }

    /// Checks that the credentials needed to talk to the Spotify API are set.
    ///
    /// # Errors
    ///
    /// Returns `"<KEY> must be set"` for the first of [`REQUIRED_API_KEYS`]
    /// that is missing.
    pub fn require_api_credentials(&self) -> Result<(), String> {
        for (key, value) in REQUIRED_API_KEYS.iter().zip([&self.client_id, &self.user_id]) {
            if value.is_empty() {
                return Err(format!("{} must be set", key));
            }
        }
        Ok(())
    }
}

/// Root of everything spotbrainz keeps on disk.
///
/// - Linux: `~/.local/share/spotbrainz`
/// - macOS: `~/Library/Application Support/spotbrainz`
/// - Windows: `%LOCALAPPDATA%/spotbrainz`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotbrainz");
    path
}

/// Loads variables from `<data_dir>/.env` into the process environment.
///
/// Variables already present in the environment win.
///
/// # Errors
///
/// A missing file is not an error. This fails when the data directory cannot
/// be created or the file cannot be read or parsed.
pub async fn load_env() -> Result<(), String> {
    let dir = data_dir();
    async_fs::create_dir_all(&dir)
        .await
        .map_err(|e| e.to_string())?;

    let path = dir.join(".env");
    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))
}
