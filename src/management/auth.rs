use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::{config::Config, spotify, types::Token};

/// Seconds before the reported expiry at which a token counts as expired.
const EXPIRY_BUFFER: u64 = 240;

/// The cached OAuth token and the file it lives in.
pub struct TokenManager {
    path: PathBuf,
    token: Token,
}

impl TokenManager {
    pub fn new(path: PathBuf, token: Token) -> Self {
        Self { path, token }
    }

    /// `<data_dir>/cache/token.json`
    pub fn default_path() -> PathBuf {
        crate::config::data_dir().join("cache").join("token.json")
    }

    pub async fn load(path: &Path) -> Result<Self, String> {
        let raw = async_fs::read_to_string(path)
            .await
            .map_err(|e| format!("{}: {}", path.display(), e))?;
        let token = serde_json::from_str::<Token>(&raw)
            .map_err(|e| format!("{}: {}", path.display(), e))?;

        Ok(Self::new(path.to_path_buf(), token))
    }

    pub async fn persist(&self) -> Result<(), String> {
        if let Some(dir) = self.path.parent() {
            async_fs::create_dir_all(dir)
                .await
                .map_err(|e| e.to_string())?;
        }

        let body = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(&self.path, body)
            .await
            .map_err(|e| e.to_string())
    }

    /// Returns an access token, refreshing and re-persisting it first when it
    /// is about to expire.
    pub async fn get_valid_token(&mut self, config: &Config) -> Result<String, String> {
        if self.expires_within(EXPIRY_BUFFER) {
            self.token = spotify::auth::refresh_token(config, &self.token.refresh_token).await?;
            self.persist().await?;
        }

        Ok(self.token.access_token.clone())
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }

    pub fn expires_within(&self, seconds: u64) -> bool {
        let expires_at = self.token.obtained_at + self.token.expires_in;
        Utc::now().timestamp() as u64 + seconds >= expires_at
    }
}
