use crate::{config::Config, error, management::TokenManager, spotify, success};

pub async fn auth(config: &Config) {
    let token = match spotify::auth::authorize(config).await {
        Ok(token) => token,
        Err(e) => error!("{}", e),
    };

    let token_mgr = TokenManager::new(TokenManager::default_path(), token);
    if let Err(e) = token_mgr.persist().await {
        error!("Failed to save token to cache: {}", e);
    }

    success!(
        "Authentication successful! Granted scope: {}",
        token_mgr.current_token().scope
    );
}
