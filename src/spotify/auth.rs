use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use chrono::Utc;
use reqwest::Client;
use tokio::sync::Mutex;

use crate::{
    Res,
    config::Config,
    server::{self, AuthState},
    types::{PkceToken, Token, TokenResponse},
    utils, warning,
};

/// How long to wait for the browser to hit the callback.
const CALLBACK_TIMEOUT: Duration = Duration::from_secs(60);

/// Runs the OAuth 2.0 PKCE authorization-code flow and returns the token.
///
/// Generates a verifier/challenge pair, serves the callback on
/// `config.server_address`, opens the authorization URL in the default
/// browser (printing it when that fails) and waits up to a minute for the
/// callback handler to finish the code exchange.
pub async fn authorize(config: &Config) -> Res<Token> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let state = Arc::new(AuthState {
        config: config.clone(),
        pkce: Mutex::new(Some(PkceToken {
            code_verifier,
            token: None,
        })),
    });

    let server_state = Arc::clone(&state);
    let server = tokio::spawn(async move { server::serve(server_state).await });

    let auth_url = authorize_url(config, &code_challenge);
    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        );
    }

    let token = wait_for_token(&state).await;
    server.abort();

    token.ok_or_else(|| "Authentication failed or timed out.".into())
}

pub fn authorize_url(config: &Config, code_challenge: &str) -> String {
    format!(
        "{auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&code_challenge={code_challenge}&code_challenge_method=S256&scope={scope}",
        auth_url = config.auth_url,
        client_id = config.client_id,
        redirect_uri = config.redirect_uri,
        code_challenge = code_challenge,
        scope = config.scope.replace(' ', "%20"),
    )
}

async fn wait_for_token(state: &AuthState) -> Option<Token> {
    let start = Instant::now();

    while start.elapsed() < CALLBACK_TIMEOUT {
        if let Some(token) = state
            .pkce
            .lock()
            .await
            .as_ref()
            .and_then(|pkce| pkce.token.clone())
        {
            return Some(token);
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges the callback's authorization code for a token.
pub async fn exchange_code(
    config: &Config,
    code: &str,
    verifier: &str,
) -> Result<Token, reqwest::Error> {
    let response = Client::new()
        .post(&config.token_url)
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", config.client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", config.redirect_uri.as_str()),
        ])
        .send()
        .await?
        .error_for_status()?
        .json::<TokenResponse>()
        .await?;

    Ok(into_token(response, String::new()))
}

/// Trades a refresh token for a fresh access token. The old refresh token is
/// kept when the server does not hand out a new one.
pub async fn refresh_token(config: &Config, refresh_token: &str) -> Result<Token, String> {
    let response = Client::new()
        .post(&config.token_url)
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", config.client_id.as_str()),
        ])
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| e.to_string())?
        .json::<TokenResponse>()
        .await
        .map_err(|e| e.to_string())?;

    Ok(into_token(response, refresh_token.to_string()))
}

pub fn into_token(response: TokenResponse, previous_refresh_token: String) -> Token {
    Token {
        access_token: response.access_token,
        refresh_token: response.refresh_token.unwrap_or(previous_refresh_token),
        scope: response.scope,
        expires_in: response.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    }
}
