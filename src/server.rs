//! Local HTTP server that receives the OAuth redirect during `spotbrainz auth`.

use std::{collections::HashMap, net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Extension, Router,
    extract::Query,
    response::{Html, Json},
    routing::get,
};
use serde_json::{Value, json};
use tokio::sync::Mutex;

use crate::{Res, config::Config, spotify, types::PkceToken, warning};

/// State shared between the auth flow and the callback handler.
pub struct AuthState {
    pub config: Config,
    pub pkce: Mutex<Option<PkceToken>>,
}

pub fn router(state: Arc<AuthState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/callback", get(callback))
        .layer(Extension(state))
}

pub async fn serve(state: Arc<AuthState>) -> Res<()> {
    let addr = SocketAddr::from_str(&state.config.server_address)?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<Arc<AuthState>>,
) -> Html<&'static str> {
    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    let mut guard = state.pkce.lock().await;
    let Some(pkce) = guard.as_mut() else {
        return Html("<h4>Missing PKCE code verifier.</h4>");
    };

    match spotify::auth::exchange_code(&state.config, code, &pkce.code_verifier).await {
        Ok(token) => {
            pkce.token = Some(token);
            Html("<h2>Authentication successful.</h2><p>You can close this window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Html("<h4>Login failed.</h4>")
        }
    }
}
