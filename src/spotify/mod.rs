//! # Spotify Integration Module
//!
//! Everything spotbrainz asks of the Spotify Web API goes through the
//! [`MusicApi`] trait. [`SpotifyClient`] implements it over `reqwest`; tests
//! substitute a scripted fake.
//!
//! ```text
//! sync (fetch, recommend, playlist)
//!          ↓
//!      MusicApi
//!          ↓
//!   SpotifyClient (reqwest, bearer token)
//!          ↓
//!   Spotify Web API
//! ```
//!
//! ## Endpoints
//!
//! - `GET /me/top/tracks` and `GET /me/player/recently-played`, followed page
//!   by page through the `next` URL of each response
//! - `GET /albums?ids=` (at most 20 ids) and `GET /artists?ids=` (at most 50)
//! - `GET /recommendations/available-genre-seeds` and `GET /recommendations`
//! - `POST /users/{user_id}/playlists`, `GET /playlists/{id}` and
//!   `POST /playlists/{id}/tracks`
//!
//! [`auth`] holds the OAuth 2.0 PKCE flow that produces the bearer token.
//!
//! Non-2xx responses surface as `reqwest::Error` and are not retried.

pub mod auth;
mod client;

use serde_json::Value;

pub use client::SpotifyClient;

use crate::{
    Res,
    types::{Page, Seed, TimeRange},
};

/// Maximum ids per `GET /albums` request.
pub const ALBUM_BATCH_SIZE: usize = 20;
/// Maximum ids per `GET /artists` request.
pub const ARTIST_BATCH_SIZE: usize = 50;
/// Maximum uris per `POST /playlists/{id}/tracks` request.
pub const PLAYLIST_ADD_BATCH_SIZE: usize = 100;

/// The slice of the remote music API spotbrainz depends on.
///
/// `next` arguments are the opaque cursors returned in [`Page::next`];
/// `None` requests the first page.
#[allow(async_fn_in_trait)]
pub trait MusicApi {
    async fn top_tracks(&self, range: TimeRange, next: Option<&str>) -> Res<Page>;

    async fn recently_played(&self, next: Option<&str>) -> Res<Page>;

    /// Full album objects for up to [`ALBUM_BATCH_SIZE`] ids. Unknown ids
    /// come back as `null`.
    async fn albums(&self, ids: &[String]) -> Res<Vec<Value>>;

    /// Full artist objects for up to [`ARTIST_BATCH_SIZE`] ids.
    async fn artists(&self, ids: &[String]) -> Res<Vec<Value>>;

    async fn genre_seeds(&self) -> Res<Vec<String>>;

    async fn recommendations(&self, seed: &Seed, limit: u32) -> Res<Vec<Value>>;

    async fn create_playlist(&self, name: &str, description: &str, public: bool) -> Res<Value>;

    async fn playlist(&self, id: &str) -> Res<Value>;

    /// Appends tracks and returns the new snapshot id.
    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Res<String>;
}
