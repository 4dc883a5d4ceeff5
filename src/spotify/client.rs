use reqwest::Client;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    Res,
    config::Config,
    spotify::MusicApi,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        GenreSeedsResponse, Page, RecommendationsResponse, Seed, SeveralAlbumsResponse,
        SeveralArtistsResponse, TimeRange,
    },
};

const TOP_TRACKS_PAGE_SIZE: u32 = 25;
const RECENTLY_PLAYED_PAGE_SIZE: u32 = 50;

/// Bearer-authenticated client for the Spotify Web API.
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    user_id: String,
    token: String,
}

impl SpotifyClient {
    /// Creates a client for `config.api_url` acting as `config.user_id`.
    ///
    /// # Arguments
    ///
    /// * `config` - Supplies the API base URL and the user that owns created
    ///   playlists
    /// * `token` - A valid bearer access token, see
    ///   [`crate::management::TokenManager::get_valid_token`]
    pub fn new(config: &Config, token: String) -> Self {
        Self {
            http: Client::new(),
            api_url: config.api_url.clone(),
            user_id: config.user_id.clone(),
            token,
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, reqwest::Error> {
        self.http
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?
            .json::<T>()
            .await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, reqwest::Error> {
        self.http
            .post(url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?
            .error_for_status()?
            .json::<T>()
            .await
    }
}

impl MusicApi for SpotifyClient {
    async fn top_tracks(&self, range: TimeRange, next: Option<&str>) -> Res<Page> {
        let url = match next {
            Some(next) => next.to_string(),
            None => format!(
                "{uri}/me/top/tracks?time_range={range}&limit={limit}",
                uri = self.api_url,
                range = range,
                limit = TOP_TRACKS_PAGE_SIZE
            ),
        };
        Ok(self.get::<Page>(&url).await?)
    }

    async fn recently_played(&self, next: Option<&str>) -> Res<Page> {
        let url = match next {
            Some(next) => next.to_string(),
            None => format!(
                "{uri}/me/player/recently-played?limit={limit}",
                uri = self.api_url,
                limit = RECENTLY_PLAYED_PAGE_SIZE
            ),
        };
        Ok(self.get::<Page>(&url).await?)
    }

    async fn albums(&self, ids: &[String]) -> Res<Vec<Value>> {
        let url = format!("{uri}/albums?ids={ids}", uri = self.api_url, ids = ids.join(","));
        Ok(self.get::<SeveralAlbumsResponse>(&url).await?.albums)
    }

    async fn artists(&self, ids: &[String]) -> Res<Vec<Value>> {
        let url = format!("{uri}/artists?ids={ids}", uri = self.api_url, ids = ids.join(","));
        Ok(self.get::<SeveralArtistsResponse>(&url).await?.artists)
    }

    async fn genre_seeds(&self) -> Res<Vec<String>> {
        let url = format!("{uri}/recommendations/available-genre-seeds", uri = self.api_url);
        Ok(self.get::<GenreSeedsResponse>(&url).await?.genres)
    }

    async fn recommendations(&self, seed: &Seed, limit: u32) -> Res<Vec<Value>> {
        let mut query = vec![("limit".to_string(), limit.to_string())];
        // empty seed lists are left out of the query
        if !seed.values().is_empty() {
            query.push((seed.param().to_string(), seed.values().join(",")));
        }

        let response = self
            .http
            .get(format!("{uri}/recommendations", uri = self.api_url))
            .query(&query)
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?
            .json::<RecommendationsResponse>()
            .await?;

        Ok(response.tracks)
    }

    async fn create_playlist(&self, name: &str, description: &str, public: bool) -> Res<Value> {
        let url = format!(
            "{uri}/users/{user_id}/playlists",
            uri = self.api_url,
            user_id = self.user_id
        );
        let body = CreatePlaylistRequest {
            name: name.to_string(),
            description: description.to_string(),
            public,
            collaborative: false,
        };
        Ok(self.post::<_, Value>(&url, &body).await?)
    }

    async fn playlist(&self, id: &str) -> Res<Value> {
        let url = format!("{uri}/playlists/{id}", uri = self.api_url, id = id);
        Ok(self.get::<Value>(&url).await?)
    }

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Res<String> {
        let url = format!(
            "{uri}/playlists/{playlist_id}/tracks",
            uri = self.api_url,
            playlist_id = playlist_id
        );
        let body = AddTrackToPlaylistRequest {
            uris: uris.to_vec(),
        };
        let response = self
            .post::<_, AddTrackToPlaylistResponse>(&url, &body)
            .await?;
        Ok(response.snapshot_id)
    }
}
