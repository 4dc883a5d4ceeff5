#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use serde_json::{Value, json};
use spotbrainz::{
    Res,
    spotify::MusicApi,
    types::{Page, Record, Seed, TimeRange},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    TopTracks(TimeRange, Option<String>),
    RecentlyPlayed(Option<String>),
    Albums(Vec<String>),
    Artists(Vec<String>),
    GenreSeeds,
    Recommendations(Seed),
    CreatePlaylist(String),
    Playlist(String),
    AddTracks(String, Vec<String>),
}

/// Scripted stand-in for the Spotify Web API that records every call.
///
/// Pages are served with `next` cursors of the form `<name>:<index>`.
/// Album and artist lookups answer with the configured object, `null` for
/// ids in `unknown`, or a bare `{"id": ..}` object otherwise.
#[derive(Default)]
pub struct FakeApi {
    pub top: HashMap<TimeRange, Vec<Vec<Value>>>,
    pub recent: Vec<Vec<Value>>,
    pub albums: HashMap<String, Value>,
    pub artists: HashMap<String, Value>,
    pub unknown: HashSet<String>,
    pub genres: Vec<String>,
    pub no_recommendations: bool,
    pub fail_recommendations: bool,
    pub fail_albums: bool,
    pub calls: Mutex<Vec<Call>>,
    created: Mutex<usize>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn page(name: &str, pages: &[Vec<Value>], next: Option<&str>) -> Page {
        let index = next
            .and_then(|n| n.rsplit(':').next())
            .and_then(|i| i.parse::<usize>().ok())
            .unwrap_or(0);

        Page {
            items: pages.get(index).cloned().unwrap_or_default(),
            next: (index + 1 < pages.len()).then(|| format!("{}:{}", name, index + 1)),
        }
    }

    fn lookup(&self, map: &HashMap<String, Value>, id: &str) -> Value {
        if self.unknown.contains(id) {
            return Value::Null;
        }
        map.get(id).cloned().unwrap_or_else(|| json!({ "id": id }))
    }
}

impl MusicApi for FakeApi {
    async fn top_tracks(&self, range: TimeRange, next: Option<&str>) -> Res<Page> {
        self.record(Call::TopTracks(range, next.map(str::to_string)));
        let pages = self.top.get(&range).cloned().unwrap_or_default();
        Ok(Self::page(&range.to_string(), &pages, next))
    }

    async fn recently_played(&self, next: Option<&str>) -> Res<Page> {
        self.record(Call::RecentlyPlayed(next.map(str::to_string)));
        Ok(Self::page("recent", &self.recent, next))
    }

    async fn albums(&self, ids: &[String]) -> Res<Vec<Value>> {
        self.record(Call::Albums(ids.to_vec()));
        if self.fail_albums {
            return Err("albums endpoint unavailable".into());
        }
        Ok(ids.iter().map(|id| self.lookup(&self.albums, id)).collect())
    }

    async fn artists(&self, ids: &[String]) -> Res<Vec<Value>> {
        self.record(Call::Artists(ids.to_vec()));
        Ok(ids.iter().map(|id| self.lookup(&self.artists, id)).collect())
    }

    async fn genre_seeds(&self) -> Res<Vec<String>> {
        self.record(Call::GenreSeeds);
        Ok(self.genres.clone())
    }

    async fn recommendations(&self, seed: &Seed, limit: u32) -> Res<Vec<Value>> {
        self.record(Call::Recommendations(seed.clone()));
        if self.fail_recommendations {
            return Err("recommendations endpoint unavailable".into());
        }
        if self.no_recommendations {
            return Ok(Vec::new());
        }
        Ok((0..limit)
            .map(|i| {
                let id = format!("rec-{}-{}", seed.param(), i);
                json!({ "id": id, "uri": format!("spotify:track:{}", id) })
            })
            .collect())
    }

    async fn create_playlist(&self, name: &str, _description: &str, _public: bool) -> Res<Value> {
        self.record(Call::CreatePlaylist(name.to_string()));
        let mut created = self.created.lock().unwrap();
        *created += 1;
        Ok(json!({ "id": format!("pl-{}", created), "name": name, "public": false }))
    }

    async fn playlist(&self, id: &str) -> Res<Value> {
        self.record(Call::Playlist(id.to_string()));
        Ok(json!({ "id": id, "name": "spotbrainz", "public": false }))
    }

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Res<String> {
        self.record(Call::AddTracks(playlist_id.to_string(), uris.to_vec()));
        Ok("snapshot".to_string())
    }
}

/// A top-tracks style item with nested album and artist objects.
pub fn track(id: &str, album_id: &str, artist_ids: &[&str]) -> Value {
    json!({
        "id": id,
        "name": format!("Track {}", id),
        "uri": format!("spotify:track:{}", id),
        "popularity": 50,
        "album": {
            "id": album_id,
            "name": format!("Album {}", album_id),
            "artists": artist_ids.iter().map(|a| json!({ "id": a })).collect::<Vec<_>>(),
        },
        "artists": artist_ids.iter().map(|a| json!({ "id": a, "name": a })).collect::<Vec<_>>(),
    })
}

/// A recently-played item wrapping `track`.
pub fn play(track: Value, played_at: &str) -> Value {
    json!({
        "track": track,
        "played_at": played_at,
        "context": { "type": "playlist" },
    })
}

pub fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("not an object: {}", other),
    }
}
