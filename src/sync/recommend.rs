use std::collections::HashSet;

use rand::Rng;
use serde_json::Value;

use crate::{
    Res,
    management::{ALBUMS, ARTISTS, Store, TRACKS},
    spotify::MusicApi,
    types::{Record, Seed},
    utils::{self, DEFAULT_SAMPLE_SIZE},
};

/// Tracks requested per seed type.
pub const TRACKS_PER_SEED: u32 = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Seeds {
    pub artists: Vec<String>,
    pub genres: Vec<String>,
    pub tracks: Vec<String>,
}

/// Asks for [`TRACKS_PER_SEED`] recommendations each for sampled artists,
/// genres and tracks, in that order, and returns them concatenated.
///
/// An empty store is not an error; the requests then go out without seeds.
pub async fn recommend<A: MusicApi>(api: &A, store: &Store) -> Res<Vec<Value>> {
    let valid_genres = api.genre_seeds().await?;
    let seeds = select_seeds(store, &valid_genres, &mut rand::rng());

    let mut tracks = Vec::new();
    for seed in [
        Seed::Artists(seeds.artists),
        Seed::Genres(seeds.genres),
        Seed::Tracks(seeds.tracks),
    ] {
        tracks.extend(api.recommendations(&seed, TRACKS_PER_SEED).await?);
    }

    Ok(tracks)
}

pub fn select_seeds<R: Rng + ?Sized>(store: &Store, valid_genres: &[String], rng: &mut R) -> Seeds {
    let artists = store.all(ARTISTS);
    let albums = store.all(ALBUMS);

    Seeds {
        artists: sample_ids(artists, rng),
        genres: select_genres(artists, albums, valid_genres, rng),
        tracks: sample_ids(store.all(TRACKS), rng),
    }
}

fn sample_ids<R: Rng + ?Sized>(records: &[Record], rng: &mut R) -> Vec<String> {
    utils::sample(records.iter().filter_map(utils::record_id), DEFAULT_SAMPLE_SIZE, rng)
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Collects up to [`DEFAULT_SAMPLE_SIZE`] distinct genres, drawn from
/// randomly sampled artists and albums, that the API accepts as seeds.
///
/// Each round samples a handful of records and counts them against the total
/// number of artists and albums; once that many have been drawn the search
/// stops, even with fewer than five genres found.
pub fn select_genres<R: Rng + ?Sized>(
    artists: &[Record],
    albums: &[Record],
    valid_genres: &[String],
    rng: &mut R,
) -> Vec<String> {
    let valid: HashSet<&str> = valid_genres.iter().map(String::as_str).collect();
    let max_drawn = artists.len() + albums.len();
    let mut drawn = 0;
    let mut genres: Vec<String> = Vec::new();

    'rounds: while genres.len() < DEFAULT_SAMPLE_SIZE && drawn < max_drawn {
        let mut pool = utils::sample(artists.iter(), DEFAULT_SAMPLE_SIZE, rng);
        pool.extend(utils::sample(albums.iter(), DEFAULT_SAMPLE_SIZE, rng));
        let records = utils::sample(pool, DEFAULT_SAMPLE_SIZE, rng);
        drawn += records.len();

        let candidates = utils::sample(
            records.iter().flat_map(|r| genres_of(r)),
            DEFAULT_SAMPLE_SIZE,
            rng,
        );

        for candidate in candidates {
            if valid.contains(candidate) && !genres.iter().any(|g| g == candidate) {
                genres.push(candidate.to_string());
                if genres.len() == DEFAULT_SAMPLE_SIZE {
                    break 'rounds;
                }
            }
        }
    }

    genres
}

fn genres_of(record: &Record) -> impl Iterator<Item = &str> {
    record
        .get("genres")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
}
