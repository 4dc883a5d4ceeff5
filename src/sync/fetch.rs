use serde_json::{Value, json};

use crate::{
    Res,
    management::{ALBUMS, ARTISTS, Store, TRACKS},
    spotify::{ALBUM_BATCH_SIZE, ARTIST_BATCH_SIZE, MusicApi},
    types::{Record, TimeRange},
    utils,
};

/// Rows written per collection by one [`fetch`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchSummary {
    pub tracks: usize,
    pub albums: usize,
    pub artists: usize,
}

/// Pulls top tracks (all three time ranges) and recently played tracks, then
/// the full album and artist objects they reference, and upserts everything
/// into `store`.
///
/// Recently played items are upserted last so their `played_at` survives.
/// Any API error aborts the fetch.
pub async fn fetch<A: MusicApi>(api: &A, store: &mut Store) -> Res<FetchSummary> {
    let mut items: Vec<Value> = Vec::new();

    for range in TimeRange::ALL {
        let mut next: Option<String> = None;
        loop {
            let page = api.top_tracks(range, next.as_deref()).await?;
            items.extend(page.items);
            next = page.next;
            if next.is_none() {
                break;
            }
        }
    }

    let mut next: Option<String> = None;
    loop {
        let page = api.recently_played(next.as_deref()).await?;
        items.extend(page.items);
        next = page.next;
        if next.is_none() {
            break;
        }
    }

    let mut pending = Pending::default();
    let mut summary = FetchSummary::default();
    let created = utils::timestamp();

    let tracks = store.collection(TRACKS);
    for item in items {
        if let Some(track) = flatten_track(item, &created, &mut pending) {
            if tracks.upsert_by_id(track).is_some() {
                summary.tracks += 1;
            }
        }
    }

    summary.albums = pop_albums(api, store, &mut pending).await?;
    summary.artists = pop_artists(api, store, pending.artists).await?;

    Ok(summary)
}

/// Album and artist ids awaiting a detail lookup.
#[derive(Debug, Default)]
struct Pending {
    albums: Vec<String>,
    artists: Vec<String>,
}

/// Turns a top-tracks item or a play-history item into a track record.
///
/// Play-history items (`{"track": {...}, "played_at": ...}`) are flattened
/// onto the wrapped track. The nested `album` and `artists` objects become id
/// references and their ids are queued in `pending`.
fn flatten_track(item: Value, created: &str, pending: &mut Pending) -> Option<Record> {
    let Value::Object(mut item) = item else {
        return None;
    };

    let mut track = match item.remove("track") {
        Some(Value::Object(mut track)) => {
            track.extend(item);
            track
        }
        Some(_) => return None,
        None => item,
    };

    utils::record_id(&track)?;

    let album_id = match track.remove("album") {
        Some(Value::Object(album)) => {
            pending.artists.extend(utils::ids_of(album.get("artists")));
            let id = utils::record_id(&album).map(str::to_string);
            if let Some(id) = &id {
                pending.albums.push(id.clone());
            }
            id
        }
        _ => None,
    };

    let artist_ids = utils::ids_of(track.get("artists"));
    pending.artists.extend(artist_ids.iter().cloned());

    track.insert("created".to_string(), json!(created));
    track.insert("album".to_string(), json!(album_id));
    track.insert("artists".to_string(), json!(artist_ids));
    Some(track)
}

async fn pop_albums<A: MusicApi>(api: &A, store: &mut Store, pending: &mut Pending) -> Res<usize> {
    utils::remove_duplicate_ids(&mut pending.albums);

    let mut count = 0;
    for batch in pending.albums.chunks(ALBUM_BATCH_SIZE) {
        let albums = api.albums(batch).await?;
        let created = utils::timestamp();
        let collection = store.collection(ALBUMS);

        for album in albums {
            let Value::Object(mut album) = album else {
                continue;
            };
            let artist_ids = utils::ids_of(album.get("artists"));
            album.insert("created".to_string(), json!(created));
            album.insert("artists".to_string(), json!(artist_ids));

            if collection.upsert_by_id(album).is_some() {
                count += 1;
            }
        }
    }

    Ok(count)
}

async fn pop_artists<A: MusicApi>(api: &A, store: &mut Store, mut ids: Vec<String>) -> Res<usize> {
    utils::remove_duplicate_ids(&mut ids);

    let mut count = 0;
    for batch in ids.chunks(ARTIST_BATCH_SIZE) {
        let artists = api.artists(batch).await?;
        let created = utils::timestamp();
        let collection = store.collection(ARTISTS);

        for artist in artists {
            let Value::Object(mut artist) = artist else {
                continue;
            };
            artist.insert("created".to_string(), json!(created));

            if collection.upsert_by_id(artist).is_some() {
                count += 1;
            }
        }
    }

    Ok(count)
}
