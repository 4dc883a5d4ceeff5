use serde_json::{Value, json};

use crate::{
    Res,
    management::Store,
    spotify::{MusicApi, PLAYLIST_ADD_BATCH_SIZE},
    sync::recommend,
    types::Record,
};

/// Name of the metadata singleton that remembers the managed playlist.
pub const PLAYLIST_META: &str = "__playlist_meta__";
pub const PLAYLIST_DESCRIPTION: &str = "Shoddy recommendations for spotty brains";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSummary {
    pub playlist_id: String,
    pub created: bool,
    pub added: usize,
}

/// Makes sure the managed playlist exists, then appends a fresh batch of
/// recommendations to it.
///
/// The playlist is looked up through the [`PLAYLIST_META`] record and created
/// (private) when that record is missing. Repeated runs append again; nothing
/// is de-duplicated against the playlist's current contents.
///
/// # Errors
///
/// Fails on any API or store error. The metadata record is persisted by
/// [`ensure_playlist`] before recommendations are requested, so a failure
/// after the playlist was created does not lose its id.
pub async fn update_recommendations<A: MusicApi>(
    api: &A,
    store: &mut Store,
    playlist_name: &str,
) -> Res<UpdateSummary> {
    let (playlist_id, created) = ensure_playlist(api, store, playlist_name).await?;
    let added = append_recommendations(api, store, &playlist_id).await?;

    Ok(UpdateSummary {
        playlist_id,
        created,
        added,
    })
}

/// Looks up or creates the managed playlist, refreshes the [`PLAYLIST_META`]
/// record and persists the store. Returns the playlist id and whether it was
/// created by this call.
pub async fn ensure_playlist<A: MusicApi>(
    api: &A,
    store: &mut Store,
    playlist_name: &str,
) -> Res<(String, bool)> {
    let known_id = store.get(PLAYLIST_META).and_then(meta_playlist_id);

    let (playlist, created) = match known_id {
        Some(id) => (api.playlist(&id).await?, false),
        None => (
            api.create_playlist(playlist_name, PLAYLIST_DESCRIPTION, false)
                .await?,
            true,
        ),
    };

    let Some(playlist_id) = playlist.get("id").and_then(Value::as_str).map(str::to_string) else {
        return Err("playlist response carries no id".into());
    };

    store.upsert(PLAYLIST_META, playlist_meta(playlist));
    store.persist().await?;

    Ok((playlist_id, created))
}

/// Appends one round of recommendations to `playlist_id` in chunks of
/// [`PLAYLIST_ADD_BATCH_SIZE`]. Returns the number of uris sent.
pub async fn append_recommendations<A: MusicApi>(
    api: &A,
    store: &Store,
    playlist_id: &str,
) -> Res<usize> {
    let uris: Vec<String> = recommend::recommend(api, store)
        .await?
        .iter()
        .filter_map(|track| track.get("uri").and_then(Value::as_str))
        .map(str::to_string)
        .collect();

    for chunk in uris.chunks(PLAYLIST_ADD_BATCH_SIZE) {
        api.add_tracks(playlist_id, chunk).await?;
    }

    Ok(uris.len())
}

fn meta_playlist_id(meta: &Record) -> Option<String> {
    meta.get("record")
        .and_then(|record| record.get("id"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Metadata record as written by [`update_recommendations`].
pub fn playlist_meta(playlist: Value) -> Record {
    let mut meta = Record::new();
    meta.insert("name".to_string(), json!(PLAYLIST_META));
    meta.insert("record".to_string(), playlist);
    meta
}
