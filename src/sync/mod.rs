//! The three jobs spotbrainz runs against the store: [`fetch`] fills it from
//! the listening history, [`recommend`] samples it into recommendation seeds
//! and [`update_recommendations`] feeds the result into the managed playlist.
//!
//! All of them are generic over [`crate::spotify::MusicApi`] and work on an
//! [`crate::management::Store`]. Persisting is up to the caller, except for
//! the playlist metadata, which [`ensure_playlist`] writes as soon as it
//! changes.

mod fetch;
mod playlist;
mod recommend;

pub use fetch::FetchSummary;
pub use fetch::fetch;
pub use playlist::PLAYLIST_DESCRIPTION;
pub use playlist::PLAYLIST_META;
pub use playlist::append_recommendations;
pub use playlist::ensure_playlist;
pub use playlist::UpdateSummary;
pub use playlist::playlist_meta;
pub use playlist::update_recommendations;
pub use recommend::Seeds;
pub use recommend::TRACKS_PER_SEED;
pub use recommend::recommend;
pub use recommend::select_genres;
pub use recommend::select_seeds;
