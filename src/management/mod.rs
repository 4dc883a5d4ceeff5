mod auth;
mod store;

pub use auth::TokenManager;
pub use store::ALBUMS;
pub use store::ARTISTS;
pub use store::Collection;
pub use store::DEFAULT_COLLECTION;
pub use store::Key;
pub use store::Store;
pub use store::StoreError;
pub use store::TRACKS;
