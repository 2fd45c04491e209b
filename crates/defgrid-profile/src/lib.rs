//! Long-lived player profile for DEFGRID.
//!
//! The profile holds everything that outlives a single run: store coins,
//! unlocked towers, the active deck, career stats and settings. It is
//! persisted as JSON through a `KeyValueStore`.

pub mod error;
pub mod profile;
pub mod repository;
pub mod store;

pub use error::{PersistError, ProfileError};
pub use profile::{Profile, Settings, StoreEntry};
pub use repository::ProfileRepository;
pub use store::{FileStore, KeyValueStore, MemoryStore};
