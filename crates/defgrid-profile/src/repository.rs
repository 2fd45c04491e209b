//! Profile persistence with graceful degradation.
//!
//! Loading never fails: a missing, unreadable or corrupt profile yields
//! `Profile::default()`. Saving reports success as a bool and logs failures.

use tracing::{debug, error, warn};

use crate::error::PersistError;
use crate::profile::Profile;
use crate::store::KeyValueStore;

/// Key the profile blob is stored under.
pub const PROFILE_KEY: &str = "profile";

pub struct ProfileRepository<S> {
    store: S,
}

impl<S: KeyValueStore> ProfileRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read the stored profile, if any, surfacing every failure.
    ///
    /// A stored deck that breaks the deck rules is repaired on load.
    pub fn try_load(&self) -> Result<Option<Profile>, PersistError> {
        match self.store.load(PROFILE_KEY)? {
            Some(json) => {
                let mut profile: Profile = serde_json::from_str(&json)?;
                if profile.repair_deck() {
                    warn!(deck = ?profile.deck, "stored deck was invalid, repaired");
                }
                Ok(Some(profile))
            }
            None => Ok(None),
        }
    }

    /// Load the profile, falling back to defaults on any failure.
    pub fn load_profile(&self) -> Profile {
        match self.try_load() {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                debug!("no saved profile, starting fresh");
                Profile::default()
            }
            Err(err) => {
                warn!(error = %err, "failed to load profile, using defaults");
                Profile::default()
            }
        }
    }

    /// Write the profile. Returns false (after logging) on failure.
    pub fn save_profile(&self, profile: &Profile) -> bool {
        let result = serde_json::to_string_pretty(profile)
            .map_err(PersistError::from)
            .and_then(|json| self.store.save(PROFILE_KEY, &json));
        match result {
            Ok(()) => {
                debug!(coins = profile.coins, "profile saved");
                true
            }
            Err(err) => {
                error!(error = %err, "failed to save profile");
                false
            }
        }
    }
}
