//! Background profile saving.
//!
//! Saves are fire-and-forget: the host hands over a profile and moves on.
//! Failures are logged by the repository and otherwise ignored.

use std::sync::mpsc;
use std::thread::JoinHandle;

use tracing::{debug, error};

use defgrid_profile::{KeyValueStore, Profile, ProfileRepository};

enum SaveRequest {
    Save(Box<Profile>),
    Shutdown,
}

/// Handle to the save thread. Dropping it flushes pending saves.
pub struct SaveWorker {
    tx: mpsc::Sender<SaveRequest>,
    handle: Option<JoinHandle<u32>>,
}

impl SaveWorker {
    /// Start the worker thread around a repository.
    pub fn spawn<S>(repository: ProfileRepository<S>) -> std::io::Result<Self>
    where
        S: KeyValueStore + 'static,
    {
        let (tx, rx) = mpsc::channel::<SaveRequest>();
        let handle = std::thread::Builder::new()
            .name("defgrid-save-worker".into())
            .spawn(move || {
                let mut failures = 0u32;
                while let Ok(SaveRequest::Save(profile)) = rx.recv() {
                    if !repository.save_profile(&profile) {
                        failures += 1;
                    }
                }
                debug!(failures, "save worker stopped");
                failures
            })?;
        Ok(Self {
            tx,
            handle: Some(handle),
        })
    }

    /// Queue a save of `profile`.
    pub fn save(&self, profile: &Profile) {
        if self
            .tx
            .send(SaveRequest::Save(Box::new(profile.clone())))
            .is_err()
        {
            error!("save worker is gone, profile not saved");
        }
    }

    /// Flush pending saves and stop. Returns how many saves failed.
    pub fn shutdown(mut self) -> u32 {
        self.stop()
    }

    fn stop(&mut self) -> u32 {
        let _ = self.tx.send(SaveRequest::Shutdown);
        match self.handle.take().map(JoinHandle::join) {
            Some(Ok(failures)) => failures,
            Some(Err(_)) => {
                error!("save worker panicked");
                1
            }
            None => 0,
        }
    }
}

impl Drop for SaveWorker {
    fn drop(&mut self) {
        self.stop();
    }
}
