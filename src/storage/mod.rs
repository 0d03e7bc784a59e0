pub mod scores;

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Mutex;
use std::thread::JoinHandle;

use crate::error::Error;

/// Every value stored for one profile.
pub type Values = BTreeMap<String, String>;

type Profiles = BTreeMap<String, Values>;

/// String key-value storage partitioned by profile, one profile per browser-like client.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, profile: &str, key: &str) -> Result<Option<String>, Error>;
    /// Swaps all values of the profile at once, keys missing from `values` are dropped.
    fn replace(&self, profile: &str, values: Values) -> Result<(), Error>;
    fn clear(&self, profile: &str) -> Result<(), Error>;
}

/// Keeps every profile in one JSON document.
///
/// Reads are served from memory. Each change hands a snapshot to a writer thread, so the actors
/// never wait on the disk. The file is replaced through a rename, a crash leaves either the old or
/// the new document.
pub struct FileStore {
    profiles: Mutex<Profiles>,
    snapshot_tx: Option<Sender<String>>,
    writer: Option<JoinHandle<()>>,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();
        let profiles = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|error| {
                Error::Storage(format!(
                    "Could not read the store file. File: '{}', Error: '{error}'.",
                    path.display()
                ))
            })?;
            serde_json::from_str(&content).map_err(|error| {
                Error::Storage(format!(
                    "The store file is not valid. File: '{}', Error: '{error}'.",
                    path.display()
                ))
            })?
        } else {
            Profiles::default()
        };
        log::info!(
            "Store opened. File: '{}', Profiles: '{}'.",
            path.display(),
            profiles.len()
        );

        let (snapshot_tx, snapshot_rx) = mpsc::channel();
        let writer = std::thread::Builder::new()
            .name("store-writer".to_string())
            .spawn(move || write_snapshots(&path, snapshot_rx))
            .map_err(|error| {
                Error::Storage(format!("Could not start the store writer. Error: '{error}'."))
            })?;

        Ok(FileStore {
            profiles: Mutex::new(profiles),
            snapshot_tx: Some(snapshot_tx),
            writer: Some(writer),
        })
    }

    fn update<F>(&self, change: F) -> Result<(), Error>
    where
        F: FnOnce(&mut Profiles),
    {
        let mut profiles = self
            .profiles
            .lock()
            .map_err(|_| Error::log_and_create_internal("The store lock is poisoned."))?;
        change(&mut profiles);

        let snapshot = serde_json::to_string_pretty(&*profiles).map_err(|error| {
            Error::log_and_create_internal(&format!(
                "Could not serialize the store. Error: '{error}'."
            ))
        })?;
        // sent under the lock, so snapshots reach the writer in the order of the changes
        self.snapshot_tx
            .as_ref()
            .ok_or_else(|| Error::log_and_create_internal("The store writer is gone."))?
            .send(snapshot)
            .map_err(|_| Error::Storage("The store writer stopped.".to_string()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, profile: &str, key: &str) -> Result<Option<String>, Error> {
        let profiles = self
            .profiles
            .lock()
            .map_err(|_| Error::log_and_create_internal("The store lock is poisoned."))?;
        Ok(profiles
            .get(profile)
            .and_then(|values| values.get(key))
            .cloned())
    }

    fn replace(&self, profile: &str, values: Values) -> Result<(), Error> {
        self.update(|profiles| {
            profiles.insert(profile.to_string(), values);
        })
    }

    fn clear(&self, profile: &str) -> Result<(), Error> {
        self.update(|profiles| {
            profiles.remove(profile);
        })
    }
}

impl Drop for FileStore {
    fn drop(&mut self) {
        // closing the channel lets the writer flush what is queued and stop
        self.snapshot_tx.take();
        if let Some(writer) = self.writer.take() {
            if writer.join().is_err() {
                log::error!("The store writer panicked.");
            }
        }
    }
}

fn write_snapshots(path: &Path, snapshot_rx: Receiver<String>) {
    while let Ok(mut snapshot) = snapshot_rx.recv() {
        // only the newest queued snapshot is worth writing
        while let Ok(newer) = snapshot_rx.try_recv() {
            snapshot = newer;
        }
        if let Err(error) = write_atomically(path, &snapshot) {
            log::error!(
                "Could not write the store file. File: '{}', Error: '{error}'.",
                path.display()
            );
        }
    }
}

fn write_atomically(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(directory) = path.parent() {
        fs::create_dir_all(directory)?;
    }
    let temporary = path.with_extension("json.tmp");
    fs::write(&temporary, content)?;
    fs::rename(&temporary, path)
}

#[derive(Default)]
pub struct MemoryStore {
    profiles: Mutex<HashMap<String, Values>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, profile: &str, key: &str) -> Result<Option<String>, Error> {
        let profiles = self
            .profiles
            .lock()
            .map_err(|_| Error::log_and_create_internal("The store lock is poisoned."))?;
        Ok(profiles
            .get(profile)
            .and_then(|values| values.get(key))
            .cloned())
    }

    fn replace(&self, profile: &str, values: Values) -> Result<(), Error> {
        let mut profiles = self
            .profiles
            .lock()
            .map_err(|_| Error::log_and_create_internal("The store lock is poisoned."))?;
        profiles.insert(profile.to_string(), values);
        Ok(())
    }

    fn clear(&self, profile: &str) -> Result<(), Error> {
        let mut profiles = self
            .profiles
            .lock()
            .map_err(|_| Error::log_and_create_internal("The store lock is poisoned."))?;
        profiles.remove(profile);
        Ok(())
    }
}
