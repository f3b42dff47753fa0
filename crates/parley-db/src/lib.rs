pub mod dms;
pub mod error;
pub mod identity;
pub mod messages;
pub mod models;
pub mod snapshot;
pub mod users;

pub use error::{Error, Result};
pub use models::DataStore;

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{error, info};

/// The process-wide data store.
///
/// Holds one snapshot behind a single lock. Mutations run against a working
/// copy and replace the snapshot only when they succeed, so a failed
/// operation never leaves a partial write behind.
pub struct Database {
    data: Mutex<DataStore>,
    path: Option<PathBuf>,
}

impl Database {
    /// Open a store backed by a JSON snapshot file, creating it lazily on
    /// the first committed write.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let data = snapshot::read(path)?;

        info!(
            "Data store opened at {} ({} users, {} dms)",
            path.display(),
            data.users.len(),
            data.dms.len()
        );
        Ok(Self {
            data: Mutex::new(data),
            path: Some(path.to_path_buf()),
        })
    }

    /// A store that is never written to disk.
    pub fn in_memory() -> Self {
        Self {
            data: Mutex::new(DataStore::default()),
            path: None,
        }
    }

    /// Copy of the current snapshot. Stale as soon as any other operation commits.
    pub fn load(&self) -> DataStore {
        self.lock().clone()
    }

    /// Replace the whole snapshot.
    pub fn save(&self, data: DataStore) {
        let mut guard = self.lock();
        *guard = data;
        self.persist(&guard);
    }

    /// Run a read-only closure against the current snapshot under the store lock.
    pub fn with_data<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&DataStore) -> T,
    {
        let guard = self.lock();
        f(&guard)
    }

    /// Read-modify-write under the store lock. `f` works on a copy which is
    /// committed only if it returns `Ok`.
    pub fn with_data_mut<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut DataStore) -> Result<T>,
    {
        let mut guard = self.lock();
        let mut working = guard.clone();
        let out = f(&mut working)?;
        *guard = working;
        self.persist(&guard);
        Ok(out)
    }

    fn lock(&self) -> MutexGuard<'_, DataStore> {
        // The guarded snapshot is only ever replaced wholesale, so it is
        // consistent even if a previous holder panicked.
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, data: &DataStore) {
        if let Some(path) = &self.path {
            if let Err(e) = snapshot::write(path, data) {
                error!("Failed to write snapshot to {}: {:#}", path.display(), e);
            }
        }
    }
}
