use std::{
    collections::HashMap,
    fmt::Debug,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    thread::{self, ThreadId},
};

use log::debug;

/// Dataset handle shared between reads of the same path on one thread.
pub type SharedDataset<D> = Arc<Mutex<D>>;

type CacheKey = (PathBuf, ThreadId);

/// Open datasets keyed by resolved path and reading thread.
///
/// Entries are weak: a dataset is closed as soon as the last reader drops its handle.
/// Threads never share a handle, so a read only waits on the cache lock while
/// looking up or opening.
#[derive(Debug)]
pub struct DatasetCache<D> {
    entries: Mutex<HashMap<CacheKey, Weak<Mutex<D>>>>,
}

impl<D> Default for DatasetCache<D> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<D: Debug> DatasetCache<D> {
    fn lock(&self) -> MutexGuard<'_, HashMap<CacheKey, Weak<Mutex<D>>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Handle for `path` on the calling thread, opened with `open` unless a live one exists.
    pub fn get_or_open<E>(
        &self,
        path: &Path,
        open: impl FnOnce(&Path) -> std::result::Result<D, E>,
    ) -> std::result::Result<SharedDataset<D>, E> {
        let mut entries = self.lock();
        entries.retain(|_, handle| handle.strong_count() > 0);

        let key = (path.to_path_buf(), thread::current().id());
        if let Some(dataset) = entries.get(&key).and_then(Weak::upgrade) {
            debug!("reusing open dataset {}", path.display());
            return Ok(dataset);
        }

        let dataset = Arc::new(Mutex::new(open(path)?));
        entries.insert(key, Arc::downgrade(&dataset));
        Ok(dataset)
    }

    /// Number of datasets still open.
    pub fn open_count(&self) -> usize {
        self.lock()
            .values()
            .filter(|handle| handle.strong_count() > 0)
            .count()
    }
}

/// Lock a shared dataset, a panicked read does not invalidate it.
pub fn lock_dataset<D>(dataset: &SharedDataset<D>) -> MutexGuard<'_, D> {
    dataset.lock().unwrap_or_else(PoisonError::into_inner)
}
