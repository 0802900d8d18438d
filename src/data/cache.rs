use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use super::error::LoadError;
use super::loader::load_file;
use super::model::Dataset;

type Slot = Arc<Mutex<Option<Arc<Dataset>>>>;

/// Memoizes loaded datasets per source path for the lifetime of a session.
///
/// Each path owns a slot; the first caller holds the slot's lock while it
/// loads, so concurrent callers for the same path wait and then share the
/// result instead of loading again.  A failed load removes its slot again.
#[derive(Default)]
pub struct DatasetCache {
    slots: Mutex<HashMap<PathBuf, Slot>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached dataset for `path`, loading it on first use.
    pub fn get_or_load(&self, path: &Path) -> Result<Arc<Dataset>, LoadError> {
        self.get_or_load_with(path, load_file)
    }

    /// Like [`get_or_load`](Self::get_or_load) with a custom loader.
    pub fn get_or_load_with<F>(&self, path: &Path, loader: F) -> Result<Arc<Dataset>, LoadError>
    where
        F: FnOnce(&Path) -> Result<Dataset, LoadError>,
    {
        let key = cache_key(path);
        let slot = self.slot(&key);
        let mut guard = slot.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(ds) = guard.as_ref() {
            log::debug!("Dataset cache hit for {}", path.display());
            return Ok(Arc::clone(ds));
        }

        match loader(path) {
            Ok(ds) => {
                let ds = Arc::new(ds);
                *guard = Some(Arc::clone(&ds));
                Ok(ds)
            }
            Err(err) => {
                self.forget(&key, &slot);
                Err(err)
            }
        }
    }

    /// Forget the dataset for `path` so the next request reloads it.
    pub fn evict(&self, path: &Path) {
        let key = cache_key(path);
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        if slots.remove(&key).is_some() {
            log::debug!("Evicted {} from dataset cache", key.display());
        }
    }

    /// Whether a dataset for `path` is currently cached.
    pub fn contains(&self, path: &Path) -> bool {
        let slot = {
            let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            slots.get(&cache_key(path)).cloned()
        };
        let Some(slot) = slot else {
            return false;
        };
        let loaded = slot.lock().unwrap_or_else(PoisonError::into_inner).is_some();
        loaded
    }

    fn slot(&self, key: &Path) -> Slot {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(key.to_path_buf()).or_default())
    }

    /// Drop `slot` from the map unless it was already evicted or replaced.
    fn forget(&self, key: &Path, slot: &Slot) {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        if slots.get(key).is_some_and(|s| Arc::ptr_eq(s, slot)) {
            slots.remove(key);
        }
    }
}

/// Canonical path when it resolves, otherwise the path as given.
fn cache_key(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::io::Write;

    use super::*;

    fn fake(path: &Path) -> Result<Dataset, LoadError> {
        Ok(Dataset::new(Vec::new(), path))
    }

    #[test]
    fn second_request_is_served_from_cache() {
        let cache = DatasetCache::new();
        let calls = Cell::new(0);
        let path = Path::new("catalog.csv");

        let first = cache
            .get_or_load_with(path, |p| {
                calls.set(calls.get() + 1);
                fake(p)
            })
            .unwrap();
        let second = cache
            .get_or_load_with(path, |p| {
                calls.set(calls.get() + 1);
                fake(p)
            })
            .unwrap();

        assert_eq!(calls.get(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(cache.contains(path));
    }

    #[test]
    fn failures_are_not_cached() {
        let cache = DatasetCache::new();
        let path = Path::new("flaky.csv");

        let err = cache.get_or_load_with(path, |p| Err(LoadError::NotFound(p.to_path_buf())));
        assert!(err.is_err());
        assert!(!cache.contains(path));

        assert!(cache.get_or_load_with(path, fake).is_ok());
        assert!(cache.contains(path));
    }

    #[test]
    fn failed_paths_leave_no_slots_behind() {
        let cache = DatasetCache::new();
        for name in ["a.csv", "b.csv", "c.csv"] {
            let err = cache.get_or_load_with(Path::new(name), |p| {
                Err(LoadError::NotFound(p.to_path_buf()))
            });
            assert!(err.is_err());
        }
        assert!(cache.slots.lock().unwrap().is_empty());

        cache.get_or_load_with(Path::new("d.csv"), fake).unwrap();
        assert_eq!(cache.slots.lock().unwrap().len(), 1);
    }

    #[test]
    fn evict_forces_a_reload() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "title,type,country,date_added,listed_in,rating").unwrap();
        writeln!(file, "A,Movie,India,\"May 1, 2020\",Dramas,R").unwrap();
        file.flush().unwrap();

        let cache = DatasetCache::new();
        let first = cache.get_or_load(file.path()).unwrap();
        assert_eq!(first.len(), 1);

        writeln!(file, "B,Movie,India,\"May 2, 2020\",Dramas,R").unwrap();
        file.flush().unwrap();
        assert_eq!(cache.get_or_load(file.path()).unwrap().len(), 1);

        cache.evict(file.path());
        assert_eq!(cache.get_or_load(file.path()).unwrap().len(), 2);
    }

    #[test]
    fn concurrent_callers_load_once() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let cache = DatasetCache::new();
        let calls = AtomicUsize::new(0);
        let path = Path::new("shared.csv");

        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    cache
                        .get_or_load_with(path, |p| {
                            calls.fetch_add(1, Ordering::SeqCst);
                            std::thread::sleep(std::time::Duration::from_millis(10));
                            fake(p)
                        })
                        .unwrap();
                });
            }
        });

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
