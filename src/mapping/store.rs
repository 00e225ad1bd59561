use super::{Mapping, MappingError};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::SystemTime;
use tracing::{debug, info};

struct Loaded {
    mapping: Arc<Mapping>,
    modified: Option<SystemTime>,
}

/// The mapping file currently being served.
///
/// Readers take a cheap [`Arc`] snapshot via [`MappingStore::current`]; reloads
/// parse the new document first and only swap it in when parsing succeeded, so a
/// broken edit leaves the previous mapping in place.
pub struct MappingStore {
    path: PathBuf,
    state: RwLock<Loaded>,
}

impl MappingStore {
    /// Load the mapping at `path`. The initial load must succeed.
    pub fn open<P: Into<PathBuf>>(path: P) -> Result<Self, MappingError> {
        let path = path.into();
        let modified = modified_at(&path)?;
        let mapping = Mapping::load(&path)?;
        info!(
            map_file = %path.display(),
            entries = mapping.len(),
            "mapping loaded"
        );
        Ok(Self {
            path,
            state: RwLock::new(Loaded {
                mapping: Arc::new(mapping),
                modified,
            }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot of the mapping currently in effect.
    pub fn current(&self) -> Arc<Mapping> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&state.mapping)
    }

    /// Resolve a request path against the current mapping.
    pub fn resolve(&self, path: &str) -> Result<String, MappingError> {
        self.current().resolve(path).map(str::to_owned)
    }

    /// Re-read the file unconditionally. Returns the number of top-level entries.
    pub fn reload(&self) -> Result<usize, MappingError> {
        let modified = modified_at(&self.path)?;
        let mapping = Mapping::load(&self.path)?;
        let entries = mapping.len();
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        *state = Loaded {
            mapping: Arc::new(mapping),
            modified,
        };
        info!(map_file = %self.path.display(), entries, "mapping reloaded");
        Ok(entries)
    }

    /// Reload only when the file's modification time differs from the last load.
    ///
    /// Returns `Ok(true)` when a reload happened.
    pub fn reload_if_changed(&self) -> Result<bool, MappingError> {
        let modified = modified_at(&self.path)?;
        let unchanged = {
            let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
            modified.is_some() && state.modified == modified
        };
        if unchanged {
            debug!(map_file = %self.path.display(), "mapping unchanged");
            return Ok(false);
        }
        self.reload()?;
        Ok(true)
    }
}

fn modified_at(path: &Path) -> Result<Option<SystemTime>, MappingError> {
    let metadata = fs::metadata(path).map_err(|source| MappingError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    // Platforms without mtime support always reload.
    Ok(metadata.modified().ok())
}
