//! # Hot Reload Module
//!
//! Watches the mapping file and swaps a freshly parsed mapping into the
//! [`MappingStore`] when it changes, without restarting the server.
//!
//! The watch is placed on the file's parent directory, not the file itself,
//! so editors that save by writing a temporary file and renaming it over the
//! original are still picked up.
//!
//! Editors and the load-test startup hook often produce several events per
//! save. Each event only triggers a reload when the file's modification time
//! moved since the last load (see [`MappingStore::reload_if_changed`]).
//!
//! If the new document fails to parse the error is logged and the previous
//! mapping stays active.
//!
//! ```rust,ignore
//! let store = Arc::new(MappingStore::open("mapping.yaml")?);
//! let watcher = watch_mapping(Arc::clone(&store))?;
//! // Keep `watcher` alive for as long as reloads are wanted.
//! ```

use crate::mapping::MappingStore;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Watch the store's mapping file and reload it on change.
pub fn watch_mapping(store: Arc<MappingStore>) -> notify::Result<RecommendedWatcher> {
    let file_name = store.path().file_name().map(OsString::from);
    let dir = watch_dir(store.path());

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| match res {
            Ok(event) => {
                if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                    return;
                }
                let touches_mapping = event
                    .paths
                    .iter()
                    .any(|p| p.file_name().map(OsString::from) == file_name);
                if !touches_mapping {
                    return;
                }
                match store.reload_if_changed() {
                    Ok(true) => info!(
                        map_file = %store.path().display(),
                        "hot-reload: mapping updated"
                    ),
                    Ok(false) => debug!("hot-reload: event without content change"),
                    Err(e) => warn!(
                        map_file = %store.path().display(),
                        error = %e,
                        "hot-reload: keeping previous mapping"
                    ),
                }
            }
            Err(e) => warn!(error = ?e, "hot-reload: watch error"),
        },
        Config::default(),
    )?;

    watcher.watch(&dir, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}

fn watch_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
