//! # Mapping Module
//!
//! A mapping file is a YAML document whose leaves are redirect targets. Request
//! paths are resolved by walking the document one `/`-separated segment at a time:
//! numeric segments index into sequences, everything else names a key in a mapping.
//!
//! ```yaml
//! example: https://www.example.com
//! docs:
//!   rust: https://doc.rust-lang.org
//!   mirrors:
//!     - https://mirror-a.example.com
//!     - https://mirror-b.example.com
//! ```
//!
//! With the document above:
//!
//! | Path               | Target                           |
//! |--------------------|----------------------------------|
//! | `/example`         | `https://www.example.com`        |
//! | `/docs/rust/`      | `https://doc.rust-lang.org`      |
//! | `/docs/mirrors/1`  | `https://mirror-b.example.com`   |
//! | `/docs`            | error: not a URL string          |
//! | `/docs/mirrors/2`  | error: not found                 |
//!
//! [`MappingStore`] keeps the currently loaded [`Mapping`] behind a lock so the
//! redirect server can keep serving while the file is reloaded.

mod lookup;
mod store;

pub use lookup::{lookup, split_path};
pub use store::MappingStore;

use serde_yaml::Value;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// File name the load-test scenario writes into the working directory.
pub const DEFAULT_MAPPING_FILE: &str = "mapping.yaml";

/// The single entry written by the load-test startup hook.
pub const MAPPING_ENTRY: &str = "example: https://www.example.com";

/// Errors raised while loading a mapping document or resolving a path in it.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    #[error("failed to read mapping file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid mapping document: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("mapping document must be a YAML mapping at the top level")]
    InvalidRoot,
    #[error("empty lookup path")]
    EmptyPath,
    #[error("no mapping for {path}")]
    NotFound { path: String },
    #[error("mapping entry at {path} is not a URL string")]
    NotAString { path: String },
}

impl MappingError {
    /// `true` when the error comes from resolving a path rather than loading the file.
    pub fn is_lookup_miss(&self) -> bool {
        matches!(
            self,
            MappingError::EmptyPath | MappingError::NotFound { .. } | MappingError::NotAString { .. }
        )
    }
}

/// A parsed mapping document.
#[derive(Debug, Clone, PartialEq)]
pub struct Mapping {
    root: Value,
}

impl Mapping {
    /// Parse a mapping from YAML text.
    pub fn parse(document: &str) -> Result<Self, MappingError> {
        Self::from_value(serde_yaml::from_str(document)?)
    }

    /// Parse a mapping from any reader producing YAML.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, MappingError> {
        Self::from_value(serde_yaml::from_reader(reader)?)
    }

    /// Read and parse the mapping file at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MappingError> {
        let path = path.as_ref();
        let document = fs::read_to_string(path).map_err(|source| MappingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&document)
    }

    fn from_value(root: Value) -> Result<Self, MappingError> {
        if root.is_mapping() {
            Ok(Self { root })
        } else {
            Err(MappingError::InvalidRoot)
        }
    }

    /// Resolve a request path (e.g. `/docs/mirrors/0`) to its redirect target.
    pub fn resolve(&self, path: &str) -> Result<&str, MappingError> {
        lookup(&self.root, path)
    }

    /// Number of top-level entries.
    pub fn len(&self) -> usize {
        self.root.as_mapping().map_or(0, |m| m.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Write [`MAPPING_ENTRY`] to `path`, truncating whatever was there before.
///
/// This is the load-test startup hook without the harness around it; the
/// `write-mapping` CLI command calls it directly.
pub fn write_default_mapping<P: AsRef<Path>>(path: P) -> io::Result<()> {
    fs::write(path, MAPPING_ENTRY)
}
