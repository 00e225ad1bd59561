//! # Redirect Server
//!
//! A `may_minihttp` service that answers every request from a [`MappingStore`]:
//! health checks on `/` and `/health`, `302 Found` for paths that resolve and
//! `404 Not Found` for everything else.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use yamlink::mapping::MappingStore;
//! use yamlink::server::{HttpServer, RedirectService};
//!
//! let store = Arc::new(MappingStore::open("mapping.yaml")?);
//! let handle = HttpServer(RedirectService::new(store)).start("0.0.0.0:8080")?;
//! handle.wait_ready()?;
//! ```
//!
//! [`MappingStore`]: crate::mapping::MappingStore

pub mod http_server;
pub mod response;
pub mod service;

pub use http_server::{HttpServer, ServerHandle};
pub use response::LocationHeaders;
pub use service::{health_endpoint, RedirectService};
