//! # yamlink
//!
//! **yamlink** is a small redirect service driven by a YAML mapping file, plus a
//! [goose](https://docs.rs/goose) load-test scenario that exercises it.
//!
//! ## Overview
//!
//! A mapping file nests keys and lists; any request path that walks the tree
//! down to a string is answered with a `302 Found` to that string:
//!
//! ```yaml
//! example: https://www.example.com
//! docs:
//!   rust: https://doc.rust-lang.org
//!   mirrors:
//!     - https://mirror-a.example.org
//!     - https://mirror-b.example.org
//! ```
//!
//! | Request             | Response                                  |
//! |---------------------|-------------------------------------------|
//! | `GET /example`      | `302`, `Location: https://www.example.com`|
//! | `GET /docs/mirrors/1` | `302`, `Location: https://mirror-b.example.org` |
//! | `GET /` or `/health`| `200`, `Health is good!`                  |
//! | anything else       | `404`, `Not Found`                        |
//!
//! ## Architecture
//!
//! - **[`mapping`]** - Mapping parsing, path resolution and the reloadable store
//! - **[`server`]** - HTTP server built on `may_minihttp` that answers lookups
//! - **[`hot_reload`]** - Reloads the mapping file when it changes on disk
//! - **[`loadtest`]** - The `ApiUser` goose scenario and its redirect check
//! - **[`config`]** - Server configuration file
//! - **[`runtime_config`]** - Coroutine runtime tuning from the environment
//! - **[`otel`]** - `tracing` subscriber setup
//! - **[`cli`]** - The `yamlink` command line
//!
//! ## Quick Start
//!
//! ```bash
//! # Write the mapping the load test expects and serve it
//! cargo run -- write-mapping
//! printf 'port: 8080\nmap_file: mapping.yaml\n' > config.yaml
//! cargo run --release -- serve --config config.yaml
//!
//! # In another shell
//! cargo run --release --bin yamlink-loadtest -- --host http://localhost:8080 -u10 -r2 -t1m
//! ```
//!
//! ## Logging
//!
//! The `yamlink` binary installs a `tracing` subscriber. Set `YAMLINK_LOG_LEVEL`
//! (or the legacy `LOG_LEVEL`) to `trace`, `debug`, `info`, `warn` or `error`,
//! and `YAMLINK_LOG_FORMAT=pretty` for human-readable output during development.
//!
//! `yamlink-loadtest` leaves logging to goose: with no subscriber installed,
//! `tracing` events are forwarded to goose's `log` logger, so they follow
//! goose's `-v` / `--log-file` flags.

pub mod cli;
pub mod config;
pub mod hot_reload;
pub mod loadtest;
pub mod mapping;
pub mod otel;
pub mod runtime_config;
pub mod server;

pub use mapping::{Mapping, MappingError, MappingStore};
