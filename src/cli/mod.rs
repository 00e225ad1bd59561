//! # CLI Module
//!
//! Command-line interface for the `yamlink` binary.
//!
//! ## Commands
//!
//! ### `serve`
//!
//! Run the redirect server:
//!
//! ```bash
//! CONFIG_FILE=config.yaml yamlink serve
//! yamlink serve --config config.yaml
//! ```
//!
//! ### `lookup`
//!
//! Resolve a single path and print the target (no trailing newline), handy in
//! shell aliases:
//!
//! ```bash
//! MAP_FILE=mapping.yaml yamlink lookup docs/rust
//! open "$(yamlink lookup example --map-file mapping.yaml)"
//! ```
//!
//! ### `write-mapping`
//!
//! Write the entry the load-test scenario writes on user start:
//!
//! ```bash
//! yamlink write-mapping --path mapping.yaml
//! ```
//!
//! The load test itself lives in the separate `yamlink-loadtest` binary,
//! which takes goose's own flags.

mod commands;


pub use commands::{lookup, run, run_cli, serve, Cli, Commands};
