//! # Runtime Configuration Module
//!
//! Environment variable-based tuning for the `may` coroutine runtime that
//! drives the redirect server.
//!
//! ## Environment Variables
//!
//! ### `YAMLINK_STACK_SIZE`
//!
//! Stack size for connection coroutines. Accepts decimal (`16384`) or
//! hexadecimal (`0x4000`). Default: `0x4000` (16 KB).
//!
//! Redirect handling is shallow, so the default is plenty. Raise it only if
//! mapping documents are nested very deeply.
//!
//! ### `YAMLINK_WORKERS`
//!
//! Number of `may` worker threads. Unset leaves the runtime default (one per
//! CPU core).
//!
//! ## Usage
//!
//! ```rust
//! use yamlink::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Stack size: {} bytes", config.stack_size);
//! ```

use std::env;

const DEFAULT_STACK_SIZE: usize = 0x4000;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Stack size for coroutines in bytes (default: 16 KB / 0x4000)
    pub stack_size: usize,
    /// Worker thread count, `None` for the runtime default
    pub workers: Option<usize>,
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_values(
            env::var("YAMLINK_STACK_SIZE").ok().as_deref(),
            env::var("YAMLINK_WORKERS").ok().as_deref(),
        )
    }

    fn from_values(stack_size: Option<&str>, workers: Option<&str>) -> Self {
        let stack_size = stack_size
            .and_then(parse_size)
            .unwrap_or(DEFAULT_STACK_SIZE);
        let workers = workers
            .and_then(|w| w.trim().parse().ok())
            .filter(|&w: &usize| w > 0);
        RuntimeConfig {
            stack_size,
            workers,
        }
    }

    /// Push the settings into the global `may` configuration.
    ///
    /// Must run before the server starts its first coroutine.
    pub fn apply(&self) {
        let config = may::config();
        config.set_stack_size(self.stack_size);
        if let Some(workers) = self.workers {
            config.set_workers(workers);
        }
    }
}

fn parse_size(val: &str) -> Option<usize> {
    let val = val.trim();
    match val.strip_prefix("0x") {
        Some(hex) => usize::from_str_radix(hex, 16).ok(),
        None => val.parse().ok(),
    }
}
