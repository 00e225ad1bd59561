//! # Load Test Scenario
//!
//! A goose scenario that checks the redirect service answers `GET /example`
//! with `302 Found` and `Location: https://www.example.com`.
//!
//! Each simulated user:
//!
//! 1. **on start**: disables redirect following on its HTTP client and writes
//!    `example: https://www.example.com` to `mapping.yaml` in the working
//!    directory, replacing any previous content. Run the service from the same
//!    directory with `map_file: mapping.yaml` and it serves exactly this entry.
//! 2. **repeatedly**: issues `GET /example` and records the request as a
//!    success or failure depending on [`RedirectExpectation::check`], then
//!    pauses 1-3 seconds.
//!
//! Everything else (user count, hatch rate, run time, host, reports) comes from
//! goose's own command line:
//!
//! ```bash
//! cargo run --release --bin yamlink-loadtest -- \
//!   --host http://localhost:8080 \
//!   -u50 -r10 -t5m \
//!   --report-file load-test-report.html
//! ```

mod check;
mod scenario;

pub use check::{RedirectError, RedirectExpectation, EXPECTED_TARGET};
pub use scenario::{api_user, ScenarioConfig, SetupFailed, REQUEST_PATH, SCENARIO_NAME};
