use super::check::RedirectExpectation;
use crate::mapping::{DEFAULT_MAPPING_FILE, MAPPING_ENTRY};
use goose::config::GooseConfiguration;
use goose::goose::TransactionError;
use goose::prelude::*;
use reqwest::redirect::Policy;
use reqwest::{Client, ClientBuilder, Method};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

pub const SCENARIO_NAME: &str = "ApiUser";
pub const REQUEST_PATH: &str = "/example";

/// goose's own per-request timeout when `--timeout` is not given.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "-loadtest/", env!("CARGO_PKG_VERSION"));

/// Knobs for the `ApiUser` scenario. The defaults are the production values.
#[derive(Debug, Clone)]
pub struct ScenarioConfig {
    /// Where each user's startup hook writes the mapping entry
    pub mapping_path: PathBuf,
    /// Path requested on every iteration, relative to `--host`
    pub request_path: String,
    pub expectation: RedirectExpectation,
    /// Pause after each task is drawn uniformly from `min_wait..=max_wait`
    pub min_wait: Duration,
    pub max_wait: Duration,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            mapping_path: PathBuf::from(DEFAULT_MAPPING_FILE),
            request_path: REQUEST_PATH.to_string(),
            expectation: RedirectExpectation::default(),
            min_wait: Duration::from_secs(1),
            max_wait: Duration::from_secs(3),
        }
    }
}

/// Session marker for a user whose startup hook could not write the mapping.
///
/// goose has no way to retire a single user, so such a user stays parked: its
/// remaining task invocations return without issuing requests.
#[derive(Debug)]
pub struct SetupFailed {
    pub reason: String,
}

/// Build the `ApiUser` scenario.
///
/// One on-start transaction (the startup hook) and one repeating transaction
/// (the redirect check), separated by the configured random pause.
pub fn api_user(config: ScenarioConfig) -> Result<Scenario, GooseError> {
    let (min_wait, max_wait) = (config.min_wait, config.max_wait);
    let config = Arc::new(config);

    let on_start = {
        let config = Arc::clone(&config);
        let function: TransactionFunction = Arc::new(move |user| {
            let config = Arc::clone(&config);
            Box::pin(async move { start_user(user, &config).await })
        });
        Transaction::new(function)
            .set_name("write mapping")
            .set_on_start()
    };

    let check = {
        let config = Arc::clone(&config);
        let function: TransactionFunction = Arc::new(move |user| {
            let config = Arc::clone(&config);
            Box::pin(async move { check_redirect(user, &config).await })
        });
        Transaction::new(function).set_name("check redirect")
    };

    Ok(Scenario::new(SCENARIO_NAME)
        .set_wait_time(min_wait, max_wait)?
        .register_transaction(on_start)
        .register_transaction(check))
}

/// Startup hook: disable redirect following for this user, then write the mapping file.
///
/// A failed write fails this transaction, so it shows up in goose's
/// transaction metrics, and parks the user (see [`SetupFailed`]).
async fn start_user(user: &mut GooseUser, config: &ScenarioConfig) -> TransactionResult {
    let builder = client_builder(&user.config).redirect(Policy::none());
    user.set_client_builder(builder).await?;

    match tokio::fs::write(&config.mapping_path, MAPPING_ENTRY).await {
        Ok(()) => {
            debug!(
                user = user.weighted_users_index,
                path = %config.mapping_path.display(),
                "mapping file written"
            );
            Ok(())
        }
        Err(e) => {
            error!(
                user = user.weighted_users_index,
                path = %config.mapping_path.display(),
                error = %e,
                "failed to write mapping file; user will not run tasks"
            );
            user.set_session_data(SetupFailed {
                reason: e.to_string(),
            });
            Err(setup_error())
        }
    }
}

/// The client goose builds for every user, rebuilt so the redirect policy
/// can be changed. `set_client_builder` replaces the client wholesale.
fn client_builder(goose_config: &GooseConfiguration) -> ClientBuilder {
    Client::builder()
        .user_agent(USER_AGENT)
        .cookie_store(true)
        .gzip(!goose_config.no_gzip)
        .timeout(request_timeout(goose_config))
}

/// `--timeout` in (fractional) seconds, falling back to goose's default.
fn request_timeout(goose_config: &GooseConfiguration) -> Duration {
    goose_config
        .timeout
        .as_deref()
        .and_then(|t| t.trim().parse::<f64>().ok())
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .filter(|timeout| !timeout.is_zero())
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT)
}

/// goose's `TransactionError` only models HTTP failures, and its transaction
/// metrics only record that the function returned `Err`. The real reason is
/// logged by the caller; the method name marks the failed step in goose's
/// debug output.
fn setup_error() -> Box<TransactionError> {
    Box::new(TransactionError::InvalidMethod {
        method: Method::from_bytes(b"WRITE-MAPPING").unwrap_or_default(),
    })
}

/// Task body: one GET, marked pass/fail by [`RedirectExpectation::check`].
async fn check_redirect(user: &mut GooseUser, config: &ScenarioConfig) -> TransactionResult {
    if let Some(failed) = user.get_session_data::<SetupFailed>() {
        debug!(
            user = user.weighted_users_index,
            reason = %failed.reason,
            "skipping task after failed setup"
        );
        return Ok(());
    }

    let request = GooseRequest::builder()
        .path(config.request_path.as_str())
        .expect_status_code(302)
        .build();
    let mut goose = user.request(request).await?;

    let outcome = match &goose.response {
        Ok(response) => config
            .expectation
            .check(response.status(), response.headers()),
        // Transport errors are already recorded as failed requests by goose.
        Err(e) => {
            debug!(error = %e, "request failed before a response arrived");
            return Ok(());
        }
    };

    match outcome {
        Ok(()) => Ok(()),
        Err(failure) => {
            let headers = goose.response.as_ref().ok().map(|r| r.headers());
            user.set_failure(&failure.to_string(), &mut goose.request, headers, None)
        }
    }
}
