//! goose entry point for the `ApiUser` redirect scenario.
//!
//! All flags are goose's; see `yamlink-loadtest --help`.

use goose::prelude::*;
use yamlink::loadtest::{api_user, ScenarioConfig};

#[tokio::main]
async fn main() -> Result<(), GooseError> {
    GooseAttack::initialize()?
        .register_scenario(api_user(ScenarioConfig::default())?)
        .execute()
        .await?;

    Ok(())
}
