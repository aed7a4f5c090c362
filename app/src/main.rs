use std::sync::Arc;

use follower_app::{logging, run, AppConfig, AppError, Driver, UreqTransport};
use follower_core::FollowerSession;
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    logging::setup_logging(&config.log_level)?;

    tracing::info!(
        user = %config.user,
        base_url = %config.base_url,
        "press Enter for a random follower, q to quit"
    );

    let session = FollowerSession::new(config.client(), config.user.clone());
    let mut driver = Driver::new(session, Arc::new(UreqTransport::new()));

    run(&mut driver, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
}
