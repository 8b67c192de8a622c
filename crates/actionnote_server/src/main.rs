//! Server entry point.

use actionnote_core::{init_logging, Settings};
use anyhow::{Context, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::from_env().context("failed to load settings")?;
    init_logging(&settings.log_level, &settings.log_dir).context("failed to initialize logging")?;
    actionnote_server::run(settings).await
}
