use std::fs::OpenOptions;

use log::{info, LevelFilter};

use crate::app::controller::DashboardController;
use crate::config::{load_config, LoggingConfig};
use crate::error::{AppError, Context, Result};
use crate::utils::ensure_dir;

/// Entry point used by `main`: load config, start logging, then hand over to the controller.
pub async fn run() -> Result<()> {
    let config = load_config()?;
    init_logging(&config.logging)?;
    info!(
        "Loaded configuration (api {}, page size {}, downloads {})",
        config.api_base(),
        config.pagination.default_page_size,
        config.exports.download_dir.display()
    );

    ensure_dir(&config.exports.download_dir)?;
    let controller = DashboardController::new(config)?;
    controller.run().await
}

fn level_filter(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::Info)
}

/// The terminal belongs to the dashboard, so logs go to a file. `RUST_LOG` overrides the level.
fn init_logging(logging: &LoggingConfig) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&logging.file)
        .with_context(|| format!("Failed to open log file {}", logging.file.display()))?;

    env_logger::Builder::new()
        .filter_level(level_filter(&logging.level))
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .map_err(|err| AppError::message(format!("Failed to initialise logging: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_levels_fall_back_to_info() {
        assert_eq!(level_filter("debug"), LevelFilter::Debug);
        assert_eq!(level_filter(" WARN "), LevelFilter::Warn);
        assert_eq!(level_filter("chatty"), LevelFilter::Info);
    }
}
