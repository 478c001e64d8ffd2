use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Timelike;
use log::LevelFilter;
use watch_logging::{watch_error, watch_info};

use pagewatch_app::config::{self, Config};
use pagewatch_app::runner::{self, RunOutcome};

const DEFAULT_CONFIG_PATH: &str = "pagewatch.toml";

#[tokio::main]
async fn main() -> ExitCode {
    watch_logging::initialize_terminal(LevelFilter::Info);

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(err) => {
            watch_error!("Could not load configuration: {err}");
            return ExitCode::from(1);
        }
    };
    let timezone = match config.timezone() {
        Ok(timezone) => timezone,
        Err(err) => {
            watch_error!("Could not load configuration: {err}");
            return ExitCode::from(1);
        }
    };

    let local_hour = chrono::Utc::now().with_timezone(&timezone).hour();
    watch_info!("Local hour in {timezone}: {local_hour}");

    let credentials = config::telegram_credentials_from_env();

    match runner::execute(&config, credentials, local_hour).await {
        Ok(RunOutcome::Skipped { .. }) => ExitCode::SUCCESS,
        Ok(RunOutcome::Completed(report)) => {
            watch_info!(
                "Run complete: {} checked, {} failed, {} changed",
                report.pages_checked,
                report.pages_failed,
                report.changes
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            watch_error!("State store failure: {err}");
            ExitCode::from(2)
        }
    }
}
