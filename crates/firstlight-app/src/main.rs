use std::process::ExitCode;

use firstlight_engine::core::AppConfig;
use firstlight_engine::logging::{LoggingConfig, init_logging};
use firstlight_engine::window::{Runtime, WindowConfig};

fn run() -> anyhow::Result<()> {
    Runtime::run(WindowConfig::default(), AppConfig::default())
}

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
