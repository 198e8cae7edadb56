use std::sync::Once;

use env_logger::{Builder, WriteStyle};
use log::LevelFilter;

/// Crates whose info-level output drowns out the engine's own lifecycle logs.
const QUIET_DEPENDENCIES: [&str; 3] = ["wgpu_core", "wgpu_hal", "naga"];

/// Settings for the process-wide logger.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Directives in `env_logger` syntax, e.g.
    /// `"firstlight_engine=trace,wgpu_core=warn"`. Takes precedence over
    /// `RUST_LOG`.
    pub env_filter: Option<String>,
    pub write_style: WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: WriteStyle::Auto,
        }
    }
}

/// Where the active filter directives came from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Filter {
    Directives(String),
    Default,
}

fn select_filter(configured: Option<String>, env: Option<String>) -> Filter {
    configured
        .or(env)
        .filter(|d| !d.trim().is_empty())
        .map_or(Filter::Default, Filter::Directives)
}

fn apply_filter(builder: &mut Builder, filter: &Filter) {
    match filter {
        Filter::Directives(directives) => {
            builder.parse_filters(directives);
        }
        Filter::Default => {
            builder.filter_level(LevelFilter::Info);
            for module in QUIET_DEPENDENCIES {
                builder.filter_module(module, LevelFilter::Warn);
            }
        }
    }
}

static INIT: Once = Once::new();

/// Installs the global logger. Only the first call has any effect.
///
/// If a logger was already installed by someone else it is left in place.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = select_filter(config.env_filter, std::env::var("RUST_LOG").ok());

        let mut builder = Builder::new();
        apply_filter(&mut builder, &filter);
        builder.write_style(config.write_style);

        if builder.try_init().is_ok() {
            log::debug!("logging initialized ({filter:?})");
        }
    });
}
