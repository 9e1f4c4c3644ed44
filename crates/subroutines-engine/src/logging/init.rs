use std::sync::Once;

/// Dependencies that log per-call at `info`; held to `warn` unless a filter
/// is given explicitly.
const QUIET_MODULES: [&str; 3] = ["wgpu_core", "wgpu_hal", "naga"];

/// Logger configuration.
///
/// `env_filter` uses `env_logger` filter syntax, e.g.
/// `"subroutines_engine=debug,wgpu_core=warn"`. When `None`, `RUST_LOG` is
/// consulted before falling back to `info`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    /// Config with an explicit filter, ignoring `RUST_LOG`.
    pub fn with_filter(filter: impl Into<String>) -> Self {
        Self {
            env_filter: Some(filter.into()),
            ..Self::default()
        }
    }

    fn builder(&self) -> env_logger::Builder {
        let mut builder = env_logger::Builder::new();

        match self.env_filter.clone().or_else(|| std::env::var("RUST_LOG").ok()) {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                builder.filter_level(log::LevelFilter::Info);
                for module in QUIET_MODULES {
                    builder.filter_module(module, log::LevelFilter::Warn);
                }
            }
        }

        builder.write_style(self.write_style);
        builder
    }
}

static INIT: Once = Once::new();

/// Installs the global logger. Later calls are no-ops.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        // Another logger (e.g. from a test harness) may already be installed.
        if config.builder().try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}
