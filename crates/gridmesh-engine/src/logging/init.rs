use std::sync::Once;

/// Logger configuration.
///
/// `filter` follows the `env_logger` filter syntax (e.g. "info",
/// "gridmesh_engine=debug,wgpu=warn"). When unset, `RUST_LOG` is consulted,
/// then `default_level` applies with the wgpu internals held at `warn`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub filter: Option<String>,
    pub default_level: log::LevelFilter,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: None,
            default_level: log::LevelFilter::Info,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

/// Crates that are chatty at `info` and only interesting when something breaks.
const QUIET_TARGETS: [&str; 3] = ["wgpu_core", "wgpu_hal", "naga"];

static INIT: Once = Once::new();

/// Installs the global logger. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match resolve_filter(&config, std::env::var("RUST_LOG").ok()) {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                builder.filter_level(config.default_level);
                for target in QUIET_TARGETS {
                    builder.filter_module(target, log::LevelFilter::Warn);
                }
            }
        }

        builder.write_style(config.write_style);
        builder.init();

        log::debug!("logging initialized");
    });
}

/// Explicit filter wins over `RUST_LOG`; `None` means "use the default level".
fn resolve_filter(config: &LoggingConfig, env: Option<String>) -> Option<String> {
    config
        .filter
        .clone()
        .filter(|f| !f.trim().is_empty())
        .or_else(|| env.filter(|f| !f.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_beats_env() {
        let cfg = LoggingConfig { filter: Some("debug".into()), ..Default::default() };
        assert_eq!(resolve_filter(&cfg, Some("warn".into())).as_deref(), Some("debug"));
    }

    #[test]
    fn env_used_when_no_explicit_filter() {
        let cfg = LoggingConfig::default();
        assert_eq!(resolve_filter(&cfg, Some("trace".into())).as_deref(), Some("trace"));
    }

    #[test]
    fn blank_filters_fall_through_to_default() {
        let cfg = LoggingConfig { filter: Some("  ".into()), ..Default::default() };
        assert_eq!(resolve_filter(&cfg, Some(String::new())), None);
    }
}
