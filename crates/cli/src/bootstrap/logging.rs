use ip6walk_domain::config::{LogFormat, LoggingConfig};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. Logs go to stderr; stdout carries results.
///
/// `RUST_LOG` replaces the configured level unless `--log-level` was given.
pub fn init_logging(logging: &LoggingConfig, level_from_cli: bool) {
    let filter = build_filter(logging, std::env::var(EnvFilter::DEFAULT_ENV).ok(), level_from_cli);

    match logging.format {
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }
}

fn build_filter(logging: &LoggingConfig, env: Option<String>, level_from_cli: bool) -> EnvFilter {
    match env {
        Some(directives) if !level_from_cli && !directives.is_empty() => {
            EnvFilter::builder().parse_lossy(directives)
        }
        _ => EnvFilter::builder().parse_lossy(&logging.level),
    }
}
