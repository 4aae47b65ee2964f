//! Telemetry setup

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{AppConfig, Environment};

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the configured `log_level`. Production logs are JSON.
/// When `log_dir` is set a daily rolling JSON file is written as well; keep the
/// returned guard alive for the lifetime of the process so it gets flushed.
pub fn init_telemetry(config: &AppConfig) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let (file_layer, guard) = match config.log_dir.as_deref() {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "hubdash.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let registry = tracing_subscriber::registry().with(env_filter).with(file_layer);

    if config.env == Environment::Production {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }

    guard
}
