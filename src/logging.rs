use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "zui=info";

/// Keeps the non-blocking writer alive; logs are flushed when dropped.
pub struct LoggingGuard {
    _guard: WorkerGuard,
    log_dir: PathBuf,
}

impl LoggingGuard {
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

/// Log to a daily-rolling file. The terminal is owned by the renderer, so
/// nothing is ever written to stdout/stderr. `RUST_LOG` wins over `filter`.
pub fn init(filter: Option<&str>) -> Option<LoggingGuard> {
    let log_dir = zui::settings::log_dir()
        .and_then(|dir| std::fs::create_dir_all(&dir).ok().map(|_| dir))
        .or_else(|| {
            let dir = std::env::temp_dir().join("zui").join("logs");
            std::fs::create_dir_all(&dir).ok().map(|_| dir)
        })?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "zui.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter.unwrap_or(DEFAULT_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true),
    );

    if subscriber.try_init().is_err() {
        return None;
    }

    std::panic::set_hook(Box::new(|panic_info| {
        tracing::error!(panic = %panic_info, "panic");
    }));

    tracing::info!(log_dir = %log_dir.display(), "tracing initialized");

    Some(LoggingGuard {
        _guard: guard,
        log_dir,
    })
}
