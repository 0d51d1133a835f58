use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::kernel::services::adapters::ensure_log_dir;
use crate::kernel::services::ports::LogConfig;

const LOG_FILE_PREFIX: &str = "mdpad.log";

/// Keeps the background log writer alive; drop it to flush and stop.
pub struct LoggingGuard {
    _guard: WorkerGuard,
    log_dir: PathBuf,
}

impl LoggingGuard {
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

fn resolve_log_dir(config: &LogConfig) -> std::io::Result<PathBuf> {
    if let Some(dir) = &config.dir {
        std::fs::create_dir_all(dir)?;
        return Ok(dir.clone());
    }
    ensure_log_dir().or_else(|_| -> std::io::Result<PathBuf> {
        let dir = std::env::temp_dir().join("mdpad").join("logs");
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    })
}

/// Installs the global subscriber. `RUST_LOG` wins over `config.filter`.
/// Returns `None` if the log directory is unusable or a subscriber is already set.
pub fn init(config: &LogConfig) -> Option<LoggingGuard> {
    let log_dir = resolve_log_dir(config).ok()?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
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
