//! Tracing setup: stderr always, plus a per-session file when configured.

use anyhow::Result;
use hunter_runtime::RuntimeConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs the global subscriber.
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// whole run.
pub fn setup_logging(config: &RuntimeConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = match &config.log_dir {
        Some(log_dir) => {
            let session_log_dir = log_dir.join(&config.session_id);
            std::fs::create_dir_all(&session_log_dir)?;

            let file_appender = tracing_appender::rolling::never(&session_log_dir, "hunter.log");
            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if let Some(log_dir) = &config.log_dir {
        tracing::info!(
            "Log file: {}/{}/hunter.log",
            log_dir.display(),
            config.session_id
        );
    }

    Ok(guard)
}
