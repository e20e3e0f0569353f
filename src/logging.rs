use std::sync::Mutex;

use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Env var naming a log file; unset means log to stderr.
pub const LOG_FILE_ENV: &str = "TERMFOLIO_LOG";

/// Initialize tracing.
///
/// Level comes from `RUST_LOG` (default `info`). When `TERMFOLIO_LOG` is set,
/// output goes to `{path}.{timestamp}.{pid}` instead of stderr so several
/// instances can share one base path.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file = std::env::var(LOG_FILE_ENV).ok().and_then(|log_path| {
        let pid = std::process::id();
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let unique_path = format!("{}.{}.{}", log_path, timestamp, pid);
        match std::fs::File::create(&unique_path) {
            Ok(file) => Some(file),
            Err(err) => {
                eprintln!("Warning: Failed to create log file {}: {}", unique_path, err);
                None
            }
        }
    });

    let (file_layer, stderr_layer) = match file {
        Some(file) => (
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(true)
                    .with_timer(UtcTime::rfc_3339()),
            ),
            None,
        ),
        None => (
            None,
            Some(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_timer(UtcTime::rfc_3339()),
            ),
        ),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();
}
