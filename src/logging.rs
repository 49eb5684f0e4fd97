use std::path::PathBuf;
use std::sync::Mutex;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Keeps the file writer's background worker alive until the process exits.
static FILE_GUARD: Mutex<Option<WorkerGuard>> = Mutex::new(None);

/// Level used when `RUST_LOG` does not apply.
pub fn default_level(debug: bool) -> &'static str {
    if debug {
        "debug"
    } else {
        "info"
    }
}

/// Initialise logging. With `debug` the default level is `debug` and the
/// `RUST_LOG` environment variable may override it; otherwise `info` is
/// forced. When `log_file` is set, output goes to that file instead of stdout.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init(debug: bool, log_file: Option<PathBuf>) -> bool {
    let level = default_level(debug);
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    let Some(path) = log_file else {
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init()
            .is_ok();
    };

    let dir = path
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let file_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "bongo_overlay.log".into());
    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(writer)
        .try_init()
        .is_ok();
    if installed {
        *FILE_GUARD.lock().unwrap_or_else(|e| e.into_inner()) = Some(guard);
    }
    installed
}
