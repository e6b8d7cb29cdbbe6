use std::fs;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_FILE_PREFIX: &str = "scraper.log";

/// Initializes the logging system with console output and a JSON file
/// rolled daily under `log_dir`.
pub fn init_logging(log_dir: &str) {
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender(log_dir));
    let file_layer = fmt::layer().json().with_writer(non_blocking_writer);

    // Console goes to stderr so `--stdout` JSON output stays clean
    let console_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr);

    // Respect RUST_LOG if set; otherwise default to verbose for our crate
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("iloveqatar_scraper=debug,info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    // The guard flushes on drop; keep it for the life of the process
    std::mem::forget(guard);
}

/// Daily `scraper.log` appender under `log_dir`, creating the directory first.
fn file_appender(log_dir: &str) -> RollingFileAppender {
    if let Err(e) = fs::create_dir_all(log_dir) {
        eprintln!("could not create log directory {}: {}", log_dir, e);
    }
    tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX)
}
