use std::env;
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Stdout plus file logging. `TRACING_LEVEL` sets the filter (default `info`);
/// `--verbose` forces `debug` on top of it. `LOG_FILE_PATH` sets the log file.
pub fn init_logger(verbose: bool) -> impl Drop {
    let filter_layer = EnvFilter::new(filter_directive(
        verbose,
        env::var("TRACING_LEVEL").ok(),
    ));

    let log_file_path =
        env::var("LOG_FILE_PATH").unwrap_or_else(|_| "./logs/tube-sync.log".to_string());

    let file_appender = tracing_appender::rolling::never("./", log_file_path);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stdout)
                .with_target(false)
                .with_file(false)
                .without_time()
                .with_ansi(true),
        )
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .with(filter_layer)
        .init();

    debug!("Tracing is configured for stdout and file logging.");

    guard
}

fn filter_directive(verbose: bool, configured: Option<String>) -> String {
    match (verbose, configured) {
        (true, _) => "debug".to_string(),
        (false, Some(level)) => level,
        (false, None) => "info".to_string(),
    }
}
