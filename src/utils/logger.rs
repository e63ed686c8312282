use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directive for this crate. `verbose` raises the level to at least
/// `debug`; without a configured level the crate logs at `info`.
pub fn filter_directive(level: Option<&str>, verbose: bool) -> String {
    let level = level
        .map(|l| l.trim().to_ascii_lowercase())
        .unwrap_or_else(|| "info".to_string());
    let level = match level.as_str() {
        "trace" => "trace",
        _ if verbose => "debug",
        "debug" => "debug",
        "warn" => "warn",
        "error" => "error",
        _ => "info",
    };
    format!("realty_query={},warn", level)
}

// RUST_LOG wins over the configured level.
fn default_filter(level: Option<&str>, verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(level, verbose)))
}

pub fn init_cli_logger(level: Option<&str>, verbose: bool) {
    tracing_subscriber::registry()
        .with(default_filter(level, verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// Structured output for log shippers.
pub fn init_json_logger(level: Option<&str>, verbose: bool) {
    tracing_subscriber::registry()
        .with(default_filter(level, verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .init();
}
