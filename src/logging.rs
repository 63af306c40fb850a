use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub fn init_logging(level: &str) {
    let level = match level {
        "trace" | "debug" | "info" | "warn" | "error" => level,
        _ => "info",
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.parse().unwrap())
        .parse_lossy(&std::env::var("RUST_LOG").unwrap_or_default());

    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_ansi(true);

    tracing_subscriber::registry()
        .with(stdout_layer.with_filter(filter))
        .init();
}
