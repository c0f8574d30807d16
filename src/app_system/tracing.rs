use tracing_subscriber::EnvFilter;

/// Configure tracing once at startup for the whole process.
///
/// `RUST_LOG` wins when set; otherwise `default_level` (from config) is used.
///
/// ```bash
/// RUST_LOG=debug cargo run
/// RUST_LOG=postrelay::actors=debug,info cargo run
/// ```
pub fn setup_tracing(default_level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();
}
