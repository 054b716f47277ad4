use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Output goes to stderr so it never mixes
/// with the status lines on stdout.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
