use tracing_subscriber::EnvFilter;

/// Sets up logging of events reported by the crate during tests.
///
/// Use the RUST_LOG environment variable to select what is logged.
///
/// E.g. to see why a signature didn’t verify:
///   RUST_LOG=dnsmsg::dnssec=DEBUG
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_thread_ids(true)
        .without_time()
        .try_init()
        .ok();
}
