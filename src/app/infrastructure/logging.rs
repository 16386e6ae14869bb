//! Logging setup.
//
// Call `logging::init()` at the start of main(). Filtering follows `RUST_LOG`,
// falling back to `info`.

use tracing_subscriber::EnvFilter;

pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init();
}
