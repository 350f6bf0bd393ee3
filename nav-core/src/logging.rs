//! Crate-standard logging setup.

use tracing_subscriber::EnvFilter;

/// Install a global `tracing` subscriber writing compact lines to stderr.
///
/// `env_filter` is any `EnvFilter` directive (`warn`, `nav_route=debug`, ...). A `RUST_LOG`
/// variable in the environment takes precedence over it. Stdout is left alone so that it only ever
/// carries program output.
pub fn setup(env_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
