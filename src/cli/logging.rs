use std::env::{self, VarError};
use tracing_subscriber::EnvFilter;

/// HTTP stack crates that are only interesting when something is broken.
const QUIET_DEPENDENCIES: [&str; 4] = ["hyper=warn", "reqwest=warn", "rustls=warn", "h2=warn"];

/// Installs the global stderr subscriber.
///
/// `RUST_LOG` takes precedence over `verbose` when it is set.
pub fn init_tracing(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(get_env_filter(default_env_filter(verbose)))
        .with_writer(std::io::stderr)
        .init();
}

fn get_env_filter(default: EnvFilter) -> EnvFilter {
    match env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) => EnvFilter::new(directives),
        Err(VarError::NotPresent) => default,
        Err(VarError::NotUnicode(_)) => EnvFilter::default(),
    }
}

fn default_env_filter(verbose: bool) -> EnvFilter {
    let level = if verbose { "debug" } else { "info" };
    EnvFilter::new(std::iter::once(level).chain(QUIET_DEPENDENCIES).collect::<Vec<_>>().join(","))
}
