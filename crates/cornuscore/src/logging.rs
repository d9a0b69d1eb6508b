//! Logging setup for CornuScore binaries.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing at `info`, overridable through `RUST_LOG`.
pub fn init() -> Result<(), TryInitError> {
    init_with_filter("info")
}

/// Initialize tracing with a default filter, overridable through `RUST_LOG`.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
/// Fails if a global subscriber is already installed.
pub fn init_with_filter(default_filter: &str) -> Result<(), TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_rejected() {
        assert!(init().is_ok());
        assert!(init_with_filter("debug").is_err());
    }
}
