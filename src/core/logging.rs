//! Logging setup for the command-line binary

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default filter level for the given verbosity flags
pub fn default_level(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    }
}

/// Install a stderr subscriber
///
/// `RUST_LOG` overrides the level picked from `-v`/`-q`. Calling this more
/// than once is harmless; later calls leave the first subscriber in place.
pub fn init_logging(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose, quiet)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        assert_eq!(default_level(false, false), "warn");
        assert_eq!(default_level(true, false), "debug");
        assert_eq!(default_level(false, true), "error");
        // verbose wins when both are given
        assert_eq!(default_level(true, true), "debug");
    }
}
