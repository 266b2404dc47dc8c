//! Diagnostic logging setup.
//!
//! Core events (skipped files, directory listings) go through `tracing`. The
//! subscriber writes to stderr so stdout stays reserved for command output.

use tracing_subscriber::EnvFilter;

/// Returns the filter directive used when `RUST_LOG` is not set.
pub fn default_directive(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    }
}

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over the verbosity flags. Calling this more
/// than once keeps the first subscriber.
pub fn init(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false, false), "warn");
        assert_eq!(default_directive(true, false), "debug");
        assert_eq!(default_directive(false, true), "error");
    }
}
