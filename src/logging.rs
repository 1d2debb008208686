//! Logging configuration using tracing

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Font loading crates that log once per unreadable system font
const NOISY_TARGETS: [&str; 2] = ["fontdb", "usvg"];

/// Initialize the logging system
///
/// Log lines go to stderr so the progress output on stdout stays readable.
/// `RUST_LOG` replaces the built-in filter unless `verbose` is set.
pub fn init(verbose: bool, json: bool) -> anyhow::Result<()> {
    let filter = if verbose {
        EnvFilter::try_new(default_directives(true))?
    } else {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::try_new(default_directives(false))?,
        }
    };

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()?;
    }

    Ok(())
}

fn default_directives(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    std::iter::once(level.to_string())
        .chain(NOISY_TARGETS.iter().map(|target| format!("{}=error", target)))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(default_directives(false), "info,fontdb=error,usvg=error");
        assert_eq!(default_directives(true), "debug,fontdb=error,usvg=error");
    }

    #[test]
    fn test_default_directives_parse() {
        assert!(EnvFilter::try_new(default_directives(false)).is_ok());
        assert!(EnvFilter::try_new(default_directives(true)).is_ok());
    }
}
