//! siteprep CLI Library
//!
//! Command implementations for the siteprep binary, exposed as a library so
//! they can be driven from a surrounding build.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (check, run)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use siteprep::cmd;
//!
//! // Validate the site configuration
//! cmd::check::run(Path::new("config.toml"), false).unwrap();
//! ```

pub mod cmd;

// Re-export core types for convenience
pub use siteprep_core::{Config, Item};
pub use siteprep_generator::{PreprocessStats, Preprocessor};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
///
/// # Example
///
/// ```no_run
/// siteprep::init_tracing(2); // Enable DEBUG level logging
/// ```
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
