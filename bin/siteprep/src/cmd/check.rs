//! Check command - validate configuration

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use siteprep_core::{Config, RobotsConfig};

/// Validation result.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Loads and validates the configuration. In strict mode warnings fail the
/// check as well.
pub fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration");

    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    match Config::load(config_path) {
        Ok(config) => {
            println!("  ✓ Configuration valid");
            describe(&config);
            for warning in config.warnings() {
                result.add_warning(warning);
            }
        }
        Err(e) => {
            let detail = std::error::Error::source(&e)
                .map(|source| format!(": {source}"))
                .unwrap_or_default();
            result.add_error(format!("{e}{detail}"));
            println!("  ✗ Configuration invalid: {e}");
        }
    }

    // Print summary
    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    // Determine exit status
    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Print what a build pass will generate with this configuration.
fn describe(config: &Config) {
    let files = config
        .webmaster_tools
        .iter()
        .filter(|tool| tool.identifier.is_some())
        .count();
    println!("  • {files} webmaster tools file(s)");

    match &config.robots {
        Some(RobotsConfig::Default) => println!("  • robots.txt (default policy)"),
        Some(RobotsConfig::Custom(rules)) => println!(
            "  • robots.txt ({} disallow, {} allow)",
            rules.disallow.len(),
            rules.allow.len()
        ),
        None => println!("  • no robots.txt"),
    }

    println!(
        "  • sitemap hiding {} extension(s), {} pattern(s)",
        config.sitemap.hidden_extensions.len(),
        config.sitemap.hidden_patterns.len()
    );
}
