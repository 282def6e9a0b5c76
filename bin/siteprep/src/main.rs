//! siteprep CLI
//!
//! Build-pass preprocessor that emits a sitemap, robots.txt and webmaster
//! tools verification files for a static site.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for siteprep.
#[derive(Parser)]
#[command(
    name = "siteprep",
    version,
    about = "Generate sitemap, robots.txt and webmaster tools files for a site build"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Validate configuration
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
    /// Run a preprocessing pass over an item manifest
    Run {
        /// Item manifest (YAML or JSON list of items)
        #[arg(short, long)]
        items: std::path::PathBuf,
        /// Write the resulting manifest here instead of stdout
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
        /// Render placeholders such as the XML sitemap
        #[arg(long)]
        render: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    siteprep::init_tracing(cli.verbose);

    match cli.command {
        Commands::Check { strict } => {
            siteprep::cmd::check::run(&cli.config, strict)?;
        }
        Commands::Run {
            items,
            output,
            render,
        } => {
            siteprep::cmd::run::run(&cli.config, &items, output.as_deref(), render)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_cli_run_command_parsing() {
        let args = ["siteprep", "run", "--items", "items.yaml"];
        let cli = Cli::parse_from(args);

        assert_eq!(cli.config, std::path::PathBuf::from("config.toml"));
        assert_eq!(cli.verbose, 0);

        match cli.command {
            Commands::Run {
                items,
                output,
                render,
            } => {
                assert_eq!(items, std::path::PathBuf::from("items.yaml"));
                assert!(output.is_none());
                assert!(!render);
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_run_with_output_and_render() {
        let args = [
            "siteprep", "run", "-i", "items.json", "-o", "out.json", "--render",
        ];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Run { output, render, .. } => {
                assert_eq!(output, Some(std::path::PathBuf::from("out.json")));
                assert!(render);
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_run_requires_items() {
        let args = ["siteprep", "run"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_cli_check_command_parsing() {
        let args = ["siteprep", "check", "--strict"];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Check { strict } => {
                assert!(strict);
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_cli_verbosity_flags() {
        let args = ["siteprep", "-vvv", "check"];
        let cli = Cli::parse_from(args);
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn test_cli_custom_config_path() {
        let args = ["siteprep", "--config", "config.yaml", "check"];
        let cli = Cli::parse_from(args);
        assert_eq!(cli.config, std::path::PathBuf::from("config.yaml"));
    }
}
