//! Run command - one preprocessing pass over an item manifest

use std::{io::Write, path::Path, time::Instant};

use color_eyre::eyre::{Result, WrapErr};
use siteprep_core::{Config, Item, item::load_manifest};
use siteprep_generator::{PreprocessStats, Preprocessor};

/// Run the preprocessing command.
///
/// Loads the configuration (with `SITEPREP__*` environment overrides) and the
/// item manifest, appends the generated items and writes the resulting
/// manifest as JSON to `output`, or to stdout when no output is given.
pub fn run(config_path: &Path, items_path: &Path, output: Option<&Path>, render: bool) -> Result<()> {
    let start = Instant::now();
    tracing::info!(?config_path, ?items_path, ?output, render, "Starting preprocessing");

    let config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;
    tracing::debug!(?config, "Loaded configuration");

    let mut items = load_manifest(items_path)
        .wrap_err_with(|| format!("Failed to load items from {}", items_path.display()))?;

    let (stats, rendered) = preprocess(config, &mut items, render);

    let json = serde_json::to_string_pretty(&items).wrap_err("Failed to serialize items")?;
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").wrap_err("Failed to write items to stdout")?;
        }
    }

    let duration = start.elapsed();

    // stdout may carry the manifest, so the summary goes to stderr
    eprintln!();
    eprintln!("  Preprocessing completed successfully!");
    eprintln!();
    eprintln!("  Hidden:     {}", stats.hidden);
    eprintln!("  Webmaster:  {}", stats.webmaster_files);
    eprintln!("  Robots:     {}", if stats.robots { "yes" } else { "no" });
    eprintln!("  Rendered:   {rendered}");
    eprintln!("  Items:      {}", items.len());
    eprintln!();
    eprintln!("  Duration:   {:.2}s", duration.as_secs_f64());
    eprintln!();

    tracing::info!(?stats, ?duration, "Preprocessing completed successfully");

    Ok(())
}

/// Run the pass and, if asked, resolve placeholders. Returns the pass
/// statistics and the number of rendered placeholders.
fn preprocess(config: Config, items: &mut Vec<Item>, render: bool) -> (PreprocessStats, usize) {
    let preprocessor = Preprocessor::new(config);
    let stats = preprocessor.run(items);

    let rendered = if render {
        preprocessor.render_placeholders(items)
    } else {
        0
    };

    (stats, rendered)
}
