//! Preprocessing pass.
//!
//! Runs the artifact generators over the item collection once per build.

use std::time::Instant;

use siteprep_core::{Config, Content, Item, Placeholder};
use tracing::{debug, info};

use crate::{robots::RobotsGenerator, sitemap::SitemapGenerator, webmaster::WebmasterGenerator};

/// Statistics of one preprocessing pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreprocessStats {
    /// Number of existing items marked hidden from the sitemap.
    pub hidden: usize,

    /// Number of webmaster tools verification files generated.
    pub webmaster_files: usize,

    /// Whether a robots.txt item was generated.
    pub robots: bool,

    /// Whether the sitemap item was generated.
    pub sitemap: bool,

    /// Pass duration in milliseconds.
    pub duration_ms: u64,
}

impl PreprocessStats {
    /// Total number of items appended to the collection.
    pub fn generated(&self) -> usize {
        self.webmaster_files + usize::from(self.robots) + usize::from(self.sitemap)
    }
}

/// Preprocessor that appends generated artifacts to an item collection.
///
/// The configuration is expected to come from [`Config::load`] or
/// [`Config::parse`], which validate it.
#[derive(Debug)]
pub struct Preprocessor {
    config: Config,
}

impl Preprocessor {
    /// Create a new preprocessor.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Configuration this preprocessor runs with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run a full pass: webmaster tools files, robots.txt, then the sitemap.
    ///
    /// The sitemap step runs last so that it sees every generated item.
    pub fn run(&self, items: &mut Vec<Item>) -> PreprocessStats {
        let start = Instant::now();
        let mut stats = PreprocessStats::default();

        info!(items = items.len(), "starting preprocessing");

        // 1. Webmaster tools authentications
        stats.webmaster_files = self.create_webmaster_tools_authentications(items);

        // 2. robots.txt
        stats.robots = self.create_robots_txt(items);

        // 3. Sitemap
        stats.hidden = self.create_sitemap(items);
        stats.sitemap = true;

        stats.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            hidden = stats.hidden,
            webmaster_files = stats.webmaster_files,
            robots = stats.robots,
            items = items.len(),
            duration_ms = stats.duration_ms,
            "preprocessing complete"
        );

        stats
    }

    /// Hide assets and error pages and append the sitemap item.
    pub fn create_sitemap(&self, items: &mut Vec<Item>) -> usize {
        SitemapGenerator::new(self.config.clone()).create(items)
    }

    /// Append one item per configured webmaster tools file.
    pub fn create_webmaster_tools_authentications(&self, items: &mut Vec<Item>) -> usize {
        WebmasterGenerator::new(self.config.clone()).create(items)
    }

    /// Append the robots.txt item when the site configures one.
    pub fn create_robots_txt(&self, items: &mut Vec<Item>) -> bool {
        RobotsGenerator::new(self.config.clone()).create(items)
    }

    /// Replace placeholder contents with their rendered output.
    ///
    /// Returns the number of items rendered.
    pub fn render_placeholders(&self, items: &mut [Item]) -> usize {
        if !items.iter().any(|item| item.content.placeholder().is_some()) {
            return 0;
        }

        let sitemap = SitemapGenerator::new(self.config.clone()).render(items);
        let mut rendered = 0;

        for item in items.iter_mut() {
            if let Some(Placeholder::XmlSitemap) = item.content.placeholder() {
                item.content = Content::Text(sitemap.clone());
                debug!(identifier = %item.identifier, "rendered xml_sitemap");
                rendered += 1;
            }
        }

        rendered
    }
}
