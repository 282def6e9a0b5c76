//! Sitemap generation.
//!
//! Two halves: [`SitemapGenerator::create`] hides assets and error pages from
//! the sitemap and appends the `/sitemap/` item carrying an `xml_sitemap`
//! placeholder; [`SitemapGenerator::render`] later expands that placeholder
//! into the XML listing of every item left visible.

use chrono::{DateTime, NaiveDate};
use siteprep_core::{
    Attributes, Config, Item, Placeholder, Value,
    item::{EXTENSION, IS_HIDDEN},
};
use tracing::{debug, info, warn};

/// Identifier of the generated sitemap item.
pub const SITEMAP_IDENTIFIER: &str = "/sitemap/";

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Change frequency for sitemap entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "always" => Some(Self::Always),
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            "yearly" => Some(Self::Yearly),
            "never" => Some(Self::Never),
            _ => None,
        }
    }
}

/// A sitemap URL entry.
#[derive(Debug, Clone)]
pub struct SitemapUrl {
    /// URL location.
    pub loc: String,

    /// Last modification date.
    pub lastmod: Option<NaiveDate>,

    /// Change frequency.
    pub changefreq: Option<ChangeFreq>,

    /// Priority (0.0 to 1.0).
    pub priority: Option<f32>,
}

/// Sitemap generator.
#[derive(Debug)]
pub struct SitemapGenerator {
    config: Config,
}

impl SitemapGenerator {
    /// Create a new sitemap generator.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Whether an item is an asset or an error/system page.
    pub fn is_excluded(&self, item: &Item) -> bool {
        let sitemap = &self.config.sitemap;

        let asset = item
            .extension()
            .is_some_and(|ext| sitemap.hidden_extensions.iter().any(|e| e == ext));

        asset
            || sitemap
                .hidden_patterns
                .iter()
                .any(|pattern| item.identifier.contains(pattern.as_str()))
    }

    /// Hide excluded items from the sitemap.
    ///
    /// An `is_hidden` attribute that is already present is left alone, whatever
    /// its value. Returns the number of items marked.
    pub fn mark_hidden(&self, items: &mut [Item]) -> usize {
        let mut marked = 0;

        for item in items.iter_mut() {
            if item.has_attribute(IS_HIDDEN) || !self.is_excluded(item) {
                continue;
            }

            item.set_attribute(IS_HIDDEN, true);
            debug!(identifier = %item.identifier, "hiding item from sitemap");
            marked += 1;
        }

        marked
    }

    /// The `/sitemap/` item, whose content is rendered once all items are known.
    #[must_use]
    pub fn sitemap_item(&self) -> Item {
        let mut attributes = Attributes::new();
        attributes.insert(EXTENSION.to_string(), Value::from("xml"));

        Item::new(Placeholder::XmlSitemap, attributes, SITEMAP_IDENTIFIER)
    }

    /// Mark excluded items hidden, then append the sitemap item.
    ///
    /// Returns the number of items marked hidden.
    pub fn create(&self, items: &mut Vec<Item>) -> usize {
        let marked = self.mark_hidden(items);
        items.push(self.sitemap_item());

        info!(marked, "created sitemap item");
        marked
    }

    /// Render the XML sitemap of all items that are not hidden.
    pub fn render(&self, items: &[Item]) -> String {
        let visible: Vec<&Item> = items.iter().filter(|item| !item.is_hidden()).collect();
        debug!(count = visible.len(), "rendering sitemap");

        let mut xml = String::with_capacity(4096);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
        xml.push('\n');

        for item in visible {
            let url = self.item_to_url(item);
            xml.push_str(&url_to_xml(&url));
        }

        xml.push_str("</urlset>\n");
        xml
    }

    /// Convert an item to a sitemap URL entry.
    fn item_to_url(&self, item: &Item) -> SitemapUrl {
        let path = item.path();
        let loc = if self.config.site.base_url.is_empty() {
            path
        } else {
            self.config.url_for(&path)
        };

        let lastmod = item.attribute("lastmod").and_then(|value| {
            let parsed = value.as_str().and_then(parse_lastmod);
            if parsed.is_none() {
                warn!(identifier = %item.identifier, "ignoring unparseable lastmod");
            }
            parsed
        });

        let changefreq = item.attribute("changefreq").and_then(|value| {
            let parsed = value.as_str().and_then(ChangeFreq::parse);
            if parsed.is_none() {
                warn!(identifier = %item.identifier, "ignoring unknown changefreq");
            }
            parsed
        });

        let priority = item.attribute("priority").and_then(|value| {
            let parsed = value
                .as_f64()
                .filter(|p| (0.0..=1.0).contains(p))
                .map(|p| p as f32);
            if parsed.is_none() {
                warn!(identifier = %item.identifier, "ignoring priority outside 0.0..=1.0");
            }
            parsed
        });

        SitemapUrl {
            loc,
            lastmod,
            changefreq,
            priority,
        }
    }
}

/// Convert a URL entry to XML.
fn url_to_xml(url: &SitemapUrl) -> String {
    let mut xml = String::from("  <url>\n");

    xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&url.loc)));

    if let Some(lastmod) = &url.lastmod {
        xml.push_str(&format!(
            "    <lastmod>{}</lastmod>\n",
            lastmod.format("%Y-%m-%d")
        ));
    }

    if let Some(changefreq) = &url.changefreq {
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            changefreq.as_str()
        ));
    }

    if let Some(priority) = &url.priority {
        xml.push_str(&format!("    <priority>{priority:.1}</priority>\n"));
    }

    xml.push_str("  </url>\n");
    xml
}

/// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates.
fn parse_lastmod(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .ok()
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
