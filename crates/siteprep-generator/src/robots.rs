//! Robots.txt generation.
//!
//! Generates the robots.txt item for search engine crawlers.

use siteprep_core::{
    Attributes, Config, Item, RobotsConfig, RobotsRules,
    item::{EXTENSION, IS_HIDDEN},
};
use tracing::{debug, info};

/// Identifier of the generated robots.txt item.
pub const ROBOTS_IDENTIFIER: &str = "/robots/";

/// Policy used when `robots.default` is set: keep crawlers out of assets
/// except images.
pub const DEFAULT_ROBOTS_TXT: &str =
    "User-agent: *\nDisallow: /assets\nAllow: /assets/images\nSitemap: /sitemap.xml";

/// Robots.txt generator.
#[derive(Debug)]
pub struct RobotsGenerator {
    config: Config,
}

impl RobotsGenerator {
    /// Create a new robots generator.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// The robots.txt body, or `None` when the site has no robots section.
    pub fn content(&self) -> Option<String> {
        match self.config.robots.as_ref()? {
            RobotsConfig::Default => Some(DEFAULT_ROBOTS_TXT.to_string()),
            RobotsConfig::Custom(rules) => Some(custom_content(rules)),
        }
    }

    /// Generate the `/robots/` item.
    pub fn generate(&self) -> Option<Item> {
        let Some(content) = self.content() else {
            debug!("no robots section, skipping robots.txt");
            return None;
        };

        let mut attributes = Attributes::new();
        attributes.insert(EXTENSION.to_string(), "txt".into());
        attributes.insert(IS_HIDDEN.to_string(), true.into());

        Some(Item::new(content, attributes, ROBOTS_IDENTIFIER))
    }

    /// Append the robots.txt item, if any. Returns whether one was added.
    pub fn create(&self, items: &mut Vec<Item>) -> bool {
        match self.generate() {
            Some(item) => {
                info!("generating robots.txt");
                items.push(item);
                true
            }
            None => false,
        }
    }
}

fn custom_content(rules: &RobotsRules) -> String {
    let mut lines = vec!["User-Agent: *".to_string()];

    for path in &rules.disallow {
        lines.push(format!("Disallow: {path}"));
    }

    for path in &rules.allow {
        lines.push(format!("Allow: {path}"));
    }

    lines.push(format!("Sitemap: {}", rules.sitemap));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use siteprep_core::ConfigFormat;

    use super::*;

    fn config_with(robots: Option<RobotsConfig>) -> Config {
        Config {
            robots,
            ..Config::default()
        }
    }

    #[test]
    fn test_default_policy() {
        let generator = RobotsGenerator::new(config_with(Some(RobotsConfig::Default)));

        assert_eq!(
            generator.content().as_deref(),
            Some("User-agent: *\nDisallow: /assets\nAllow: /assets/images\nSitemap: /sitemap.xml")
        );
    }

    #[test]
    fn test_custom_without_allow() {
        let generator = RobotsGenerator::new(config_with(Some(RobotsConfig::Custom(
            RobotsRules {
                disallow: vec!["/admin".to_string()],
                allow: vec![],
                sitemap: "/sitemap.xml".to_string(),
            },
        ))));

        assert_eq!(
            generator.content().as_deref(),
            Some("User-Agent: *\nDisallow: /admin\nSitemap: /sitemap.xml")
        );
    }

    #[test]
    fn test_custom_line_order() {
        let generator = RobotsGenerator::new(config_with(Some(RobotsConfig::Custom(
            RobotsRules {
                disallow: vec!["/admin".to_string(), "/tmp".to_string()],
                allow: vec!["/admin/help".to_string()],
                sitemap: "https://example.com/sitemap.xml".to_string(),
            },
        ))));

        assert_eq!(
            generator.content().as_deref(),
            Some(
                "User-Agent: *\nDisallow: /admin\nDisallow: /tmp\nAllow: /admin/help\nSitemap: https://example.com/sitemap.xml"
            )
        );
    }

    #[test]
    fn test_custom_from_config_file() {
        let config = Config::parse(
            r#"
[robots]
default = false
disallow = ["/admin"]
sitemap = "/sitemap.xml"
"#,
            ConfigFormat::Toml,
        )
        .expect("parse config");

        let content = RobotsGenerator::new(config).content().expect("robots content");
        assert_eq!(content, "User-Agent: *\nDisallow: /admin\nSitemap: /sitemap.xml");
        assert!(!content.contains("\n\n"));
    }

    #[test]
    fn test_no_robots_section() {
        let generator = RobotsGenerator::new(config_with(None));
        let mut items = Vec::new();

        assert!(generator.generate().is_none());
        assert!(!generator.create(&mut items));
        assert!(items.is_empty());
    }

    #[test]
    fn test_robots_item() {
        let generator = RobotsGenerator::new(config_with(Some(RobotsConfig::Default)));

        let item = generator.generate().expect("robots item");

        assert_eq!(item.identifier, ROBOTS_IDENTIFIER);
        assert_eq!(item.extension(), Some("txt"));
        assert!(item.is_hidden());
        assert_eq!(item.path(), "/robots.txt");
        assert_eq!(item.content.as_text(), Some(DEFAULT_ROBOTS_TXT));
    }
}
