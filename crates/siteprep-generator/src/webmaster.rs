//! Webmaster tools verification files.
//!
//! Search consoles (Google, Bing, Yandex, ...) verify site ownership by
//! fetching a file with a known name and body. Each `webmaster_tools` entry of
//! the configuration describes one such file.

use siteprep_core::{Config, Item, WebmasterTool, item::IS_HIDDEN};
use tracing::{debug, info};

/// Webmaster tools authentication generator.
#[derive(Debug)]
pub struct WebmasterGenerator {
    config: Config,
}

impl WebmasterGenerator {
    /// Create a new webmaster tools generator.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Build the verification items, in configuration order.
    ///
    /// Descriptors without an identifier are skipped. The configuration is only
    /// read, so calling this twice yields the same items.
    pub fn generate(&self) -> Vec<Item> {
        self.config
            .webmaster_tools
            .iter()
            .filter_map(|tool| {
                let item = authentication_item(tool);
                if item.is_none() {
                    debug!("skipping webmaster_tools entry without identifier");
                }
                item
            })
            .collect()
    }

    /// Append the verification items to the collection and return how many
    /// were added.
    pub fn create(&self, items: &mut Vec<Item>) -> usize {
        let generated = self.generate();
        let count = generated.len();

        for item in &generated {
            info!(identifier = %item.identifier, "generated webmaster tools file");
        }
        items.extend(generated);

        count
    }
}

fn authentication_item(tool: &WebmasterTool) -> Option<Item> {
    let identifier = tool.identifier.as_deref()?;

    let mut attributes = tool.attributes.clone();
    attributes.insert(IS_HIDDEN.to_string(), true.into());

    Some(Item::new(
        tool.content.clone().unwrap_or_default(),
        attributes,
        identifier,
    ))
}

#[cfg(test)]
mod tests {
    use siteprep_core::{Value, item::EXTENSION};

    use super::*;

    fn tool(identifier: Option<&str>, content: Option<&str>) -> WebmasterTool {
        WebmasterTool {
            identifier: identifier.map(String::from),
            content: content.map(String::from),
            ..WebmasterTool::default()
        }
    }

    fn config_with(tools: Vec<WebmasterTool>) -> Config {
        Config {
            webmaster_tools: tools,
            ..Config::default()
        }
    }

    #[test]
    fn test_single_descriptor() {
        let generator = WebmasterGenerator::new(config_with(vec![tool(
            Some("/google123.html"),
            Some("google-site-verification"),
        )]));

        let items = generator.generate();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].identifier, "/google123.html");
        assert_eq!(items[0].content.as_text(), Some("google-site-verification"));
        assert!(items[0].is_hidden());
    }

    #[test]
    fn test_missing_identifier_is_skipped() {
        let generator = WebmasterGenerator::new(config_with(vec![tool(None, Some("x"))]));

        assert!(generator.generate().is_empty());
    }

    #[test]
    fn test_extra_attributes_are_kept() {
        let mut bing = tool(Some("/BingSiteAuth/"), Some("<users/>"));
        bing.attributes
            .insert(EXTENSION.to_string(), Value::from("xml"));
        bing.attributes
            .insert(IS_HIDDEN.to_string(), Value::from(false));
        let generator = WebmasterGenerator::new(config_with(vec![bing]));

        let items = generator.generate();

        assert_eq!(items[0].extension(), Some("xml"));
        assert!(items[0].is_hidden());
        assert!(!items[0].has_attribute("identifier"));
        assert!(!items[0].has_attribute("content"));
    }

    #[test]
    fn test_order_and_missing_content() {
        let generator = WebmasterGenerator::new(config_with(vec![
            tool(Some("/b/"), None),
            tool(None, Some("skipped")),
            tool(Some("/a/"), Some("a")),
        ]));

        let items = generator.generate();

        let identifiers: Vec<_> = items.iter().map(|i| i.identifier.as_str()).collect();
        assert_eq!(identifiers, vec!["/b/", "/a/"]);
        assert_eq!(items[0].content.as_text(), Some(""));
    }

    #[test]
    fn test_generation_is_repeatable() {
        let config = config_with(vec![tool(Some("/google123.html"), Some("verify"))]);
        let generator = WebmasterGenerator::new(config.clone());

        let first = generator.generate();
        let second = generator.generate();

        assert_eq!(first, second);
        assert_eq!(generator.config, config);
    }

    #[test]
    fn test_create_appends() {
        let generator = WebmasterGenerator::new(config_with(vec![tool(Some("/y/"), Some("y"))]));
        let mut items = vec![Item::new("home", Default::default(), "/")];

        let added = generator.create(&mut items);

        assert_eq!(added, 1);
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].identifier, "/y/");
    }
}
