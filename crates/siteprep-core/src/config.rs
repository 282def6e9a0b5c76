//! Site configuration management.
//!
//! The schema is validated once at load time: a malformed `robots` section or
//! an unusable webmaster-tools descriptor is reported here, before any build
//! output exists, so the generators can work on well-typed input.

use std::{
    collections::{BTreeMap, HashSet},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{
    error::{CoreError, Result},
    item::Value,
};

/// Main configuration structure for siteprep.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    #[serde(default)]
    pub site: SiteConfig,

    /// Sitemap settings.
    #[serde(default)]
    pub sitemap: SitemapConfig,

    /// Verification files for webmaster tools, in output order.
    #[serde(default)]
    pub webmaster_tools: Vec<WebmasterTool>,

    /// robots.txt policy. No robots.txt is generated when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub robots: Option<RobotsConfig>,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title.
    #[serde(default)]
    pub title: String,

    /// Base URL for the site (e.g., "https://example.com"). Sitemap entries
    /// are relative when empty.
    #[serde(default)]
    pub base_url: String,
}

/// Which items are left out of the sitemap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SitemapConfig {
    /// Extensions of asset items hidden from the sitemap.
    #[serde(default = "default_hidden_extensions")]
    pub hidden_extensions: Vec<String>,

    /// Identifier substrings of error and system pages hidden from the sitemap.
    #[serde(default = "default_hidden_patterns")]
    pub hidden_patterns: Vec<String>,
}

/// A verification file for a webmaster tool (Google, Bing, Yandex, ...).
///
/// Every key besides `identifier` and `content` becomes an attribute of the
/// generated item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebmasterTool {
    /// Identifier of the generated item. Descriptors without one are skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,

    /// Verification file body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Extra attributes, e.g. `extension`.
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

/// robots.txt policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RobotsSection", into = "RobotsSection")]
pub enum RobotsConfig {
    /// The built-in policy: hide assets except images, point to `/sitemap.xml`.
    Default,
    /// Site-specific rules.
    Custom(RobotsRules),
}

/// Rules of a custom robots.txt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RobotsRules {
    /// Paths emitted as `Disallow:` lines.
    pub disallow: Vec<String>,
    /// Paths emitted as `Allow:` lines.
    pub allow: Vec<String>,
    /// Sitemap location emitted as the `Sitemap:` line.
    pub sitemap: String,
}

/// The `[robots]` table as written in the configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RobotsSection {
    #[serde(default)]
    default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    disallow: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    allow: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sitemap: Option<String>,
}

impl TryFrom<RobotsSection> for RobotsConfig {
    type Error = CoreError;

    fn try_from(section: RobotsSection) -> Result<Self> {
        if section.default {
            return Ok(Self::Default);
        }

        let disallow = section.disallow.ok_or_else(|| {
            CoreError::config("robots.disallow is required unless robots.default is true")
        })?;
        let sitemap = section.sitemap.ok_or_else(|| {
            CoreError::config("robots.sitemap is required unless robots.default is true")
        })?;

        Ok(Self::Custom(RobotsRules {
            disallow,
            allow: section.allow,
            sitemap,
        }))
    }
}

impl From<RobotsConfig> for RobotsSection {
    fn from(config: RobotsConfig) -> Self {
        match config {
            RobotsConfig::Default => Self {
                default: true,
                ..Self::default()
            },
            RobotsConfig::Custom(rules) => Self {
                default: false,
                disallow: Some(rules.disallow),
                allow: rules.allow,
                sitemap: Some(rules.sitemap),
            },
        }
    }
}

/// Configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `config.toml`.
    Toml,
    /// `config.yaml` / `config.yml`.
    Yaml,
}

impl ConfigFormat {
    /// Determine the format from a file extension. Unknown extensions are
    /// read as TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Toml,
        }
    }
}

// Default value functions
fn default_hidden_extensions() -> Vec<String> {
    ["png", "gif", "jpg", "jpeg", "css", "xml", "js", "txt"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_hidden_patterns() -> Vec<String> {
    ["404", "500", "htaccess"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            hidden_extensions: default_hidden_extensions(),
            hidden_patterns: default_hidden_patterns(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML or YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, ConfigFormat::from_path(path)).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })
    }

    /// Parse and validate configuration from a string.
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self> {
        let config: Config = match format {
            ConfigFormat::Toml => toml::from_str(content)?,
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration using the config crate, layering `SITEPREP__*`
    /// environment variables over the file.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("SITEPREP").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for tool in &self.webmaster_tools {
            let Some(identifier) = tool.identifier.as_deref() else {
                continue;
            };

            if identifier.is_empty() {
                return Err(CoreError::config(
                    "webmaster_tools identifier cannot be empty",
                ));
            }

            if !seen.insert(identifier) {
                return Err(CoreError::config(format!(
                    "duplicate webmaster_tools identifier: {identifier}"
                )));
            }
        }

        if self.sitemap.hidden_extensions.iter().any(String::is_empty) {
            return Err(CoreError::config(
                "sitemap.hidden_extensions cannot contain empty entries",
            ));
        }

        if self.sitemap.hidden_patterns.iter().any(String::is_empty) {
            return Err(CoreError::config(
                "sitemap.hidden_patterns cannot contain empty entries",
            ));
        }

        if self.site.base_url.ends_with('/') {
            tracing::warn!("site.base_url should not have a trailing slash");
        }

        Ok(())
    }

    /// Non-fatal findings about the configuration.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.site.base_url.is_empty() {
            warnings.push("site.base_url is empty; sitemap URLs will be relative".to_string());
        } else if self.site.base_url.ends_with('/') {
            warnings.push("site.base_url should not have a trailing slash".to_string());
        }

        let skipped = self
            .webmaster_tools
            .iter()
            .filter(|tool| tool.identifier.is_none())
            .count();
        if skipped > 0 {
            warnings.push(format!(
                "{skipped} webmaster_tools entr{} without identifier will be skipped",
                if skipped == 1 { "y" } else { "ies" }
            ));
        }

        if self.robots.is_none() {
            warnings.push("no robots section; robots.txt will not be generated".to_string());
        }

        warnings
    }

    /// Get the full URL for a path.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.site.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}
