//! Items and their attributes.
//!
//! An [`Item`] is one content unit of the build: a page, an asset or an
//! artifact synthesized during preprocessing. Everything the pipeline knows
//! about an item lives in its attribute map; the content is either literal
//! text or a [`Placeholder`] that a renderer resolves later.

use std::{collections::BTreeMap, fmt, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Attribute value. Custom attributes may carry any YAML-shaped data.
pub type Value = serde_yaml::Value;

/// Ordered attribute map of an item.
pub type Attributes = BTreeMap<String, Value>;

/// Attribute holding the output extension of an item (`html`, `xml`, ...).
pub const EXTENSION: &str = "extension";

/// Attribute excluding an item from the sitemap.
pub const IS_HIDDEN: &str = "is_hidden";

/// A helper call embedded as item content, evaluated by a renderer once the
/// whole item collection is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    /// Expands to the XML sitemap of all non-hidden items.
    XmlSitemap,
}

impl Placeholder {
    /// Name of the helper this placeholder invokes.
    pub fn helper(&self) -> &'static str {
        match self {
            Self::XmlSitemap => "xml_sitemap",
        }
    }

    /// Recognize a placeholder from its textual form, e.g. `<%= xml_sitemap %>`.
    pub fn parse(s: &str) -> Option<Self> {
        let inner = s.trim().strip_prefix("<%=")?.strip_suffix("%>")?.trim();
        match inner {
            "xml_sitemap" => Some(Self::XmlSitemap),
            _ => None,
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<%= {} %>", self.helper())
    }
}

/// Content of an item.
///
/// Serialized as a plain string; placeholders use their `<%= helper %>` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Content {
    /// Literal text, written out as-is.
    Text(String),
    /// Deferred helper output.
    Placeholder(Placeholder),
}

impl Content {
    /// The placeholder, if this content is one.
    pub fn placeholder(&self) -> Option<Placeholder> {
        match self {
            Self::Placeholder(p) => Some(*p),
            Self::Text(_) => None,
        }
    }

    /// Literal text, if this content is not a placeholder.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Placeholder(_) => None,
        }
    }
}

impl Default for Content {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<String> for Content {
    fn from(s: String) -> Self {
        match Placeholder::parse(&s) {
            Some(placeholder) => Self::Placeholder(placeholder),
            None => Self::Text(s),
        }
    }
}

impl From<&str> for Content {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<Placeholder> for Content {
    fn from(p: Placeholder) -> Self {
        Self::Placeholder(p)
    }
}

impl From<Content> for String {
    fn from(content: Content) -> Self {
        match content {
            Content::Text(text) => text,
            Content::Placeholder(p) => p.to_string(),
        }
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Placeholder(p) => write!(f, "{p}"),
        }
    }
}

/// A single content unit of the site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Path-like identifier, unique within the collection (e.g. `/about/`).
    pub identifier: String,

    /// Attributes, including `extension` and `is_hidden`.
    #[serde(default)]
    pub attributes: Attributes,

    /// Item content.
    #[serde(default)]
    pub content: Content,
}

impl Item {
    /// Create a new item.
    pub fn new(
        content: impl Into<Content>,
        attributes: Attributes,
        identifier: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            attributes,
            content: content.into(),
        }
    }

    /// Look up an attribute.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Whether the attribute is present at all, whatever its value.
    pub fn has_attribute(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Set an attribute, replacing any previous value.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// The `extension` attribute, if it is a string.
    pub fn extension(&self) -> Option<&str> {
        self.attribute(EXTENSION).and_then(Value::as_str)
    }

    /// Whether the item is explicitly hidden.
    pub fn is_hidden(&self) -> bool {
        self.attribute(IS_HIDDEN).and_then(Value::as_bool) == Some(true)
    }

    /// Output path of the item.
    ///
    /// HTML items (and items without extension) keep their identifier; other
    /// items map `/robots/` + `txt` to `/robots.txt`.
    pub fn path(&self) -> String {
        match self.extension() {
            None | Some("html") => self.identifier.clone(),
            Some(ext) => {
                let stem = self.identifier.trim_end_matches('/');
                format!("{stem}.{ext}")
            }
        }
    }
}

/// Load an item manifest: a YAML (or JSON) sequence of items.
pub fn load_manifest(path: &Path) -> Result<Vec<Item>> {
    let content = std::fs::read_to_string(path)?;
    parse_manifest(&content, path)
}

/// Parse an item manifest from a string.
pub fn parse_manifest(content: &str, path: &Path) -> Result<Vec<Item>> {
    serde_yaml::from_str(content).map_err(|e| CoreError::manifest(path, e.to_string()))
}
