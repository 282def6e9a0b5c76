//! siteprep Core Library
//!
//! Core types, configuration, and error handling for the siteprep build-pass
//! preprocessor.

pub mod config;
pub mod error;
pub mod item;

pub use config::{Config, ConfigFormat, RobotsConfig, RobotsRules, WebmasterTool};
pub use error::{CoreError, Result};
pub use item::{Attributes, Content, Item, Placeholder, Value};
