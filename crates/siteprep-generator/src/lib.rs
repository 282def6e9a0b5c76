//! siteprep Generator Library
//!
//! Artifacts appended to a site's item collection during a build pass.
//!
//! # Modules
//!
//! - [`sitemap`] - Sitemap visibility marking and XML sitemap rendering
//! - [`webmaster`] - Webmaster tools verification files
//! - [`robots`] - robots.txt generation
//! - [`preprocess`] - One preprocessing pass over the collection

pub mod preprocess;
pub mod robots;
pub mod sitemap;
pub mod webmaster;

pub use preprocess::{PreprocessStats, Preprocessor};
pub use robots::RobotsGenerator;
pub use sitemap::SitemapGenerator;
pub use webmaster::WebmasterGenerator;
