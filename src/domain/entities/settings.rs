//! Bio page settings.

use serde::{Deserialize, Serialize};

pub const DEFAULT_BIO_TITLE: &str = "My Links";
pub const DEFAULT_BIO_DESCRIPTION: &str = "Explore our curated collection";
pub const DEFAULT_BRAND_COLOR: &str = "#FF6B9D";
pub const DEFAULT_BACKGROUND_COLOR: &str = "#0A0A0A";

/// Page-level settings edited by the operator.
///
/// Stored as camelCase JSON. Missing keys in a stored document fall back to
/// the defaults, so older documents keep loading as fields are added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub bio_title: String,
    pub bio_description: String,
    /// Accent color, `#RRGGBB`.
    pub brand_color: String,
    /// Page background, `#RRGGBB`.
    pub background_color: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bio_title: DEFAULT_BIO_TITLE.to_string(),
            bio_description: DEFAULT_BIO_DESCRIPTION.to_string(),
            brand_color: DEFAULT_BRAND_COLOR.to_string(),
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
        }
    }
}
