//! DTO for the settings endpoint.

use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::entities::Settings;

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("hex color pattern is valid"));

/// Request body for `PUT /api/settings`. Replaces all settings.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    #[validate(length(min = 1, max = 80, message = "Title must be 1-80 characters"))]
    pub bio_title: String,

    #[validate(length(max = 280, message = "Description must be at most 280 characters"))]
    pub bio_description: String,

    #[validate(regex(path = *HEX_COLOR, message = "Color must be #RRGGBB"))]
    pub brand_color: String,

    #[validate(regex(path = *HEX_COLOR, message = "Color must be #RRGGBB"))]
    pub background_color: String,
}

impl From<UpdateSettingsRequest> for Settings {
    fn from(request: UpdateSettingsRequest) -> Self {
        Settings {
            bio_title: request.bio_title,
            bio_description: request.bio_description,
            brand_color: request.brand_color.to_ascii_uppercase(),
            background_color: request.background_color.to_ascii_uppercase(),
        }
    }
}
