//! DTOs for the post management endpoints.

use serde::Deserialize;
use serde_json::{Map, Value};
use validator::{Validate, ValidationError};

use crate::domain::entities::{
    CAPTION_FIELD, LINK_URL_FIELD, MEDIA_URL_FIELD, NewPost, PostId, PostPatch, PostStatus,
};
use crate::error::AppError;
use crate::utils::link_url::normalize_link_url;

/// Display keys with their own validated request fields; `extra` may not set them.
const TYPED_FIELDS: [&str; 3] = [CAPTION_FIELD, LINK_URL_FIELD, MEDIA_URL_FIELD];

fn validate_extra_fields(extra: &Map<String, Value>) -> Result<(), ValidationError> {
    if extra.keys().any(|key| TYPED_FIELDS.contains(&key.as_str())) {
        return Err(ValidationError::new("reserved_field").with_message(
            "caption, linkUrl and mediaUrl must be set through their own fields".into(),
        ));
    }
    Ok(())
}

/// Request body for `POST /api/posts`.
///
/// ```json
/// {
///   "caption": "New collection is live",
///   "linkUrl": "https://shop.example.com/new",
///   "mediaUrl": "https://cdn.example.com/new.jpg",  // optional
///   "status": "published",                          // optional, default draft
///   "id": 1700000000000,                            // optional, generated
///   "extra": { "badge": "NEW" }                     // optional custom fields
/// }
/// ```
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub id: Option<i64>,

    #[validate(length(min = 1, max = 500, message = "Caption must be 1-500 characters"))]
    pub caption: String,

    #[validate(url(message = "Invalid URL format"))]
    pub link_url: String,

    #[validate(url(message = "Invalid URL format"))]
    pub media_url: Option<String>,

    pub status: Option<PostStatus>,

    /// Custom display fields passed through to the post unchanged.
    #[serde(default)]
    #[validate(custom(function = "validate_extra_fields"))]
    pub extra: Map<String, Value>,
}

impl CreatePostRequest {
    /// Builds creation data, normalizing the URLs.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a URL is not a plain http(s) link.
    pub fn into_new_post(self) -> Result<NewPost, AppError> {
        let mut data = NewPost {
            id: self.id.map(PostId),
            status: self.status,
            fields: self.extra,
        };

        data = data
            .with_caption(self.caption)
            .with_link_url(normalize_link_url(&self.link_url)?);

        if let Some(media_url) = self.media_url {
            data = data.with_media_url(normalize_link_url(&media_url)?);
        }

        Ok(data)
    }
}

/// Request body for `PATCH /api/posts/{id}`.
///
/// All fields are optional; only provided fields change.
///
/// # `mediaUrl` semantics
///
/// - **Absent** → leave unchanged
/// - **`null`** → remove the media reference
/// - **URL** → replace it
///
/// Keys in `extra` set to `null` are removed from the post.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = 500, message = "Caption must be 1-500 characters"))]
    pub caption: Option<String>,

    #[validate(url(message = "Invalid URL format"))]
    pub link_url: Option<String>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub media_url: Option<Option<String>>,

    pub status: Option<PostStatus>,

    #[serde(default)]
    #[validate(custom(function = "validate_extra_fields"))]
    pub extra: Map<String, Value>,
}

impl UpdatePostRequest {
    /// Builds the patch, normalizing any new URLs.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a URL is not a plain http(s) link.
    pub fn into_patch(self) -> Result<PostPatch, AppError> {
        let mut patch = PostPatch {
            status: self.status,
            fields: self.extra,
        };

        if let Some(caption) = self.caption {
            patch = patch.set_field(CAPTION_FIELD, caption);
        }

        if let Some(link_url) = self.link_url {
            patch = patch.set_field(LINK_URL_FIELD, normalize_link_url(&link_url)?);
        }

        match self.media_url {
            Some(Some(media_url)) => {
                patch = patch.set_field(MEDIA_URL_FIELD, normalize_link_url(&media_url)?);
            }
            Some(None) => patch = patch.remove_field(MEDIA_URL_FIELD),
            None => {}
        }

        Ok(patch)
    }
}
