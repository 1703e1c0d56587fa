//! Post entity: one curatable item on the bio page.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::{DefaultOnNull, serde_as};
use std::fmt;
use std::str::FromStr;

/// Display field holding the post caption.
pub const CAPTION_FIELD: &str = "caption";
/// Display field holding the destination URL.
pub const LINK_URL_FIELD: &str = "linkUrl";
/// Display field holding the media (image) reference.
pub const MEDIA_URL_FIELD: &str = "mediaUrl";

/// Keys owned by the post record itself; never accepted as display fields.
const RESERVED_FIELDS: [&str; 3] = ["id", "status", "clicks"];

/// Unique post identifier.
///
/// Serialized as a bare integer. Generated ids are millisecond timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub i64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for PostId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Publication state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            other => Err(format!("unknown post status '{other}'")),
        }
    }
}

/// A post on the bio page.
///
/// `id`, `status` and `clicks` are owned by the core operations. Everything
/// else the operator supplies (caption, link, media, anything custom) lives in
/// `fields` and is passed through untouched. Stored records missing `status`
/// or `clicks` (or holding `null` there) load as a draft with zero clicks.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub status: PostStatus,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub clicks: u64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Post {
    /// Builds a post from creation data and its resolved id.
    ///
    /// Clicks always start at zero and status falls back to draft. Reserved
    /// keys smuggled into the display fields are dropped.
    pub fn from_new(data: NewPost, id: PostId) -> Self {
        let mut fields = data.fields;
        for key in RESERVED_FIELDS {
            fields.remove(key);
        }

        Self {
            id,
            status: data.status.unwrap_or_default(),
            clicks: 0,
            fields,
        }
    }

    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }

    /// Returns a display field as a string slice, if it is a JSON string.
    pub fn text_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    pub fn caption(&self) -> Option<&str> {
        self.text_field(CAPTION_FIELD)
    }

    pub fn link_url(&self) -> Option<&str> {
        self.text_field(LINK_URL_FIELD)
    }

    pub fn media_url(&self) -> Option<&str> {
        self.text_field(MEDIA_URL_FIELD)
    }
}

/// Creation data for a post.
///
/// Defaults:
/// - `id`: `None` → a fresh id is generated when the post is added
/// - `status`: `None` → [`PostStatus::Draft`]
/// - `fields`: empty
///
/// A `clicks` value in the incoming JSON is accepted but ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewPost {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PostId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PostStatus>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl NewPost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<PostId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_status(mut self, status: PostStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn with_caption(self, caption: impl Into<String>) -> Self {
        self.with_field(CAPTION_FIELD, caption.into())
    }

    pub fn with_link_url(self, url: impl Into<String>) -> Self {
        self.with_field(LINK_URL_FIELD, url.into())
    }

    pub fn with_media_url(self, url: impl Into<String>) -> Self {
        self.with_field(MEDIA_URL_FIELD, url.into())
    }
}

/// Partial update for an existing post.
///
/// Display fields are merged key by key; a `null` value removes the key.
/// `status: None` leaves the status unchanged. Ids and click counters cannot
/// be patched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostPatch {
    pub status: Option<PostStatus>,
    pub fields: Map<String, Value>,
}

impl PostPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: PostStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn set_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn remove_field(mut self, key: impl Into<String>) -> Self {
        self.fields.insert(key.into(), Value::Null);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.fields.is_empty()
    }

    /// Applies the patch to a copy of `post`.
    pub fn apply(&self, post: &Post) -> Post {
        let mut updated = post.clone();

        if let Some(status) = self.status {
            updated.status = status;
        }

        for (key, value) in &self.fields {
            if RESERVED_FIELDS.contains(&key.as_str()) {
                continue;
            }
            if value.is_null() {
                updated.fields.remove(key);
            } else {
                updated.fields.insert(key.clone(), value.clone());
            }
        }

        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_post_from_new_applies_defaults() {
        let data = NewPost::new()
            .with_caption("Summer drop")
            .with_link_url("https://example.com/summer");

        let post = Post::from_new(data, PostId(7));

        assert_eq!(post.id, PostId(7));
        assert_eq!(post.status, PostStatus::Draft);
        assert_eq!(post.clicks, 0);
        assert_eq!(post.caption(), Some("Summer drop"));
        assert_eq!(post.link_url(), Some("https://example.com/summer"));
        assert!(post.media_url().is_none());
    }

    #[test]
    fn test_post_from_new_keeps_explicit_status() {
        let data = NewPost::new().with_status(PostStatus::Published);
        let post = Post::from_new(data, PostId(1));
        assert!(post.is_published());
    }

    #[test]
    fn test_post_from_new_drops_reserved_fields() {
        let data: NewPost =
            serde_json::from_value(json!({ "id": 3, "clicks": 99, "caption": "x" })).unwrap();
        assert_eq!(data.id, Some(PostId(3)));

        let post = Post::from_new(data, PostId(3));
        assert_eq!(post.clicks, 0);
        assert!(!post.fields.contains_key("clicks"));
        assert!(!post.fields.contains_key("id"));
    }

    #[test]
    fn test_post_deserializes_missing_and_null_counters() {
        let post: Post = serde_json::from_value(json!({ "id": 1, "caption": "hi" })).unwrap();
        assert_eq!(post.status, PostStatus::Draft);
        assert_eq!(post.clicks, 0);

        let post: Post =
            serde_json::from_value(json!({ "id": 2, "clicks": null, "status": null })).unwrap();
        assert_eq!(post.clicks, 0);
        assert_eq!(post.status, PostStatus::Draft);
    }

    #[test]
    fn test_post_serializes_flat() {
        let post = Post::from_new(
            NewPost::new().with_caption("a").with_status(PostStatus::Published),
            PostId(5),
        );
        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(
            value,
            json!({ "id": 5, "status": "published", "clicks": 0, "caption": "a" })
        );
    }

    #[test]
    fn test_post_rejects_unknown_status() {
        let result = serde_json::from_value::<Post>(json!({ "id": 1, "status": "archived" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("Published".parse::<PostStatus>(), Ok(PostStatus::Published));
        assert_eq!("draft".parse::<PostStatus>(), Ok(PostStatus::Draft));
        assert!("live".parse::<PostStatus>().is_err());
    }

    #[test]
    fn test_patch_merges_and_removes_fields() {
        let post = Post::from_new(
            NewPost::new()
                .with_caption("old")
                .with_media_url("https://cdn.example.com/a.jpg"),
            PostId(1),
        );

        let patch = PostPatch::new()
            .set_field(CAPTION_FIELD, "new")
            .remove_field(MEDIA_URL_FIELD)
            .set_field("clicks", 500)
            .with_status(PostStatus::Published);

        let updated = patch.apply(&post);

        assert_eq!(updated.caption(), Some("new"));
        assert!(updated.media_url().is_none());
        assert_eq!(updated.clicks, 0);
        assert!(updated.is_published());
        assert_eq!(post.caption(), Some("old"));
    }
}
