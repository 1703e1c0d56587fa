//! Public bio page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

use crate::domain::entities::{CAPTION_FIELD, Post, Settings};
use crate::state::AppState;
use crate::utils::html::{escape_html, escape_value};

/// A published post prepared for the page. Every string is already escaped.
pub struct PostCard {
    pub caption: String,
    pub href: String,
    pub media_url: Option<String>,
}

impl PostCard {
    fn from_post(post: &Post) -> Self {
        let caption = post
            .fields
            .get(CAPTION_FIELD)
            .map(escape_value)
            .unwrap_or_default();

        Self {
            caption,
            href: escape_html(format!("/go/{}", post.id)),
            media_url: post.media_url().map(escape_html),
        }
    }
}

/// Template for the public page.
///
/// Template-side escaping is off: values are escaped once, here, with
/// [`escape_html`], so the markup never double-escapes operator text.
#[derive(Template, WebTemplate)]
#[template(path = "bio.html", escape = "none")]
pub struct BioPageTemplate {
    pub title: String,
    pub description: String,
    pub brand_color: String,
    pub background_color: String,
    pub posts: Vec<PostCard>,
}

impl BioPageTemplate {
    pub fn new(settings: &Settings, posts: &[Post]) -> Self {
        Self {
            title: escape_html(&settings.bio_title),
            description: escape_html(&settings.bio_description),
            brand_color: escape_html(&settings.brand_color),
            background_color: escape_html(&settings.background_color),
            posts: posts.iter().map(PostCard::from_post).collect(),
        }
    }
}

/// Renders the public page with the published posts.
///
/// # Endpoint
///
/// `GET /`
pub async fn bio_page_handler(State(state): State<AppState>) -> BioPageTemplate {
    let settings = state.bio_service.settings().await;
    let posts = state.bio_service.published_posts().await;
    BioPageTemplate::new(&settings, &posts)
}
