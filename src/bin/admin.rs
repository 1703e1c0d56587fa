//! CLI administration tool for linkbio.
//!
//! Manages posts, page settings and the store directly, without going
//! through the HTTP API. Uses the same store configuration as the server.
//!
//! # Usage
//!
//! ```bash
//! # List posts
//! cargo run --bin admin -- posts list
//!
//! # Add and publish a post
//! cargo run --bin admin -- posts add --caption "Summer drop" --link https://shop.example.com --publish
//!
//! # Delete a post
//! cargo run --bin admin -- posts delete 1700000000000
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Change the page title
//! cargo run --bin admin -- settings set --title "Studio links"
//!
//! # Check store connection
//! cargo run --bin admin -- store check
//! ```
//!
//! # Environment Variables
//!
//! - `REDIS_URL` or `REDIS_HOST`/`REDIS_PORT`/`REDIS_PASSWORD`/`REDIS_DB`
//! - `STORE_KEY_PREFIX` (default `linkbio:`)
//! - `PUBLIC_BASE_URL` (optional): printed links point here
//!
//! Without Redis the CLI works on a throwaway in-memory store, which is only
//! useful for trying the commands out.

use linkbio::api::dto::settings::UpdateSettingsRequest;
use linkbio::application::services::{BioService, require_post};
use linkbio::config::{StoreConfig, mask_connection_string};
use linkbio::domain::entities::{NewPost, Post, PostId, PostStatus, Settings};
use linkbio::domain::reducer::Action;
use linkbio::server::open_store;
use linkbio::utils::link_url::normalize_link_url;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use validator::Validate;

/// CLI tool for managing linkbio.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage posts
    Posts {
        #[command(subcommand)]
        action: PostAction,
    },

    /// Show statistics
    Stats,

    /// Page settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Store operations
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
}

/// Post management subcommands.
#[derive(Subcommand)]
enum PostAction {
    /// List all posts
    List,

    /// Add a new post (draft unless --publish)
    Add {
        /// Caption shown on the card
        #[arg(short, long)]
        caption: Option<String>,

        /// Destination link
        #[arg(short, long)]
        link: Option<String>,

        /// Image shown on the card
        #[arg(short, long)]
        media: Option<String>,

        /// Publish immediately
        #[arg(short, long)]
        publish: bool,
    },

    /// Publish a post
    Publish { id: i64 },

    /// Move a post back to draft
    Unpublish { id: i64 },

    /// Delete a post
    Delete {
        id: i64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Record a click by hand
    Click { id: i64 },
}

/// Settings subcommands.
#[derive(Subcommand)]
enum SettingsAction {
    /// Show current settings
    Show,

    /// Change one or more settings
    Set {
        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Accent color, `#RRGGBB`
        #[arg(long)]
        brand_color: Option<String>,

        /// Page background, `#RRGGBB`
        #[arg(long)]
        background_color: Option<String>,
    },
}

/// Store subcommands.
#[derive(Subcommand)]
enum StoreAction {
    /// Check store connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let store_config = StoreConfig::from_env();
    if store_config.redis_url.is_none() {
        println!(
            "{}",
            "⚠️  Redis not configured, changes will not be persisted".yellow()
        );
    }

    let store = open_store(&store_config).await;
    let service = BioService::load(store).await;
    let base_url = std::env::var("PUBLIC_BASE_URL").ok();

    match cli.command {
        Commands::Posts { action } => {
            handle_post_action(action, &service, base_url.as_deref()).await?
        }
        Commands::Stats => show_stats(&service).await,
        Commands::Settings { action } => handle_settings_action(action, &service).await?,
        Commands::Store { action } => handle_store_action(action, &service, &store_config).await?,
    }

    Ok(())
}

/// Dispatches post management commands.
async fn handle_post_action(
    action: PostAction,
    service: &BioService,
    base_url: Option<&str>,
) -> Result<()> {
    match action {
        PostAction::List => list_posts(service, base_url).await,
        PostAction::Add {
            caption,
            link,
            media,
            publish,
        } => add_post(service, caption, link, media, publish).await?,
        PostAction::Publish { id } => {
            let post = apply(service, PostId(id), Action::PublishPost(PostId(id))).await?;
            println!("{} {}", "✅ Published".green().bold(), describe(&post));
            if let Some(base) = base_url {
                println!("  {}", public_link(base, post.id).bright_cyan());
            }
        }
        PostAction::Unpublish { id } => {
            let post = apply(service, PostId(id), Action::UnpublishPost(PostId(id))).await?;
            println!("{} {}", "✅ Moved to draft".green().bold(), describe(&post));
        }
        PostAction::Delete { id, yes } => delete_post(service, PostId(id), yes).await?,
        PostAction::Click { id } => {
            let post = apply(service, PostId(id), Action::TrackClick(PostId(id))).await?;
            println!(
                "{} {} ({} clicks)",
                "✅ Click recorded".green().bold(),
                describe(&post),
                post.clicks
            );
        }
    }

    Ok(())
}

/// Lists all posts with status indicators.
///
/// # Output Format
///
/// ```text
/// 📋 Posts
///
///   ID               Status     Clicks  Caption
///   ────────────────────────────────────────────────────────
///   1700000000000    PUBLISHED      12  Summer drop
///   1700000000001    DRAFT           0  Behind the scenes
/// ```
async fn list_posts(service: &BioService, base_url: Option<&str>) {
    println!("{}", "📋 Posts".bright_blue().bold());
    println!();

    let posts = service.posts().await;

    if posts.is_empty() {
        println!("{}", "  No posts yet".yellow());
        println!();
        println!(
            "  Add one with: {} admin posts add",
            "cargo run --bin".bright_cyan()
        );
        return;
    }

    println!(
        "  {:<16} {:<10} {:>7}  {}",
        "ID".bright_white().bold(),
        "Status".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Caption".bright_white().bold()
    );
    println!("  {}", "─".repeat(70).bright_black());

    for post in &posts {
        let status = match post.status {
            PostStatus::Published => "PUBLISHED".green(),
            PostStatus::Draft => "DRAFT".yellow(),
        };

        println!(
            "  {:<16} {:<10} {:>7}  {}",
            post.id.to_string().cyan(),
            status,
            post.clicks,
            truncate(post.caption().unwrap_or("-"), 40)
        );

        if post.is_published()
            && let Some(base) = base_url
        {
            println!("  {:<16} {}", "", public_link(base, post.id).bright_black());
        }
    }

    println!();
    println!("  Total: {}", posts.len().to_string().bright_white().bold());
}

/// Adds a post, prompting for the caption and link when not given.
async fn add_post(
    service: &BioService,
    caption: Option<String>,
    link: Option<String>,
    media: Option<String>,
    publish: bool,
) -> Result<()> {
    println!("{}", "➕ Add Post".bright_blue().bold());
    println!();

    let caption = match caption {
        Some(c) => c,
        None => Input::new().with_prompt("Caption").interact_text()?,
    };

    let link = match link {
        Some(l) => l,
        None => Input::new().with_prompt("Link URL").interact_text()?,
    };

    if caption.trim().is_empty() {
        bail!("Caption must not be empty");
    }

    let mut data = NewPost::new()
        .with_caption(caption)
        .with_link_url(normalize_link_url(&link).context("Invalid link URL")?);

    if let Some(media) = media {
        data = data.with_media_url(normalize_link_url(&media).context("Invalid media URL")?);
    }

    if publish {
        data = data.with_status(PostStatus::Published);
    }

    let next = service.dispatch(Action::AddPost(data)).await;
    let created = next.posts.last().context("Post was not created")?;

    println!("{}", "✅ Post created".green().bold());
    println!("  ID:     {}", created.id.to_string().cyan());
    println!("  Status: {}", created.status);
    println!();

    Ok(())
}

/// Deletes a post after confirmation (unless `--yes`).
async fn delete_post(service: &BioService, id: PostId, skip_confirm: bool) -> Result<()> {
    let post = service
        .find_post(id)
        .await
        .with_context(|| format!("Post {} not found", id))?;

    println!("{}", "🗑  Delete Post".bright_blue().bold());
    println!("  {}", describe(&post));
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this post?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .dispatch_checked(Action::DeletePost(id), require_post(id))
        .await?;
    println!("{}", "✅ Post deleted".green().bold());

    Ok(())
}

async fn show_stats(service: &BioService) {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let stats = service.stats().await;
    let published = service.published_posts().await.len();

    println!(
        "  Posts:        {} ({} published)",
        stats.total_posts.to_string().bright_white().bold(),
        published
    );
    println!(
        "  Total clicks: {}",
        stats.total_clicks.to_string().bright_white().bold()
    );
    println!(
        "  Avg clicks per published post: {}",
        stats.avg_ctr.to_string().bright_white().bold()
    );
    println!();
}

async fn handle_settings_action(action: SettingsAction, service: &BioService) -> Result<()> {
    match action {
        SettingsAction::Show => print_settings(&service.settings().await),
        SettingsAction::Set {
            title,
            description,
            brand_color,
            background_color,
        } => {
            let current = service.settings().await;
            let settings = merge_settings(
                current,
                title,
                description,
                brand_color,
                background_color,
            )?;

            let next = service.dispatch(Action::UpdateSettings(settings)).await;
            println!("{}", "✅ Settings saved".green().bold());
            print_settings(&next.settings);
        }
    }

    Ok(())
}

/// Overlays the given values on `current` and checks the result with the
/// same rules as `PUT /api/settings`.
fn merge_settings(
    current: Settings,
    title: Option<String>,
    description: Option<String>,
    brand_color: Option<String>,
    background_color: Option<String>,
) -> Result<Settings> {
    let request = UpdateSettingsRequest {
        bio_title: title.unwrap_or(current.bio_title),
        bio_description: description.unwrap_or(current.bio_description),
        brand_color: brand_color.unwrap_or(current.brand_color),
        background_color: background_color.unwrap_or(current.background_color),
    };
    request.validate().context("Invalid settings")?;

    Ok(Settings::from(request))
}

fn print_settings(settings: &Settings) {
    println!("{}", "⚙️  Settings".bright_blue().bold());
    println!("  Title:       {}", settings.bio_title.cyan());
    println!("  Description: {}", settings.bio_description);
    println!("  Brand:       {}", settings.brand_color);
    println!("  Background:  {}", settings.background_color);
    println!();
}

async fn handle_store_action(
    action: StoreAction,
    service: &BioService,
    config: &StoreConfig,
) -> Result<()> {
    match action {
        StoreAction::Check => {
            println!("{}", "🔍 Checking store connection...".bright_blue());

            if let Some(url) = &config.redis_url {
                println!("  URL:    {}", mask_connection_string(url));
            }
            println!("  Backend: {}", service.backend().cyan());

            if service.health_check().await {
                println!("{}", "✅ Store connection OK".green().bold());
            } else {
                bail!("Store is unreachable");
            }
        }
    }

    Ok(())
}

/// Applies a single-post action, failing if the post doesn't exist.
async fn apply(service: &BioService, id: PostId, action: Action) -> Result<Post> {
    let next = service.dispatch_checked(action, require_post(id)).await?;

    next.posts
        .into_iter()
        .find(|p| p.id == id)
        .with_context(|| format!("Post {} disappeared during update", id))
}

fn describe(post: &Post) -> String {
    format!(
        "#{} \"{}\"",
        post.id,
        truncate(post.caption().unwrap_or("untitled"), 40)
    )
}

fn public_link(base: &str, id: PostId) -> String {
    format!("{}/go/{}", base.trim_end_matches('/'), id)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
