//! Pure operations over the posts collection.
//!
//! Every function borrows the current sequence and returns a freshly
//! allocated one; the input is never touched. An id that matches no post is
//! not an error: the result is simply a copy of the input.

use chrono::{DateTime, Utc};

use crate::domain::entities::{NewPost, Post, PostId, PostPatch, PostStatus};

/// Picks an id for a post created at `now`.
///
/// Ids are millisecond timestamps, bumped past the largest existing id so two
/// posts created within the same millisecond still get distinct ids.
pub fn next_post_id(posts: &[Post], now: DateTime<Utc>) -> PostId {
    let candidate = now.timestamp_millis();
    let floor = posts
        .iter()
        .map(|p| p.id.0)
        .max()
        .map_or(i64::MIN, |max| max.saturating_add(1));
    PostId(candidate.max(floor))
}

/// Appends a post built from `data`, using the wall clock for fresh ids.
pub fn add_post(posts: &[Post], data: NewPost) -> Vec<Post> {
    add_post_at(posts, data, Utc::now())
}

/// Appends a post built from `data`.
///
/// A caller-supplied id is kept as is; otherwise one is derived from `now`.
/// Clicks start at zero and status defaults to draft.
pub fn add_post_at(posts: &[Post], data: NewPost, now: DateTime<Utc>) -> Vec<Post> {
    let id = data.id.unwrap_or_else(|| next_post_id(posts, now));
    let mut next = Vec::with_capacity(posts.len() + 1);
    next.extend_from_slice(posts);
    next.push(Post::from_new(data, id));
    next
}

/// Removes the post with `id`.
pub fn delete_post(posts: &[Post], id: PostId) -> Vec<Post> {
    posts.iter().filter(|p| p.id != id).cloned().collect()
}

/// Marks the post with `id` as published.
pub fn publish_post(posts: &[Post], id: PostId) -> Vec<Post> {
    set_status(posts, id, PostStatus::Published)
}

/// Marks the post with `id` as draft.
pub fn unpublish_post(posts: &[Post], id: PostId) -> Vec<Post> {
    set_status(posts, id, PostStatus::Draft)
}

/// Adds one click to the post with `id`.
pub fn track_click(posts: &[Post], id: PostId) -> Vec<Post> {
    map_matching(posts, id, |post| Post {
        clicks: post.clicks.saturating_add(1),
        ..post.clone()
    })
}

/// Merges `patch` into the post with `id`.
pub fn update_post(posts: &[Post], id: PostId, patch: &PostPatch) -> Vec<Post> {
    map_matching(posts, id, |post| patch.apply(post))
}

pub fn find_post(posts: &[Post], id: PostId) -> Option<&Post> {
    posts.iter().find(|p| p.id == id)
}

/// Published posts in collection order.
pub fn published(posts: &[Post]) -> impl Iterator<Item = &Post> {
    posts.iter().filter(|p| p.is_published())
}

fn set_status(posts: &[Post], id: PostId, status: PostStatus) -> Vec<Post> {
    map_matching(posts, id, |post| Post {
        status,
        ..post.clone()
    })
}

fn map_matching(posts: &[Post], id: PostId, f: impl Fn(&Post) -> Post) -> Vec<Post> {
    posts
        .iter()
        .map(|p| if p.id == id { f(p) } else { p.clone() })
        .collect()
}
