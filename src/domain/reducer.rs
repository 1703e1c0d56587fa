//! Application state and the reducer that drives it.
//!
//! The host owns a [`BioState`], turns user intent into an [`Action`] and
//! replaces its state with `reduce(&state, action)`. Persistence and
//! re-rendering stay with the host; [`Action::touched_keys`] tells it which
//! stored documents changed.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Analytics, NewPost, Post, PostId, PostPatch, Settings};
use crate::domain::posts;
use crate::domain::repositories::StorageKey;

/// Everything the bio page is built from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BioState {
    pub posts: Vec<Post>,
    pub settings: Settings,
    pub analytics: Analytics,
}

/// A state transition requested by the operator or a visitor.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AddPost(NewPost),
    UpdatePost { id: PostId, patch: PostPatch },
    DeletePost(PostId),
    PublishPost(PostId),
    UnpublishPost(PostId),
    /// A visitor followed a post link; bumps the post counter and the ledger.
    TrackClick(PostId),
    UpdateSettings(Settings),
}

impl Action {
    /// Storage documents this action may change, in write order.
    pub fn touched_keys(&self) -> &'static [StorageKey] {
        match self {
            Self::AddPost(_)
            | Self::UpdatePost { .. }
            | Self::DeletePost(_)
            | Self::PublishPost(_)
            | Self::UnpublishPost(_) => &[StorageKey::Posts],
            Self::TrackClick(_) => &[StorageKey::Posts, StorageKey::Analytics],
            Self::UpdateSettings(_) => &[StorageKey::Settings],
        }
    }

    /// Short action name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddPost(_) => "add_post",
            Self::UpdatePost { .. } => "update_post",
            Self::DeletePost(_) => "delete_post",
            Self::PublishPost(_) => "publish_post",
            Self::UnpublishPost(_) => "unpublish_post",
            Self::TrackClick(_) => "track_click",
            Self::UpdateSettings(_) => "update_settings",
        }
    }
}

/// Computes the next state. `state` is left untouched.
pub fn reduce(state: &BioState, action: Action) -> BioState {
    match action {
        Action::AddPost(data) => BioState {
            posts: posts::add_post(&state.posts, data),
            ..state.clone()
        },
        Action::UpdatePost { id, patch } => BioState {
            posts: posts::update_post(&state.posts, id, &patch),
            ..state.clone()
        },
        Action::DeletePost(id) => BioState {
            posts: posts::delete_post(&state.posts, id),
            ..state.clone()
        },
        Action::PublishPost(id) => BioState {
            posts: posts::publish_post(&state.posts, id),
            ..state.clone()
        },
        Action::UnpublishPost(id) => BioState {
            posts: posts::unpublish_post(&state.posts, id),
            ..state.clone()
        },
        Action::TrackClick(id) => BioState {
            posts: posts::track_click(&state.posts, id),
            analytics: state.analytics.record_click(id),
            settings: state.settings.clone(),
        },
        Action::UpdateSettings(settings) => BioState {
            settings,
            ..state.clone()
        },
    }
}
