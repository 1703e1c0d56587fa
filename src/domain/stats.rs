//! Summary statistics derived from the posts collection.

use serde::Serialize;

use crate::domain::entities::Post;

/// Derived counters shown on the admin dashboard.
///
/// Never stored; recompute with [`compute_stats`] whenever posts change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    /// All posts, drafts included.
    pub total_posts: u64,
    /// Clicks summed over every post regardless of status.
    pub total_clicks: u64,
    /// Average clicks per published post, rounded half up; 0 when nothing is published.
    pub avg_ctr: u64,
}

pub fn compute_stats(posts: &[Post]) -> StatsSummary {
    let total_clicks = posts
        .iter()
        .fold(0u64, |sum, p| sum.saturating_add(p.clicks));
    let published_count = posts.iter().filter(|p| p.is_published()).count() as u64;

    StatsSummary {
        total_posts: posts.len() as u64,
        total_clicks,
        avg_ctr: rounded_average(total_clicks, published_count),
    }
}

/// `round(total / count)` with halves rounded up, in integer arithmetic.
fn rounded_average(total: u64, count: u64) -> u64 {
    if count == 0 {
        return 0;
    }
    let quotient = total / count;
    let remainder = total % count;
    if remainder >= count - remainder {
        quotient + 1
    } else {
        quotient
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{NewPost, PostId, PostStatus};

    fn post(id: i64, status: PostStatus, clicks: u64) -> Post {
        Post {
            clicks,
            ..Post::from_new(NewPost::new().with_status(status), PostId(id))
        }
    }

    #[test]
    fn test_empty_stats() {
        assert_eq!(
            compute_stats(&[]),
            StatsSummary {
                total_posts: 0,
                total_clicks: 0,
                avg_ctr: 0
            }
        );
    }

    #[test]
    fn test_counts_drafts_and_published() {
        let posts = vec![post(1, PostStatus::Draft, 0), post(2, PostStatus::Published, 5)];
        assert_eq!(compute_stats(&posts).total_posts, 2);
    }

    #[test]
    fn test_sums_clicks_regardless_of_status() {
        let posts = vec![post(1, PostStatus::Draft, 2), post(2, PostStatus::Published, 8)];
        assert_eq!(compute_stats(&posts).total_clicks, 10);
    }

    #[test]
    fn test_avg_ctr_over_published() {
        let posts = vec![
            post(1, PostStatus::Published, 10),
            post(2, PostStatus::Published, 20),
        ];
        assert_eq!(
            compute_stats(&posts),
            StatsSummary {
                total_posts: 2,
                total_clicks: 30,
                avg_ctr: 15
            }
        );
    }

    #[test]
    fn test_avg_ctr_zero_without_published() {
        let stats = compute_stats(&[post(1, PostStatus::Draft, 50)]);
        assert_eq!(stats.avg_ctr, 0);
        assert_eq!(stats.total_clicks, 50);
    }

    #[test]
    fn test_avg_ctr_includes_draft_clicks() {
        let posts = vec![post(1, PostStatus::Draft, 9), post(2, PostStatus::Published, 1)];
        assert_eq!(compute_stats(&posts).avg_ctr, 10);
    }

    #[test]
    fn test_avg_ctr_rounds_half_up() {
        assert_eq!(rounded_average(5, 2), 3);
        assert_eq!(rounded_average(7, 4), 2);
        assert_eq!(rounded_average(2, 4), 1);
        assert_eq!(rounded_average(1, 3), 0);
        assert_eq!(rounded_average(2, 3), 1);
        assert_eq!(rounded_average(0, 3), 0);
    }

    #[test]
    fn test_stats_json_shape() {
        let value = serde_json::to_value(compute_stats(&[])).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "totalPosts": 0, "totalClicks": 0, "avgCtr": 0 })
        );
    }
}
