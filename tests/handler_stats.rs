mod common;

use axum::http::StatusCode;
use linkbio::domain::entities::PostId;
use linkbio::domain::reducer::Action;
use serde_json::json;

#[tokio::test]
async fn test_stats_empty() {
    let server = common::api_server(common::create_test_state().await);

    let response = server
        .get("/api/stats")
        .add_header("Authorization", common::auth_header())
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<serde_json::Value>(),
        json!({ "totalPosts": 0, "totalClicks": 0, "avgCtr": 0 })
    );
}

#[tokio::test]
async fn test_stats_average_over_published_posts() {
    let state = common::create_test_state().await;
    common::create_published_post(&state, 1, "A", "https://a.example.com").await;
    common::create_published_post(&state, 2, "B", "https://b.example.com").await;
    common::create_test_post(&state, 3, "C", "https://c.example.com").await;

    for (id, clicks) in [(1, 2), (2, 1), (3, 2)] {
        for _ in 0..clicks {
            state
                .bio_service
                .dispatch(Action::TrackClick(PostId(id)))
                .await;
        }
    }

    let server = common::api_server(state);

    let response = server
        .get("/api/stats")
        .add_header("Authorization", common::auth_header())
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["totalPosts"], 3);
    assert_eq!(json["totalClicks"], 5);
    // 5 clicks over 2 published posts = 2.5, rounded half up
    assert_eq!(json["avgCtr"], 3);
}

#[tokio::test]
async fn test_stats_requires_token() {
    let server = common::api_server(common::create_test_state().await);

    server
        .get("/api/stats")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_analytics_keeps_deleted_posts() {
    let state = common::create_test_state().await;
    common::create_published_post(&state, 1, "Stays", "https://a.example.com").await;
    common::create_published_post(&state, 2, "Goes", "https://b.example.com").await;
    state
        .bio_service
        .dispatch(Action::TrackClick(PostId(1)))
        .await;
    state
        .bio_service
        .dispatch(Action::TrackClick(PostId(2)))
        .await;
    state
        .bio_service
        .dispatch(Action::DeletePost(PostId(2)))
        .await;

    let server = common::api_server(state);

    let response = server
        .get("/api/analytics")
        .add_header("Authorization", common::auth_header())
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<serde_json::Value>(),
        json!([
            { "id": 1, "clicks": 1, "exists": true },
            { "id": 2, "clicks": 1, "exists": false }
        ])
    );
}
