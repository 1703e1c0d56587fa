mod common;

use axum::{Router, http::StatusCode, routing::get};
use axum_test::TestServer;
use linkbio::api::handlers::redirect_handler;
use linkbio::domain::entities::PostId;
use linkbio::state::AppState;

fn make_server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/go/{id}", get(redirect_handler))
        .with_state(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_redirect_published_post() {
    let state = common::create_test_state().await;
    common::create_published_post(&state, 10, "Shop", "https://shop.example.com/sale").await;
    let server = make_server(state.clone());

    let response = server.get("/go/10").await;

    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), "https://shop.example.com/sale");
}

#[tokio::test]
async fn test_redirect_records_click_and_ledger() {
    let state = common::create_test_state().await;
    common::create_published_post(&state, 10, "Shop", "https://shop.example.com").await;
    let server = make_server(state.clone());

    server.get("/go/10").await;
    server.get("/go/10").await;
    server.get("/go/10").await;

    let post = state.bio_service.find_post(PostId(10)).await.unwrap();
    assert_eq!(post.clicks, 3);
    assert_eq!(state.bio_service.analytics().await.clicks_for(PostId(10)), 3);
    assert_eq!(state.bio_service.stats().await.total_clicks, 3);
}

#[tokio::test]
async fn test_redirect_draft_not_found() {
    let state = common::create_test_state().await;
    common::create_test_post(&state, 11, "Draft", "https://shop.example.com").await;
    let server = make_server(state.clone());

    let response = server.get("/go/11").await;

    response.assert_status_not_found();
    let post = state.bio_service.find_post(PostId(11)).await.unwrap();
    assert_eq!(post.clicks, 0);
    assert!(state.bio_service.analytics().await.is_empty());
}

#[tokio::test]
async fn test_redirect_unknown_post() {
    let server = make_server(common::create_test_state().await);

    let response = server.get("/go/12345").await;

    response.assert_status_not_found();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_redirect_invalid_id() {
    let server = make_server(common::create_test_state().await);

    let response = server.get("/go/not-a-number").await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
