use crate::helpers::{get_json, make_test_app};
use axum::http::StatusCode;

#[tokio::test]
async fn health_check_returns_ok_json() {
    let (app, _) = make_test_app().await;

    let (status, json) = get_json(app, "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"], "OK");
    assert_eq!(json["message"], "Health check passed");
}
