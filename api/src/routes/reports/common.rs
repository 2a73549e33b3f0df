use crate::response::ApiResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::reports::ReportError;
use serde::Deserialize;

/// `?n=` for the per-teacher ranking endpoints.
#[derive(Debug, Deserialize)]
pub struct TopNQuery {
    pub n: Option<i64>,
}

/// Turns a failed report into an HTTP error.
///
/// Bad arguments become `400` with the reason; database failures are logged and
/// become `500` with a generic message.
pub fn report_error(action: &str, err: ReportError) -> Response {
    match err {
        ReportError::Ranking(e) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(e.to_string())),
        )
            .into_response(),
        ReportError::Database(e) => {
            tracing::error!(error = %e, "failed to {action}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error(format!("Failed to {action}"))),
            )
                .into_response()
        }
    }
}
