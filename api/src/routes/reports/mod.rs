//! `/reports` route group: read-only aggregations over courses and teachers.
//!
//! | route                              | handler                         |
//! |------------------------------------|---------------------------------|
//! | `GET /top-courses`                 | [`get::get_top_courses`]        |
//! | `GET /courses`                     | [`get::get_course_stats`]       |
//! | `GET /courses/latest-ratings`      | [`get::get_latest_ratings`]     |
//! | `GET /teachers`                    | [`get::get_teacher_stats`]      |
//! | `GET /teachers/top-courses`        | [`get::get_teacher_top_courses`]  |
//! | `GET /teachers/top-students`       | [`get::get_teacher_top_students`] |

use axum::{Router, routing::get};
use util::state::AppState;

pub mod common;
pub mod get;

pub fn reports_routes() -> Router<AppState> {
    Router::new()
        .route("/top-courses", get(get::get_top_courses))
        .route("/courses", get(get::get_course_stats))
        .route("/courses/latest-ratings", get(get::get_latest_ratings))
        .route("/teachers", get(get::get_teacher_stats))
        .route("/teachers/top-courses", get(get::get_teacher_top_courses))
        .route("/teachers/top-students", get(get::get_teacher_top_students))
}
