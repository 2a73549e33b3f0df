use super::common::{TopNQuery, report_error};
use crate::response::ApiResponse;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::reports::{self, CourseStatsFilter, TopCourseCriteria};
use ranking::parse_limit;
use serde::Deserialize;
use util::state::AppState;

const DEFAULT_TOP_COURSES: i64 = 2;
const DEFAULT_TOP_STUDENTS: i64 = 3;

#[derive(Debug, Deserialize)]
pub struct TopCoursesQuery {
    pub min_reviews: Option<i64>,
    pub min_average: Option<f64>,
}

/// GET /api/reports/top-courses
///
/// Courses with at least `min_reviews` ratings (default `2`) and an average
/// strictly above `min_average` (default `3.5`), ordered by course id.
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": [
///     { "course_id": 1, "title": "Django Basics", "average_rating": 4.5, "reviews_count": 2 }
///   ],
///   "message": "Top courses retrieved"
/// }
/// ```
/// - `500 Internal Server Error` on database failure
pub async fn get_top_courses(
    State(app_state): State<AppState>,
    Query(params): Query<TopCoursesQuery>,
) -> Response {
    let defaults = TopCourseCriteria::default();
    let criteria = TopCourseCriteria {
        min_reviews: params.min_reviews.unwrap_or(defaults.min_reviews),
        min_average: params.min_average.unwrap_or(defaults.min_average),
    };

    match reports::top_courses_with_average_rating(app_state.db(), criteria).await {
        Ok(courses) => (
            StatusCode::OK,
            Json(ApiResponse::success(courses, "Top courses retrieved")),
        )
            .into_response(),
        Err(e) => report_error("retrieve top courses", e),
    }
}

#[derive(Debug, Deserialize)]
pub struct CourseStatsQuery {
    pub teacher_id: Option<i64>,
    pub min_reviews: Option<i64>,
    pub search: Option<String>,
}

/// GET /api/reports/courses
///
/// Rating count and average of every course, ordered by title.
///
/// ### Query Parameters
/// - `teacher_id` (optional): only this teacher's courses
/// - `min_reviews` (optional): only courses with at least this many ratings
/// - `search` (optional): substring of the course title or teacher name
pub async fn get_course_stats(
    State(app_state): State<AppState>,
    Query(params): Query<CourseStatsQuery>,
) -> Response {
    let filter = CourseStatsFilter {
        teacher_id: params.teacher_id,
        min_reviews: params.min_reviews,
        search: params.search,
    };

    match reports::course_rating_stats(app_state.db(), &filter).await {
        Ok(courses) => (
            StatusCode::OK,
            Json(ApiResponse::success(courses, "Course statistics retrieved")),
        )
            .into_response(),
        Err(e) => report_error("retrieve course statistics", e),
    }
}

/// GET /api/reports/courses/latest-ratings
///
/// Every course with its most recent rating, or `null` if it has none.
pub async fn get_latest_ratings(State(app_state): State<AppState>) -> Response {
    match reports::latest_rating_per_course(app_state.db()).await {
        Ok(courses) => (
            StatusCode::OK,
            Json(ApiResponse::success(courses, "Latest ratings retrieved")),
        )
            .into_response(),
        Err(e) => report_error("retrieve latest ratings", e),
    }
}

/// GET /api/reports/teachers
pub async fn get_teacher_stats(State(app_state): State<AppState>) -> Response {
    match reports::teacher_statistics(app_state.db()).await {
        Ok(teachers) => (
            StatusCode::OK,
            Json(ApiResponse::success(teachers, "Teacher statistics retrieved")),
        )
            .into_response(),
        Err(e) => report_error("retrieve teacher statistics", e),
    }
}

/// GET /api/reports/teachers/top-courses
///
/// The `n` most-enrolled courses of each teacher (default `2`), ranked from 1.
/// Equal enrollment counts are ordered by course id.
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": [
///     {
///       "teacher_id": 1,
///       "teacher_name": "Noor",
///       "courses": [
///         { "rank": 1, "course_id": 1, "title": "Django Basics", "student_count": 3 }
///       ]
///     }
///   ],
///   "message": "Top courses per teacher retrieved"
/// }
/// ```
/// - `400 Bad Request` when `n` is below 1
pub async fn get_teacher_top_courses(
    State(app_state): State<AppState>,
    Query(params): Query<TopNQuery>,
) -> Response {
    let n = match parse_limit(params.n.unwrap_or(DEFAULT_TOP_COURSES)) {
        Ok(n) => n,
        Err(e) => return report_error("rank courses", e.into()),
    };

    match reports::top_courses_per_teacher(app_state.db(), n).await {
        Ok(teachers) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                teachers,
                "Top courses per teacher retrieved",
            )),
        )
            .into_response(),
        Err(e) => report_error("rank courses", e),
    }
}

/// GET /api/reports/teachers/top-students
///
/// The `n` students (default `3`) taking the most courses of each teacher.
/// Equal course counts are ordered by student id.
///
/// ### Responses
/// - `200 OK`
/// - `400 Bad Request` when `n` is below 1
pub async fn get_teacher_top_students(
    State(app_state): State<AppState>,
    Query(params): Query<TopNQuery>,
) -> Response {
    let n = match parse_limit(params.n.unwrap_or(DEFAULT_TOP_STUDENTS)) {
        Ok(n) => n,
        Err(e) => return report_error("rank students", e.into()),
    };

    match reports::top_students_per_teacher(app_state.db(), n).await {
        Ok(teachers) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                teachers,
                "Top students per teacher retrieved",
            )),
        )
            .into_response(),
        Err(e) => report_error("rank students", e),
    }
}
