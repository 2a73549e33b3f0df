//! Read-only reporting queries.
//!
//! The database does the grouping and counting; anything that needs per-group
//! ranking or "latest row" selection is finished in memory with the `ranking`
//! selectors, so the results don't depend on window-function support.

use ranking::RankingError;
use sea_orm::DbErr;
use sea_orm::sea_query::{Expr, Func, IntoColumnRef, SimpleExpr};
use thiserror::Error;

pub mod courses;
pub mod teachers;

pub use courses::{
    CourseRatingStats, CourseStatsFilter, LatestCourseRating, LatestRating, TopCourse,
    TopCourseCriteria, course_rating_stats, latest_rating_per_course,
    top_courses_with_average_rating,
};
pub use teachers::{
    CourseEnrollment, StudentEnrollment, TeacherRef, TeacherStats, TeacherTopCourses,
    TeacherTopStudents, teacher_statistics, top_courses_per_teacher, top_students_per_teacher,
};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("database error: {0}")]
    Database(#[from] DbErr),
    #[error(transparent)]
    Ranking(#[from] RankingError),
}

/// Rounds to two decimal places, the precision every report uses for averages.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn count_of(column: impl IntoColumnRef) -> SimpleExpr {
    Func::count(Expr::col(column)).into()
}

pub(crate) fn count_distinct_of(column: impl IntoColumnRef) -> SimpleExpr {
    Func::count_distinct(Expr::col(column)).into()
}

pub(crate) fn avg_of(column: impl IntoColumnRef) -> SimpleExpr {
    Func::avg(Expr::col(column)).into()
}
