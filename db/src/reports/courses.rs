use ranking::{Grouped, select_latest_in};
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    QueryFilter, QueryOrder, QuerySelect, QueryTrait, RelationTrait,
};
use serde::Serialize;
use tracing::debug;

use super::{ReportError, avg_of, count_of, round2};
use crate::models::{course, rating, student, teacher};

/// Thresholds for the top-rated course list.
#[derive(Debug, Clone, Copy)]
pub struct TopCourseCriteria {
    /// Minimum number of ratings a course needs (inclusive).
    pub min_reviews: i64,
    /// The average rating must be strictly above this.
    pub min_average: f64,
}

impl Default for TopCourseCriteria {
    fn default() -> Self {
        Self {
            min_reviews: 2,
            min_average: 3.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopCourse {
    pub course_id: i64,
    pub title: String,
    pub average_rating: f64,
    pub reviews_count: i64,
}

#[derive(Debug, FromQueryResult)]
struct CourseRatingRow {
    course_id: i64,
    title: String,
    reviews_count: i64,
    avg_rating: Option<f64>,
}

/// Courses with enough reviews and a high enough average, ordered by id.
///
/// Both thresholds are applied in SQL with `HAVING` over the grouped
/// `COUNT`/`AVG` of each course's ratings.
pub async fn top_courses_with_average_rating(
    db: &DatabaseConnection,
    criteria: TopCourseCriteria,
) -> Result<Vec<TopCourse>, ReportError> {
    let reviews = count_of((rating::Entity, rating::Column::Id));
    let average = avg_of((rating::Entity, rating::Column::Rating));

    let rows = course::Entity::find()
        .select_only()
        .column_as(course::Column::Id, "course_id")
        .column(course::Column::Title)
        .column_as(reviews.clone(), "reviews_count")
        .column_as(average.clone(), "avg_rating")
        .join(JoinType::InnerJoin, course::Relation::Rating.def())
        .group_by(course::Column::Id)
        .group_by(course::Column::Title)
        .having(Expr::expr(reviews).gte(criteria.min_reviews))
        .having(Expr::expr(average).gt(criteria.min_average))
        .order_by_asc(course::Column::Id)
        .into_model::<CourseRatingRow>()
        .all(db)
        .await?;

    debug!(courses = rows.len(), "top rated courses");

    Ok(rows
        .into_iter()
        .map(|row| TopCourse {
            course_id: row.course_id,
            title: row.title,
            average_rating: round2(row.avg_rating.unwrap_or_default()),
            reviews_count: row.reviews_count,
        })
        .collect())
}

/// Optional narrowing for [`course_rating_stats`]. The default lists every course.
#[derive(Debug, Clone, Default)]
pub struct CourseStatsFilter {
    pub teacher_id: Option<i64>,
    /// Only courses with at least this many ratings.
    pub min_reviews: Option<i64>,
    /// Substring of the course title or teacher name (SQLite `LIKE`, ASCII case-insensitive).
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseRatingStats {
    pub course_id: i64,
    pub title: String,
    pub teacher_name: String,
    pub average_rating: f64,
    pub reviews_count: i64,
}

#[derive(Debug, FromQueryResult)]
struct CourseStatsRow {
    course_id: i64,
    title: String,
    teacher_name: String,
    reviews_count: i64,
    avg_rating: Option<f64>,
}

/// `LIKE` pattern matching `term` anywhere, with `%`, `_` and `\` taken literally.
fn contains(term: &str) -> LikeExpr {
    let mut escaped = String::with_capacity(term.len() + 2);
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    LikeExpr::new(format!("%{escaped}%")).escape('\\')
}

/// Every course with its rating count and average, ordered by title.
///
/// Unrated courses report an average of `0.0` and a count of `0`.
pub async fn course_rating_stats(
    db: &DatabaseConnection,
    filter: &CourseStatsFilter,
) -> Result<Vec<CourseRatingStats>, ReportError> {
    let reviews = count_of((rating::Entity, rating::Column::Id));

    let search = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty());

    let rows = course::Entity::find()
        .select_only()
        .column_as(course::Column::Id, "course_id")
        .column(course::Column::Title)
        .column_as(teacher::Column::Name, "teacher_name")
        .column_as(reviews.clone(), "reviews_count")
        .column_as(avg_of((rating::Entity, rating::Column::Rating)), "avg_rating")
        .join(JoinType::InnerJoin, course::Relation::Teacher.def())
        .join(JoinType::LeftJoin, course::Relation::Rating.def())
        .apply_if(filter.teacher_id, |query, teacher_id| {
            query.filter(course::Column::TeacherId.eq(teacher_id))
        })
        .apply_if(search, |query, term| {
            query.filter(
                Condition::any()
                    .add(Expr::col((course::Entity, course::Column::Title)).like(contains(term)))
                    .add(Expr::col((teacher::Entity, teacher::Column::Name)).like(contains(term))),
            )
        })
        .group_by(course::Column::Id)
        .group_by(course::Column::Title)
        .group_by(teacher::Column::Name)
        .apply_if(filter.min_reviews, |query, min| {
            query.having(Expr::expr(reviews.clone()).gte(min))
        })
        .order_by_asc(course::Column::Title)
        .order_by_asc(course::Column::Id)
        .into_model::<CourseStatsRow>()
        .all(db)
        .await?;

    debug!(courses = rows.len(), ?filter, "course rating stats");

    Ok(rows
        .into_iter()
        .map(|row| CourseRatingStats {
            course_id: row.course_id,
            title: row.title,
            teacher_name: row.teacher_name,
            average_rating: round2(row.avg_rating.unwrap_or_default()),
            reviews_count: row.reviews_count,
        })
        .collect())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatestRating {
    pub rating_id: i64,
    pub rating: i32,
    pub comment: String,
    pub student_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatestCourseRating {
    pub course_id: i64,
    pub title: String,
    /// `None` when the course has never been rated.
    pub latest_rating: Option<LatestRating>,
}

#[derive(Debug, Clone, FromQueryResult)]
struct RatingRow {
    rating_id: i64,
    course_id: i64,
    rating: i32,
    comment: String,
    student_name: String,
}

impl Grouped for RatingRow {
    type Group = i64;

    fn group_key(&self) -> i64 {
        self.course_id
    }
}

/// The most recent rating (highest id) of every course, with the rater's name.
///
/// All courses are listed, ordered by title; unrated ones carry no rating.
pub async fn latest_rating_per_course(
    db: &DatabaseConnection,
) -> Result<Vec<LatestCourseRating>, ReportError> {
    let courses = course::Entity::find()
        .order_by_asc(course::Column::Title)
        .order_by_asc(course::Column::Id)
        .all(db)
        .await?;

    let ratings = rating::Entity::find()
        .select_only()
        .column_as(rating::Column::Id, "rating_id")
        .column(rating::Column::CourseId)
        .column(rating::Column::Rating)
        .column(rating::Column::Comment)
        .column_as(student::Column::Name, "student_name")
        .join(JoinType::InnerJoin, rating::Relation::Student.def())
        .into_model::<RatingRow>()
        .all(db)
        .await?;

    debug!(courses = courses.len(), ratings = ratings.len(), "latest rating per course");

    let selection = select_latest_in(courses.iter().map(|c| c.id), ratings, |r| r.rating_id);

    Ok(courses
        .into_iter()
        .map(|course| LatestCourseRating {
            latest_rating: selection.get(&course.id).map(|row| LatestRating {
                rating_id: row.rating_id,
                rating: row.rating,
                comment: row.comment.clone(),
                student_name: row.student_name.clone(),
            }),
            course_id: course.id,
            title: course.title,
        })
        .collect())
}
