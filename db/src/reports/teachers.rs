use std::collections::HashMap;

use ranking::{Grouped, Ranked, RankedRow, select_top_n};
use sea_orm::{
    DatabaseConnection, EntityTrait, FromQueryResult, JoinType, QueryOrder, QuerySelect,
    RelationTrait,
};
use serde::Serialize;
use tracing::debug;

use super::{ReportError, avg_of, count_distinct_of, count_of, round2};
use crate::models::{course, course_student, lesson, rating, student, teacher};

/// Identity of the teacher a ranked group belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TeacherRef {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeacherStats {
    pub teacher_id: i64,
    pub name: String,
    pub course_count: i64,
    /// Distinct students enrolled in at least one of the teacher's courses.
    pub student_count: i64,
    pub lesson_count: i64,
    pub rating_count: i64,
    /// `None` until one of the teacher's courses is rated.
    pub average_rating: Option<f64>,
}

#[derive(Debug, FromQueryResult)]
struct TeacherTotal {
    teacher_id: i64,
    total: i64,
}

#[derive(Debug, FromQueryResult)]
struct TeacherRatingTotal {
    teacher_id: i64,
    total: i64,
    average: Option<f64>,
}

/// Course, student, lesson and rating totals for every teacher, ordered by name.
///
/// Each total comes from its own grouped query so joins never multiply rows.
pub async fn teacher_statistics(
    db: &DatabaseConnection,
) -> Result<Vec<TeacherStats>, ReportError> {
    let teachers = teacher::Entity::find()
        .order_by_asc(teacher::Column::Name)
        .order_by_asc(teacher::Column::Id)
        .all(db)
        .await?;

    let courses: HashMap<i64, i64> = course::Entity::find()
        .select_only()
        .column(course::Column::TeacherId)
        .column_as(count_of((course::Entity, course::Column::Id)), "total")
        .group_by(course::Column::TeacherId)
        .into_model::<TeacherTotal>()
        .all(db)
        .await?
        .into_iter()
        .map(|t| (t.teacher_id, t.total))
        .collect();

    let lessons: HashMap<i64, i64> = lesson::Entity::find()
        .select_only()
        .column_as(course::Column::TeacherId, "teacher_id")
        .column_as(count_of((lesson::Entity, lesson::Column::Id)), "total")
        .join(JoinType::InnerJoin, lesson::Relation::Course.def())
        .group_by(course::Column::TeacherId)
        .into_model::<TeacherTotal>()
        .all(db)
        .await?
        .into_iter()
        .map(|t| (t.teacher_id, t.total))
        .collect();

    let students: HashMap<i64, i64> = course_student::Entity::find()
        .select_only()
        .column_as(course::Column::TeacherId, "teacher_id")
        .column_as(
            count_distinct_of((course_student::Entity, course_student::Column::StudentId)),
            "total",
        )
        .join(JoinType::InnerJoin, course_student::Relation::Course.def())
        .group_by(course::Column::TeacherId)
        .into_model::<TeacherTotal>()
        .all(db)
        .await?
        .into_iter()
        .map(|t| (t.teacher_id, t.total))
        .collect();

    let ratings: HashMap<i64, TeacherRatingTotal> = rating::Entity::find()
        .select_only()
        .column_as(course::Column::TeacherId, "teacher_id")
        .column_as(count_of((rating::Entity, rating::Column::Id)), "total")
        .column_as(avg_of((rating::Entity, rating::Column::Rating)), "average")
        .join(JoinType::InnerJoin, rating::Relation::Course.def())
        .group_by(course::Column::TeacherId)
        .into_model::<TeacherRatingTotal>()
        .all(db)
        .await?
        .into_iter()
        .map(|t| (t.teacher_id, t))
        .collect();

    debug!(teachers = teachers.len(), "teacher statistics");

    Ok(teachers
        .into_iter()
        .map(|t| {
            let rated = ratings.get(&t.id);
            TeacherStats {
                teacher_id: t.id,
                course_count: courses.get(&t.id).copied().unwrap_or(0),
                student_count: students.get(&t.id).copied().unwrap_or(0),
                lesson_count: lessons.get(&t.id).copied().unwrap_or(0),
                rating_count: rated.map(|r| r.total).unwrap_or(0),
                average_rating: rated.and_then(|r| r.average).map(round2),
                name: t.name,
            }
        })
        .collect())
}

/// A course and how many students it has, read per teacher.
#[derive(Debug, Clone, PartialEq, FromQueryResult, Serialize)]
pub struct CourseEnrollment {
    #[serde(skip)]
    pub teacher_id: i64,
    #[serde(skip)]
    pub teacher_name: String,
    pub course_id: i64,
    pub title: String,
    pub student_count: i64,
}

impl Grouped for CourseEnrollment {
    type Group = TeacherRef;

    fn group_key(&self) -> TeacherRef {
        TeacherRef {
            id: self.teacher_id,
            name: self.teacher_name.clone(),
        }
    }
}

impl Ranked for CourseEnrollment {
    type RankKey = i64;
    type TieBreak = i64;

    fn rank_key(&self) -> i64 {
        self.student_count
    }

    fn tie_break_key(&self) -> i64 {
        self.course_id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeacherTopCourses {
    pub teacher_id: i64,
    pub teacher_name: String,
    pub courses: Vec<RankedRow<CourseEnrollment>>,
}

/// The `n` most-enrolled courses of every teacher.
///
/// Enrollment counts are grouped in SQL; ranking is done by [`select_top_n`]
/// with the course id as tie-break. Teachers are listed by name, and teachers
/// without courses are left out.
///
/// # Errors
/// [`ReportError::Ranking`] when `n` is zero.
pub async fn top_courses_per_teacher(
    db: &DatabaseConnection,
    n: usize,
) -> Result<Vec<TeacherTopCourses>, ReportError> {
    let rows = course::Entity::find()
        .select_only()
        .column_as(teacher::Column::Id, "teacher_id")
        .column_as(teacher::Column::Name, "teacher_name")
        .column_as(course::Column::Id, "course_id")
        .column(course::Column::Title)
        .column_as(
            count_of((course_student::Entity, course_student::Column::StudentId)),
            "student_count",
        )
        .join(JoinType::InnerJoin, course::Relation::Teacher.def())
        .join(JoinType::LeftJoin, course::Relation::CourseStudent.def())
        .group_by(teacher::Column::Id)
        .group_by(teacher::Column::Name)
        .group_by(course::Column::Id)
        .group_by(course::Column::Title)
        .order_by_asc(teacher::Column::Name)
        .order_by_asc(teacher::Column::Id)
        .order_by_asc(course::Column::Id)
        .into_model::<CourseEnrollment>()
        .all(db)
        .await?;

    debug!(rows = rows.len(), n, "top courses per teacher");

    Ok(select_top_n(rows, n)?
        .into_iter()
        .map(|group| TeacherTopCourses {
            teacher_id: group.group_key.id,
            teacher_name: group.group_key.name,
            courses: group.rows,
        })
        .collect())
}

/// A student and how many of one teacher's courses they take.
#[derive(Debug, Clone, PartialEq, FromQueryResult, Serialize)]
pub struct StudentEnrollment {
    #[serde(skip)]
    pub teacher_id: i64,
    #[serde(skip)]
    pub teacher_name: String,
    pub student_id: i64,
    pub student_name: String,
    pub course_count: i64,
}

impl Grouped for StudentEnrollment {
    type Group = TeacherRef;

    fn group_key(&self) -> TeacherRef {
        TeacherRef {
            id: self.teacher_id,
            name: self.teacher_name.clone(),
        }
    }
}

impl Ranked for StudentEnrollment {
    type RankKey = i64;
    type TieBreak = i64;

    fn rank_key(&self) -> i64 {
        self.course_count
    }

    fn tie_break_key(&self) -> i64 {
        self.student_id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeacherTopStudents {
    pub teacher_id: i64,
    pub teacher_name: String,
    pub students: Vec<RankedRow<StudentEnrollment>>,
}

/// The `n` students enrolled in the most courses of every teacher.
///
/// Ties go to the lower student id. Teachers are listed by name; teachers with
/// no enrollments are left out.
///
/// # Errors
/// [`ReportError::Ranking`] when `n` is zero.
pub async fn top_students_per_teacher(
    db: &DatabaseConnection,
    n: usize,
) -> Result<Vec<TeacherTopStudents>, ReportError> {
    let rows = course_student::Entity::find()
        .select_only()
        .column_as(teacher::Column::Id, "teacher_id")
        .column_as(teacher::Column::Name, "teacher_name")
        .column_as(student::Column::Id, "student_id")
        .column_as(student::Column::Name, "student_name")
        .column_as(
            count_of((course_student::Entity, course_student::Column::CourseId)),
            "course_count",
        )
        .join(JoinType::InnerJoin, course_student::Relation::Course.def())
        .join(JoinType::InnerJoin, course::Relation::Teacher.def())
        .join(JoinType::InnerJoin, course_student::Relation::Student.def())
        .group_by(teacher::Column::Id)
        .group_by(teacher::Column::Name)
        .group_by(student::Column::Id)
        .group_by(student::Column::Name)
        .order_by_asc(teacher::Column::Name)
        .order_by_asc(teacher::Column::Id)
        .order_by_asc(student::Column::Id)
        .into_model::<StudentEnrollment>()
        .all(db)
        .await?;

    debug!(rows = rows.len(), n, "top students per teacher");

    Ok(select_top_n(rows, n)?
        .into_iter()
        .map(|group| TeacherTopStudents {
            teacher_id: group.group_key.id,
            teacher_name: group.group_key.name,
            students: group.rows,
        })
        .collect())
}
