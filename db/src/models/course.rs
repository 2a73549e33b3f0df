use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A course offered by one teacher.
///
/// `price` is kept as a double; SQLite has no fixed-point column type.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub teacher_id: i64,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::teacher::Entity",
        from = "Column::TeacherId",
        to = "super::teacher::Column::Id",
        on_delete = "Cascade"
    )]
    Teacher,
    #[sea_orm(has_many = "super::course_student::Entity")]
    CourseStudent,
    #[sea_orm(has_many = "super::lesson::Entity")]
    Lesson,
    #[sea_orm(has_many = "super::rating::Entity")]
    Rating,
}

impl Related<super::teacher::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::course_student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseStudent.def()
    }
}

impl Related<super::lesson::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lesson.def()
    }
}

impl Related<super::rating::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rating.def()
    }
}

/// Enrolled students, through `course_students`.
impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        super::course_student::Relation::Student.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::course_student::Relation::Course.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        teacher_id: i64,
        title: &str,
        price: f64,
    ) -> Result<Model, DbErr> {
        ActiveModel {
            teacher_id: Set(teacher_id),
            title: Set(title.to_owned()),
            price: Set(price),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    /// Enrolls a student in this course.
    pub async fn enroll(&self, db: &DbConn, student_id: i64) -> Result<(), DbErr> {
        super::course_student::ActiveModel {
            course_id: Set(self.id),
            student_id: Set(student_id),
        }
        .insert(db)
        .await?;
        Ok(())
    }
}
