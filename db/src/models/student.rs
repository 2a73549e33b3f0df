use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::course_student::Entity")]
    CourseStudent,
    #[sea_orm(has_many = "super::rating::Entity")]
    Rating,
}

impl Related<super::course_student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseStudent.def()
    }
}

impl Related<super::rating::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rating.def()
    }
}

/// Courses the student is enrolled in, through `course_students`.
impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        super::course_student::Relation::Course.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::course_student::Relation::Student.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(db: &DbConn, name: &str, email: &str) -> Result<Model, DbErr> {
        ActiveModel {
            name: Set(name.to_owned()),
            email: Set(email.to_owned()),
            ..Default::default()
        }
        .insert(db)
        .await
    }
}
