//! Table creation straight from the entity definitions.
//!
//! There are no migrations; this is only used to stand up a blank database
//! (tests, or a first run with `DATABASE_BOOTSTRAP=true`).

use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, Schema};

use crate::models::{Course, CourseMaterial, CourseStudent, Lesson, Rating, Student, Teacher};

/// Creates every table that does not exist yet, parents before children.
pub async fn create_tables(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let statements = vec![
        schema.create_table_from_entity(Teacher),
        schema.create_table_from_entity(Student),
        schema.create_table_from_entity(Course),
        schema.create_table_from_entity(CourseStudent),
        schema.create_table_from_entity(Lesson),
        schema.create_table_from_entity(CourseMaterial),
        schema.create_table_from_entity(Rating),
    ];

    for mut statement in statements {
        statement.if_not_exists();
        db.execute(backend.build(&statement)).await?;
    }

    tracing::info!("database schema ready");
    Ok(())
}
