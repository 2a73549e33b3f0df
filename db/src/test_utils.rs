use sea_orm::{Database, DatabaseConnection};

use crate::schema::create_tables;

pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory db");

    create_tables(&db)
        .await
        .expect("Failed to create tables");

    db
}
