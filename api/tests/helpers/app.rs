use api::{middleware::log_request, routes::routes};
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
    middleware::from_fn,
};
use db::{
    models::{course, rating, student, teacher},
    test_utils::setup_test_db,
};
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tower::ServiceExt;
use util::state::AppState;

/// Ids of the rows seeded by [`make_test_app`].
pub struct Seeded {
    pub teachers: Vec<i64>,
    pub students: Vec<i64>,
    pub courses: Vec<i64>,
    pub ratings: Vec<i64>,
}

/// Builds the `/api` router over a fresh in-memory database holding a small school:
///
/// - Noor teaches "Django Basics" (students 1 2 3, ratings 5 4) and
///   "Flask Intro" (students 1 2 3, rating 2)
/// - Ali teaches "Pandas" (students 2 3, no ratings)
pub async fn make_test_app() -> (Router, Seeded) {
    let db = setup_test_db().await;
    let seeded = seed(&db).await;

    let app = Router::new()
        .nest("/api", routes(AppState::new(db)))
        .layer(from_fn(log_request));

    (app, seeded)
}

async fn seed(db: &DatabaseConnection) -> Seeded {
    let noor = teacher::Model::create(db, "Noor", "Backend engineer.").await.unwrap();
    let ali = teacher::Model::create(db, "Ali", "Data scientist.").await.unwrap();

    let mut students = Vec::new();
    for name in ["Alina", "Bilal", "Cyrus"] {
        let email = format!("{}@example.edu", name.to_lowercase());
        students.push(student::Model::create(db, name, &email).await.unwrap().id);
    }

    let django = course::Model::create(db, noor.id, "Django Basics", 120.0).await.unwrap();
    let flask = course::Model::create(db, noor.id, "Flask Intro", 90.0).await.unwrap();
    let pandas = course::Model::create(db, ali.id, "Pandas", 100.0).await.unwrap();

    for student_id in &students {
        django.enroll(db, *student_id).await.unwrap();
        flask.enroll(db, *student_id).await.unwrap();
    }
    pandas.enroll(db, students[1]).await.unwrap();
    pandas.enroll(db, students[2]).await.unwrap();

    let mut ratings = Vec::new();
    for (course_id, student_id, value) in [
        (django.id, students[0], 5),
        (django.id, students[1], 4),
        (flask.id, students[2], 2),
    ] {
        ratings.push(
            rating::Model::create(db, course_id, student_id, value, "Solid course")
                .await
                .unwrap()
                .id,
        );
    }

    Seeded {
        teachers: vec![noor.id, ali.id],
        students,
        courses: vec![django.id, flask.id, pandas.id],
        ratings,
    }
}

/// Sends `GET uri` and decodes the JSON body.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}
