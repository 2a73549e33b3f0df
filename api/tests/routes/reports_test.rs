use crate::helpers::{get_json, make_test_app};
use axum::http::StatusCode;
use serde_json::{Value, json};

fn titles(data: &Value) -> Vec<&str> {
    data.as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn top_courses_uses_default_thresholds() {
    let (app, seeded) = make_test_app().await;

    let (status, json) = get_json(app, "/api/reports/top-courses").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Top courses retrieved");
    assert_eq!(
        json["data"],
        json!([{
            "course_id": seeded.courses[0],
            "title": "Django Basics",
            "average_rating": 4.5,
            "reviews_count": 2
        }])
    );
}

#[tokio::test]
async fn top_courses_thresholds_can_be_lowered() {
    let (app, _) = make_test_app().await;

    let (status, json) =
        get_json(app, "/api/reports/top-courses?min_reviews=1&min_average=1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&json["data"]), vec!["Django Basics", "Flask Intro"]);
}

#[tokio::test]
async fn course_stats_list_every_course_by_title() {
    let (app, _) = make_test_app().await;

    let (status, json) = get_json(app, "/api/reports/courses").await;

    assert_eq!(status, StatusCode::OK);
    let data = &json["data"];
    assert_eq!(titles(data), vec!["Django Basics", "Flask Intro", "Pandas"]);
    assert_eq!(data[2]["teacher_name"], "Ali");
    assert_eq!(data[2]["reviews_count"], 0);
    assert_eq!(data[2]["average_rating"], 0.0);
}

#[tokio::test]
async fn course_stats_filters_combine() {
    let (app, seeded) = make_test_app().await;

    let uri = format!("/api/reports/courses?teacher_id={}", seeded.teachers[1]);
    let (_, json) = get_json(app.clone(), &uri).await;
    assert_eq!(titles(&json["data"]), vec!["Pandas"]);

    let (_, json) = get_json(app.clone(), "/api/reports/courses?search=FLASK").await;
    assert_eq!(titles(&json["data"]), vec!["Flask Intro"]);

    let (_, json) = get_json(app, "/api/reports/courses?min_reviews=2").await;
    assert_eq!(titles(&json["data"]), vec!["Django Basics"]);
}

#[tokio::test]
async fn latest_ratings_include_unrated_courses_as_null() {
    let (app, seeded) = make_test_app().await;

    let (status, json) = get_json(app, "/api/reports/courses/latest-ratings").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["data"],
        json!([
            {
                "course_id": seeded.courses[0],
                "title": "Django Basics",
                "latest_rating": {
                    "rating_id": seeded.ratings[1],
                    "rating": 4,
                    "comment": "Solid course",
                    "student_name": "Bilal"
                }
            },
            {
                "course_id": seeded.courses[1],
                "title": "Flask Intro",
                "latest_rating": {
                    "rating_id": seeded.ratings[2],
                    "rating": 2,
                    "comment": "Solid course",
                    "student_name": "Cyrus"
                }
            },
            {
                "course_id": seeded.courses[2],
                "title": "Pandas",
                "latest_rating": null
            }
        ])
    );
}

#[tokio::test]
async fn teacher_stats_are_ordered_by_name() {
    let (app, seeded) = make_test_app().await;

    let (status, json) = get_json(app, "/api/reports/teachers").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["data"],
        json!([
            {
                "teacher_id": seeded.teachers[1],
                "name": "Ali",
                "course_count": 1,
                "student_count": 2,
                "lesson_count": 0,
                "rating_count": 0,
                "average_rating": null
            },
            {
                "teacher_id": seeded.teachers[0],
                "name": "Noor",
                "course_count": 2,
                "student_count": 3,
                "lesson_count": 0,
                "rating_count": 3,
                "average_rating": 3.67
            }
        ])
    );
}

#[tokio::test]
async fn teacher_top_courses_breaks_ties_by_course_id() {
    let (app, seeded) = make_test_app().await;

    let (status, json) = get_json(app.clone(), "/api/reports/teachers/top-courses").await;

    assert_eq!(status, StatusCode::OK);
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["teacher_name"], "Ali");
    assert_eq!(
        data[1],
        json!({
            "teacher_id": seeded.teachers[0],
            "teacher_name": "Noor",
            "courses": [
                { "rank": 1, "course_id": seeded.courses[0], "title": "Django Basics", "student_count": 3 },
                { "rank": 2, "course_id": seeded.courses[1], "title": "Flask Intro", "student_count": 3 }
            ]
        })
    );

    let (_, json) = get_json(app, "/api/reports/teachers/top-courses?n=1").await;
    let noor = &json["data"][1]["courses"];
    assert_eq!(noor.as_array().unwrap().len(), 1);
    assert_eq!(noor[0]["course_id"], seeded.courses[0]);
}

#[tokio::test]
async fn teacher_top_students_defaults_to_three() {
    let (app, seeded) = make_test_app().await;

    let (status, json) = get_json(app, "/api/reports/teachers/top-students").await;

    assert_eq!(status, StatusCode::OK);
    let ranked: Vec<Vec<(i64, i64)>> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| {
            t["students"]
                .as_array()
                .unwrap()
                .iter()
                .map(|s| (s["rank"].as_i64().unwrap(), s["student_id"].as_i64().unwrap()))
                .collect()
        })
        .collect();

    let s = &seeded.students;
    assert_eq!(
        ranked,
        vec![
            vec![(1, s[1]), (2, s[2])],
            vec![(1, s[0]), (2, s[1]), (3, s[2])],
        ]
    );
}

#[tokio::test]
async fn non_positive_limit_is_bad_request() {
    let (app, _) = make_test_app().await;

    for uri in [
        "/api/reports/teachers/top-courses?n=0",
        "/api/reports/teachers/top-students?n=0",
        "/api/reports/teachers/top-students?n=-2",
    ] {
        let (status, json) = get_json(app.clone(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(json["success"], false);
        assert!(
            json["message"].as_str().unwrap().contains("n must be at least 1"),
            "{uri}: {}",
            json["message"]
        );
    }
}
