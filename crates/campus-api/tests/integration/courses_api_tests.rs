use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use crate::integration::common::setup_test_app;

async fn post_json(router: &Router, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let response = router
        .clone()
        .oneshot(
            Request::post(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create_user(router: &Router, name: &str, email: &str, role: &str) -> i64 {
    let (status, json) = post_json(
        router,
        "/api/users",
        serde_json::json!({ "name": name, "email": email, "role": role }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    json["id"].as_i64().unwrap()
}

async fn create_category(router: &Router, name: &str) -> i64 {
    let (status, json) =
        post_json(router, "/api/categories", serde_json::json!({ "name": name })).await;
    assert_eq!(status, StatusCode::OK);
    json["id"].as_i64().unwrap()
}

async fn create_course(router: &Router, title: &str, teacher_id: i64, category_id: i64) -> i64 {
    let (status, json) = post_json(
        router,
        "/api/courses",
        serde_json::json!({
            "title": title,
            "description": "Intro course",
            "teacherId": teacher_id,
            "categoryId": category_id,
            "duration": 8
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    json["id"].as_i64().unwrap()
}

#[tokio::test]
async fn create_course_embeds_teacher_and_category() {
    let app = setup_test_app().await;

    let teacher_id = create_user(&app.router, "Alice Morgan", "alice@campus.io", "teacher").await;
    let category_id = create_category(&app.router, "Programming").await;

    let (status, json) = post_json(
        &app.router,
        "/api/courses",
        serde_json::json!({
            "title": "Rust Fundamentals",
            "teacherId": teacher_id,
            "categoryId": category_id,
            "startDate": "2026-09-01",
            "duration": 12
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["title"], "Rust Fundamentals");
    assert_eq!(json["teacher"]["id"], teacher_id);
    assert_eq!(json["teacher"]["name"], "Alice Morgan");
    assert_eq!(json["category"]["name"], "Programming");
    assert_eq!(json["startDate"], "2026-09-01");
    assert_eq!(json["duration"], 12);
}

#[tokio::test]
async fn course_led_by_student_returns_400() {
    let app = setup_test_app().await;

    let student_id = create_user(&app.router, "Bob Keller", "bob@campus.io", "student").await;
    let category_id = create_category(&app.router, "Programming").await;

    let (status, json) = post_json(
        &app.router,
        "/api/courses",
        serde_json::json!({
            "title": "Rust Fundamentals",
            "teacherId": student_id,
            "categoryId": category_id
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
}

#[tokio::test]
async fn duplicate_category_returns_409() {
    let app = setup_test_app().await;

    create_category(&app.router, "Programming").await;

    let (status, json) = post_json(
        &app.router,
        "/api/categories",
        serde_json::json!({ "name": "Programming" }),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "conflict");
}

#[tokio::test]
async fn enroll_unenroll_roundtrip() {
    let app = setup_test_app().await;

    let teacher_id = create_user(&app.router, "Alice Morgan", "alice@campus.io", "teacher").await;
    let student_id = create_user(&app.router, "Bob Keller", "bob@campus.io", "student").await;
    let category_id = create_category(&app.router, "Programming").await;
    let course_id = create_course(&app.router, "Rust Fundamentals", teacher_id, category_id).await;

    // Enroll
    let uri = format!("/api/enrollments/enroll?userId={student_id}&courseId={course_id}");
    let response = app
        .router
        .clone()
        .oneshot(Request::post(uri.as_str()).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "active");
    assert_eq!(json["user"]["id"], student_id);
    assert_eq!(json["course"]["id"], course_id);

    // Enrolling twice is a conflict
    let response = app
        .router
        .clone()
        .oneshot(Request::post(uri.as_str()).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // The course shows up for the student, and the student for the course
    let response = app
        .router
        .clone()
        .oneshot(
            Request::get(format!("/api/courses/user/{student_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json[0]["id"], course_id);

    let response = app
        .router
        .clone()
        .oneshot(
            Request::get(format!("/api/courses/{course_id}/students"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json[0]["id"], student_id);

    // Unenroll
    let uri = format!("/api/enrollments/unenroll?userId={student_id}&courseId={course_id}");
    let response = app
        .router
        .clone()
        .oneshot(Request::post(uri.as_str()).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Unenrolling again is a conflict
    let response = app
        .router
        .oneshot(Request::post(uri.as_str()).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn review_rating_out_of_range_returns_400() {
    let app = setup_test_app().await;

    let teacher_id = create_user(&app.router, "Alice Morgan", "alice@campus.io", "teacher").await;
    let student_id = create_user(&app.router, "Bob Keller", "bob@campus.io", "student").await;
    let category_id = create_category(&app.router, "Programming").await;
    let course_id = create_course(&app.router, "Rust Fundamentals", teacher_id, category_id).await;

    let (status, json) = post_json(
        &app.router,
        "/api/course-reviews",
        serde_json::json!({
            "rating": 6,
            "comment": "Off the scale",
            "courseId": course_id,
            "studentId": student_id
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
}

#[tokio::test]
async fn review_via_path_params_is_created() {
    let app = setup_test_app().await;

    let teacher_id = create_user(&app.router, "Alice Morgan", "alice@campus.io", "teacher").await;
    let student_id = create_user(&app.router, "Bob Keller", "bob@campus.io", "student").await;
    let category_id = create_category(&app.router, "Programming").await;
    let course_id = create_course(&app.router, "Rust Fundamentals", teacher_id, category_id).await;

    let (status, json) = post_json(
        &app.router,
        &format!("/api/course-reviews/{course_id}/{student_id}"),
        serde_json::json!({ "rating": 5, "comment": "Loved it" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["rating"], 5);
    assert_eq!(json["course"]["id"], course_id);
    assert_eq!(json["student"]["id"], student_id);

    let response = app
        .router
        .oneshot(
            Request::get("/api/course-reviews")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn delete_course_returns_204() {
    let app = setup_test_app().await;

    let teacher_id = create_user(&app.router, "Alice Morgan", "alice@campus.io", "teacher").await;
    let category_id = create_category(&app.router, "Programming").await;
    let course_id = create_course(&app.router, "Rust Fundamentals", teacher_id, category_id).await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::delete(format!("/api/courses/{course_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .router
        .oneshot(
            Request::get(format!("/api/courses/{course_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
