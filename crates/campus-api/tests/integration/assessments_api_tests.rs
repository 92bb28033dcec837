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

async fn created_id(router: &Router, uri: &str, body: serde_json::Value) -> i64 {
    let (status, json) = post_json(router, uri, body).await;
    assert_eq!(status, StatusCode::OK);
    json["id"].as_i64().unwrap()
}

/// Seeds everything an assignment needs; returns (lesson_id, student_id).
async fn seed_lesson_and_student(router: &Router) -> (i64, i64) {
    let teacher_id = created_id(
        router,
        "/api/users",
        serde_json::json!({ "name": "Alice Morgan", "email": "alice@campus.io", "role": "teacher" }),
    )
    .await;
    let student_id = created_id(
        router,
        "/api/users",
        serde_json::json!({ "name": "Bob Keller", "email": "bob@campus.io", "role": "student" }),
    )
    .await;
    let category_id = created_id(
        router,
        "/api/categories",
        serde_json::json!({ "name": "Programming" }),
    )
    .await;
    let course_id = created_id(
        router,
        "/api/courses",
        serde_json::json!({
            "title": "Rust Fundamentals",
            "teacherId": teacher_id,
            "categoryId": category_id
        }),
    )
    .await;
    let module_id = created_id(
        router,
        "/api/modules",
        serde_json::json!({ "title": "Ownership", "orderIndex": 1, "courseId": course_id }),
    )
    .await;
    let lesson_id = created_id(
        router,
        "/api/lessons",
        serde_json::json!({
            "title": "Moves and borrows",
            "content": "Every value has a single owner.",
            "moduleId": module_id
        }),
    )
    .await;
    (lesson_id, student_id)
}

#[tokio::test]
async fn module_and_lesson_flow() {
    let app = setup_test_app().await;

    let teacher_id = created_id(
        &app.router,
        "/api/users",
        serde_json::json!({ "name": "Alice Morgan", "email": "alice@campus.io", "role": "teacher" }),
    )
    .await;
    let category_id = created_id(
        &app.router,
        "/api/categories",
        serde_json::json!({ "name": "Programming" }),
    )
    .await;
    let course_id = created_id(
        &app.router,
        "/api/courses",
        serde_json::json!({
            "title": "Rust Fundamentals",
            "teacherId": teacher_id,
            "categoryId": category_id
        }),
    )
    .await;

    let (status, json) = post_json(
        &app.router,
        "/api/modules",
        serde_json::json!({ "title": "Ownership", "orderIndex": 1, "courseId": course_id }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["title"], "Ownership");
    assert_eq!(json["orderIndex"], 1);
    assert_eq!(json["course"]["id"], course_id);
    let module_id = json["id"].as_i64().unwrap();

    let (status, json) = post_json(
        &app.router,
        "/api/lessons",
        serde_json::json!({
            "title": "Moves and borrows",
            "content": "Every value has a single owner.",
            "moduleId": module_id
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["module"]["id"], module_id);
    let lesson_id = json["id"].as_i64().unwrap();

    // Deleting the module cascades to its lessons
    let response = app
        .router
        .clone()
        .oneshot(
            Request::delete(format!("/api/modules/{module_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .router
        .oneshot(
            Request::get(format!("/api/lessons/{lesson_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_assignment_embeds_lesson() {
    let app = setup_test_app().await;
    let (lesson_id, _student_id) = seed_lesson_and_student(&app.router).await;

    let (status, json) = post_json(
        &app.router,
        "/api/assignments",
        serde_json::json!({
            "title": "Borrow checker exercise",
            "dueDate": "2026-10-01",
            "maxScore": 100,
            "lessonId": lesson_id
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["title"], "Borrow checker exercise");
    assert_eq!(json["dueDate"], "2026-10-01");
    assert_eq!(json["maxScore"], 100);
    assert_eq!(json["lesson"]["id"], lesson_id);
}

#[tokio::test]
async fn submit_without_content_returns_400() {
    let app = setup_test_app().await;
    let (lesson_id, student_id) = seed_lesson_and_student(&app.router).await;
    let assignment_id = created_id(
        &app.router,
        "/api/assignments",
        serde_json::json!({ "title": "Exercise", "lessonId": lesson_id }),
    )
    .await;

    let (status, json) = post_json(
        &app.router,
        &format!("/api/submissions/submit?assignmentId={assignment_id}&studentId={student_id}"),
        serde_json::json!({}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
    assert_eq!(json["message"], "Validation error: Content is required");
}

#[tokio::test]
async fn submit_then_resubmit_is_a_conflict() {
    let app = setup_test_app().await;
    let (lesson_id, student_id) = seed_lesson_and_student(&app.router).await;
    let assignment_id = created_id(
        &app.router,
        "/api/assignments",
        serde_json::json!({ "title": "Exercise", "lessonId": lesson_id }),
    )
    .await;

    let uri = format!("/api/submissions/submit?assignmentId={assignment_id}&studentId={student_id}");
    let (status, json) = post_json(
        &app.router,
        &uri,
        serde_json::json!({ "content": "fn main() {}" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["content"], "fn main() {}");
    assert_eq!(json["assignment"]["id"], assignment_id);
    assert_eq!(json["student"]["id"], student_id);
    assert!(json["score"].is_null());

    let (status, json) = post_json(
        &app.router,
        &uri,
        serde_json::json!({ "content": "fn main() {}" }),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "conflict");
}

#[tokio::test]
async fn grade_submission_and_list_by_assignment() {
    let app = setup_test_app().await;
    let (lesson_id, student_id) = seed_lesson_and_student(&app.router).await;
    let assignment_id = created_id(
        &app.router,
        "/api/assignments",
        serde_json::json!({ "title": "Exercise", "maxScore": 100, "lessonId": lesson_id }),
    )
    .await;

    let submission_id = created_id(
        &app.router,
        &format!("/api/submissions/submit?assignmentId={assignment_id}&studentId={student_id}"),
        serde_json::json!({ "content": "fn main() {}" }),
    )
    .await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::put(format!("/api/submissions/{submission_id}"))
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_vec(&serde_json::json!({
                        "score": 95,
                        "feedback": "Nice work"
                    }))
                    .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["score"], 95);
    assert_eq!(json["feedback"], "Nice work");

    let response = app
        .router
        .clone()
        .oneshot(
            Request::get(format!("/api/submissions/assignment/{assignment_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["id"], submission_id);

    let response = app
        .router
        .oneshot(
            Request::get(format!("/api/submissions/student/{student_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json[0]["student"]["id"], student_id);
}
