use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post, put};

use campus_core::error::AppError;

use crate::dto::courses::{CourseRequest, CourseResponse, CourseUpdateRequest};
use crate::dto::users::UserResponse;
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/courses", post(create_course))
        .route("/api/courses", get(list_courses))
        .route("/api/courses/{id}", get(get_course))
        .route("/api/courses/{id}", put(update_course))
        .route("/api/courses/{id}", delete(delete_course))
        .route("/api/courses/user/{user_id}", get(courses_by_user))
        .route("/api/courses/{course_id}/students", get(course_students))
}

#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CourseRequest,
    responses(
        (status = 200, description = "Course created", body = CourseResponse),
        (status = 400, description = "Invalid request", body = crate::dto::ErrorResponse),
        (status = 404, description = "Teacher or category not found", body = crate::dto::ErrorResponse),
    ),
    tag = "courses"
)]
pub async fn create_course(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<CourseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let new_course = body.validate()?;
    let course = state.db.courses().create(&new_course).await?;
    Ok(axum::Json(CourseResponse::from(course)))
}

#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "All courses", body = [CourseResponse]),
    ),
    tag = "courses"
)]
pub async fn list_courses(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let courses = state.db.courses().list().await?;
    let response: Vec<CourseResponse> = courses.into_iter().map(Into::into).collect();
    Ok(axum::Json(response))
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(
        ("id" = i64, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course details", body = CourseResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "courses"
)]
pub async fn get_course(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let course = state
        .db
        .courses()
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("Course", id))?;
    Ok(axum::Json(CourseResponse::from(course)))
}

#[utoipa::path(
    get,
    path = "/api/courses/user/{user_id}",
    params(
        ("user_id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Courses the user is enrolled in", body = [CourseResponse]),
        (status = 404, description = "User not found", body = crate::dto::ErrorResponse),
    ),
    tag = "courses"
)]
pub async fn courses_by_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let courses = state.db.courses().list_by_student(user_id).await?;
    let response: Vec<CourseResponse> = courses.into_iter().map(Into::into).collect();
    Ok(axum::Json(response))
}

#[utoipa::path(
    get,
    path = "/api/courses/{course_id}/students",
    params(
        ("course_id" = i64, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Students enrolled in the course", body = [UserResponse]),
        (status = 404, description = "Course not found", body = crate::dto::ErrorResponse),
    ),
    tag = "courses"
)]
pub async fn course_students(
    State(state): State<Arc<AppState>>,
    Path(course_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let students = state.db.courses().enrolled_students(course_id).await?;
    let response: Vec<UserResponse> = students.into_iter().map(Into::into).collect();
    Ok(axum::Json(response))
}

#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    params(
        ("id" = i64, Path, description = "Course ID")
    ),
    request_body = CourseUpdateRequest,
    responses(
        (status = 200, description = "Updated course", body = CourseResponse),
        (status = 400, description = "Invalid request", body = crate::dto::ErrorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "courses"
)]
pub async fn update_course(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    axum::Json(body): axum::Json<CourseUpdateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let changes = body.validate()?;
    let course = state.db.courses().update(id, &changes).await?;
    Ok(axum::Json(CourseResponse::from(course)))
}

#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(
        ("id" = i64, Path, description = "Course ID")
    ),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "courses"
)]
pub async fn delete_course(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.courses().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
