use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};

use campus_core::error::AppError;

use crate::dto::enrollments::{EnrollParams, EnrollmentResponse};
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/enrollments/enroll", post(enroll))
        .route("/api/enrollments/unenroll", post(unenroll))
        .route("/api/enrollments", get(list_enrollments))
        .route("/api/enrollments/{id}", get(get_enrollment))
}

#[utoipa::path(
    post,
    path = "/api/enrollments/enroll",
    params(EnrollParams),
    responses(
        (status = 200, description = "Enrollment created", body = EnrollmentResponse),
        (status = 404, description = "User or course not found", body = crate::dto::ErrorResponse),
        (status = 409, description = "Already enrolled", body = crate::dto::ErrorResponse),
    ),
    tag = "enrollments"
)]
pub async fn enroll(
    State(state): State<Arc<AppState>>,
    Query(params): Query<EnrollParams>,
) -> Result<impl IntoResponse, ApiError> {
    let enrollment = state
        .db
        .enrollments()
        .enroll(params.user_id, params.course_id)
        .await?;
    Ok(axum::Json(EnrollmentResponse::from(enrollment)))
}

#[utoipa::path(
    post,
    path = "/api/enrollments/unenroll",
    params(EnrollParams),
    responses(
        (status = 204, description = "Enrollment removed"),
        (status = 404, description = "User or course not found", body = crate::dto::ErrorResponse),
        (status = 409, description = "Not enrolled", body = crate::dto::ErrorResponse),
    ),
    tag = "enrollments"
)]
pub async fn unenroll(
    State(state): State<Arc<AppState>>,
    Query(params): Query<EnrollParams>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .db
        .enrollments()
        .unenroll(params.user_id, params.course_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/enrollments",
    responses(
        (status = 200, description = "All enrollments", body = [EnrollmentResponse]),
    ),
    tag = "enrollments"
)]
pub async fn list_enrollments(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let enrollments = state.db.enrollments().list().await?;
    let response: Vec<EnrollmentResponse> = enrollments.into_iter().map(Into::into).collect();
    Ok(axum::Json(response))
}

#[utoipa::path(
    get,
    path = "/api/enrollments/{id}",
    params(
        ("id" = i64, Path, description = "Enrollment ID")
    ),
    responses(
        (status = 200, description = "Enrollment details", body = EnrollmentResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "enrollments"
)]
pub async fn get_enrollment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let enrollment = state
        .db
        .enrollments()
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("Enrollment", id))?;
    Ok(axum::Json(EnrollmentResponse::from(enrollment)))
}
