use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post, put};

use campus_core::error::AppError;

use crate::dto::reviews::{
    CourseReviewRequest, CourseReviewResponse, CourseReviewUpdateRequest,
};
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/course-reviews", post(create_review))
        .route("/api/course-reviews", get(list_reviews))
        .route("/api/course-reviews/{id}", get(get_review))
        .route(
            "/api/course-reviews/{course_id}/{student_id}",
            post(create_review_for_course),
        )
        .route("/api/course-reviews/{id}", put(update_review))
        .route("/api/course-reviews/{id}", delete(delete_review))
}

#[utoipa::path(
    post,
    path = "/api/course-reviews",
    request_body = CourseReviewRequest,
    responses(
        (status = 200, description = "Review created", body = CourseReviewResponse),
        (status = 400, description = "Invalid request", body = crate::dto::ErrorResponse),
        (status = 404, description = "Course or student not found", body = crate::dto::ErrorResponse),
    ),
    tag = "course-reviews"
)]
pub async fn create_review(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<CourseReviewRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let new_review = body.validate()?;
    let review = state.db.reviews().create(&new_review).await?;
    Ok(axum::Json(CourseReviewResponse::from(review)))
}

#[utoipa::path(
    post,
    path = "/api/course-reviews/{course_id}/{student_id}",
    params(
        ("course_id" = i64, Path, description = "Course ID"),
        ("student_id" = i64, Path, description = "Student ID"),
    ),
    request_body = CourseReviewRequest,
    responses(
        (status = 200, description = "Review created", body = CourseReviewResponse),
        (status = 400, description = "Invalid request", body = crate::dto::ErrorResponse),
        (status = 404, description = "Course or student not found", body = crate::dto::ErrorResponse),
    ),
    tag = "course-reviews"
)]
pub async fn create_review_for_course(
    State(state): State<Arc<AppState>>,
    Path((course_id, student_id)): Path<(i64, i64)>,
    axum::Json(body): axum::Json<CourseReviewRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let new_review = body.validate_for(course_id, student_id)?;
    let review = state.db.reviews().create(&new_review).await?;
    Ok(axum::Json(CourseReviewResponse::from(review)))
}

#[utoipa::path(
    get,
    path = "/api/course-reviews",
    responses(
        (status = 200, description = "All reviews", body = [CourseReviewResponse]),
    ),
    tag = "course-reviews"
)]
pub async fn list_reviews(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let reviews = state.db.reviews().list().await?;
    let response: Vec<CourseReviewResponse> = reviews.into_iter().map(Into::into).collect();
    Ok(axum::Json(response))
}

#[utoipa::path(
    get,
    path = "/api/course-reviews/{id}",
    params(
        ("id" = i64, Path, description = "Review ID")
    ),
    responses(
        (status = 200, description = "Review details", body = CourseReviewResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "course-reviews"
)]
pub async fn get_review(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let review = state
        .db
        .reviews()
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("CourseReview", id))?;
    Ok(axum::Json(CourseReviewResponse::from(review)))
}

#[utoipa::path(
    put,
    path = "/api/course-reviews/{id}",
    params(
        ("id" = i64, Path, description = "Review ID")
    ),
    request_body = CourseReviewUpdateRequest,
    responses(
        (status = 200, description = "Updated review", body = CourseReviewResponse),
        (status = 400, description = "Invalid request", body = crate::dto::ErrorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "course-reviews"
)]
pub async fn update_review(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    axum::Json(body): axum::Json<CourseReviewUpdateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let changes = body.validate()?;
    let review = state.db.reviews().update(id, &changes).await?;
    Ok(axum::Json(CourseReviewResponse::from(review)))
}

#[utoipa::path(
    delete,
    path = "/api/course-reviews/{id}",
    params(
        ("id" = i64, Path, description = "Review ID")
    ),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "course-reviews"
)]
pub async fn delete_review(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.reviews().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
