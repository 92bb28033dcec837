use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::dto::HealthResponse;
use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod assessments;
pub mod catalog;
pub mod content;
pub mod courses;
pub mod enrollments;
pub mod profiles;
pub mod quiz_submissions;
pub mod quizzes;
pub mod reviews;
pub mod users;

/// Build the full router with all resource routes and the docs UI.
pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .merge(users::routes())
        .merge(profiles::routes())
        .merge(catalog::routes())
        .merge(courses::routes())
        .merge(enrollments::routes())
        .merge(reviews::routes())
        .merge(content::routes())
        .merge(assessments::routes())
        .merge(quizzes::routes())
        .merge(quiz_submissions::routes());

    Router::new()
        .route("/health", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api)
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.db.ping().await {
        Ok(()) => (
            StatusCode::OK,
            axum::Json(HealthResponse {
                status: "healthy",
                database: "ok",
            }),
        ),
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            axum::Json(HealthResponse {
                status: "unhealthy",
                database: "error",
            }),
        ),
    }
}
