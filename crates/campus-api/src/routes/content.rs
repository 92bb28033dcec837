use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post, put};

use campus_core::error::AppError;

use crate::dto::content::{
    LessonRequest, LessonResponse, LessonUpdateRequest, ModuleRequest, ModuleResponse,
    ModuleUpdateRequest,
};
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/modules", post(create_module))
        .route("/api/modules", get(list_modules))
        .route("/api/modules/{id}", get(get_module))
        .route("/api/modules/{id}", put(update_module))
        .route("/api/modules/{id}", delete(delete_module))
        .route("/api/lessons", post(create_lesson))
        .route("/api/lessons", get(list_lessons))
        .route("/api/lessons/{id}", get(get_lesson))
        .route("/api/lessons/{id}", put(update_lesson))
        .route("/api/lessons/{id}", delete(delete_lesson))
}

// ---------------------------------------------------------------------------
// Modules
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/api/modules",
    request_body = ModuleRequest,
    responses(
        (status = 200, description = "Module created", body = ModuleResponse),
        (status = 400, description = "Invalid request", body = crate::dto::ErrorResponse),
        (status = 404, description = "Course not found", body = crate::dto::ErrorResponse),
    ),
    tag = "modules"
)]
pub async fn create_module(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<ModuleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let new_module = body.validate()?;
    let module = state.db.modules().create(&new_module).await?;
    Ok(axum::Json(ModuleResponse::from(module)))
}

#[utoipa::path(
    get,
    path = "/api/modules",
    responses(
        (status = 200, description = "All modules", body = [ModuleResponse]),
    ),
    tag = "modules"
)]
pub async fn list_modules(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let modules = state.db.modules().list().await?;
    let response: Vec<ModuleResponse> = modules.into_iter().map(Into::into).collect();
    Ok(axum::Json(response))
}

#[utoipa::path(
    get,
    path = "/api/modules/{id}",
    params(
        ("id" = i64, Path, description = "Module ID")
    ),
    responses(
        (status = 200, description = "Module details", body = ModuleResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "modules"
)]
pub async fn get_module(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let module = state
        .db
        .modules()
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("Module", id))?;
    Ok(axum::Json(ModuleResponse::from(module)))
}

#[utoipa::path(
    put,
    path = "/api/modules/{id}",
    params(
        ("id" = i64, Path, description = "Module ID")
    ),
    request_body = ModuleUpdateRequest,
    responses(
        (status = 200, description = "Updated module", body = ModuleResponse),
        (status = 400, description = "Invalid request", body = crate::dto::ErrorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "modules"
)]
pub async fn update_module(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    axum::Json(body): axum::Json<ModuleUpdateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let changes = body.validate()?;
    let module = state.db.modules().update(id, &changes).await?;
    Ok(axum::Json(ModuleResponse::from(module)))
}

#[utoipa::path(
    delete,
    path = "/api/modules/{id}",
    params(
        ("id" = i64, Path, description = "Module ID")
    ),
    responses(
        (status = 204, description = "Module deleted"),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "modules"
)]
pub async fn delete_module(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.modules().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Lessons
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/api/lessons",
    request_body = LessonRequest,
    responses(
        (status = 200, description = "Lesson created", body = LessonResponse),
        (status = 400, description = "Invalid request", body = crate::dto::ErrorResponse),
        (status = 404, description = "Module not found", body = crate::dto::ErrorResponse),
    ),
    tag = "lessons"
)]
pub async fn create_lesson(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<LessonRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let new_lesson = body.validate()?;
    let lesson = state.db.lessons().create(&new_lesson).await?;
    Ok(axum::Json(LessonResponse::from(lesson)))
}

#[utoipa::path(
    get,
    path = "/api/lessons",
    responses(
        (status = 200, description = "All lessons", body = [LessonResponse]),
    ),
    tag = "lessons"
)]
pub async fn list_lessons(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let lessons = state.db.lessons().list().await?;
    let response: Vec<LessonResponse> = lessons.into_iter().map(Into::into).collect();
    Ok(axum::Json(response))
}

#[utoipa::path(
    get,
    path = "/api/lessons/{id}",
    params(
        ("id" = i64, Path, description = "Lesson ID")
    ),
    responses(
        (status = 200, description = "Lesson details", body = LessonResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "lessons"
)]
pub async fn get_lesson(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let lesson = state
        .db
        .lessons()
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("Lesson", id))?;
    Ok(axum::Json(LessonResponse::from(lesson)))
}

#[utoipa::path(
    put,
    path = "/api/lessons/{id}",
    params(
        ("id" = i64, Path, description = "Lesson ID")
    ),
    request_body = LessonUpdateRequest,
    responses(
        (status = 200, description = "Updated lesson", body = LessonResponse),
        (status = 400, description = "Invalid request", body = crate::dto::ErrorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "lessons"
)]
pub async fn update_lesson(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    axum::Json(body): axum::Json<LessonUpdateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let changes = body.validate()?;
    let lesson = state.db.lessons().update(id, &changes).await?;
    Ok(axum::Json(LessonResponse::from(lesson)))
}

#[utoipa::path(
    delete,
    path = "/api/lessons/{id}",
    params(
        ("id" = i64, Path, description = "Lesson ID")
    ),
    responses(
        (status = 204, description = "Lesson deleted"),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "lessons"
)]
pub async fn delete_lesson(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.lessons().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
