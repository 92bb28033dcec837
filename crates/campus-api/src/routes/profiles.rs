use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};

use campus_core::error::AppError;

use crate::dto::profiles::{ProfileRequest, ProfileResponse, ProfileUpdateRequest};
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/profiles", post(create_profile))
        .route("/api/profiles/{id}", get(get_profile))
        .route("/api/profiles/{id}", put(update_profile))
}

#[utoipa::path(
    post,
    path = "/api/profiles",
    request_body = ProfileRequest,
    responses(
        (status = 200, description = "Profile created", body = ProfileResponse),
        (status = 404, description = "User not found", body = crate::dto::ErrorResponse),
        (status = 409, description = "User already has a profile", body = crate::dto::ErrorResponse),
    ),
    tag = "profiles"
)]
pub async fn create_profile(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<ProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let new_profile = body.validate()?;
    let profile = state.db.profiles().create(&new_profile).await?;
    Ok(axum::Json(ProfileResponse::from(profile)))
}

#[utoipa::path(
    get,
    path = "/api/profiles/{id}",
    params(
        ("id" = i64, Path, description = "Profile ID")
    ),
    responses(
        (status = 200, description = "Profile details", body = ProfileResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "profiles"
)]
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state
        .db
        .profiles()
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("Profile", id))?;
    Ok(axum::Json(ProfileResponse::from(profile)))
}

#[utoipa::path(
    put,
    path = "/api/profiles/{id}",
    params(
        ("id" = i64, Path, description = "Profile ID")
    ),
    request_body = ProfileUpdateRequest,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "profiles"
)]
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    axum::Json(body): axum::Json<ProfileUpdateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let changes = body.into_changes();
    let profile = state.db.profiles().update(id, &changes).await?;
    Ok(axum::Json(ProfileResponse::from(profile)))
}
