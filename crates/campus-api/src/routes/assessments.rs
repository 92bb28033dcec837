use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post, put};

use campus_core::error::AppError;

use crate::dto::assessments::{
    AssignmentRequest, AssignmentResponse, AssignmentUpdateRequest, SubmissionContentRequest,
    SubmissionRequest, SubmissionResponse, SubmissionUpdateRequest, SubmitParams,
};
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/assignments", post(create_assignment))
        .route("/api/assignments", get(list_assignments))
        .route("/api/assignments/{id}", get(get_assignment))
        .route("/api/assignments/{id}", put(update_assignment))
        .route("/api/assignments/{id}", delete(delete_assignment))
        .route("/api/submissions", post(create_submission))
        .route("/api/submissions/submit", post(submit_assignment))
        .route(
            "/api/submissions/assignment/{assignment_id}",
            get(submissions_by_assignment),
        )
        .route(
            "/api/submissions/student/{student_id}",
            get(submissions_by_student),
        )
        .route("/api/submissions", get(list_submissions))
        .route("/api/submissions/{id}", get(get_submission))
        .route("/api/submissions/{id}", put(update_submission))
        .route("/api/submissions/{id}", delete(delete_submission))
}

// ---------------------------------------------------------------------------
// Assignments
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/api/assignments",
    request_body = AssignmentRequest,
    responses(
        (status = 200, description = "Assignment created", body = AssignmentResponse),
        (status = 400, description = "Invalid request", body = crate::dto::ErrorResponse),
        (status = 404, description = "Lesson not found", body = crate::dto::ErrorResponse),
    ),
    tag = "assignments"
)]
pub async fn create_assignment(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<AssignmentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let new_assignment = body.validate()?;
    let assignment = state.db.assignments().create(&new_assignment).await?;
    Ok(axum::Json(AssignmentResponse::from(assignment)))
}

#[utoipa::path(
    get,
    path = "/api/assignments",
    responses(
        (status = 200, description = "All assignments", body = [AssignmentResponse]),
    ),
    tag = "assignments"
)]
pub async fn list_assignments(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let assignments = state.db.assignments().list().await?;
    let response: Vec<AssignmentResponse> = assignments.into_iter().map(Into::into).collect();
    Ok(axum::Json(response))
}

#[utoipa::path(
    get,
    path = "/api/assignments/{id}",
    params(
        ("id" = i64, Path, description = "Assignment ID")
    ),
    responses(
        (status = 200, description = "Assignment details", body = AssignmentResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "assignments"
)]
pub async fn get_assignment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let assignment = state
        .db
        .assignments()
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("Assignment", id))?;
    Ok(axum::Json(AssignmentResponse::from(assignment)))
}

#[utoipa::path(
    put,
    path = "/api/assignments/{id}",
    params(
        ("id" = i64, Path, description = "Assignment ID")
    ),
    request_body = AssignmentUpdateRequest,
    responses(
        (status = 200, description = "Updated assignment", body = AssignmentResponse),
        (status = 400, description = "Invalid request", body = crate::dto::ErrorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "assignments"
)]
pub async fn update_assignment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    axum::Json(body): axum::Json<AssignmentUpdateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let changes = body.validate()?;
    let assignment = state.db.assignments().update(id, &changes).await?;
    Ok(axum::Json(AssignmentResponse::from(assignment)))
}

#[utoipa::path(
    delete,
    path = "/api/assignments/{id}",
    params(
        ("id" = i64, Path, description = "Assignment ID")
    ),
    responses(
        (status = 204, description = "Assignment deleted"),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "assignments"
)]
pub async fn delete_assignment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.assignments().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Submissions
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/api/submissions",
    request_body = SubmissionRequest,
    responses(
        (status = 200, description = "Submission created", body = SubmissionResponse),
        (status = 404, description = "Assignment or student not found", body = crate::dto::ErrorResponse),
        (status = 409, description = "Already submitted", body = crate::dto::ErrorResponse),
    ),
    tag = "submissions"
)]
pub async fn create_submission(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<SubmissionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let new_submission = body.validate()?;
    let submission = state.db.submissions().create(&new_submission).await?;
    Ok(axum::Json(SubmissionResponse::from(submission)))
}

#[utoipa::path(
    post,
    path = "/api/submissions/submit",
    params(SubmitParams),
    request_body = SubmissionContentRequest,
    responses(
        (status = 200, description = "Submission recorded", body = SubmissionResponse),
        (status = 404, description = "Assignment or student not found", body = crate::dto::ErrorResponse),
        (status = 409, description = "Already submitted", body = crate::dto::ErrorResponse),
    ),
    tag = "submissions"
)]
pub async fn submit_assignment(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SubmitParams>,
    axum::Json(body): axum::Json<SubmissionContentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let content = body
        .content
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Content is required".into()))?;
    let new_submission = campus_core::assessment::NewSubmission {
        content,
        score: None,
        feedback: None,
        assignment_id: params.assignment_id,
        student_id: params.student_id,
    };
    let submission = state.db.submissions().create(&new_submission).await?;
    Ok(axum::Json(SubmissionResponse::from(submission)))
}

#[utoipa::path(
    get,
    path = "/api/submissions/assignment/{assignment_id}",
    params(
        ("assignment_id" = i64, Path, description = "Assignment ID")
    ),
    responses(
        (status = 200, description = "Submissions for the assignment", body = [SubmissionResponse]),
        (status = 404, description = "Assignment not found", body = crate::dto::ErrorResponse),
    ),
    tag = "submissions"
)]
pub async fn submissions_by_assignment(
    State(state): State<Arc<AppState>>,
    Path(assignment_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let submissions = state.db.submissions().list_by_assignment(assignment_id).await?;
    let response: Vec<SubmissionResponse> = submissions.into_iter().map(Into::into).collect();
    Ok(axum::Json(response))
}

#[utoipa::path(
    get,
    path = "/api/submissions/student/{student_id}",
    params(
        ("student_id" = i64, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Submissions by the student", body = [SubmissionResponse]),
        (status = 404, description = "Student not found", body = crate::dto::ErrorResponse),
    ),
    tag = "submissions"
)]
pub async fn submissions_by_student(
    State(state): State<Arc<AppState>>,
    Path(student_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let submissions = state.db.submissions().list_by_student(student_id).await?;
    let response: Vec<SubmissionResponse> = submissions.into_iter().map(Into::into).collect();
    Ok(axum::Json(response))
}

#[utoipa::path(
    get,
    path = "/api/submissions",
    responses(
        (status = 200, description = "All submissions", body = [SubmissionResponse]),
    ),
    tag = "submissions"
)]
pub async fn list_submissions(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let submissions = state.db.submissions().list().await?;
    let response: Vec<SubmissionResponse> = submissions.into_iter().map(Into::into).collect();
    Ok(axum::Json(response))
}

#[utoipa::path(
    get,
    path = "/api/submissions/{id}",
    params(
        ("id" = i64, Path, description = "Submission ID")
    ),
    responses(
        (status = 200, description = "Submission details", body = SubmissionResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "submissions"
)]
pub async fn get_submission(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let submission = state
        .db
        .submissions()
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("Submission", id))?;
    Ok(axum::Json(SubmissionResponse::from(submission)))
}

#[utoipa::path(
    put,
    path = "/api/submissions/{id}",
    params(
        ("id" = i64, Path, description = "Submission ID")
    ),
    request_body = SubmissionUpdateRequest,
    responses(
        (status = 200, description = "Updated submission", body = SubmissionResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "submissions"
)]
pub async fn update_submission(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    axum::Json(body): axum::Json<SubmissionUpdateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let changes = body.validate()?;
    let submission = state.db.submissions().update(id, &changes).await?;
    Ok(axum::Json(SubmissionResponse::from(submission)))
}

#[utoipa::path(
    delete,
    path = "/api/submissions/{id}",
    params(
        ("id" = i64, Path, description = "Submission ID")
    ),
    responses(
        (status = 204, description = "Submission deleted"),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "submissions"
)]
pub async fn delete_submission(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.submissions().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
