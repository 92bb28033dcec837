use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post, put};

use campus_core::error::AppError;

use crate::dto::quizzes::{
    QuizSubmissionRequest, QuizSubmissionResponse, QuizSubmissionUpdateRequest, SubmitQuizParams,
};
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/quiz-submissions/submit", post(submit_quiz))
        .route("/api/quiz-submissions", post(create_quiz_submission))
        .route("/api/quiz-submissions", get(list_quiz_submissions))
        .route("/api/quiz-submissions/{id}", get(get_quiz_submission))
        .route(
            "/api/quiz-submissions/student/{student_id}",
            get(quiz_submissions_by_student),
        )
        .route(
            "/api/quiz-submissions/module/{module_id}",
            get(quiz_submissions_by_module),
        )
        .route(
            "/api/quiz-submissions/course/{course_id}",
            get(quiz_submissions_by_course),
        )
        .route("/api/quiz-submissions/{id}", put(update_quiz_submission))
        .route("/api/quiz-submissions/{id}", delete(delete_quiz_submission))
}

#[utoipa::path(
    post,
    path = "/api/quiz-submissions/submit",
    params(SubmitQuizParams),
    responses(
        (status = 200, description = "Attempt recorded", body = QuizSubmissionResponse),
        (status = 404, description = "Quiz or student not found", body = crate::dto::ErrorResponse),
    ),
    tag = "quiz-submissions"
)]
pub async fn submit_quiz(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SubmitQuizParams>,
) -> Result<impl IntoResponse, ApiError> {
    let submission = state
        .db
        .quiz_submissions()
        .create(params.quiz_id, params.student_id, params.score)
        .await?;
    Ok(axum::Json(QuizSubmissionResponse::from(submission)))
}

#[utoipa::path(
    post,
    path = "/api/quiz-submissions",
    request_body = QuizSubmissionRequest,
    responses(
        (status = 200, description = "Attempt recorded", body = QuizSubmissionResponse),
        (status = 404, description = "Quiz or student not found", body = crate::dto::ErrorResponse),
    ),
    tag = "quiz-submissions"
)]
pub async fn create_quiz_submission(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<QuizSubmissionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let submission = state
        .db
        .quiz_submissions()
        .create(body.quiz_id, body.student_id, body.score)
        .await?;
    Ok(axum::Json(QuizSubmissionResponse::from(submission)))
}

#[utoipa::path(
    get,
    path = "/api/quiz-submissions",
    responses(
        (status = 200, description = "All quiz submissions", body = [QuizSubmissionResponse]),
    ),
    tag = "quiz-submissions"
)]
pub async fn list_quiz_submissions(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let submissions = state.db.quiz_submissions().list().await?;
    let response: Vec<QuizSubmissionResponse> =
        submissions.into_iter().map(Into::into).collect();
    Ok(axum::Json(response))
}

#[utoipa::path(
    get,
    path = "/api/quiz-submissions/{id}",
    params(
        ("id" = i64, Path, description = "Quiz submission ID")
    ),
    responses(
        (status = 200, description = "Quiz submission details", body = QuizSubmissionResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "quiz-submissions"
)]
pub async fn get_quiz_submission(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let submission = state
        .db
        .quiz_submissions()
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("QuizSubmission", id))?;
    Ok(axum::Json(QuizSubmissionResponse::from(submission)))
}

#[utoipa::path(
    get,
    path = "/api/quiz-submissions/student/{student_id}",
    params(
        ("student_id" = i64, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Attempts by the student", body = [QuizSubmissionResponse]),
        (status = 404, description = "Student not found", body = crate::dto::ErrorResponse),
    ),
    tag = "quiz-submissions"
)]
pub async fn quiz_submissions_by_student(
    State(state): State<Arc<AppState>>,
    Path(student_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let submissions = state.db.quiz_submissions().list_by_student(student_id).await?;
    let response: Vec<QuizSubmissionResponse> =
        submissions.into_iter().map(Into::into).collect();
    Ok(axum::Json(response))
}

#[utoipa::path(
    get,
    path = "/api/quiz-submissions/module/{module_id}",
    params(
        ("module_id" = i64, Path, description = "Module ID")
    ),
    responses(
        (status = 200, description = "Attempts for quizzes in the module", body = [QuizSubmissionResponse]),
        (status = 404, description = "Module not found", body = crate::dto::ErrorResponse),
    ),
    tag = "quiz-submissions"
)]
pub async fn quiz_submissions_by_module(
    State(state): State<Arc<AppState>>,
    Path(module_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let submissions = state.db.quiz_submissions().list_by_module(module_id).await?;
    let response: Vec<QuizSubmissionResponse> =
        submissions.into_iter().map(Into::into).collect();
    Ok(axum::Json(response))
}

#[utoipa::path(
    get,
    path = "/api/quiz-submissions/course/{course_id}",
    params(
        ("course_id" = i64, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Attempts for quizzes in the course", body = [QuizSubmissionResponse]),
        (status = 404, description = "Course not found", body = crate::dto::ErrorResponse),
    ),
    tag = "quiz-submissions"
)]
pub async fn quiz_submissions_by_course(
    State(state): State<Arc<AppState>>,
    Path(course_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let submissions = state.db.quiz_submissions().list_by_course(course_id).await?;
    let response: Vec<QuizSubmissionResponse> =
        submissions.into_iter().map(Into::into).collect();
    Ok(axum::Json(response))
}

#[utoipa::path(
    put,
    path = "/api/quiz-submissions/{id}",
    params(
        ("id" = i64, Path, description = "Quiz submission ID")
    ),
    request_body = QuizSubmissionUpdateRequest,
    responses(
        (status = 200, description = "Updated quiz submission", body = QuizSubmissionResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "quiz-submissions"
)]
pub async fn update_quiz_submission(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    axum::Json(body): axum::Json<QuizSubmissionUpdateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let changes = body.validate()?;
    let submission = state.db.quiz_submissions().update(id, &changes).await?;
    Ok(axum::Json(QuizSubmissionResponse::from(submission)))
}

#[utoipa::path(
    delete,
    path = "/api/quiz-submissions/{id}",
    params(
        ("id" = i64, Path, description = "Quiz submission ID")
    ),
    responses(
        (status = 204, description = "Quiz submission deleted"),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "quiz-submissions"
)]
pub async fn delete_quiz_submission(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.quiz_submissions().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
