use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post, put};

use campus_core::error::AppError;

use crate::dto::quizzes::{
    AnswerOptionRequest, AnswerOptionResponse, AnswerOptionUpdateRequest, QuestionRequest,
    QuestionResponse, QuestionUpdateRequest, QuizRequest, QuizResponse, QuizSubmissionResponse,
    QuizUpdateRequest, TakeQuizParams,
};
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/quizzes", post(create_quiz))
        .route("/api/quizzes", get(list_quizzes))
        .route("/api/quizzes/{id}", get(get_quiz))
        .route("/api/quizzes/{id}", put(update_quiz))
        .route("/api/quizzes/{id}", delete(delete_quiz))
        .route("/api/quizzes/{quiz_id}/take", post(take_quiz))
        .route("/api/questions", post(create_question))
        .route("/api/questions", get(list_questions))
        .route("/api/questions/{id}", get(get_question))
        .route("/api/questions/{id}", put(update_question))
        .route("/api/questions/{id}", delete(delete_question))
        .route("/api/answer-options", post(create_answer_option))
        .route("/api/answer-options", get(list_answer_options))
        .route("/api/answer-options/{id}", get(get_answer_option))
        .route("/api/answer-options/{id}", put(update_answer_option))
        .route("/api/answer-options/{id}", delete(delete_answer_option))
}

// ---------------------------------------------------------------------------
// Quizzes
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/api/quizzes",
    request_body = QuizRequest,
    responses(
        (status = 200, description = "Quiz created", body = QuizResponse),
        (status = 400, description = "Invalid request", body = crate::dto::ErrorResponse),
        (status = 404, description = "Module not found", body = crate::dto::ErrorResponse),
    ),
    tag = "quizzes"
)]
pub async fn create_quiz(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<QuizRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let new_quiz = body.validate()?;
    let quiz = state.db.quizzes().create(&new_quiz).await?;
    Ok(axum::Json(QuizResponse::from(quiz)))
}

#[utoipa::path(
    post,
    path = "/api/quizzes/{quiz_id}/take",
    params(
        ("quiz_id" = i64, Path, description = "Quiz ID"),
        TakeQuizParams,
    ),
    request_body(content = HashMap<i64, i64>, description = "Question id mapped to the selected answer option id"),
    responses(
        (status = 200, description = "Graded attempt", body = QuizSubmissionResponse),
        (status = 400, description = "Empty answers", body = crate::dto::ErrorResponse),
        (status = 404, description = "Quiz, student or option not found", body = crate::dto::ErrorResponse),
        (status = 409, description = "Quiz has no questions", body = crate::dto::ErrorResponse),
    ),
    tag = "quizzes"
)]
pub async fn take_quiz(
    State(state): State<Arc<AppState>>,
    Path(quiz_id): Path<i64>,
    Query(params): Query<TakeQuizParams>,
    axum::Json(answers): axum::Json<HashMap<i64, i64>>,
) -> Result<impl IntoResponse, ApiError> {
    if answers.is_empty() {
        return Err(AppError::Validation("Answers cannot be empty".into()).into());
    }
    let submission = state
        .db
        .quizzes()
        .take(quiz_id, params.student_id, &answers)
        .await?;
    Ok(axum::Json(QuizSubmissionResponse::from(submission)))
}

#[utoipa::path(
    get,
    path = "/api/quizzes",
    responses(
        (status = 200, description = "All quizzes", body = [QuizResponse]),
    ),
    tag = "quizzes"
)]
pub async fn list_quizzes(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let quizzes = state.db.quizzes().list().await?;
    let response: Vec<QuizResponse> = quizzes.into_iter().map(Into::into).collect();
    Ok(axum::Json(response))
}

#[utoipa::path(
    get,
    path = "/api/quizzes/{id}",
    params(
        ("id" = i64, Path, description = "Quiz ID")
    ),
    responses(
        (status = 200, description = "Quiz with its questions", body = QuizResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "quizzes"
)]
pub async fn get_quiz(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let quiz = state
        .db
        .quizzes()
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("Quiz", id))?;
    Ok(axum::Json(QuizResponse::from(quiz)))
}

#[utoipa::path(
    put,
    path = "/api/quizzes/{id}",
    params(
        ("id" = i64, Path, description = "Quiz ID")
    ),
    request_body = QuizUpdateRequest,
    responses(
        (status = 200, description = "Updated quiz", body = QuizResponse),
        (status = 400, description = "Invalid request", body = crate::dto::ErrorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "quizzes"
)]
pub async fn update_quiz(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    axum::Json(body): axum::Json<QuizUpdateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let changes = body.validate()?;
    let quiz = state.db.quizzes().update(id, &changes).await?;
    Ok(axum::Json(QuizResponse::from(quiz)))
}

#[utoipa::path(
    delete,
    path = "/api/quizzes/{id}",
    params(
        ("id" = i64, Path, description = "Quiz ID")
    ),
    responses(
        (status = 204, description = "Quiz deleted"),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "quizzes"
)]
pub async fn delete_quiz(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.quizzes().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Questions
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/api/questions",
    request_body = QuestionRequest,
    responses(
        (status = 200, description = "Question created with its options", body = QuestionResponse),
        (status = 400, description = "Invalid request", body = crate::dto::ErrorResponse),
        (status = 404, description = "Quiz not found", body = crate::dto::ErrorResponse),
    ),
    tag = "questions"
)]
pub async fn create_question(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<QuestionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let new_question = body.validate()?;
    let question = state.db.questions().create(&new_question).await?;
    Ok(axum::Json(QuestionResponse::from(question)))
}

#[utoipa::path(
    get,
    path = "/api/questions",
    responses(
        (status = 200, description = "All questions", body = [QuestionResponse]),
    ),
    tag = "questions"
)]
pub async fn list_questions(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let questions = state.db.questions().list().await?;
    let response: Vec<QuestionResponse> = questions.into_iter().map(Into::into).collect();
    Ok(axum::Json(response))
}

#[utoipa::path(
    get,
    path = "/api/questions/{id}",
    params(
        ("id" = i64, Path, description = "Question ID")
    ),
    responses(
        (status = 200, description = "Question with its options", body = QuestionResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "questions"
)]
pub async fn get_question(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let question = state
        .db
        .questions()
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("Question", id))?;
    Ok(axum::Json(QuestionResponse::from(question)))
}

#[utoipa::path(
    put,
    path = "/api/questions/{id}",
    params(
        ("id" = i64, Path, description = "Question ID")
    ),
    request_body = QuestionUpdateRequest,
    responses(
        (status = 200, description = "Updated question", body = QuestionResponse),
        (status = 400, description = "Invalid request", body = crate::dto::ErrorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "questions"
)]
pub async fn update_question(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    axum::Json(body): axum::Json<QuestionUpdateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let changes = body.validate()?;
    let question = state.db.questions().update(id, &changes).await?;
    Ok(axum::Json(QuestionResponse::from(question)))
}

#[utoipa::path(
    delete,
    path = "/api/questions/{id}",
    params(
        ("id" = i64, Path, description = "Question ID")
    ),
    responses(
        (status = 204, description = "Question deleted"),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "questions"
)]
pub async fn delete_question(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.questions().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Answer options
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/api/answer-options",
    request_body = AnswerOptionRequest,
    responses(
        (status = 200, description = "Answer option created", body = AnswerOptionResponse),
        (status = 400, description = "Invalid request", body = crate::dto::ErrorResponse),
        (status = 404, description = "Question not found", body = crate::dto::ErrorResponse),
    ),
    tag = "answer-options"
)]
pub async fn create_answer_option(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<AnswerOptionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let new_option = body.validate()?;
    let option = state
        .db
        .answer_options()
        .create(body.question_id, &new_option)
        .await?;
    Ok(axum::Json(AnswerOptionResponse::from(option)))
}

#[utoipa::path(
    get,
    path = "/api/answer-options",
    responses(
        (status = 200, description = "All answer options", body = [AnswerOptionResponse]),
    ),
    tag = "answer-options"
)]
pub async fn list_answer_options(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let options = state.db.answer_options().list().await?;
    let response: Vec<AnswerOptionResponse> = options.into_iter().map(Into::into).collect();
    Ok(axum::Json(response))
}

#[utoipa::path(
    get,
    path = "/api/answer-options/{id}",
    params(
        ("id" = i64, Path, description = "Answer option ID")
    ),
    responses(
        (status = 200, description = "Answer option details", body = AnswerOptionResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "answer-options"
)]
pub async fn get_answer_option(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let option = state
        .db
        .answer_options()
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("AnswerOption", id))?;
    Ok(axum::Json(AnswerOptionResponse::from(option)))
}

#[utoipa::path(
    put,
    path = "/api/answer-options/{id}",
    params(
        ("id" = i64, Path, description = "Answer option ID")
    ),
    request_body = AnswerOptionUpdateRequest,
    responses(
        (status = 200, description = "Updated answer option", body = AnswerOptionResponse),
        (status = 400, description = "Invalid request", body = crate::dto::ErrorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "answer-options"
)]
pub async fn update_answer_option(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    axum::Json(body): axum::Json<AnswerOptionUpdateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let changes = body.validate()?;
    let option = state.db.answer_options().update(id, &changes).await?;
    Ok(axum::Json(AnswerOptionResponse::from(option)))
}

#[utoipa::path(
    delete,
    path = "/api/answer-options/{id}",
    params(
        ("id" = i64, Path, description = "Answer option ID")
    ),
    responses(
        (status = 204, description = "Answer option deleted"),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "answer-options"
)]
pub async fn delete_answer_option(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.answer_options().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
