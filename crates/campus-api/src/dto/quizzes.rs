use campus_core::error::AppError;
use campus_core::quiz::{
    AnswerOption, AnswerOptionUpdate, NewAnswerOption, NewQuestion, NewQuiz, Question,
    QuestionType, QuestionUpdate, Quiz, QuizSubmission, QuizSubmissionUpdate, QuizUpdate,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ModuleInfo, QuizInfo, UserInfo};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizRequest {
    pub title: String,
    /// Time allowed in minutes; omit for an untimed quiz.
    pub time_limit: Option<i32>,
    pub module_id: i64,
}

impl QuizRequest {
    pub fn validate(&self) -> Result<NewQuiz, AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::Validation("title must not be empty".into()));
        }
        Ok(NewQuiz {
            title: self.title.clone(),
            time_limit: self.time_limit,
            module_id: self.module_id,
        })
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizUpdateRequest {
    pub title: Option<String>,
    pub time_limit: Option<i32>,
    pub module_id: Option<i64>,
}

impl QuizUpdateRequest {
    pub fn validate(&self) -> Result<QuizUpdate, AppError> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(AppError::Validation("title must not be empty".into()));
            }
        }
        Ok(QuizUpdate {
            title: self.title.clone(),
            time_limit: self.time_limit,
            module_id: self.module_id,
        })
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizResponse {
    pub id: i64,
    pub title: String,
    pub time_limit: Option<i32>,
    pub module: ModuleInfo,
    pub questions: Vec<QuestionResponse>,
}

impl From<Quiz> for QuizResponse {
    fn from(quiz: Quiz) -> Self {
        Self {
            id: quiz.id,
            title: quiz.title,
            time_limit: quiz.time_limit,
            module: quiz.module.into(),
            questions: quiz.questions.into_iter().map(Into::into).collect(),
        }
    }
}

/// Option payload nested inside a question create request.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOptionRequest {
    pub text: String,
    pub is_correct: bool,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRequest {
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: String,
    pub quiz_id: i64,
    #[serde(default)]
    pub options: Vec<QuestionOptionRequest>,
}

impl QuestionRequest {
    pub fn validate(&self) -> Result<NewQuestion, AppError> {
        if self.text.trim().is_empty() {
            return Err(AppError::Validation("text must not be empty".into()));
        }
        let question_type: QuestionType = self
            .question_type
            .parse()
            .map_err(AppError::Validation)?;
        Ok(NewQuestion {
            text: self.text.clone(),
            question_type,
            quiz_id: self.quiz_id,
            options: self
                .options
                .iter()
                .map(|option| NewAnswerOption {
                    text: option.text.clone(),
                    is_correct: option.is_correct,
                })
                .collect(),
        })
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionUpdateRequest {
    pub text: Option<String>,
    #[serde(rename = "type")]
    pub question_type: Option<String>,
    pub quiz_id: Option<i64>,
}

impl QuestionUpdateRequest {
    pub fn validate(&self) -> Result<QuestionUpdate, AppError> {
        let question_type = match &self.question_type {
            Some(raw) => Some(raw.parse::<QuestionType>().map_err(AppError::Validation)?),
            None => None,
        };
        Ok(QuestionUpdate {
            text: self.text.clone(),
            question_type,
            quiz_id: self.quiz_id,
        })
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    pub id: i64,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: String,
    pub quiz: QuizInfo,
    pub options: Vec<AnswerOptionResponse>,
}

impl From<Question> for QuestionResponse {
    fn from(question: Question) -> Self {
        Self {
            id: question.id,
            text: question.text,
            question_type: question.question_type.to_string(),
            quiz: question.quiz.into(),
            options: question.options.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOptionRequest {
    pub text: String,
    pub is_correct: bool,
    pub question_id: i64,
}

impl AnswerOptionRequest {
    pub fn validate(&self) -> Result<NewAnswerOption, AppError> {
        if self.text.trim().is_empty() {
            return Err(AppError::Validation("text must not be empty".into()));
        }
        Ok(NewAnswerOption {
            text: self.text.clone(),
            is_correct: self.is_correct,
        })
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOptionUpdateRequest {
    pub text: Option<String>,
    pub is_correct: Option<bool>,
    pub question_id: Option<i64>,
}

impl AnswerOptionUpdateRequest {
    pub fn validate(&self) -> Result<AnswerOptionUpdate, AppError> {
        if let Some(text) = &self.text {
            if text.trim().is_empty() {
                return Err(AppError::Validation("text must not be empty".into()));
            }
        }
        Ok(AnswerOptionUpdate {
            text: self.text.clone(),
            is_correct: self.is_correct,
            question_id: self.question_id,
        })
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOptionResponse {
    pub id: i64,
    pub text: String,
    pub is_correct: bool,
    pub question_id: i64,
}

impl From<AnswerOption> for AnswerOptionResponse {
    fn from(option: AnswerOption) -> Self {
        Self {
            id: option.id,
            text: option.text,
            is_correct: option.is_correct,
            question_id: option.question_id,
        }
    }
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TakeQuizParams {
    pub student_id: i64,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SubmitQuizParams {
    pub quiz_id: i64,
    pub student_id: i64,
    pub score: i32,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizSubmissionRequest {
    pub score: i32,
    pub quiz_id: i64,
    pub student_id: i64,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizSubmissionUpdateRequest {
    pub score: Option<i32>,
    pub quiz_id: Option<i64>,
    pub student_id: Option<i64>,
}

impl QuizSubmissionUpdateRequest {
    pub fn validate(&self) -> Result<QuizSubmissionUpdate, AppError> {
        Ok(QuizSubmissionUpdate {
            score: self.score,
            quiz_id: self.quiz_id,
            student_id: self.student_id,
        })
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizSubmissionResponse {
    pub id: i64,
    pub score: i32,
    pub taken_at: DateTime<Utc>,
    pub quiz: QuizInfo,
    pub student: UserInfo,
}

impl From<QuizSubmission> for QuizSubmissionResponse {
    fn from(submission: QuizSubmission) -> Self {
        Self {
            id: submission.id,
            score: submission.score,
            taken_at: submission.taken_at,
            quiz: submission.quiz.into(),
            student: submission.student.into(),
        }
    }
}
