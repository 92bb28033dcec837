use campus_core::assessment::{
    Assignment, AssignmentUpdate, NewAssignment, NewSubmission, Submission, SubmissionUpdate,
};
use campus_core::error::AppError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{AssignmentInfo, LessonInfo, UserInfo};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRequest {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub max_score: Option<i32>,
    pub lesson_id: i64,
}

impl AssignmentRequest {
    pub fn validate(&self) -> Result<NewAssignment, AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::Validation("title must not be empty".into()));
        }
        Ok(NewAssignment {
            title: self.title.clone(),
            description: self.description.clone(),
            due_date: self.due_date,
            max_score: self.max_score,
            lesson_id: self.lesson_id,
        })
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentUpdateRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub max_score: Option<i32>,
    pub lesson_id: Option<i64>,
}

impl AssignmentUpdateRequest {
    pub fn validate(&self) -> Result<AssignmentUpdate, AppError> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(AppError::Validation("title must not be empty".into()));
            }
        }
        Ok(AssignmentUpdate {
            title: self.title.clone(),
            description: self.description.clone(),
            due_date: self.due_date,
            max_score: self.max_score,
            lesson_id: self.lesson_id,
        })
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub max_score: Option<i32>,
    pub lesson: LessonInfo,
}

impl From<Assignment> for AssignmentResponse {
    fn from(assignment: Assignment) -> Self {
        Self {
            id: assignment.id,
            title: assignment.title,
            description: assignment.description,
            due_date: assignment.due_date,
            max_score: assignment.max_score,
            lesson: assignment.lesson.into(),
        }
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    pub content: Option<String>,
    pub score: Option<i32>,
    pub feedback: Option<String>,
    pub assignment_id: i64,
    pub student_id: i64,
}

impl SubmissionRequest {
    pub fn validate(&self) -> Result<NewSubmission, AppError> {
        let content = match &self.content {
            Some(content) if !content.trim().is_empty() => content.clone(),
            _ => return Err(AppError::Validation("Content is required".into())),
        };
        Ok(NewSubmission {
            content,
            score: self.score,
            feedback: self.feedback.clone(),
            assignment_id: self.assignment_id,
            student_id: self.student_id,
        })
    }
}

/// Body for the student-facing submit endpoint; the assignment and
/// student come from query parameters instead.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionContentRequest {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SubmitParams {
    pub assignment_id: i64,
    pub student_id: i64,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionUpdateRequest {
    pub content: Option<String>,
    pub score: Option<i32>,
    pub feedback: Option<String>,
    pub assignment_id: Option<i64>,
    pub student_id: Option<i64>,
}

impl SubmissionUpdateRequest {
    pub fn validate(&self) -> Result<SubmissionUpdate, AppError> {
        Ok(SubmissionUpdate {
            content: self.content.clone(),
            score: self.score,
            feedback: self.feedback.clone(),
            assignment_id: self.assignment_id,
            student_id: self.student_id,
        })
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub id: i64,
    pub content: String,
    pub submitted_at: DateTime<Utc>,
    pub score: Option<i32>,
    pub feedback: Option<String>,
    pub assignment: AssignmentInfo,
    pub student: UserInfo,
}

impl From<Submission> for SubmissionResponse {
    fn from(submission: Submission) -> Self {
        Self {
            id: submission.id,
            content: submission.content,
            submitted_at: submission.submitted_at,
            score: submission.score,
            feedback: submission.feedback,
            assignment: submission.assignment.into(),
            student: submission.student.into(),
        }
    }
}
