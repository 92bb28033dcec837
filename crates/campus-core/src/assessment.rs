use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::content::LessonRef;
use crate::user::UserRef;

/// A graded task attached to a lesson.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub max_score: Option<i32>,
    pub lesson: LessonRef,
}

/// Shallow assignment summary embedded in submissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentRef {
    pub id: i64,
    pub title: String,
}

/// Input for creating an assignment.
#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub max_score: Option<i32>,
    pub lesson_id: i64,
}

/// Field-wise update of an assignment.
#[derive(Debug, Clone, Default)]
pub struct AssignmentUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub max_score: Option<i32>,
    pub lesson_id: Option<i64>,
}

/// A student's answer to an assignment; at most one per student and
/// assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub content: String,
    pub submitted_at: DateTime<Utc>,
    pub score: Option<i32>,
    pub feedback: Option<String>,
    pub assignment: AssignmentRef,
    pub student: UserRef,
}

/// Input for creating a submission.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub content: String,
    pub score: Option<i32>,
    pub feedback: Option<String>,
    pub assignment_id: i64,
    pub student_id: i64,
}

/// Field-wise update of a submission.
#[derive(Debug, Clone, Default)]
pub struct SubmissionUpdate {
    pub content: Option<String>,
    pub score: Option<i32>,
    pub feedback: Option<String>,
    pub assignment_id: Option<i64>,
    pub student_id: Option<i64>,
}
