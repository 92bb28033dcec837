use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::content::ModuleRef;
use crate::error::AppError;
use crate::user::UserRef;

/// How a question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    SingleChoice,
    MultipleChoice,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::SingleChoice => "single_choice",
            QuestionType::MultipleChoice => "multiple_choice",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single_choice" => Ok(QuestionType::SingleChoice),
            "multiple_choice" => Ok(QuestionType::MultipleChoice),
            _ => Err(format!("Unknown question type: {}", s)),
        }
    }
}

/// A quiz attached to a module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    pub id: i64,
    pub title: String,
    /// Time allowed in minutes; `None` means untimed.
    pub time_limit: Option<i32>,
    pub module: ModuleRef,
    pub questions: Vec<Question>,
}

/// Shallow quiz summary embedded in questions and submissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizRef {
    pub id: i64,
    pub title: String,
}

/// Input for creating a quiz.
#[derive(Debug, Clone)]
pub struct NewQuiz {
    pub title: String,
    pub time_limit: Option<i32>,
    pub module_id: i64,
}

/// Field-wise update of a quiz.
#[derive(Debug, Clone, Default)]
pub struct QuizUpdate {
    pub title: Option<String>,
    pub time_limit: Option<i32>,
    pub module_id: Option<i64>,
}

/// A question belonging to a quiz, with its answer options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub text: String,
    pub question_type: QuestionType,
    pub quiz: QuizRef,
    pub options: Vec<AnswerOption>,
}

/// Input for creating a question together with its options.
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub text: String,
    pub question_type: QuestionType,
    pub quiz_id: i64,
    pub options: Vec<NewAnswerOption>,
}

/// Field-wise update of a question.
#[derive(Debug, Clone, Default)]
pub struct QuestionUpdate {
    pub text: Option<String>,
    pub question_type: Option<QuestionType>,
    pub quiz_id: Option<i64>,
}

/// One selectable answer for a question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: i64,
    pub text: String,
    pub is_correct: bool,
    pub question_id: i64,
}

/// Input for creating an answer option.
#[derive(Debug, Clone)]
pub struct NewAnswerOption {
    pub text: String,
    pub is_correct: bool,
}

/// Field-wise update of an answer option.
#[derive(Debug, Clone, Default)]
pub struct AnswerOptionUpdate {
    pub text: Option<String>,
    pub is_correct: Option<bool>,
    pub question_id: Option<i64>,
}

/// A recorded quiz attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSubmission {
    pub id: i64,
    pub score: i32,
    pub taken_at: DateTime<Utc>,
    pub quiz: QuizRef,
    pub student: UserRef,
}

/// Field-wise update of a quiz submission.
#[derive(Debug, Clone, Default)]
pub struct QuizSubmissionUpdate {
    pub score: Option<i32>,
    pub quiz_id: Option<i64>,
    pub student_id: Option<i64>,
}

/// Grades a quiz attempt: one point per question whose selected option is
/// correct. `answers` maps question id to the chosen option id; unanswered
/// questions score nothing. An option id that does not belong to the
/// question is an error.
pub fn score_answers(
    questions: &[Question],
    answers: &HashMap<i64, i64>,
) -> Result<i32, AppError> {
    let mut score = 0;
    for question in questions {
        let Some(&option_id) = answers.get(&question.id) else {
            continue;
        };
        let selected = question
            .options
            .iter()
            .find(|option| option.id == option_id)
            .ok_or_else(|| AppError::not_found("AnswerOption", option_id))?;
        if selected.is_correct {
            score += 1;
        }
    }
    Ok(score)
}
