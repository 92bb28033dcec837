use campus_core::assessment::{
    Assignment, AssignmentRef, AssignmentUpdate, NewAssignment, NewSubmission, Submission,
    SubmissionUpdate,
};
use campus_core::content::LessonRef;
use campus_core::error::AppError;
use campus_core::user::UserRef;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgPool, Pool, Postgres};
use tracing::{info, warn};

use crate::lookups::{assignment_ref, db_err, lesson_ref, unique_conflict, user_ref};

/// Repository for assignments.
#[derive(Clone)]
pub struct AssignmentRepository {
    pool: Pool<Postgres>,
}

// -- Internal row types for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct AssignmentRow {
    id: i64,
    title: String,
    description: Option<String>,
    due_date: Option<NaiveDate>,
    max_score: Option<i32>,
    lesson_id: i64,
    lesson_title: String,
}

impl From<AssignmentRow> for Assignment {
    fn from(row: AssignmentRow) -> Self {
        Assignment {
            id: row.id,
            title: row.title,
            description: row.description,
            due_date: row.due_date,
            max_score: row.max_score,
            lesson: LessonRef {
                id: row.lesson_id,
                title: row.lesson_title,
            },
        }
    }
}

impl AssignmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: &NewAssignment) -> Result<Assignment, AppError> {
        let lesson = lesson_ref(&self.pool, new.lesson_id).await?;

        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO assignments (title, description, due_date, max_score, lesson_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&new.title)
        .bind(&new.description)
        .bind(new.due_date)
        .bind(new.max_score)
        .bind(new.lesson_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        info!("Created Assignment: ID={}", id);
        Ok(Assignment {
            id,
            title: new.title.clone(),
            description: new.description.clone(),
            due_date: new.due_date,
            max_score: new.max_score,
            lesson,
        })
    }

    pub async fn get(&self, id: i64) -> Result<Option<Assignment>, AppError> {
        let row = sqlx::query_as::<_, AssignmentRow>(
            r#"
            SELECT a.id, a.title, a.description, a.due_date, a.max_score,
                   l.id AS lesson_id, l.title AS lesson_title
            FROM assignments a
            JOIN lessons l ON l.id = a.lesson_id
            WHERE a.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.map(Into::into))
    }

    pub async fn list(&self) -> Result<Vec<Assignment>, AppError> {
        let rows = sqlx::query_as::<_, AssignmentRow>(
            r#"
            SELECT a.id, a.title, a.description, a.due_date, a.max_score,
                   l.id AS lesson_id, l.title AS lesson_title
            FROM assignments a
            JOIN lessons l ON l.id = a.lesson_id
            ORDER BY a.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn update(&self, id: i64, changes: &AssignmentUpdate) -> Result<Assignment, AppError> {
        let mut current = self
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("Assignment", id))?;

        let mut changed = false;
        if let Some(title) = &changes.title {
            if *title != current.title {
                current.title = title.clone();
                changed = true;
            }
        }
        if let Some(description) = &changes.description {
            if current.description.as_deref() != Some(description) {
                current.description = Some(description.clone());
                changed = true;
            }
        }
        if let Some(due_date) = changes.due_date {
            if current.due_date != Some(due_date) {
                current.due_date = Some(due_date);
                changed = true;
            }
        }
        if let Some(max_score) = changes.max_score {
            if current.max_score != Some(max_score) {
                current.max_score = Some(max_score);
                changed = true;
            }
        }
        if let Some(lesson_id) = changes.lesson_id {
            if lesson_id != current.lesson.id {
                current.lesson = lesson_ref(&self.pool, lesson_id).await?;
                changed = true;
            }
        }

        if !changed {
            info!("No changes detected for Assignment: ID={}", id);
            return Ok(current);
        }

        sqlx::query(
            r#"
            UPDATE assignments
            SET title = $1, description = $2, due_date = $3, max_score = $4, lesson_id = $5
            WHERE id = $6
            "#,
        )
        .bind(&current.title)
        .bind(&current.description)
        .bind(current.due_date)
        .bind(current.max_score)
        .bind(current.lesson.id)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        info!("Updated Assignment: ID={}", id);
        Ok(current)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM assignments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Assignment", id));
        }
        info!("Deleted Assignment: ID={}", id);
        Ok(())
    }
}

/// Repository for assignment submissions; at most one per student and
/// assignment.
#[derive(Clone)]
pub struct SubmissionRepository {
    pool: Pool<Postgres>,
}

#[derive(sqlx::FromRow)]
struct SubmissionRow {
    id: i64,
    content: String,
    submitted_at: DateTime<Utc>,
    score: Option<i32>,
    feedback: Option<String>,
    assignment_id: i64,
    assignment_title: String,
    student_id: i64,
    student_name: String,
}

impl From<SubmissionRow> for Submission {
    fn from(row: SubmissionRow) -> Self {
        Submission {
            id: row.id,
            content: row.content,
            submitted_at: row.submitted_at,
            score: row.score,
            feedback: row.feedback,
            assignment: AssignmentRef {
                id: row.assignment_id,
                title: row.assignment_title,
            },
            student: UserRef {
                id: row.student_id,
                name: row.student_name,
            },
        }
    }
}

impl SubmissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: &NewSubmission) -> Result<Submission, AppError> {
        let assignment = assignment_ref(&self.pool, new.assignment_id).await?;
        let student = user_ref(&self.pool, new.student_id).await?;

        let (already,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM submissions WHERE student_id = $1 AND assignment_id = $2)",
        )
        .bind(new.student_id)
        .bind(new.assignment_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;
        if already {
            warn!(
                "Student has already submitted this assignment: studentId={}, assignmentId={}",
                new.student_id, new.assignment_id
            );
            return Err(AppError::Conflict(format!(
                "Student has already submitted this assignment: studentId={}, assignmentId={}",
                new.student_id, new.assignment_id
            )));
        }

        let (id, submitted_at): (i64, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO submissions (content, score, feedback, assignment_id, student_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, submitted_at
            "#,
        )
        .bind(&new.content)
        .bind(new.score)
        .bind(&new.feedback)
        .bind(new.assignment_id)
        .bind(new.student_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            unique_conflict(
                e,
                &format!(
                    "Student has already submitted this assignment: studentId={}, assignmentId={}",
                    new.student_id, new.assignment_id
                ),
            )
        })?;

        info!("Created Submission: ID={}", id);
        Ok(Submission {
            id,
            content: new.content.clone(),
            submitted_at,
            score: new.score,
            feedback: new.feedback.clone(),
            assignment,
            student,
        })
    }

    pub async fn get(&self, id: i64) -> Result<Option<Submission>, AppError> {
        let row = sqlx::query_as::<_, SubmissionRow>(
            r#"
            SELECT s.id, s.content, s.submitted_at, s.score, s.feedback,
                   a.id AS assignment_id, a.title AS assignment_title,
                   u.id AS student_id, u.name AS student_name
            FROM submissions s
            JOIN assignments a ON a.id = s.assignment_id
            JOIN users u ON u.id = s.student_id
            WHERE s.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.map(Into::into))
    }

    pub async fn list(&self) -> Result<Vec<Submission>, AppError> {
        let rows = sqlx::query_as::<_, SubmissionRow>(
            r#"
            SELECT s.id, s.content, s.submitted_at, s.score, s.feedback,
                   a.id AS assignment_id, a.title AS assignment_title,
                   u.id AS student_id, u.name AS student_name
            FROM submissions s
            JOIN assignments a ON a.id = s.assignment_id
            JOIN users u ON u.id = s.student_id
            ORDER BY s.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn list_by_assignment(&self, assignment_id: i64) -> Result<Vec<Submission>, AppError> {
        assignment_ref(&self.pool, assignment_id).await?;

        let rows = sqlx::query_as::<_, SubmissionRow>(
            r#"
            SELECT s.id, s.content, s.submitted_at, s.score, s.feedback,
                   a.id AS assignment_id, a.title AS assignment_title,
                   u.id AS student_id, u.name AS student_name
            FROM submissions s
            JOIN assignments a ON a.id = s.assignment_id
            JOIN users u ON u.id = s.student_id
            WHERE s.assignment_id = $1
            ORDER BY s.id
            "#,
        )
        .bind(assignment_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn list_by_student(&self, student_id: i64) -> Result<Vec<Submission>, AppError> {
        user_ref(&self.pool, student_id).await?;

        let rows = sqlx::query_as::<_, SubmissionRow>(
            r#"
            SELECT s.id, s.content, s.submitted_at, s.score, s.feedback,
                   a.id AS assignment_id, a.title AS assignment_title,
                   u.id AS student_id, u.name AS student_name
            FROM submissions s
            JOIN assignments a ON a.id = s.assignment_id
            JOIN users u ON u.id = s.student_id
            WHERE s.student_id = $1
            ORDER BY s.id
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn update(&self, id: i64, changes: &SubmissionUpdate) -> Result<Submission, AppError> {
        let mut current = self
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("Submission", id))?;

        let mut changed = false;
        if let Some(content) = &changes.content {
            if *content != current.content {
                current.content = content.clone();
                changed = true;
            }
        }
        if let Some(score) = changes.score {
            if current.score != Some(score) {
                current.score = Some(score);
                changed = true;
            }
        }
        if let Some(feedback) = &changes.feedback {
            if current.feedback.as_deref() != Some(feedback) {
                current.feedback = Some(feedback.clone());
                changed = true;
            }
        }
        if let Some(assignment_id) = changes.assignment_id {
            if assignment_id != current.assignment.id {
                current.assignment = assignment_ref(&self.pool, assignment_id).await?;
                changed = true;
            }
        }
        if let Some(student_id) = changes.student_id {
            if student_id != current.student.id {
                current.student = user_ref(&self.pool, student_id).await?;
                changed = true;
            }
        }

        if !changed {
            info!("No changes detected for Submission: ID={}", id);
            return Ok(current);
        }

        sqlx::query(
            r#"
            UPDATE submissions
            SET content = $1, score = $2, feedback = $3, assignment_id = $4, student_id = $5
            WHERE id = $6
            "#,
        )
        .bind(&current.content)
        .bind(current.score)
        .bind(&current.feedback)
        .bind(current.assignment.id)
        .bind(current.student.id)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            unique_conflict(
                e,
                "Student has already submitted this assignment",
            )
        })?;

        info!("Updated Submission: ID={}", id);
        Ok(current)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM submissions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Submission", id));
        }
        info!("Deleted Submission: ID={}", id);
        Ok(())
    }
}
