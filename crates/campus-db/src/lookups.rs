//! Shared row lookups used across repositories, plus sqlx error mapping.

use campus_core::assessment::AssignmentRef;
use campus_core::catalog::CategoryRef;
use campus_core::content::{LessonRef, ModuleRef};
use campus_core::course::CourseRef;
use campus_core::error::AppError;
use campus_core::quiz::QuizRef;
use campus_core::user::{Role, UserRef};
use sqlx::PgPool;

pub(crate) fn db_err(e: sqlx::Error) -> AppError {
    AppError::Database(e.to_string())
}

/// Maps a unique-constraint violation to a conflict. Duplicates are checked
/// up front; this catches the race between check and insert.
pub(crate) fn unique_conflict(e: sqlx::Error, message: &str) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict(message.to_string())
        }
        _ => db_err(e),
    }
}

/// Maps a foreign-key violation to a conflict; used on deletes where other
/// rows may still reference the target.
pub(crate) fn fk_conflict(e: sqlx::Error, message: &str) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            AppError::Conflict(message.to_string())
        }
        _ => db_err(e),
    }
}

pub(crate) async fn user_ref(pool: &PgPool, id: i64) -> Result<UserRef, AppError> {
    let row: Option<(i64, String)> = sqlx::query_as("SELECT id, name FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(db_err)?;
    row.map(|(id, name)| UserRef { id, name })
        .ok_or_else(|| AppError::not_found("User", id))
}

/// Resolves a user and requires the `teacher` role.
pub(crate) async fn teacher_ref(pool: &PgPool, id: i64) -> Result<UserRef, AppError> {
    let row: Option<(i64, String, String)> =
        sqlx::query_as("SELECT id, name, role FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(db_err)?;
    let (id, name, role) = row.ok_or_else(|| AppError::not_found("User", id))?;
    if role.parse::<Role>().ok() != Some(Role::Teacher) {
        return Err(AppError::Validation(
            "Only users with the teacher role can lead courses".into(),
        ));
    }
    Ok(UserRef { id, name })
}

pub(crate) async fn category_ref(pool: &PgPool, id: i64) -> Result<CategoryRef, AppError> {
    let row: Option<(i64, String)> = sqlx::query_as("SELECT id, name FROM categories WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(db_err)?;
    row.map(|(id, name)| CategoryRef { id, name })
        .ok_or_else(|| AppError::not_found("Category", id))
}

pub(crate) async fn course_ref(pool: &PgPool, id: i64) -> Result<CourseRef, AppError> {
    let row: Option<(i64, String)> = sqlx::query_as("SELECT id, title FROM courses WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(db_err)?;
    row.map(|(id, title)| CourseRef { id, title })
        .ok_or_else(|| AppError::not_found("Course", id))
}

pub(crate) async fn module_ref(pool: &PgPool, id: i64) -> Result<ModuleRef, AppError> {
    let row: Option<(i64, String)> = sqlx::query_as("SELECT id, title FROM modules WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(db_err)?;
    row.map(|(id, title)| ModuleRef { id, title })
        .ok_or_else(|| AppError::not_found("Module", id))
}

pub(crate) async fn lesson_ref(pool: &PgPool, id: i64) -> Result<LessonRef, AppError> {
    let row: Option<(i64, String)> = sqlx::query_as("SELECT id, title FROM lessons WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(db_err)?;
    row.map(|(id, title)| LessonRef { id, title })
        .ok_or_else(|| AppError::not_found("Lesson", id))
}

pub(crate) async fn assignment_ref(pool: &PgPool, id: i64) -> Result<AssignmentRef, AppError> {
    let row: Option<(i64, String)> =
        sqlx::query_as("SELECT id, title FROM assignments WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(db_err)?;
    row.map(|(id, title)| AssignmentRef { id, title })
        .ok_or_else(|| AppError::not_found("Assignment", id))
}

pub(crate) async fn quiz_ref(pool: &PgPool, id: i64) -> Result<QuizRef, AppError> {
    let row: Option<(i64, String)> = sqlx::query_as("SELECT id, title FROM quizzes WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(db_err)?;
    row.map(|(id, title)| QuizRef { id, title })
        .ok_or_else(|| AppError::not_found("Quiz", id))
}

pub(crate) async fn question_exists(pool: &PgPool, id: i64) -> Result<(), AppError> {
    let (exists,): (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM questions WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
            .map_err(db_err)?;
    if exists {
        Ok(())
    } else {
        Err(AppError::not_found("Question", id))
    }
}
