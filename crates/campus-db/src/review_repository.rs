use campus_core::course::CourseRef;
use campus_core::error::AppError;
use campus_core::review::{CourseReview, NewReview, ReviewUpdate};
use campus_core::user::UserRef;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Pool, Postgres};
use tracing::info;

use crate::lookups::{course_ref, db_err, user_ref};

/// Repository for course reviews.
#[derive(Clone)]
pub struct ReviewRepository {
    pool: Pool<Postgres>,
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct ReviewRow {
    id: i64,
    rating: i32,
    comment: Option<String>,
    created_at: DateTime<Utc>,
    course_id: i64,
    course_title: String,
    student_id: i64,
    student_name: String,
}

impl From<ReviewRow> for CourseReview {
    fn from(row: ReviewRow) -> Self {
        CourseReview {
            id: row.id,
            rating: row.rating,
            comment: row.comment,
            created_at: row.created_at,
            course: CourseRef {
                id: row.course_id,
                title: row.course_title,
            },
            student: UserRef {
                id: row.student_id,
                name: row.student_name,
            },
        }
    }
}

impl ReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: &NewReview) -> Result<CourseReview, AppError> {
        let course = course_ref(&self.pool, new.course_id).await?;
        let student = user_ref(&self.pool, new.student_id).await?;

        let (id, created_at): (i64, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO course_reviews (rating, comment, course_id, student_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, created_at
            "#,
        )
        .bind(new.rating)
        .bind(&new.comment)
        .bind(new.course_id)
        .bind(new.student_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        info!("Created CourseReview: ID={}", id);
        Ok(CourseReview {
            id,
            rating: new.rating,
            comment: new.comment.clone(),
            created_at,
            course,
            student,
        })
    }

    pub async fn get(&self, id: i64) -> Result<Option<CourseReview>, AppError> {
        let row = sqlx::query_as::<_, ReviewRow>(
            r#"
            SELECT r.id, r.rating, r.comment, r.created_at,
                   c.id AS course_id, c.title AS course_title,
                   u.id AS student_id, u.name AS student_name
            FROM course_reviews r
            JOIN courses c ON c.id = r.course_id
            JOIN users u ON u.id = r.student_id
            WHERE r.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.map(Into::into))
    }

    pub async fn list(&self) -> Result<Vec<CourseReview>, AppError> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            r#"
            SELECT r.id, r.rating, r.comment, r.created_at,
                   c.id AS course_id, c.title AS course_title,
                   u.id AS student_id, u.name AS student_name
            FROM course_reviews r
            JOIN courses c ON c.id = r.course_id
            JOIN users u ON u.id = r.student_id
            ORDER BY r.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn update(&self, id: i64, changes: &ReviewUpdate) -> Result<CourseReview, AppError> {
        let mut current = self
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("CourseReview", id))?;

        let mut changed = false;
        if let Some(rating) = changes.rating {
            if rating != current.rating {
                current.rating = rating;
                changed = true;
            }
        }
        if let Some(comment) = &changes.comment {
            if current.comment.as_deref() != Some(comment) {
                current.comment = Some(comment.clone());
                changed = true;
            }
        }
        if let Some(course_id) = changes.course_id {
            if course_id != current.course.id {
                current.course = course_ref(&self.pool, course_id).await?;
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
            info!("No changes detected for CourseReview: ID={}", id);
            return Ok(current);
        }

        sqlx::query(
            r#"
            UPDATE course_reviews
            SET rating = $1, comment = $2, course_id = $3, student_id = $4
            WHERE id = $5
            "#,
        )
        .bind(current.rating)
        .bind(&current.comment)
        .bind(current.course.id)
        .bind(current.student.id)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        info!("Updated CourseReview: ID={}", id);
        Ok(current)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM course_reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("CourseReview", id));
        }
        info!("Deleted CourseReview: ID={}", id);
        Ok(())
    }
}
