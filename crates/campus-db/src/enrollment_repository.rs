use campus_core::course::CourseRef;
use campus_core::enrollment::{Enrollment, EnrollmentStatus};
use campus_core::error::AppError;
use campus_core::user::UserRef;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Pool, Postgres};
use tracing::{info, warn};

use crate::lookups::{course_ref, db_err, unique_conflict, user_ref};

/// Repository for course enrollments; one row per user and course.
#[derive(Clone)]
pub struct EnrollmentRepository {
    pool: Pool<Postgres>,
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct EnrollmentRow {
    id: i64,
    enroll_date: DateTime<Utc>,
    status: String,
    user_id: i64,
    user_name: String,
    course_id: i64,
    course_title: String,
}

impl From<EnrollmentRow> for Enrollment {
    fn from(row: EnrollmentRow) -> Self {
        Enrollment {
            id: row.id,
            user: UserRef {
                id: row.user_id,
                name: row.user_name,
            },
            course: CourseRef {
                id: row.course_id,
                title: row.course_title,
            },
            enroll_date: row.enroll_date,
            status: row.status.parse().unwrap_or(EnrollmentStatus::Active),
        }
    }
}

impl EnrollmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn enroll(&self, user_id: i64, course_id: i64) -> Result<Enrollment, AppError> {
        let user = user_ref(&self.pool, user_id).await?;
        let course = course_ref(&self.pool, course_id).await?;

        let (already,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM enrollments WHERE user_id = $1 AND course_id = $2)",
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;
        if already {
            warn!(
                "User already enrolled in course: userId={}, courseId={}",
                user_id, course_id
            );
            return Err(AppError::Conflict(format!(
                "User already enrolled in course: userId={}, courseId={}",
                user_id, course_id
            )));
        }

        let (id, enroll_date): (i64, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO enrollments (user_id, course_id, status)
            VALUES ($1, $2, 'active')
            RETURNING id, enroll_date
            "#,
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            unique_conflict(
                e,
                &format!(
                    "User already enrolled in course: userId={}, courseId={}",
                    user_id, course_id
                ),
            )
        })?;

        info!(
            "Enrolled user in course: userId={}, courseId={}",
            user_id, course_id
        );
        Ok(Enrollment {
            id,
            user,
            course,
            enroll_date,
            status: EnrollmentStatus::Active,
        })
    }

    pub async fn unenroll(&self, user_id: i64, course_id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM enrollments WHERE user_id = $1 AND course_id = $2")
            .bind(user_id)
            .bind(course_id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if result.rows_affected() == 0 {
            warn!(
                "User not enrolled in course: userId={}, courseId={}",
                user_id, course_id
            );
            return Err(AppError::Conflict(format!(
                "User not enrolled in course: userId={}, courseId={}",
                user_id, course_id
            )));
        }
        info!(
            "Unenrolled user from course: userId={}, courseId={}",
            user_id, course_id
        );
        Ok(())
    }

    pub async fn get(&self, id: i64) -> Result<Option<Enrollment>, AppError> {
        let row = sqlx::query_as::<_, EnrollmentRow>(
            r#"
            SELECT e.id, e.enroll_date, e.status,
                   u.id AS user_id, u.name AS user_name,
                   c.id AS course_id, c.title AS course_title
            FROM enrollments e
            JOIN users u ON u.id = e.user_id
            JOIN courses c ON c.id = e.course_id
            WHERE e.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.map(Into::into))
    }

    pub async fn list(&self) -> Result<Vec<Enrollment>, AppError> {
        let rows = sqlx::query_as::<_, EnrollmentRow>(
            r#"
            SELECT e.id, e.enroll_date, e.status,
                   u.id AS user_id, u.name AS user_name,
                   c.id AS course_id, c.title AS course_title
            FROM enrollments e
            JOIN users u ON u.id = e.user_id
            JOIN courses c ON c.id = e.course_id
            ORDER BY e.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
