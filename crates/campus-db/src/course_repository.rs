use campus_core::catalog::CategoryRef;
use campus_core::course::{Course, CourseUpdate, NewCourse};
use campus_core::error::AppError;
use campus_core::user::{Role, User, UserRef};
use chrono::NaiveDate;
use sqlx::{PgPool, Pool, Postgres};
use tracing::info;

use crate::lookups::{category_ref, db_err, teacher_ref, user_ref};

/// Repository for courses. Creation and reassignment enforce that the
/// referenced user holds the teacher role.
#[derive(Clone)]
pub struct CourseRepository {
    pool: Pool<Postgres>,
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct CourseRow {
    id: i64,
    title: String,
    description: Option<String>,
    start_date: Option<NaiveDate>,
    duration: Option<i32>,
    teacher_id: i64,
    teacher_name: String,
    category_id: i64,
    category_name: String,
}

impl From<CourseRow> for Course {
    fn from(row: CourseRow) -> Self {
        Course {
            id: row.id,
            title: row.title,
            description: row.description,
            teacher: UserRef {
                id: row.teacher_id,
                name: row.teacher_name,
            },
            category: CategoryRef {
                id: row.category_id,
                name: row.category_name,
            },
            start_date: row.start_date,
            duration: row.duration,
        }
    }
}

impl CourseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: &NewCourse) -> Result<Course, AppError> {
        let teacher = teacher_ref(&self.pool, new.teacher_id).await?;
        let category = category_ref(&self.pool, new.category_id).await?;

        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO courses (title, description, teacher_id, category_id, start_date, duration)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&new.title)
        .bind(&new.description)
        .bind(new.teacher_id)
        .bind(new.category_id)
        .bind(new.start_date)
        .bind(new.duration)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        info!("Created Course: ID={}", id);
        Ok(Course {
            id,
            title: new.title.clone(),
            description: new.description.clone(),
            teacher,
            category,
            start_date: new.start_date,
            duration: new.duration,
        })
    }

    pub async fn get(&self, id: i64) -> Result<Option<Course>, AppError> {
        let row = sqlx::query_as::<_, CourseRow>(
            r#"
            SELECT c.id, c.title, c.description, c.start_date, c.duration,
                   u.id AS teacher_id, u.name AS teacher_name,
                   cat.id AS category_id, cat.name AS category_name
            FROM courses c
            JOIN users u ON u.id = c.teacher_id
            JOIN categories cat ON cat.id = c.category_id
            WHERE c.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.map(Into::into))
    }

    pub async fn list(&self) -> Result<Vec<Course>, AppError> {
        let rows = sqlx::query_as::<_, CourseRow>(
            r#"
            SELECT c.id, c.title, c.description, c.start_date, c.duration,
                   u.id AS teacher_id, u.name AS teacher_name,
                   cat.id AS category_id, cat.name AS category_name
            FROM courses c
            JOIN users u ON u.id = c.teacher_id
            JOIN categories cat ON cat.id = c.category_id
            ORDER BY c.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Courses the given user is enrolled in.
    pub async fn list_by_student(&self, user_id: i64) -> Result<Vec<Course>, AppError> {
        user_ref(&self.pool, user_id).await?;

        let rows = sqlx::query_as::<_, CourseRow>(
            r#"
            SELECT c.id, c.title, c.description, c.start_date, c.duration,
                   u.id AS teacher_id, u.name AS teacher_name,
                   cat.id AS category_id, cat.name AS category_name
            FROM enrollments e
            JOIN courses c ON c.id = e.course_id
            JOIN users u ON u.id = c.teacher_id
            JOIN categories cat ON cat.id = c.category_id
            WHERE e.user_id = $1
            ORDER BY c.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Users enrolled in the given course.
    pub async fn enrolled_students(&self, course_id: i64) -> Result<Vec<User>, AppError> {
        crate::lookups::course_ref(&self.pool, course_id).await?;

        let rows: Vec<(i64, String, String, String)> = sqlx::query_as(
            r#"
            SELECT u.id, u.name, u.email, u.role
            FROM enrollments e
            JOIN users u ON u.id = e.user_id
            WHERE e.course_id = $1
            ORDER BY u.id
            "#,
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|(id, name, email, role)| User {
                id,
                name,
                email,
                role: role.parse().unwrap_or(Role::Student),
            })
            .collect())
    }

    pub async fn update(&self, id: i64, changes: &CourseUpdate) -> Result<Course, AppError> {
        let mut current = self
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("Course", id))?;

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
        if let Some(teacher_id) = changes.teacher_id {
            if teacher_id != current.teacher.id {
                current.teacher = teacher_ref(&self.pool, teacher_id).await?;
                changed = true;
            }
        }
        if let Some(category_id) = changes.category_id {
            if category_id != current.category.id {
                current.category = category_ref(&self.pool, category_id).await?;
                changed = true;
            }
        }
        if let Some(start_date) = changes.start_date {
            if current.start_date != Some(start_date) {
                current.start_date = Some(start_date);
                changed = true;
            }
        }
        if let Some(duration) = changes.duration {
            if current.duration != Some(duration) {
                current.duration = Some(duration);
                changed = true;
            }
        }

        if !changed {
            info!("No changes detected for Course: ID={}", id);
            return Ok(current);
        }

        sqlx::query(
            r#"
            UPDATE courses
            SET title = $1, description = $2, teacher_id = $3, category_id = $4,
                start_date = $5, duration = $6
            WHERE id = $7
            "#,
        )
        .bind(&current.title)
        .bind(&current.description)
        .bind(current.teacher.id)
        .bind(current.category.id)
        .bind(current.start_date)
        .bind(current.duration)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        info!("Updated Course: ID={}", id);
        Ok(current)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Course", id));
        }
        info!("Deleted Course: ID={}", id);
        Ok(())
    }
}
