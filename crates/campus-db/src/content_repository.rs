use campus_core::content::{Lesson, LessonUpdate, Module, ModuleRef, ModuleUpdate, NewLesson, NewModule};
use campus_core::course::CourseRef;
use campus_core::error::AppError;
use sqlx::{PgPool, Pool, Postgres};
use tracing::info;

use crate::lookups::{course_ref, db_err, module_ref};

/// Repository for course modules.
#[derive(Clone)]
pub struct ModuleRepository {
    pool: Pool<Postgres>,
}

// -- Internal row types for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct ModuleRow {
    id: i64,
    title: String,
    order_index: i32,
    course_id: i64,
    course_title: String,
}

impl From<ModuleRow> for Module {
    fn from(row: ModuleRow) -> Self {
        Module {
            id: row.id,
            title: row.title,
            order_index: row.order_index,
            course: CourseRef {
                id: row.course_id,
                title: row.course_title,
            },
        }
    }
}

impl ModuleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: &NewModule) -> Result<Module, AppError> {
        let course = course_ref(&self.pool, new.course_id).await?;

        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO modules (title, order_index, course_id)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&new.title)
        .bind(new.order_index)
        .bind(new.course_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        info!("Created Module: ID={}", id);
        Ok(Module {
            id,
            title: new.title.clone(),
            order_index: new.order_index,
            course,
        })
    }

    pub async fn get(&self, id: i64) -> Result<Option<Module>, AppError> {
        let row = sqlx::query_as::<_, ModuleRow>(
            r#"
            SELECT m.id, m.title, m.order_index,
                   c.id AS course_id, c.title AS course_title
            FROM modules m
            JOIN courses c ON c.id = m.course_id
            WHERE m.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.map(Into::into))
    }

    pub async fn list(&self) -> Result<Vec<Module>, AppError> {
        let rows = sqlx::query_as::<_, ModuleRow>(
            r#"
            SELECT m.id, m.title, m.order_index,
                   c.id AS course_id, c.title AS course_title
            FROM modules m
            JOIN courses c ON c.id = m.course_id
            ORDER BY m.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn update(&self, id: i64, changes: &ModuleUpdate) -> Result<Module, AppError> {
        let mut current = self
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("Module", id))?;

        let mut changed = false;
        if let Some(title) = &changes.title {
            if *title != current.title {
                current.title = title.clone();
                changed = true;
            }
        }
        if let Some(order_index) = changes.order_index {
            if order_index != current.order_index {
                current.order_index = order_index;
                changed = true;
            }
        }
        if let Some(course_id) = changes.course_id {
            if course_id != current.course.id {
                current.course = course_ref(&self.pool, course_id).await?;
                changed = true;
            }
        }

        if !changed {
            info!("No changes detected for Module: ID={}", id);
            return Ok(current);
        }

        sqlx::query(
            r#"
            UPDATE modules
            SET title = $1, order_index = $2, course_id = $3
            WHERE id = $4
            "#,
        )
        .bind(&current.title)
        .bind(current.order_index)
        .bind(current.course.id)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        info!("Updated Module: ID={}", id);
        Ok(current)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM modules WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Module", id));
        }
        info!("Deleted Module: ID={}", id);
        Ok(())
    }
}

/// Repository for lessons.
#[derive(Clone)]
pub struct LessonRepository {
    pool: Pool<Postgres>,
}

#[derive(sqlx::FromRow)]
struct LessonRow {
    id: i64,
    title: String,
    content: String,
    module_id: i64,
    module_title: String,
}

impl From<LessonRow> for Lesson {
    fn from(row: LessonRow) -> Self {
        Lesson {
            id: row.id,
            title: row.title,
            content: row.content,
            module: ModuleRef {
                id: row.module_id,
                title: row.module_title,
            },
        }
    }
}

impl LessonRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: &NewLesson) -> Result<Lesson, AppError> {
        let module = module_ref(&self.pool, new.module_id).await?;

        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO lessons (title, content, module_id)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&new.title)
        .bind(&new.content)
        .bind(new.module_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        info!("Created Lesson: ID={}", id);
        Ok(Lesson {
            id,
            title: new.title.clone(),
            content: new.content.clone(),
            module,
        })
    }

    pub async fn get(&self, id: i64) -> Result<Option<Lesson>, AppError> {
        let row = sqlx::query_as::<_, LessonRow>(
            r#"
            SELECT l.id, l.title, l.content,
                   m.id AS module_id, m.title AS module_title
            FROM lessons l
            JOIN modules m ON m.id = l.module_id
            WHERE l.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.map(Into::into))
    }

    pub async fn list(&self) -> Result<Vec<Lesson>, AppError> {
        let rows = sqlx::query_as::<_, LessonRow>(
            r#"
            SELECT l.id, l.title, l.content,
                   m.id AS module_id, m.title AS module_title
            FROM lessons l
            JOIN modules m ON m.id = l.module_id
            ORDER BY l.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn update(&self, id: i64, changes: &LessonUpdate) -> Result<Lesson, AppError> {
        let mut current = self
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("Lesson", id))?;

        let mut changed = false;
        if let Some(title) = &changes.title {
            if *title != current.title {
                current.title = title.clone();
                changed = true;
            }
        }
        if let Some(content) = &changes.content {
            if *content != current.content {
                current.content = content.clone();
                changed = true;
            }
        }
        if let Some(module_id) = changes.module_id {
            if module_id != current.module.id {
                current.module = module_ref(&self.pool, module_id).await?;
                changed = true;
            }
        }

        if !changed {
            info!("No changes detected for Lesson: ID={}", id);
            return Ok(current);
        }

        sqlx::query(
            r#"
            UPDATE lessons
            SET title = $1, content = $2, module_id = $3
            WHERE id = $4
            "#,
        )
        .bind(&current.title)
        .bind(&current.content)
        .bind(current.module.id)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        info!("Updated Lesson: ID={}", id);
        Ok(current)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM lessons WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Lesson", id));
        }
        info!("Deleted Lesson: ID={}", id);
        Ok(())
    }
}
