use campus_core::catalog::{Category, Tag};
use campus_core::error::AppError;
use sqlx::{PgPool, Pool, Postgres};
use tracing::{info, warn};

use crate::lookups::{db_err, fk_conflict, unique_conflict};

/// Repository for course categories.
#[derive(Clone)]
pub struct CategoryRepository {
    pool: Pool<Postgres>,
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
        }
    }
}

impl CategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, name: &str) -> Result<Category, AppError> {
        let (taken,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM categories WHERE name = $1)")
                .bind(name)
                .fetch_one(&self.pool)
                .await
                .map_err(db_err)?;
        if taken {
            warn!("Category with name '{}' already exists", name);
            return Err(AppError::Conflict(format!(
                "Category with name '{}' already exists",
                name
            )));
        }

        let row = sqlx::query_as::<_, CategoryRow>(
            "INSERT INTO categories (name) VALUES ($1) RETURNING *",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            unique_conflict(e, &format!("Category with name '{}' already exists", name))
        })?;

        let category = Category::from(row);
        info!("Created Category: ID={}", category.id);
        Ok(category)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Category>, AppError> {
        let row = sqlx::query_as::<_, CategoryRow>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(row.map(Into::into))
    }

    pub async fn list(&self) -> Result<Vec<Category>, AppError> {
        let rows = sqlx::query_as::<_, CategoryRow>("SELECT * FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn update(&self, id: i64, name: &str) -> Result<Category, AppError> {
        let current = self
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("Category", id))?;

        if current.name == name {
            info!("No changes detected for Category: ID={}", id);
            return Ok(current);
        }

        let (taken,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM categories WHERE name = $1 AND id <> $2)")
                .bind(name)
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(db_err)?;
        if taken {
            warn!("Category with name '{}' already exists", name);
            return Err(AppError::Conflict(format!(
                "Category with name '{}' already exists",
                name
            )));
        }

        let row = sqlx::query_as::<_, CategoryRow>(
            "UPDATE categories SET name = $1 WHERE id = $2 RETURNING *",
        )
        .bind(name)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            unique_conflict(e, &format!("Category with name '{}' already exists", name))
        })?;

        info!("Updated Category: ID={}", id);
        Ok(row.into())
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                fk_conflict(
                    e,
                    &format!("Category still referenced by existing courses: ID={}", id),
                )
            })?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Category", id));
        }
        info!("Deleted Category: ID={}", id);
        Ok(())
    }
}

/// Repository for tags. Tags are standalone labels; nothing references them.
#[derive(Clone)]
pub struct TagRepository {
    pool: Pool<Postgres>,
}

#[derive(sqlx::FromRow)]
struct TagRow {
    id: i64,
    name: String,
}

impl From<TagRow> for Tag {
    fn from(row: TagRow) -> Self {
        Tag {
            id: row.id,
            name: row.name,
        }
    }
}

impl TagRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, name: &str) -> Result<Tag, AppError> {
        let (taken,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM tags WHERE name = $1)")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;
        if taken {
            warn!("Tag with name '{}' already exists", name);
            return Err(AppError::Conflict(format!(
                "Tag with name '{}' already exists",
                name
            )));
        }

        let row = sqlx::query_as::<_, TagRow>("INSERT INTO tags (name) VALUES ($1) RETURNING *")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| unique_conflict(e, &format!("Tag with name '{}' already exists", name)))?;

        let tag = Tag::from(row);
        info!("Created Tag: ID={}", tag.id);
        Ok(tag)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Tag>, AppError> {
        let row = sqlx::query_as::<_, TagRow>("SELECT * FROM tags WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(row.map(Into::into))
    }

    pub async fn list(&self) -> Result<Vec<Tag>, AppError> {
        let rows = sqlx::query_as::<_, TagRow>("SELECT * FROM tags ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn update(&self, id: i64, name: &str) -> Result<Tag, AppError> {
        let current = self
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("Tag", id))?;

        if current.name == name {
            info!("No changes detected for Tag: ID={}", id);
            return Ok(current);
        }

        let (taken,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM tags WHERE name = $1 AND id <> $2)")
                .bind(name)
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(db_err)?;
        if taken {
            warn!("Tag with name '{}' already exists", name);
            return Err(AppError::Conflict(format!(
                "Tag with name '{}' already exists",
                name
            )));
        }

        let row =
            sqlx::query_as::<_, TagRow>("UPDATE tags SET name = $1 WHERE id = $2 RETURNING *")
                .bind(name)
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    unique_conflict(e, &format!("Tag with name '{}' already exists", name))
                })?;

        info!("Updated Tag: ID={}", id);
        Ok(row.into())
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Tag", id));
        }
        info!("Deleted Tag: ID={}", id);
        Ok(())
    }
}
