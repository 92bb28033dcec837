use campus_core::error::AppError;
use campus_core::user::{
    NewProfile, NewUser, Profile, ProfileUpdate, Role, User, UserRef, UserUpdate,
};
use sqlx::{PgPool, Pool, Postgres};
use tracing::{info, warn};

use crate::lookups::{db_err, fk_conflict, unique_conflict, user_ref};

/// Repository for user persistence in PostgreSQL.
#[derive(Clone)]
pub struct UserRepository {
    pool: Pool<Postgres>,
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    role: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            role: row.role.parse().unwrap_or(Role::Student),
        }
    }
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: &NewUser) -> Result<User, AppError> {
        let (taken,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(&new.email)
                .fetch_one(&self.pool)
                .await
                .map_err(db_err)?;
        if taken {
            warn!("User with email {} already exists", new.email);
            return Err(AppError::Conflict(format!(
                "User with email {} already exists",
                new.email
            )));
        }

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (name, email, role)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&new.name)
        .bind(&new.email)
        .bind(new.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            unique_conflict(e, &format!("User with email {} already exists", new.email))
        })?;

        let user = User::from(row);
        info!("Created User: ID={}", user.id);
        Ok(user)
    }

    pub async fn get(&self, id: i64) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(row.map(Into::into))
    }

    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        let rows = sqlx::query_as::<_, UserRow>("SELECT * FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn update(&self, id: i64, changes: &UserUpdate) -> Result<User, AppError> {
        let current = self
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("User", id))?;

        let mut name = current.name.clone();
        let mut email = current.email.clone();
        let mut role = current.role;
        let mut changed = false;

        if let Some(new_name) = &changes.name {
            if *new_name != name {
                name = new_name.clone();
                changed = true;
            }
        }
        if let Some(new_email) = &changes.email {
            if *new_email != email {
                let (taken,): (bool,) = sqlx::query_as(
                    "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 AND id <> $2)",
                )
                .bind(new_email)
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(db_err)?;
                if taken {
                    warn!("User with email {} already exists", new_email);
                    return Err(AppError::Conflict(format!(
                        "User with email {} already exists",
                        new_email
                    )));
                }
                email = new_email.clone();
                changed = true;
            }
        }
        if let Some(new_role) = changes.role {
            if new_role != role {
                role = new_role;
                changed = true;
            }
        }

        if !changed {
            info!("No changes detected for User: ID={}", id);
            return Ok(current);
        }

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET name = $1, email = $2, role = $3
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(&name)
        .bind(&email)
        .bind(role.as_str())
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_conflict(e, &format!("User with email {} already exists", email)))?;

        info!("Updated User: ID={}", id);
        Ok(row.into())
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                fk_conflict(
                    e,
                    &format!("User still referenced by existing courses: ID={}", id),
                )
            })?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("User", id));
        }
        info!("Deleted User: ID={}", id);
        Ok(())
    }
}

/// Repository for profile persistence; one profile per user.
#[derive(Clone)]
pub struct ProfileRepository {
    pool: Pool<Postgres>,
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: i64,
    bio: Option<String>,
    avatar_url: Option<String>,
    contact_info: Option<String>,
    user_id: i64,
    user_name: String,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            id: row.id,
            user: UserRef {
                id: row.user_id,
                name: row.user_name,
            },
            bio: row.bio,
            avatar_url: row.avatar_url,
            contact_info: row.contact_info,
        }
    }
}

impl ProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: &NewProfile) -> Result<Profile, AppError> {
        let user = user_ref(&self.pool, new.user_id).await?;

        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM profiles WHERE user_id = $1)")
                .bind(new.user_id)
                .fetch_one(&self.pool)
                .await
                .map_err(db_err)?;
        if exists {
            warn!("Profile already exists for user: ID={}", new.user_id);
            return Err(AppError::Conflict(format!(
                "Profile already exists for user: ID={}",
                new.user_id
            )));
        }

        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO profiles (user_id, bio, avatar_url, contact_info)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(new.user_id)
        .bind(&new.bio)
        .bind(&new.avatar_url)
        .bind(&new.contact_info)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            unique_conflict(
                e,
                &format!("Profile already exists for user: ID={}", new.user_id),
            )
        })?;

        info!("Created Profile: ID={}", id);
        Ok(Profile {
            id,
            user,
            bio: new.bio.clone(),
            avatar_url: new.avatar_url.clone(),
            contact_info: new.contact_info.clone(),
        })
    }

    pub async fn get(&self, id: i64) -> Result<Option<Profile>, AppError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT p.id, p.bio, p.avatar_url, p.contact_info,
                   u.id AS user_id, u.name AS user_name
            FROM profiles p
            JOIN users u ON u.id = p.user_id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.map(Into::into))
    }

    pub async fn update(&self, id: i64, changes: &ProfileUpdate) -> Result<Profile, AppError> {
        let mut current = self
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("Profile", id))?;

        let mut changed = false;
        if let Some(bio) = &changes.bio {
            if current.bio.as_deref() != Some(bio) {
                current.bio = Some(bio.clone());
                changed = true;
            }
        }
        if let Some(avatar_url) = &changes.avatar_url {
            if current.avatar_url.as_deref() != Some(avatar_url) {
                current.avatar_url = Some(avatar_url.clone());
                changed = true;
            }
        }
        if let Some(contact_info) = &changes.contact_info {
            if current.contact_info.as_deref() != Some(contact_info) {
                current.contact_info = Some(contact_info.clone());
                changed = true;
            }
        }

        if !changed {
            info!("No changes detected for Profile: ID={}", id);
            return Ok(current);
        }

        sqlx::query(
            r#"
            UPDATE profiles
            SET bio = $1, avatar_url = $2, contact_info = $3
            WHERE id = $4
            "#,
        )
        .bind(&current.bio)
        .bind(&current.avatar_url)
        .bind(&current.contact_info)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        info!("Updated Profile: ID={}", id);
        Ok(current)
    }
}
