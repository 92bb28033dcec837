use campus_core::AppError;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::assessment_repository::{AssignmentRepository, SubmissionRepository};
use crate::catalog_repository::{CategoryRepository, TagRepository};
use crate::config::DatabaseConfig;
use crate::content_repository::{LessonRepository, ModuleRepository};
use crate::course_repository::CourseRepository;
use crate::enrollment_repository::EnrollmentRepository;
use crate::question_repository::{AnswerOptionRepository, QuestionRepository};
use crate::quiz_repository::{QuizRepository, QuizSubmissionRepository};
use crate::review_repository::ReviewRepository;
use crate::user_repository::{ProfileRepository, UserRepository};

/// Owns the connection pool, runs migrations, and vends one repository
/// per domain area.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Open a PostgreSQL pool with the given settings.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect: {e}")))?;

        Ok(Self { pool })
    }

    /// Wrap an already-connected pool; integration tests use this.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply any migrations not yet recorded in the target database.
    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Migration failed: {e}")))?;
        Ok(())
    }

    /// Cheap connectivity probe for the health endpoint.
    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.pool.clone())
    }

    pub fn profiles(&self) -> ProfileRepository {
        ProfileRepository::new(self.pool.clone())
    }

    pub fn categories(&self) -> CategoryRepository {
        CategoryRepository::new(self.pool.clone())
    }

    pub fn tags(&self) -> TagRepository {
        TagRepository::new(self.pool.clone())
    }

    pub fn courses(&self) -> CourseRepository {
        CourseRepository::new(self.pool.clone())
    }

    pub fn enrollments(&self) -> EnrollmentRepository {
        EnrollmentRepository::new(self.pool.clone())
    }

    pub fn reviews(&self) -> ReviewRepository {
        ReviewRepository::new(self.pool.clone())
    }

    pub fn modules(&self) -> ModuleRepository {
        ModuleRepository::new(self.pool.clone())
    }

    pub fn lessons(&self) -> LessonRepository {
        LessonRepository::new(self.pool.clone())
    }

    pub fn assignments(&self) -> AssignmentRepository {
        AssignmentRepository::new(self.pool.clone())
    }

    pub fn submissions(&self) -> SubmissionRepository {
        SubmissionRepository::new(self.pool.clone())
    }

    pub fn quizzes(&self) -> QuizRepository {
        QuizRepository::new(self.pool.clone())
    }

    pub fn questions(&self) -> QuestionRepository {
        QuestionRepository::new(self.pool.clone())
    }

    pub fn answer_options(&self) -> AnswerOptionRepository {
        AnswerOptionRepository::new(self.pool.clone())
    }

    pub fn quiz_submissions(&self) -> QuizSubmissionRepository {
        QuizSubmissionRepository::new(self.pool.clone())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
