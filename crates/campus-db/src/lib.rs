pub mod assessment_repository;
pub mod catalog_repository;
pub mod config;
pub mod content_repository;
pub mod course_repository;
pub mod database;
pub mod enrollment_repository;
mod lookups;
pub mod question_repository;
pub mod quiz_repository;
pub mod review_repository;
pub mod user_repository;

pub use assessment_repository::{AssignmentRepository, SubmissionRepository};
pub use catalog_repository::{CategoryRepository, TagRepository};
pub use config::DatabaseConfig;
pub use content_repository::{LessonRepository, ModuleRepository};
pub use course_repository::CourseRepository;
pub use database::Database;
pub use enrollment_repository::EnrollmentRepository;
pub use question_repository::{AnswerOptionRepository, QuestionRepository};
pub use quiz_repository::{QuizRepository, QuizSubmissionRepository};
pub use review_repository::ReviewRepository;
pub use user_repository::{ProfileRepository, UserRepository};
