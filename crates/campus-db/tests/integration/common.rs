use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use testcontainers::core::{ContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};

/// Schema statements, executed one at a time. Kept in sync with
/// migrations/001_initial_schema.sql; seed data is deliberately left out.
const SCHEMA: &[&str] = &[
    r#"CREATE TABLE users (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        email VARCHAR(255) NOT NULL UNIQUE,
        role VARCHAR(20) NOT NULL CHECK (role IN ('teacher', 'student'))
    )"#,
    r#"CREATE TABLE profiles (
        id BIGSERIAL PRIMARY KEY,
        user_id BIGINT NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
        bio TEXT,
        avatar_url VARCHAR(512),
        contact_info VARCHAR(255)
    )"#,
    r#"CREATE TABLE categories (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(100) NOT NULL UNIQUE
    )"#,
    r#"CREATE TABLE tags (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(100) NOT NULL UNIQUE
    )"#,
    r#"CREATE TABLE courses (
        id BIGSERIAL PRIMARY KEY,
        title VARCHAR(255) NOT NULL,
        description TEXT,
        teacher_id BIGINT NOT NULL REFERENCES users(id),
        category_id BIGINT NOT NULL REFERENCES categories(id),
        start_date DATE,
        duration INTEGER
    )"#,
    r#"CREATE INDEX idx_courses_teacher ON courses(teacher_id)"#,
    r#"CREATE INDEX idx_courses_category ON courses(category_id)"#,
    r#"CREATE TABLE modules (
        id BIGSERIAL PRIMARY KEY,
        title VARCHAR(255) NOT NULL,
        order_index INTEGER NOT NULL DEFAULT 0,
        course_id BIGINT NOT NULL REFERENCES courses(id) ON DELETE CASCADE
    )"#,
    r#"CREATE INDEX idx_modules_course ON modules(course_id)"#,
    r#"CREATE TABLE lessons (
        id BIGSERIAL PRIMARY KEY,
        title VARCHAR(255) NOT NULL,
        content TEXT NOT NULL,
        module_id BIGINT NOT NULL REFERENCES modules(id) ON DELETE CASCADE
    )"#,
    r#"CREATE INDEX idx_lessons_module ON lessons(module_id)"#,
    r#"CREATE TABLE assignments (
        id BIGSERIAL PRIMARY KEY,
        title VARCHAR(255) NOT NULL,
        description TEXT,
        due_date DATE,
        max_score INTEGER,
        lesson_id BIGINT NOT NULL REFERENCES lessons(id) ON DELETE CASCADE
    )"#,
    r#"CREATE INDEX idx_assignments_lesson ON assignments(lesson_id)"#,
    r#"CREATE TABLE submissions (
        id BIGSERIAL PRIMARY KEY,
        content TEXT NOT NULL,
        submitted_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        score INTEGER,
        feedback TEXT,
        assignment_id BIGINT NOT NULL REFERENCES assignments(id) ON DELETE CASCADE,
        student_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        CONSTRAINT uq_submissions_student_assignment UNIQUE (student_id, assignment_id)
    )"#,
    r#"CREATE INDEX idx_submissions_assignment ON submissions(assignment_id)"#,
    r#"CREATE INDEX idx_submissions_student ON submissions(student_id)"#,
    r#"CREATE TABLE quizzes (
        id BIGSERIAL PRIMARY KEY,
        title VARCHAR(255) NOT NULL,
        time_limit INTEGER,
        module_id BIGINT NOT NULL REFERENCES modules(id) ON DELETE CASCADE
    )"#,
    r#"CREATE INDEX idx_quizzes_module ON quizzes(module_id)"#,
    r#"CREATE TABLE questions (
        id BIGSERIAL PRIMARY KEY,
        text TEXT NOT NULL,
        question_type VARCHAR(20) NOT NULL
            CHECK (question_type IN ('single_choice', 'multiple_choice')),
        quiz_id BIGINT NOT NULL REFERENCES quizzes(id) ON DELETE CASCADE
    )"#,
    r#"CREATE INDEX idx_questions_quiz ON questions(quiz_id)"#,
    r#"CREATE TABLE answer_options (
        id BIGSERIAL PRIMARY KEY,
        text TEXT NOT NULL,
        is_correct BOOLEAN NOT NULL DEFAULT FALSE,
        question_id BIGINT NOT NULL REFERENCES questions(id) ON DELETE CASCADE
    )"#,
    r#"CREATE INDEX idx_answer_options_question ON answer_options(question_id)"#,
    r#"CREATE TABLE quiz_submissions (
        id BIGSERIAL PRIMARY KEY,
        score INTEGER NOT NULL,
        taken_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        quiz_id BIGINT NOT NULL REFERENCES quizzes(id) ON DELETE CASCADE,
        student_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE
    )"#,
    r#"CREATE INDEX idx_quiz_submissions_quiz ON quiz_submissions(quiz_id)"#,
    r#"CREATE INDEX idx_quiz_submissions_student ON quiz_submissions(student_id)"#,
    r#"CREATE TABLE enrollments (
        id BIGSERIAL PRIMARY KEY,
        user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        course_id BIGINT NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
        enroll_date TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        status VARCHAR(20) NOT NULL DEFAULT 'active'
            CHECK (status IN ('active', 'completed', 'dropped')),
        CONSTRAINT uq_enrollments_user_course UNIQUE (user_id, course_id)
    )"#,
    r#"CREATE INDEX idx_enrollments_user ON enrollments(user_id)"#,
    r#"CREATE INDEX idx_enrollments_course ON enrollments(course_id)"#,
    r#"CREATE TABLE course_reviews (
        id BIGSERIAL PRIMARY KEY,
        rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
        comment TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        course_id BIGINT NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
        student_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE
    )"#,
    r#"CREATE INDEX idx_course_reviews_course ON course_reviews(course_id)"#,
    r#"CREATE INDEX idx_course_reviews_student ON course_reviews(student_id)"#,
];

/// Spins up a PostgreSQL container and returns a connected pool.
///
/// The `ContainerAsync` must be kept in scope for the test duration;
/// dropping it stops the container.
pub async fn setup_test_db() -> (PgPool, ContainerAsync<GenericImage>) {
    let container = GenericImage::new("postgres", "16")
        .with_exposed_port(ContainerPort::Tcp(5432))
        .with_wait_for(WaitFor::message_on_stderr(
            "database system is ready to accept connections",
        ))
        .with_env_var("POSTGRES_PASSWORD", "postgres")
        .with_env_var("POSTGRES_DB", "campus_test")
        .start()
        .await
        .expect("Failed to start PostgreSQL container");

    let host = container.get_host().await.expect("Failed to get host");
    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to get port");

    let connection_string = format!("postgresql://postgres:postgres@{host}:{port}/campus_test");

    // Retry connection until container is fully ready
    const MAX_RETRIES: u32 = 30;
    let mut retries = 0;
    let pool = loop {
        match PgPoolOptions::new()
            .max_connections(5)
            .connect(&connection_string)
            .await
        {
            Ok(pool) => break pool,
            Err(e) => {
                retries += 1;
                if retries >= MAX_RETRIES {
                    panic!("Failed to connect to database after {MAX_RETRIES} retries: {e}");
                }
                tokio::time::sleep(std::time::Duration::from_millis(100)).await;
            }
        }
    };

    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(&pool)
            .await
            .expect("Failed to create schema");
    }

    (pool, container)
}
