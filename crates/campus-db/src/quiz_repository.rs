use std::collections::HashMap;

use campus_core::content::ModuleRef;
use campus_core::error::AppError;
use campus_core::quiz::{
    NewQuiz, Question, Quiz, QuizRef, QuizSubmission, QuizSubmissionUpdate, QuizUpdate,
    score_answers,
};
use campus_core::user::UserRef;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Pool, Postgres};
use tracing::{info, warn};

use crate::lookups::{course_ref, db_err, module_ref, quiz_ref, user_ref};
use crate::question_repository::load_options;

/// Repository for quizzes. Quiz reads always carry the question list with
/// options, loaded in batches.
#[derive(Clone)]
pub struct QuizRepository {
    pool: Pool<Postgres>,
}

// -- Internal row types for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct QuizRow {
    id: i64,
    title: String,
    time_limit: Option<i32>,
    module_id: i64,
    module_title: String,
}

#[derive(sqlx::FromRow)]
struct QuestionRow {
    id: i64,
    text: String,
    question_type: String,
    quiz_id: i64,
    quiz_title: String,
}

impl QuestionRow {
    fn into_question(self) -> Question {
        Question {
            id: self.id,
            text: self.text,
            question_type: self
                .question_type
                .parse()
                .unwrap_or(campus_core::quiz::QuestionType::SingleChoice),
            quiz: QuizRef {
                id: self.quiz_id,
                title: self.quiz_title,
            },
            options: Vec::new(),
        }
    }
}

/// Loads the questions of the given quizzes, options attached.
pub(crate) async fn questions_for_quizzes(
    pool: &PgPool,
    quiz_ids: &[i64],
) -> Result<Vec<Question>, AppError> {
    if quiz_ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows = sqlx::query_as::<_, QuestionRow>(
        r#"
        SELECT q.id, q.text, q.question_type,
               z.id AS quiz_id, z.title AS quiz_title
        FROM questions q
        JOIN quizzes z ON z.id = q.quiz_id
        WHERE q.quiz_id = ANY($1)
        ORDER BY q.id
        "#,
    )
    .bind(quiz_ids)
    .fetch_all(pool)
    .await
    .map_err(db_err)?;

    let mut questions: Vec<Question> = rows.into_iter().map(QuestionRow::into_question).collect();
    let question_ids: Vec<i64> = questions.iter().map(|q| q.id).collect();
    let mut options = load_options(pool, &question_ids).await?;
    for question in &mut questions {
        question.options = options.remove(&question.id).unwrap_or_default();
    }
    Ok(questions)
}

impl QuizRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: &NewQuiz) -> Result<Quiz, AppError> {
        let module = module_ref(&self.pool, new.module_id).await?;

        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO quizzes (title, time_limit, module_id)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&new.title)
        .bind(new.time_limit)
        .bind(new.module_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        info!("Created Quiz: ID={}", id);
        Ok(Quiz {
            id,
            title: new.title.clone(),
            time_limit: new.time_limit,
            module,
            questions: Vec::new(),
        })
    }

    pub async fn get(&self, id: i64) -> Result<Option<Quiz>, AppError> {
        let row = sqlx::query_as::<_, QuizRow>(
            r#"
            SELECT z.id, z.title, z.time_limit,
                   m.id AS module_id, m.title AS module_title
            FROM quizzes z
            JOIN modules m ON m.id = z.module_id
            WHERE z.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let questions = questions_for_quizzes(&self.pool, &[row.id]).await?;
        Ok(Some(Quiz {
            id: row.id,
            title: row.title,
            time_limit: row.time_limit,
            module: ModuleRef {
                id: row.module_id,
                title: row.module_title,
            },
            questions,
        }))
    }

    pub async fn list(&self) -> Result<Vec<Quiz>, AppError> {
        let rows = sqlx::query_as::<_, QuizRow>(
            r#"
            SELECT z.id, z.title, z.time_limit,
                   m.id AS module_id, m.title AS module_title
            FROM quizzes z
            JOIN modules m ON m.id = z.module_id
            ORDER BY z.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        let quiz_ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let questions = questions_for_quizzes(&self.pool, &quiz_ids).await?;
        let mut by_quiz: HashMap<i64, Vec<Question>> = HashMap::new();
        for question in questions {
            by_quiz.entry(question.quiz.id).or_default().push(question);
        }

        Ok(rows
            .into_iter()
            .map(|row| Quiz {
                questions: by_quiz.remove(&row.id).unwrap_or_default(),
                id: row.id,
                title: row.title,
                time_limit: row.time_limit,
                module: ModuleRef {
                    id: row.module_id,
                    title: row.module_title,
                },
            })
            .collect())
    }

    pub async fn update(&self, id: i64, changes: &QuizUpdate) -> Result<Quiz, AppError> {
        let mut current = self
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("Quiz", id))?;

        let mut changed = false;
        if let Some(title) = &changes.title {
            if *title != current.title {
                current.title = title.clone();
                changed = true;
            }
        }
        if let Some(time_limit) = changes.time_limit {
            if current.time_limit != Some(time_limit) {
                current.time_limit = Some(time_limit);
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
            info!("No changes detected for Quiz: ID={}", id);
            return Ok(current);
        }

        sqlx::query(
            r#"
            UPDATE quizzes
            SET title = $1, time_limit = $2, module_id = $3
            WHERE id = $4
            "#,
        )
        .bind(&current.title)
        .bind(current.time_limit)
        .bind(current.module.id)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        info!("Updated Quiz: ID={}", id);
        Ok(current)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM quizzes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Quiz", id));
        }
        info!("Deleted Quiz: ID={}", id);
        Ok(())
    }

    /// Grades a quiz attempt and records the result. `answers` maps question
    /// id to the selected answer-option id.
    pub async fn take(
        &self,
        quiz_id: i64,
        student_id: i64,
        answers: &HashMap<i64, i64>,
    ) -> Result<QuizSubmission, AppError> {
        let quiz = quiz_ref(&self.pool, quiz_id).await?;
        let student = user_ref(&self.pool, student_id).await?;

        let questions = questions_for_quizzes(&self.pool, &[quiz_id]).await?;
        if questions.is_empty() {
            warn!("Quiz has no questions: ID={}", quiz_id);
            return Err(AppError::Conflict(format!(
                "Quiz has no questions: ID={}",
                quiz_id
            )));
        }

        let score = score_answers(&questions, answers)?;

        let (id, taken_at): (i64, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO quiz_submissions (score, quiz_id, student_id)
            VALUES ($1, $2, $3)
            RETURNING id, taken_at
            "#,
        )
        .bind(score)
        .bind(quiz_id)
        .bind(student_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        info!(
            "Graded quiz attempt: quizId={}, studentId={}, score={}",
            quiz_id, student_id, score
        );
        Ok(QuizSubmission {
            id,
            score,
            taken_at,
            quiz,
            student,
        })
    }
}

/// Repository for recorded quiz attempts.
#[derive(Clone)]
pub struct QuizSubmissionRepository {
    pool: Pool<Postgres>,
}

#[derive(sqlx::FromRow)]
struct QuizSubmissionRow {
    id: i64,
    score: i32,
    taken_at: DateTime<Utc>,
    quiz_id: i64,
    quiz_title: String,
    student_id: i64,
    student_name: String,
}

impl From<QuizSubmissionRow> for QuizSubmission {
    fn from(row: QuizSubmissionRow) -> Self {
        QuizSubmission {
            id: row.id,
            score: row.score,
            taken_at: row.taken_at,
            quiz: QuizRef {
                id: row.quiz_id,
                title: row.quiz_title,
            },
            student: UserRef {
                id: row.student_id,
                name: row.student_name,
            },
        }
    }
}

impl QuizSubmissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        quiz_id: i64,
        student_id: i64,
        score: i32,
    ) -> Result<QuizSubmission, AppError> {
        let quiz = quiz_ref(&self.pool, quiz_id).await?;
        let student = user_ref(&self.pool, student_id).await?;

        let (id, taken_at): (i64, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO quiz_submissions (score, quiz_id, student_id)
            VALUES ($1, $2, $3)
            RETURNING id, taken_at
            "#,
        )
        .bind(score)
        .bind(quiz_id)
        .bind(student_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        info!("Created QuizSubmission: ID={}", id);
        Ok(QuizSubmission {
            id,
            score,
            taken_at,
            quiz,
            student,
        })
    }

    pub async fn get(&self, id: i64) -> Result<Option<QuizSubmission>, AppError> {
        let row = sqlx::query_as::<_, QuizSubmissionRow>(
            r#"
            SELECT s.id, s.score, s.taken_at,
                   z.id AS quiz_id, z.title AS quiz_title,
                   u.id AS student_id, u.name AS student_name
            FROM quiz_submissions s
            JOIN quizzes z ON z.id = s.quiz_id
            JOIN users u ON u.id = s.student_id
            WHERE s.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.map(Into::into))
    }

    pub async fn list(&self) -> Result<Vec<QuizSubmission>, AppError> {
        let rows = sqlx::query_as::<_, QuizSubmissionRow>(
            r#"
            SELECT s.id, s.score, s.taken_at,
                   z.id AS quiz_id, z.title AS quiz_title,
                   u.id AS student_id, u.name AS student_name
            FROM quiz_submissions s
            JOIN quizzes z ON z.id = s.quiz_id
            JOIN users u ON u.id = s.student_id
            ORDER BY s.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn list_by_student(&self, student_id: i64) -> Result<Vec<QuizSubmission>, AppError> {
        user_ref(&self.pool, student_id).await?;

        let rows = sqlx::query_as::<_, QuizSubmissionRow>(
            r#"
            SELECT s.id, s.score, s.taken_at,
                   z.id AS quiz_id, z.title AS quiz_title,
                   u.id AS student_id, u.name AS student_name
            FROM quiz_submissions s
            JOIN quizzes z ON z.id = s.quiz_id
            JOIN users u ON u.id = s.student_id
            WHERE s.student_id = $1
            ORDER BY s.id
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Attempts on quizzes belonging to the given module.
    pub async fn list_by_module(&self, module_id: i64) -> Result<Vec<QuizSubmission>, AppError> {
        module_ref(&self.pool, module_id).await?;

        let rows = sqlx::query_as::<_, QuizSubmissionRow>(
            r#"
            SELECT s.id, s.score, s.taken_at,
                   z.id AS quiz_id, z.title AS quiz_title,
                   u.id AS student_id, u.name AS student_name
            FROM quiz_submissions s
            JOIN quizzes z ON z.id = s.quiz_id
            JOIN users u ON u.id = s.student_id
            WHERE z.module_id = $1
            ORDER BY s.id
            "#,
        )
        .bind(module_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Attempts on quizzes belonging to any module of the given course.
    pub async fn list_by_course(&self, course_id: i64) -> Result<Vec<QuizSubmission>, AppError> {
        course_ref(&self.pool, course_id).await?;

        let rows = sqlx::query_as::<_, QuizSubmissionRow>(
            r#"
            SELECT s.id, s.score, s.taken_at,
                   z.id AS quiz_id, z.title AS quiz_title,
                   u.id AS student_id, u.name AS student_name
            FROM quiz_submissions s
            JOIN quizzes z ON z.id = s.quiz_id
            JOIN modules m ON m.id = z.module_id
            JOIN users u ON u.id = s.student_id
            WHERE m.course_id = $1
            ORDER BY s.id
            "#,
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn update(
        &self,
        id: i64,
        changes: &QuizSubmissionUpdate,
    ) -> Result<QuizSubmission, AppError> {
        let mut current = self
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("QuizSubmission", id))?;

        let mut changed = false;
        if let Some(score) = changes.score {
            if score != current.score {
                current.score = score;
                changed = true;
            }
        }
        if let Some(quiz_id) = changes.quiz_id {
            if quiz_id != current.quiz.id {
                current.quiz = quiz_ref(&self.pool, quiz_id).await?;
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
            info!("No changes detected for QuizSubmission: ID={}", id);
            return Ok(current);
        }

        sqlx::query(
            r#"
            UPDATE quiz_submissions
            SET score = $1, quiz_id = $2, student_id = $3
            WHERE id = $4
            "#,
        )
        .bind(current.score)
        .bind(current.quiz.id)
        .bind(current.student.id)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        info!("Updated QuizSubmission: ID={}", id);
        Ok(current)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM quiz_submissions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("QuizSubmission", id));
        }
        info!("Deleted QuizSubmission: ID={}", id);
        Ok(())
    }
}
