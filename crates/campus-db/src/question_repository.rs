use std::collections::HashMap;

use campus_core::error::AppError;
use campus_core::quiz::{
    AnswerOption, AnswerOptionUpdate, NewAnswerOption, NewQuestion, Question, QuestionType,
    QuestionUpdate, QuizRef,
};
use sqlx::{PgPool, Pool, Postgres};
use tracing::info;

use crate::lookups::{db_err, question_exists, quiz_ref};

/// Loads answer options for the given questions, grouped by question id.
pub(crate) async fn load_options(
    pool: &PgPool,
    question_ids: &[i64],
) -> Result<HashMap<i64, Vec<AnswerOption>>, AppError> {
    if question_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = sqlx::query_as::<_, OptionRow>(
        r#"
        SELECT id, text, is_correct, question_id
        FROM answer_options
        WHERE question_id = ANY($1)
        ORDER BY id
        "#,
    )
    .bind(question_ids)
    .fetch_all(pool)
    .await
    .map_err(db_err)?;

    let mut by_question: HashMap<i64, Vec<AnswerOption>> = HashMap::new();
    for row in rows {
        by_question
            .entry(row.question_id)
            .or_default()
            .push(row.into());
    }
    Ok(by_question)
}

/// Repository for quiz questions. Creating a question also creates its
/// answer options, atomically.
#[derive(Clone)]
pub struct QuestionRepository {
    pool: Pool<Postgres>,
}

// -- Internal row types for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct QuestionRow {
    id: i64,
    text: String,
    question_type: String,
    quiz_id: i64,
    quiz_title: String,
}

#[derive(sqlx::FromRow)]
struct OptionRow {
    id: i64,
    text: String,
    is_correct: bool,
    question_id: i64,
}

impl From<OptionRow> for AnswerOption {
    fn from(row: OptionRow) -> Self {
        AnswerOption {
            id: row.id,
            text: row.text,
            is_correct: row.is_correct,
            question_id: row.question_id,
        }
    }
}

impl QuestionRow {
    fn into_question(self, options: Vec<AnswerOption>) -> Question {
        Question {
            id: self.id,
            text: self.text,
            question_type: self.question_type.parse().unwrap_or(QuestionType::SingleChoice),
            quiz: QuizRef {
                id: self.quiz_id,
                title: self.quiz_title,
            },
            options,
        }
    }
}

impl QuestionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: &NewQuestion) -> Result<Question, AppError> {
        if new.options.is_empty() {
            return Err(AppError::Validation(
                "Question must have at least one answer option".into(),
            ));
        }
        let quiz = quiz_ref(&self.pool, new.quiz_id).await?;

        let mut tx = self.pool.begin().await.map_err(db_err)?;
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO questions (text, question_type, quiz_id)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&new.text)
        .bind(new.question_type.as_str())
        .bind(new.quiz_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_err)?;

        let mut options = Vec::with_capacity(new.options.len());
        for option in &new.options {
            let (option_id,): (i64,) = sqlx::query_as(
                r#"
                INSERT INTO answer_options (text, is_correct, question_id)
                VALUES ($1, $2, $3)
                RETURNING id
                "#,
            )
            .bind(&option.text)
            .bind(option.is_correct)
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .map_err(db_err)?;
            options.push(AnswerOption {
                id: option_id,
                text: option.text.clone(),
                is_correct: option.is_correct,
                question_id: id,
            });
        }
        tx.commit().await.map_err(db_err)?;

        info!("Created Question: ID={} ({} options)", id, options.len());
        Ok(Question {
            id,
            text: new.text.clone(),
            question_type: new.question_type,
            quiz,
            options,
        })
    }

    pub async fn get(&self, id: i64) -> Result<Option<Question>, AppError> {
        let row = sqlx::query_as::<_, QuestionRow>(
            r#"
            SELECT q.id, q.text, q.question_type,
                   z.id AS quiz_id, z.title AS quiz_title
            FROM questions q
            JOIN quizzes z ON z.id = q.quiz_id
            WHERE q.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut options = load_options(&self.pool, &[row.id]).await?;
        let options = options.remove(&row.id).unwrap_or_default();
        Ok(Some(row.into_question(options)))
    }

    pub async fn list(&self) -> Result<Vec<Question>, AppError> {
        let rows = sqlx::query_as::<_, QuestionRow>(
            r#"
            SELECT q.id, q.text, q.question_type,
                   z.id AS quiz_id, z.title AS quiz_title
            FROM questions q
            JOIN quizzes z ON z.id = q.quiz_id
            ORDER BY q.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        let question_ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let mut options = load_options(&self.pool, &question_ids).await?;
        Ok(rows
            .into_iter()
            .map(|row| {
                let opts = options.remove(&row.id).unwrap_or_default();
                row.into_question(opts)
            })
            .collect())
    }

    pub async fn update(&self, id: i64, changes: &QuestionUpdate) -> Result<Question, AppError> {
        let mut current = self
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("Question", id))?;

        let mut changed = false;
        if let Some(text) = &changes.text {
            if *text != current.text {
                current.text = text.clone();
                changed = true;
            }
        }
        if let Some(question_type) = changes.question_type {
            if question_type != current.question_type {
                current.question_type = question_type;
                changed = true;
            }
        }
        if let Some(quiz_id) = changes.quiz_id {
            if quiz_id != current.quiz.id {
                current.quiz = quiz_ref(&self.pool, quiz_id).await?;
                changed = true;
            }
        }

        if !changed {
            info!("No changes detected for Question: ID={}", id);
            return Ok(current);
        }

        sqlx::query(
            r#"
            UPDATE questions
            SET text = $1, question_type = $2, quiz_id = $3
            WHERE id = $4
            "#,
        )
        .bind(&current.text)
        .bind(current.question_type.as_str())
        .bind(current.quiz.id)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        info!("Updated Question: ID={}", id);
        Ok(current)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Question", id));
        }
        info!("Deleted Question: ID={}", id);
        Ok(())
    }
}

/// Repository for standalone answer-option management.
#[derive(Clone)]
pub struct AnswerOptionRepository {
    pool: Pool<Postgres>,
}

impl AnswerOptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        question_id: i64,
        new: &NewAnswerOption,
    ) -> Result<AnswerOption, AppError> {
        question_exists(&self.pool, question_id).await?;

        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO answer_options (text, is_correct, question_id)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&new.text)
        .bind(new.is_correct)
        .bind(question_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        info!("Created AnswerOption: ID={}", id);
        Ok(AnswerOption {
            id,
            text: new.text.clone(),
            is_correct: new.is_correct,
            question_id,
        })
    }

    pub async fn get(&self, id: i64) -> Result<Option<AnswerOption>, AppError> {
        let row = sqlx::query_as::<_, OptionRow>(
            "SELECT id, text, is_correct, question_id FROM answer_options WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.map(Into::into))
    }

    pub async fn list(&self) -> Result<Vec<AnswerOption>, AppError> {
        let rows = sqlx::query_as::<_, OptionRow>(
            "SELECT id, text, is_correct, question_id FROM answer_options ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn update(
        &self,
        id: i64,
        changes: &AnswerOptionUpdate,
    ) -> Result<AnswerOption, AppError> {
        let mut current = self
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("AnswerOption", id))?;

        let mut changed = false;
        if let Some(text) = &changes.text {
            if *text != current.text {
                current.text = text.clone();
                changed = true;
            }
        }
        if let Some(is_correct) = changes.is_correct {
            if is_correct != current.is_correct {
                current.is_correct = is_correct;
                changed = true;
            }
        }
        if let Some(question_id) = changes.question_id {
            if question_id != current.question_id {
                question_exists(&self.pool, question_id).await?;
                current.question_id = question_id;
                changed = true;
            }
        }

        if !changed {
            info!("No changes detected for AnswerOption: ID={}", id);
            return Ok(current);
        }

        sqlx::query(
            r#"
            UPDATE answer_options
            SET text = $1, is_correct = $2, question_id = $3
            WHERE id = $4
            "#,
        )
        .bind(&current.text)
        .bind(current.is_correct)
        .bind(current.question_id)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        info!("Updated AnswerOption: ID={}", id);
        Ok(current)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM answer_options WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("AnswerOption", id));
        }
        info!("Deleted AnswerOption: ID={}", id);
        Ok(())
    }
}
