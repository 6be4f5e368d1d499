// src/store/postgres.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, prelude::FromRow, types::Json};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

use super::{QuizStore, SessionFilter, StoreError, seed};
use crate::models::{
    category::QuizCategory,
    question::Question,
    session::{CreateSessionRequest, QuizSession, UpdateSessionRequest},
};

const SESSION_COLUMNS: &str = "id, category_id, user_id, started_at, completed_at, answers, \
     marked_for_review, time_spent, score, total_questions";

const QUESTION_COLUMNS: &str =
    "id, category_id, question_text, options, correct_answer, explanation, difficulty";

/// Row shape of the 'questions' table. `options` is stored as a JSON array.
#[derive(FromRow)]
struct QuestionRow {
    id: String,
    category_id: String,
    question_text: String,
    options: Json<Vec<String>>,
    correct_answer: i32,
    explanation: Option<String>,
    difficulty: String,
}

impl From<QuestionRow> for Question {
    fn from(row: QuestionRow) -> Self {
        Self {
            id: row.id,
            category_id: row.category_id,
            question_text: row.question_text,
            options: row.options.0,
            correct_answer: row.correct_answer,
            explanation: row.explanation,
            difficulty: row.difficulty,
        }
    }
}

/// Row shape of the 'quiz_sessions' table.
#[derive(FromRow)]
struct SessionRow {
    id: String,
    category_id: String,
    user_id: Option<String>,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    answers: Json<BTreeMap<String, i32>>,
    marked_for_review: Json<BTreeSet<String>>,
    time_spent: Option<i32>,
    score: Option<i32>,
    total_questions: i32,
}

impl From<SessionRow> for QuizSession {
    fn from(row: SessionRow) -> Self {
        Self {
            id: row.id,
            category_id: row.category_id,
            user_id: row.user_id,
            started_at: row.started_at,
            completed_at: row.completed_at,
            answers: row.answers.0,
            marked_for_review: row.marked_for_review.0,
            time_spent: row.time_spent,
            score: row.score,
            total_questions: row.total_questions,
        }
    }
}

/// PostgreSQL-backed store. Schema lives in `migrations/`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts the built-in categories and questions. Existing rows keep their
    /// content; only their listing position is refreshed.
    pub async fn seed(&self) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        for (position, c) in (0i32..).zip(seed::categories()) {
            sqlx::query(
                r#"
                INSERT INTO quiz_categories
                    (id, name, description, icon, difficulty, estimated_time, question_count, position)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                ON CONFLICT (id) DO UPDATE SET position = EXCLUDED.position
                "#,
            )
            .bind(&c.id)
            .bind(&c.name)
            .bind(&c.description)
            .bind(&c.icon)
            .bind(&c.difficulty)
            .bind(c.estimated_time)
            .bind(c.question_count)
            .bind(position)
            .execute(&mut *tx)
            .await?;
        }

        for (position, q) in (0i32..).zip(seed::questions()) {
            sqlx::query(
                r#"
                INSERT INTO questions
                    (id, category_id, question_text, options, correct_answer, explanation, difficulty,
                     position)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                ON CONFLICT (id) DO UPDATE SET position = EXCLUDED.position
                "#,
            )
            .bind(&q.id)
            .bind(&q.category_id)
            .bind(&q.question_text)
            .bind(Json(&q.options))
            .bind(q.correct_answer)
            .bind(&q.explanation)
            .bind(&q.difficulty)
            .bind(position)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl QuizStore for PgStore {
    async fn list_categories(&self) -> Result<Vec<QuizCategory>, StoreError> {
        let categories = sqlx::query_as::<_, QuizCategory>(
            r#"
            SELECT id, name, description, icon, difficulty, estimated_time, question_count
            FROM quiz_categories
            ORDER BY position, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    async fn get_category(&self, id: &str) -> Result<Option<QuizCategory>, StoreError> {
        let category = sqlx::query_as::<_, QuizCategory>(
            r#"
            SELECT id, name, description, icon, difficulty, estimated_time, question_count
            FROM quiz_categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    async fn list_questions_by_category(
        &self,
        category_id: &str,
    ) -> Result<Vec<Question>, StoreError> {
        let sql = format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE category_id = $1 ORDER BY position, id"
        );
        let rows = sqlx::query_as::<_, QuestionRow>(&sql)
            .bind(category_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Question::from).collect())
    }

    async fn get_question(&self, id: &str) -> Result<Option<Question>, StoreError> {
        let sql = format!("SELECT {QUESTION_COLUMNS} FROM questions WHERE id = $1");
        let row = sqlx::query_as::<_, QuestionRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Question::from))
    }

    async fn create_session(&self, req: CreateSessionRequest) -> Result<QuizSession, StoreError> {
        let session = req.into_session(Uuid::new_v4().to_string(), Utc::now());

        let sql = format!(
            r#"
            INSERT INTO quiz_sessions
                (id, category_id, user_id, started_at, completed_at, answers,
                 marked_for_review, time_spent, score, total_questions)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {SESSION_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, SessionRow>(&sql)
            .bind(&session.id)
            .bind(&session.category_id)
            .bind(&session.user_id)
            .bind(session.started_at)
            .bind(session.completed_at)
            .bind(Json(&session.answers))
            .bind(Json(&session.marked_for_review))
            .bind(session.time_spent)
            .bind(session.score)
            .bind(session.total_questions)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }

    async fn get_session(&self, id: &str) -> Result<Option<QuizSession>, StoreError> {
        let sql = format!("SELECT {SESSION_COLUMNS} FROM quiz_sessions WHERE id = $1");
        let row = sqlx::query_as::<_, SessionRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(QuizSession::from))
    }

    async fn update_session(
        &self,
        id: &str,
        update: UpdateSessionRequest,
    ) -> Result<Option<QuizSession>, StoreError> {
        let mut tx = self.pool.begin().await?;

        // Lock the row so concurrent patches merge one after the other.
        let select = format!("SELECT {SESSION_COLUMNS} FROM quiz_sessions WHERE id = $1 FOR UPDATE");
        let Some(row) = sqlx::query_as::<_, SessionRow>(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let mut session = QuizSession::from(row);
        update.apply_to(&mut session);

        let write = format!(
            r#"
            UPDATE quiz_sessions
            SET answers = $2,
                marked_for_review = $3,
                completed_at = $4,
                time_spent = $5,
                score = $6
            WHERE id = $1
            RETURNING {SESSION_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, SessionRow>(&write)
            .bind(id)
            .bind(Json(&session.answers))
            .bind(Json(&session.marked_for_review))
            .bind(session.completed_at)
            .bind(session.time_spent)
            .bind(session.score)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(row.into()))
    }

    async fn sessions_matching(
        &self,
        filter: &SessionFilter,
    ) -> Result<Vec<QuizSession>, StoreError> {
        let sql = format!(
            r#"
            SELECT {SESSION_COLUMNS}
            FROM quiz_sessions
            WHERE ($1 = FALSE OR completed_at IS NOT NULL)
              AND ($2::TEXT IS NULL OR user_id = $2)
            ORDER BY started_at, id
            "#
        );
        let rows = sqlx::query_as::<_, SessionRow>(&sql)
            .bind(filter.completed_only)
            .bind(&filter.user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(QuizSession::from).collect())
    }
}
