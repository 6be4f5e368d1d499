// src/store/mod.rs

//! Keyed record storage for categories, questions and sessions.
//!
//! Lookups by id return `Ok(None)` when the record does not exist; `StoreError`
//! is reserved for backend failures.

use async_trait::async_trait;
use std::fmt;

use crate::models::{
    category::QuizCategory,
    question::Question,
    session::{CreateSessionRequest, QuizSession, UpdateSessionRequest},
};

pub mod memory;
pub mod postgres;
pub mod seed;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Backend failure. Missing records are not errors.
#[derive(Debug)]
pub enum StoreError {
    /// A lock guarding an in-memory collection was poisoned.
    Poisoned(String),

    Database(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Poisoned(msg) => write!(f, "store lock poisoned: {}", msg),
            StoreError::Database(msg) => write!(f, "database error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

/// Predicate for a full scan over the session collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionFilter {
    /// Only sessions with a completion timestamp.
    pub completed_only: bool,

    /// Exact owner match. Anonymous sessions never match a set filter.
    pub user_id: Option<String>,
}

impl SessionFilter {
    pub fn completed(user_id: Option<String>) -> Self {
        Self {
            completed_only: true,
            user_id,
        }
    }

    pub fn matches(&self, session: &QuizSession) -> bool {
        if self.completed_only && !session.is_completed() {
            return false;
        }
        match &self.user_id {
            Some(user_id) => session.user_id.as_deref() == Some(user_id.as_str()),
            None => true,
        }
    }
}

/// Storage contract shared by the in-memory and Postgres backends.
#[async_trait]
pub trait QuizStore: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<QuizCategory>, StoreError>;

    async fn get_category(&self, id: &str) -> Result<Option<QuizCategory>, StoreError>;

    /// Questions whose category reference equals `category_id`.
    /// Unknown categories yield an empty list.
    async fn list_questions_by_category(
        &self,
        category_id: &str,
    ) -> Result<Vec<Question>, StoreError>;

    async fn get_question(&self, id: &str) -> Result<Option<Question>, StoreError>;

    /// Allocates a fresh id, stamps `started_at` and stores the session.
    async fn create_session(&self, req: CreateSessionRequest) -> Result<QuizSession, StoreError>;

    async fn get_session(&self, id: &str) -> Result<Option<QuizSession>, StoreError>;

    /// Shallow merge of `update` into an existing session.
    /// Returns `Ok(None)` and stores nothing when `id` is unknown.
    async fn update_session(
        &self,
        id: &str,
        update: UpdateSessionRequest,
    ) -> Result<Option<QuizSession>, StoreError>;

    async fn sessions_matching(&self, filter: &SessionFilter)
    -> Result<Vec<QuizSession>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::{BTreeMap, BTreeSet};

    fn session(user_id: Option<&str>, completed: bool) -> QuizSession {
        QuizSession {
            id: "s".to_string(),
            category_id: "science".to_string(),
            user_id: user_id.map(str::to_string),
            started_at: Utc::now(),
            completed_at: completed.then(Utc::now),
            answers: BTreeMap::new(),
            marked_for_review: BTreeSet::new(),
            time_spent: None,
            score: None,
            total_questions: 5,
        }
    }

    #[test]
    fn completed_filter_skips_in_progress() {
        let filter = SessionFilter::completed(None);
        assert!(filter.matches(&session(None, true)));
        assert!(!filter.matches(&session(None, false)));
    }

    #[test]
    fn user_filter_excludes_anonymous_and_others() {
        let filter = SessionFilter::completed(Some("userX".to_string()));
        assert!(filter.matches(&session(Some("userX"), true)));
        assert!(!filter.matches(&session(Some("userY"), true)));
        assert!(!filter.matches(&session(None, true)));
    }
}
