// src/store/memory.rs

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use super::{QuizStore, SessionFilter, StoreError, seed};
use crate::models::{
    category::QuizCategory,
    question::Question,
    session::{CreateSessionRequest, QuizSession, UpdateSessionRequest},
};

/// Process-lifetime store. Data is lost when the process exits.
///
/// Categories and questions are fixed at construction and kept in seed order.
/// Sessions sit behind a lock that is never held across an `.await`, so every
/// session operation is atomic with respect to other requests.
#[derive(Clone)]
pub struct MemoryStore {
    categories: Arc<Vec<QuizCategory>>,
    questions: Arc<Vec<Question>>,
    sessions: Arc<RwLock<HashMap<String, QuizSession>>>,
}

impl MemoryStore {
    /// A store preloaded with the built-in categories and questions.
    pub fn seeded() -> Self {
        Self::with_data(seed::categories(), seed::questions())
    }

    /// Records with a duplicate id are dropped; the first one wins.
    pub fn with_data(categories: Vec<QuizCategory>, questions: Vec<Question>) -> Self {
        let mut seen = HashSet::new();
        let categories = categories
            .into_iter()
            .filter(|c| seen.insert(c.id.clone()))
            .collect();

        let mut seen = HashSet::new();
        let questions = questions
            .into_iter()
            .filter(|q| seen.insert(q.id.clone()))
            .collect();

        Self {
            categories: Arc::new(categories),
            questions: Arc::new(questions),
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

fn poisoned<T>(err: std::sync::PoisonError<T>) -> StoreError {
    StoreError::Poisoned(err.to_string())
}

#[async_trait]
impl QuizStore for MemoryStore {
    async fn list_categories(&self) -> Result<Vec<QuizCategory>, StoreError> {
        Ok(self.categories.to_vec())
    }

    async fn get_category(&self, id: &str) -> Result<Option<QuizCategory>, StoreError> {
        Ok(self.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn list_questions_by_category(
        &self,
        category_id: &str,
    ) -> Result<Vec<Question>, StoreError> {
        Ok(self
            .questions
            .iter()
            .filter(|q| q.category_id == category_id)
            .cloned()
            .collect())
    }

    async fn get_question(&self, id: &str) -> Result<Option<Question>, StoreError> {
        Ok(self.questions.iter().find(|q| q.id == id).cloned())
    }

    async fn create_session(&self, req: CreateSessionRequest) -> Result<QuizSession, StoreError> {
        let session = req.into_session(Uuid::new_v4().to_string(), Utc::now());
        let mut guard = self.sessions.write().map_err(poisoned)?;
        guard.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    async fn get_session(&self, id: &str) -> Result<Option<QuizSession>, StoreError> {
        let guard = self.sessions.read().map_err(poisoned)?;
        Ok(guard.get(id).cloned())
    }

    async fn update_session(
        &self,
        id: &str,
        update: UpdateSessionRequest,
    ) -> Result<Option<QuizSession>, StoreError> {
        let mut guard = self.sessions.write().map_err(poisoned)?;
        let Some(session) = guard.get_mut(id) else {
            return Ok(None);
        };
        update.apply_to(session);
        Ok(Some(session.clone()))
    }

    async fn sessions_matching(
        &self,
        filter: &SessionFilter,
    ) -> Result<Vec<QuizSession>, StoreError> {
        let guard = self.sessions.read().map_err(poisoned)?;
        Ok(guard.values().filter(|s| filter.matches(s)).cloned().collect())
    }
}
