// src/services/sessions.rs

use std::sync::Arc;

use crate::{
    models::session::{CreateSessionRequest, QuizSession, UpdateSessionRequest},
    store::{QuizStore, StoreError},
};

/// Session lifecycle on top of a `QuizStore`.
///
/// Sessions go from in progress to completed when an update carries a
/// `completedAt`. Updates are shallow: a named field replaces the stored value
/// wholesale, so a client updating only `markedForReview` keeps its answers,
/// while one sending `answers` must send the full mapping.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn QuizStore>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn QuizStore>) -> Self {
        Self { store }
    }

    /// Starts a new attempt. Input is assumed validated.
    pub async fn start(&self, req: CreateSessionRequest) -> Result<QuizSession, StoreError> {
        let session = self.store.create_session(req).await?;
        tracing::info!(
            "Session {} started for category '{}' ({} questions)",
            session.id,
            session.category_id,
            session.total_questions
        );
        Ok(session)
    }

    pub async fn get(&self, id: &str) -> Result<Option<QuizSession>, StoreError> {
        self.store.get_session(id).await
    }

    /// Applies a partial update. `Ok(None)` when the session does not exist.
    pub async fn update(
        &self,
        id: &str,
        update: UpdateSessionRequest,
    ) -> Result<Option<QuizSession>, StoreError> {
        let clears_completion = matches!(update.completed_at, Some(None));
        let sets_completion = matches!(update.completed_at, Some(Some(_)));

        let Some(session) = self.store.update_session(id, update).await? else {
            tracing::debug!("Update for unknown session {}", id);
            return Ok(None);
        };

        if sets_completion {
            tracing::info!(
                "Session {} completed (score: {:?}, time spent: {:?}s)",
                session.id,
                session.score,
                session.time_spent
            );
        } else if clears_completion {
            tracing::warn!("Session {} had its completion timestamp cleared", session.id);
        }

        Ok(Some(session))
    }
}
