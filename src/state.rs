// src/state.rs

use crate::{config::Config, services::sessions::SessionManager, store::QuizStore};
use axum::extract::FromRef;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn QuizStore>,
    pub sessions: SessionManager,
    pub config: Config,
}

impl AppState {
    pub fn new(store: Arc<dyn QuizStore>, config: Config) -> Self {
        Self {
            sessions: SessionManager::new(store.clone()),
            store,
            config,
        }
    }
}

impl FromRef<AppState> for Arc<dyn QuizStore> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for SessionManager {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}
