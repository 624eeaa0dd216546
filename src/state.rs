use std::sync::Arc;

use axum::extract::FromRef;

use crate::config::Config;
use crate::models::quiz::QuizBank;
use crate::store::CodeStore;

#[derive(Clone)]
pub struct AppState {
    pub store: CodeStore,
    pub config: Config,
    pub quiz: Arc<QuizBank>,
}

impl FromRef<AppState> for CodeStore {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<QuizBank> {
    fn from_ref(state: &AppState) -> Self {
        state.quiz.clone()
    }
}
