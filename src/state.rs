use std::sync::Arc;

use crate::{assistant::StudyAssistant, config::Config, gateway::TextGenerator, session::SessionStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub assistant: StudyAssistant,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: Config, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            config: Arc::new(config),
            assistant: StudyAssistant::new(generator),
            sessions: SessionStore::new(),
        }
    }
}
