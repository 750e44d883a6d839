use std::sync::Arc;

use triviaexam_core::QuestionBank;

use crate::config::ServerConfig;
use crate::session::SessionStore;

/// Router state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub bank: Arc<QuestionBank>,
    pub sessions: SessionStore,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(bank: QuestionBank, config: ServerConfig) -> Self {
        Self {
            bank: Arc::new(bank),
            sessions: SessionStore::new(config.session_lifetime_secs),
            config: Arc::new(config),
        }
    }
}
