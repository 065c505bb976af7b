use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::SessionRepository;
use crate::domain::{DomainError, Session, SessionId};

/// Process-local session store. Sessions are lost on exit.
pub struct InMemorySessionRepository {
    sessions: Arc<Mutex<HashMap<SessionId, Session>>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn find(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        let sessions = self.sessions.lock().await;
        Ok(sessions.get(id).cloned())
    }

    async fn save(&self, session: &Session) -> Result<(), DomainError> {
        let mut sessions = self.sessions.lock().await;
        sessions.insert(session.id().clone(), session.clone());
        debug!(
            "Saved session {} ({} turns)",
            session.id(),
            session.turns().len()
        );
        Ok(())
    }

    async fn delete(&self, id: &SessionId) -> Result<(), DomainError> {
        let mut sessions = self.sessions.lock().await;
        if sessions.remove(id).is_some() {
            debug!("Deleted session {}", id);
        }
        Ok(())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let sessions = self.sessions.lock().await;
        Ok(sessions.len())
    }
}
