use std::sync::Arc;

use tracing::info;

use crate::application::SessionRepository;
use crate::domain::{DomainError, SessionId};

pub struct ResetSessionUseCase {
    session_repo: Arc<dyn SessionRepository>,
}

impl ResetSessionUseCase {
    pub fn new(session_repo: Arc<dyn SessionRepository>) -> Self {
        Self { session_repo }
    }

    /// Discard the session. Resetting an unknown session is not an error.
    pub async fn execute(&self, session_id: &SessionId) -> Result<(), DomainError> {
        self.session_repo.delete(session_id).await?;
        info!("Session {} reset", session_id);
        Ok(())
    }
}
