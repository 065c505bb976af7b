use async_trait::async_trait;

use crate::domain::{DomainError, Session, SessionId};

/// Keeps conversation sessions by id. Callers work on copies and save them
/// back, so a failed turn leaves the stored session untouched.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn find(&self, id: &SessionId) -> Result<Option<Session>, DomainError>;

    async fn save(&self, session: &Session) -> Result<(), DomainError>;

    async fn delete(&self, id: &SessionId) -> Result<(), DomainError>;

    async fn count(&self) -> Result<usize, DomainError>;
}
