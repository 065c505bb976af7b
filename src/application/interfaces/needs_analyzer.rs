use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, Session, UseCase};

/// What the user has told us so far.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Needs {
    pub budget: Option<u32>,
    pub use_case: Option<UseCase>,
    pub confirmed: bool,
}

impl Needs {
    pub fn is_complete(&self) -> bool {
        self.budget.is_some() && self.use_case.is_some()
    }
}

/// Reads a conversation and extracts the user's budget, use case and
/// whether they confirmed the plan.
#[async_trait]
pub trait NeedsAnalyzer: Send + Sync {
    async fn analyze(&self, session: &Session) -> Result<Needs, DomainError>;
}
