use async_trait::async_trait;

use crate::application::{Needs, NeedsAnalyzer};
use crate::domain::{DomainError, Session};

/// Reads needs straight from the session's answers using the keyword and
/// amount heuristics. No external calls.
pub struct RuleBasedNeedsAnalyzer;

impl RuleBasedNeedsAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn needs(session: &Session) -> Needs {
        Needs {
            budget: session.budget(),
            use_case: session.use_case(),
            confirmed: session.is_confirmed(),
        }
    }
}

impl Default for RuleBasedNeedsAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NeedsAnalyzer for RuleBasedNeedsAnalyzer {
    async fn analyze(&self, session: &Session) -> Result<Needs, DomainError> {
        Ok(Self::needs(session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Question, SessionId, UseCase};

    #[tokio::test]
    async fn test_reads_answers() {
        let mut session = Session::new(SessionId::from("t"));
        session.record_answer(Question::Opening, "a video editing rig for about $2,000");

        let needs = RuleBasedNeedsAnalyzer::new().analyze(&session).await.unwrap();
        assert_eq!(needs.budget, Some(2000));
        assert_eq!(needs.use_case, Some(UseCase::Editing));
        assert!(!needs.confirmed);

        session.record_answer(Question::Confirmation, "yes please");
        let needs = RuleBasedNeedsAnalyzer::new().analyze(&session).await.unwrap();
        assert!(needs.confirmed);
    }
}
