use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use super::RuleBasedNeedsAnalyzer;
use crate::application::{ChatClient, Needs, NeedsAnalyzer};
use crate::domain::{DomainError, Question, Session, UseCase};

const SYSTEM_PROMPT: &str = "\
You are an expert at analyzing chatbot conversations. Your task is to extract the user's \
budget and primary PC use case. Categorize the use case into one of these specific keywords: \
'gaming', 'office', 'editing', or 'unknown'. Determine the budget as an integer in US dollars \
(0 when not stated). Also, determine if the user has just confirmed the plan by saying 'yes' \
or 'correct'.

Return ONLY a JSON object, no prose and no code fences:
{\"budget\": <integer>, \"use_case\": \"gaming|office|editing|unknown\", \"has_confirmed\": <true|false>}";

#[derive(Debug, Deserialize)]
struct Analysis {
    #[serde(default)]
    budget: Option<f64>,
    #[serde(default)]
    use_case: Option<String>,
    #[serde(default)]
    has_confirmed: bool,
}

/// [`NeedsAnalyzer`] that asks a language model to read the conversation.
///
/// The model catches phrasings the keyword rules miss ("something to play
/// Cyberpunk on"). Its answer is merged with the rule-based reading, and any
/// failure (API error, unparseable reply) falls back to the rules alone.
pub struct LlmNeedsAnalyzer {
    client: Arc<dyn ChatClient>,
}

impl LlmNeedsAnalyzer {
    pub fn new(client: Arc<dyn ChatClient>) -> Self {
        Self { client }
    }

    fn parse_analysis(text: &str) -> Option<Analysis> {
        let start = text.find('{')?;
        let end = text.rfind('}')?;
        if start >= end {
            return None;
        }
        serde_json::from_str(&text[start..=end]).ok()
    }

    fn merge(session: &Session, rules: Needs, analysis: Analysis) -> Needs {
        let budget = analysis
            .budget
            .filter(|b| b.is_finite() && *b >= 1.0)
            .map(|b| b.round() as u32);
        let use_case = analysis
            .use_case
            .map(|u| u.trim().to_lowercase())
            .filter(|u| !u.is_empty() && u != "unknown")
            .map(|u| UseCase::parse(&u));
        // A model "yes" only counts as a reply to the confirmation question.
        let answered_confirmation = session
            .turns()
            .last()
            .is_some_and(|t| t.question() == &Question::Confirmation);

        Needs {
            budget: rules.budget.or(budget),
            use_case: rules.use_case.or(use_case),
            confirmed: rules.confirmed || (answered_confirmation && analysis.has_confirmed),
        }
    }
}

#[async_trait]
impl NeedsAnalyzer for LlmNeedsAnalyzer {
    async fn analyze(&self, session: &Session) -> Result<Needs, DomainError> {
        let rules = RuleBasedNeedsAnalyzer::needs(session);
        if session.is_empty() {
            return Ok(rules);
        }

        let user = format!("Here is the chat history:\n{}", session.transcript());
        let text = match self.client.complete(SYSTEM_PROMPT, &user).await {
            Ok(text) => text,
            Err(e) => {
                warn!("LlmNeedsAnalyzer: {e}. Falling back to rule-based analysis.");
                return Ok(rules);
            }
        };
        debug!("LlmNeedsAnalyzer raw response: {}", text);

        match Self::parse_analysis(&text) {
            Some(analysis) => Ok(Self::merge(session, rules, analysis)),
            None => {
                warn!("LlmNeedsAnalyzer: could not parse model response as JSON: {text}");
                Ok(rules)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SessionId;

    struct FixedChatClient(Result<&'static str, ()>);

    #[async_trait]
    impl ChatClient for FixedChatClient {
        async fn complete(&self, _system: &str, _user: &str) -> Result<String, DomainError> {
            self.0
                .map(str::to_string)
                .map_err(|_| DomainError::upstream("down"))
        }

        fn model_name(&self) -> &str {
            "fixed"
        }
    }

    fn analyzer(reply: Result<&'static str, ()>) -> LlmNeedsAnalyzer {
        LlmNeedsAnalyzer::new(Arc::new(FixedChatClient(reply)))
    }

    fn session(answers: &[(Question, &str)]) -> Session {
        let mut session = Session::new(SessionId::from("t"));
        for (question, answer) in answers {
            session.record_answer(question.clone(), *answer);
        }
        session
    }

    #[tokio::test]
    async fn test_fills_what_rules_miss() {
        let session = session(&[(Question::Opening, "something to play Cyberpunk on, around a grand")]);
        let reply = r#"{"budget": 1000, "use_case": "gaming", "has_confirmed": false}"#;

        let needs = analyzer(Ok(reply)).analyze(&session).await.unwrap();
        assert_eq!(needs.budget, Some(1000));
        assert_eq!(needs.use_case, Some(UseCase::Gaming));
        assert!(!needs.confirmed);
    }

    #[tokio::test]
    async fn test_zero_and_unknown_mean_absent() {
        let session = session(&[(Question::Opening, "hi there")]);
        let reply = "```json\n{\"budget\": 0, \"use_case\": \"unknown\", \"has_confirmed\": false}\n```";

        let needs = analyzer(Ok(reply)).analyze(&session).await.unwrap();
        assert_eq!(needs, Needs::default());
    }

    #[tokio::test]
    async fn test_confirmation_needs_confirmation_question() {
        let reply = r#"{"budget": 800, "use_case": "office", "has_confirmed": true}"#;

        let opening = session(&[(Question::Opening, "office pc, $800, go for it")]);
        assert!(!analyzer(Ok(reply)).analyze(&opening).await.unwrap().confirmed);

        let confirming = session(&[
            (Question::Opening, "office pc, $800"),
            (Question::Confirmation, "that works for me"),
        ]);
        assert!(analyzer(Ok(reply)).analyze(&confirming).await.unwrap().confirmed);
    }

    #[tokio::test]
    async fn test_failure_falls_back_to_rules() {
        let session = session(&[(Question::Opening, "office pc for $600")]);

        let needs = analyzer(Err(())).analyze(&session).await.unwrap();
        assert_eq!(needs.budget, Some(600));
        assert_eq!(needs.use_case, Some(UseCase::Office));

        let needs = analyzer(Ok("not json")).analyze(&session).await.unwrap();
        assert_eq!(needs.budget, Some(600));
    }
}
