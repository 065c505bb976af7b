use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{BuildRequest, BuildResult, UseCase};
use crate::domain::services::{is_affirmative, is_dismissive, parse_budget, BudgetMode};
use crate::domain::DomainError;

/// Identifies one conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for SessionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fields a session must provide before a build can be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionField {
    Budget,
    UseCase,
}

impl SessionField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionField::Budget => "budget",
            SessionField::UseCase => "use_case",
        }
    }

    pub fn join(fields: &[SessionField]) -> String {
        fields
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// What the assistant asked. Any string converts, so answers can be recorded
/// against arbitrary questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Question {
    Opening,
    Budget,
    UseCase,
    Preferences,
    Confirmation,
    Adjustment,
    Other(String),
}

impl Question {
    pub fn as_str(&self) -> &str {
        match self {
            Question::Opening => "opening",
            Question::Budget => "budget",
            Question::UseCase => "use_case",
            Question::Preferences => "preferences",
            Question::Confirmation => "confirmation",
            Question::Adjustment => "adjustment",
            Question::Other(text) => text,
        }
    }

    fn budget_mode(&self) -> BudgetMode {
        match self {
            Question::Budget => BudgetMode::Lenient,
            _ => BudgetMode::Strict,
        }
    }

    fn collects_preferences(&self) -> bool {
        matches!(self, Question::Preferences | Question::Adjustment)
    }
}

impl From<&str> for Question {
    fn from(value: &str) -> Self {
        match value.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "opening" => Question::Opening,
            "budget" => Question::Budget,
            "use_case" | "usecase" | "use" | "purpose" => Question::UseCase,
            "preferences" | "preference" => Question::Preferences,
            "confirmation" | "confirm" => Question::Confirmation,
            "adjustment" | "adjust" => Question::Adjustment,
            _ => Question::Other(value.to_string()),
        }
    }
}

impl From<String> for Question {
    fn from(value: String) -> Self {
        Question::from(value.as_str())
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    question: Question,
    answer: String,
    /// Filled in by needs analysis rather than typed by the user.
    inferred: bool,
}

impl Turn {
    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn is_inferred(&self) -> bool {
        self.inferred
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    turns: Vec<Turn>,
    pending: Question,
    last_build: Option<BuildResult>,
    created_at: i64,
    updated_at: i64,
}

impl Session {
    pub fn new(id: SessionId) -> Self {
        let now = current_timestamp();
        Self {
            id,
            turns: Vec::new(),
            pending: Question::Opening,
            last_build: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn pending_question(&self) -> &Question {
        &self.pending
    }

    pub fn last_build(&self) -> Option<&BuildResult> {
        self.last_build.as_ref()
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn updated_at(&self) -> i64 {
        self.updated_at
    }

    pub fn record_answer(&mut self, question: impl Into<Question>, answer: impl Into<String>) {
        self.push_turn(question.into(), answer.into(), false);
    }

    /// Record an answer the user implied but never stated in a form the
    /// extraction rules understand.
    pub fn record_inferred(&mut self, question: impl Into<Question>, answer: impl Into<String>) {
        self.push_turn(question.into(), answer.into(), true);
    }

    fn push_turn(&mut self, question: Question, answer: String, inferred: bool) {
        self.turns.push(Turn {
            question,
            answer,
            inferred,
        });
        self.touch();
    }

    pub fn ask(&mut self, question: Question) {
        self.pending = question;
        self.touch();
    }

    pub fn complete_build(&mut self, result: BuildResult) {
        self.last_build = Some(result);
        self.touch();
    }

    pub fn reset(&mut self) {
        self.turns.clear();
        self.pending = Question::Opening;
        self.last_build = None;
        self.touch();
    }

    /// Latest budget found in the answers.
    pub fn budget(&self) -> Option<u32> {
        self.turns
            .iter()
            .rev()
            .find_map(|t| parse_budget(&t.answer, t.question.budget_mode()))
    }

    /// Latest use case found in the answers. A direct answer to the use-case
    /// question is taken verbatim when no keyword matches. Answers about
    /// extras only change it when they name a use ("for gaming").
    pub fn use_case(&self) -> Option<UseCase> {
        self.turns.iter().rev().find_map(|t| {
            let detected = if t.question.collects_preferences() {
                UseCase::detect_restated(&t.answer)
            } else {
                UseCase::detect(&t.answer)
            };
            detected.or_else(|| {
                let answer = t.answer.trim();
                (t.question == Question::UseCase && !answer.is_empty() && !is_dismissive(answer))
                    .then(|| UseCase::parse(answer))
            })
        })
    }

    pub fn preferences(&self) -> Vec<String> {
        let mut preferences: Vec<String> = Vec::new();
        for turn in &self.turns {
            let answer = turn.answer.trim();
            if !turn.question.collects_preferences()
                || is_dismissive(answer)
                || is_affirmative(answer)
            {
                continue;
            }
            if !preferences.iter().any(|p| p.eq_ignore_ascii_case(answer)) {
                preferences.push(answer.to_string());
            }
        }
        preferences
    }

    /// True when the most recent answer confirms the summary it replied to.
    pub fn is_confirmed(&self) -> bool {
        self.turns
            .last()
            .is_some_and(|t| t.question == Question::Confirmation && is_affirmative(&t.answer))
    }

    pub fn missing_fields(&self) -> Vec<SessionField> {
        let mut missing = Vec::new();
        if self.budget().is_none() {
            missing.push(SessionField::Budget);
        }
        if self.use_case().is_none() {
            missing.push(SessionField::UseCase);
        }
        missing
    }

    pub fn to_build_request(&self) -> Result<BuildRequest, DomainError> {
        match (self.budget(), self.use_case()) {
            (Some(budget), Some(use_case)) => {
                Ok(BuildRequest::new(budget, use_case).with_preferences(self.preferences()))
            }
            _ => Err(DomainError::incomplete(self.missing_fields())),
        }
    }

    /// Plain-text transcript for prompts that read the whole conversation.
    pub fn transcript(&self) -> String {
        self.turns
            .iter()
            .map(|t| format!("Assistant asked ({}). User: {}", t.question, t.answer))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn touch(&mut self) {
        self.updated_at = current_timestamp();
    }
}

fn current_timestamp() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(SessionId::from("test"))
    }

    #[test]
    fn test_to_build_request_from_answers() {
        let mut session = session();
        session.record_answer("budget", "$1000");
        session.record_answer("use_case", "gaming");

        let request = session.to_build_request().unwrap();
        assert_eq!(request.budget(), 1000);
        assert_eq!(request.use_case(), &UseCase::Gaming);
        assert!(request.preferences().is_empty());
    }

    #[test]
    fn test_missing_fields_are_reported() {
        let mut session = session();
        assert!(matches!(
            session.to_build_request(),
            Err(DomainError::IncompleteSession { ref missing })
                if missing == &vec![SessionField::Budget, SessionField::UseCase]
        ));

        session.record_answer(Question::UseCase, "video editing");
        assert!(matches!(
            session.to_build_request(),
            Err(DomainError::IncompleteSession { ref missing })
                if missing == &vec![SessionField::Budget]
        ));

        let mut budget_only = Session::new(SessionId::new());
        budget_only.record_answer(Question::Budget, "1500");
        assert!(matches!(
            budget_only.to_build_request(),
            Err(DomainError::IncompleteSession { ref missing })
                if missing == &vec![SessionField::UseCase]
        ));
    }

    #[test]
    fn test_opening_answer_fills_both_fields() {
        let mut session = session();
        session.record_answer(
            Question::Opening,
            "I need a new PC for high-end gaming, my budget is around $2000",
        );

        let request = session.to_build_request().unwrap();
        assert_eq!(request.budget(), 2000);
        assert_eq!(request.use_case(), &UseCase::Gaming);
    }

    #[test]
    fn test_opening_answer_ignores_model_numbers() {
        let mut session = session();
        session.record_answer(Question::Opening, "gaming rig with an RTX 4070");

        assert_eq!(session.budget(), None);
        assert_eq!(session.missing_fields(), vec![SessionField::Budget]);
    }

    #[test]
    fn test_latest_answer_wins() {
        let mut session = session();
        session.record_answer(Question::Budget, "1000");
        session.record_answer(Question::UseCase, "office");
        session.record_answer(Question::Adjustment, "make it $1,500 and for gaming");

        let request = session.to_build_request().unwrap();
        assert_eq!(request.budget(), 1500);
        assert_eq!(request.use_case(), &UseCase::Gaming);
    }

    #[test]
    fn test_unknown_use_case_kept_verbatim() {
        let mut session = session();
        session.record_answer(Question::Budget, "2500");
        session.record_answer(Question::UseCase, "Machine learning");

        let request = session.to_build_request().unwrap();
        assert_eq!(request.use_case().as_str(), "machine learning");
    }

    #[test]
    fn test_preferences_collected_without_duplicates() {
        let mut session = session();
        session.record_answer(Question::Budget, "1200");
        session.record_answer(Question::UseCase, "gaming");
        session.record_answer(Question::Preferences, "white case");
        session.record_answer(Question::Preferences, "none");
        session.record_answer(Question::Adjustment, "White case");

        let request = session.to_build_request().unwrap();
        assert_eq!(request.preferences(), &["white case".to_string()]);
    }

    #[test]
    fn test_preference_mentioning_a_use_keeps_use_case() {
        let mut session = session();
        session.record_answer(Question::Opening, "gaming pc for $1200");
        session.record_answer(
            Question::Preferences,
            "it will sit on my office desk so keep it quiet",
        );

        assert_eq!(session.use_case(), Some(UseCase::Gaming));
        assert_eq!(
            session.preferences(),
            vec!["it will sit on my office desk so keep it quiet".to_string()]
        );
    }

    #[test]
    fn test_affirmative_follow_up_is_not_a_preference() {
        let mut session = session();
        session.record_answer(Question::Opening, "gaming pc for $1200");
        session.record_answer(Question::Adjustment, "yes");
        session.record_answer(Question::Adjustment, "ok, sounds good");

        assert!(session.preferences().is_empty());
        assert_eq!(session.to_build_request().unwrap().preferences().len(), 0);
    }

    #[test]
    fn test_budget_next_to_budget_word_beats_model_number() {
        let mut session = session();
        session.record_answer(
            Question::Opening,
            "gaming rig with an RTX 4060, 1300 is my budget",
        );

        assert_eq!(session.budget(), Some(1300));
    }

    #[test]
    fn test_confirmation_requires_last_turn() {
        let mut session = session();
        session.record_answer(Question::Opening, "yes");
        assert!(!session.is_confirmed());

        session.record_answer(Question::Confirmation, "Yes, that's right");
        assert!(session.is_confirmed());

        session.record_answer(Question::Preferences, "quiet");
        assert!(!session.is_confirmed());
    }

    #[test]
    fn test_question_from_arbitrary_string() {
        assert_eq!(Question::from("Use-Case"), Question::UseCase);
        assert_eq!(
            Question::from("What colour?"),
            Question::Other("What colour?".to_string())
        );
    }

    #[test]
    fn test_reset_clears_history() {
        let mut session = session();
        session.record_answer(Question::Budget, "900");
        session.ask(Question::UseCase);
        session.reset();

        assert!(session.is_empty());
        assert_eq!(session.pending_question(), &Question::Opening);
        assert!(session.last_build().is_none());
    }
}
