use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::{
    Needs, NeedsAnalyzer, PriceBuildUseCase, RecommendBuildUseCase, SessionRepository,
};
use crate::domain::{
    is_negative, BuildRequest, BuildResult, ChatReply, DomainError, Question, ResultRenderer,
    Session, SessionField, SessionId,
};

const OPENING: &str = "Hello! I'm your PC building assistant. To get started, what do you plan \
to use this PC for, and what is your approximate budget?";

const FOLLOW_UP: &str =
    "Would you like to adjust anything? Tell me what to change, or type /reset to start over.";

const NO_COMPONENTS: &str = "I'm sorry, I couldn't read a parts list from the recommendation. \
Please try again.";

/// Runs one chat turn: record the answer, ask for whatever is missing,
/// confirm, then recommend and price a build.
pub struct ChatTurnUseCase {
    session_repo: Arc<dyn SessionRepository>,
    analyzer: Arc<dyn NeedsAnalyzer>,
    recommend: Arc<RecommendBuildUseCase>,
    price: Arc<PriceBuildUseCase>,
    renderer: ResultRenderer,
}

impl ChatTurnUseCase {
    pub fn new(
        session_repo: Arc<dyn SessionRepository>,
        analyzer: Arc<dyn NeedsAnalyzer>,
        recommend: Arc<RecommendBuildUseCase>,
        price: Arc<PriceBuildUseCase>,
        renderer: ResultRenderer,
    ) -> Self {
        Self {
            session_repo,
            analyzer,
            recommend,
            price,
            renderer,
        }
    }

    pub fn greeting() -> &'static str {
        OPENING
    }

    /// Open (or reopen) a session and return the question it is waiting on.
    pub async fn start(&self, session_id: &SessionId) -> Result<ChatReply, DomainError> {
        let session = match self.session_repo.find(session_id).await? {
            Some(session) => session,
            None => {
                let session = Session::new(session_id.clone());
                self.session_repo.save(&session).await?;
                session
            }
        };
        Ok(ChatReply::question(
            self.question_text(&session, session.pending_question()),
        ))
    }

    pub async fn handle(
        &self,
        session_id: &SessionId,
        message: &str,
    ) -> Result<ChatReply, DomainError> {
        let message = message.trim();
        if message.is_empty() {
            return self.start(session_id).await;
        }

        let session = self
            .session_repo
            .find(session_id)
            .await?
            .unwrap_or_else(|| Session::new(session_id.clone()));

        // Work on a copy: the stored session only changes when the turn succeeds.
        let mut working = session.clone();
        let asked = working.pending_question().clone();
        working.record_answer(asked.clone(), message);
        debug!("Session {} answered {}", session_id, asked);

        let needs = match self.analyzer.analyze(&working).await {
            Ok(needs) => needs,
            Err(e) => {
                warn!("Needs analysis failed: {}. Using session answers only.", e);
                Needs {
                    budget: working.budget(),
                    use_case: working.use_case(),
                    confirmed: working.is_confirmed(),
                }
            }
        };
        Self::fill_gaps(&mut working, &needs);

        let request = match working.to_build_request() {
            Ok(request) => request,
            Err(DomainError::IncompleteSession { missing }) => {
                let next = if missing.contains(&SessionField::Budget) {
                    Question::Budget
                } else {
                    Question::UseCase
                };
                let text = self.question_text(&working, &next);
                working.ask(next);
                self.session_repo.save(&working).await?;
                return Ok(ChatReply::question(text));
            }
            Err(e) => return Err(e),
        };

        let confirmed = asked == Question::Confirmation && needs.confirmed;
        if !confirmed {
            let unchanged = session.to_build_request().ok().as_ref() == Some(&request);
            if asked == Question::Confirmation && is_negative(message) && unchanged {
                let text = self.question_text(&working, &Question::Adjustment);
                working.ask(Question::Adjustment);
                self.session_repo.save(&working).await?;
                return Ok(ChatReply::question(format!("No problem. {text}")));
            }

            working.ask(Question::Confirmation);
            self.session_repo.save(&working).await?;
            return Ok(ChatReply::confirmation(Self::confirmation_text(&request)));
        }

        info!("Session {} confirmed {}", session_id, request.summary());
        match self.build(&request).await {
            Ok(result) if result.is_empty() => {
                warn!("No components to show for session {}", session_id);
                Ok(ChatReply::error(NO_COMPONENTS))
            }
            Ok(result) => {
                let text = format!("{}\n\n{}", self.renderer.render(&result), FOLLOW_UP);
                working.complete_build(result.clone());
                working.ask(Question::Adjustment);
                self.session_repo.save(&working).await?;
                Ok(ChatReply::build(text, result))
            }
            Err(e) if e.is_upstream_failure() => {
                warn!("Recommendation failed for session {}: {}", session_id, e);
                Ok(ChatReply::error(e.user_message()))
            }
            Err(e) => Err(e),
        }
    }

    /// Recommend and price a build for a complete request.
    pub async fn build(&self, request: &BuildRequest) -> Result<BuildResult, DomainError> {
        let components = self.recommend.execute(request).await?;
        if components.is_empty() {
            return Ok(BuildResult::new(Vec::new()));
        }
        let result = self.price.execute(components).await;
        Ok(result.with_request(request.clone()))
    }

    /// Record analyzer findings for fields the session answers do not cover.
    fn fill_gaps(session: &mut Session, needs: &Needs) {
        if session.budget().is_none() {
            if let Some(budget) = needs.budget {
                session.record_inferred(Question::Budget, budget.to_string());
            }
        }
        if session.use_case().is_none() {
            if let Some(use_case) = &needs.use_case {
                session.record_inferred(Question::UseCase, use_case.as_str());
            }
        }
    }

    fn confirmation_text(request: &BuildRequest) -> String {
        format!(
            "Okay, just to confirm: you're looking for {}. Is that correct?",
            request.summary()
        )
    }

    fn question_text(&self, session: &Session, question: &Question) -> String {
        match question {
            Question::Opening | Question::Other(_) => OPENING.to_string(),
            Question::Budget => match session.use_case() {
                Some(use_case) => {
                    format!("Got it, a {use_case} PC. What is your approximate budget?")
                }
                None => "I see. And what is your approximate budget for the new PC?".to_string(),
            },
            Question::UseCase => {
                let examples = "For example: high-end gaming, video editing, or office work and web browsing?";
                match session.budget() {
                    Some(budget) => format!(
                        "Got it, a budget of around ${budget}. What is the primary use for this PC? {examples}"
                    ),
                    None => format!("What is the primary use for this PC? {examples}"),
                }
            }
            Question::Preferences => {
                "Any preferences I should keep in mind, such as brands, size, noise or looks?"
                    .to_string()
            }
            Question::Confirmation => match session.to_build_request() {
                Ok(request) => Self::confirmation_text(&request),
                Err(_) => OPENING.to_string(),
            },
            Question::Adjustment => FOLLOW_UP.to_string(),
        }
    }
}
