use anyhow::Result;

use crate::application::ChatTurnUseCase;
use crate::domain::{ChatReply, SessionId};

use super::super::Container;

pub struct ChatController<'a> {
    container: &'a Container,
}

impl<'a> ChatController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Opening question for a session, resuming where it left off.
    pub async fn open(&self, session_id: &SessionId) -> Result<String> {
        let reply = self.container.chat_use_case().start(session_id).await?;
        Ok(reply.text().to_string())
    }

    pub async fn send(&self, session_id: &SessionId, message: &str) -> Result<ChatReply> {
        let reply = self
            .container
            .chat_use_case()
            .handle(session_id, message)
            .await?;
        Ok(reply)
    }

    pub async fn reset(&self, session_id: &SessionId) -> Result<String> {
        self.container.reset_use_case().execute(session_id).await?;
        Ok(format!(
            "Starting over.\n\n{}",
            ChatTurnUseCase::greeting()
        ))
    }
}
