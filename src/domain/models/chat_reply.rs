use serde::{Deserialize, Serialize};

use super::BuildResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    Question,
    Confirmation,
    Build,
    Error,
}

impl ReplyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplyKind::Question => "question",
            ReplyKind::Confirmation => "confirmation",
            ReplyKind::Build => "build",
            ReplyKind::Error => "error",
        }
    }
}

/// One assistant turn as shown in the chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    kind: ReplyKind,
    text: String,
    build: Option<BuildResult>,
}

impl ChatReply {
    pub fn question(text: impl Into<String>) -> Self {
        Self {
            kind: ReplyKind::Question,
            text: text.into(),
            build: None,
        }
    }

    pub fn confirmation(text: impl Into<String>) -> Self {
        Self {
            kind: ReplyKind::Confirmation,
            text: text.into(),
            build: None,
        }
    }

    pub fn build(text: impl Into<String>, build: BuildResult) -> Self {
        Self {
            kind: ReplyKind::Build,
            text: text.into(),
            build: Some(build),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: ReplyKind::Error,
            text: text.into(),
            build: None,
        }
    }

    pub fn kind(&self) -> ReplyKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn build_result(&self) -> Option<&BuildResult> {
        self.build.as_ref()
    }

    pub fn is_error(&self) -> bool {
        self.kind == ReplyKind::Error
    }
}
