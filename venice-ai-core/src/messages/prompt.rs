//! Abstract prompt messages.
//!
//! A [`Prompt`] is an ordered sequence of role-tagged [`Message`]s. The role
//! union is closed: converters dispatch with an exhaustive match and fail
//! loudly on content they cannot represent.

use serde::{Deserialize, Serialize};

use super::content::UserContent;
use super::parts::{ReasoningPart, TextPart, ToolCallPart};
use super::tool_result::ToolResultPart;
use crate::metadata::ProviderOptions;

/// An ordered conversation prompt.
pub type Prompt = Vec<Message>;

/// A single conversation message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Message {
    /// System instructions.
    System(SystemMessage),
    /// User turn.
    User(UserMessage),
    /// Assistant turn.
    Assistant(AssistantMessage),
    /// Tool results turn.
    Tool(ToolMessage),
}

impl Message {
    /// Create a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::System(SystemMessage::new(content))
    }

    /// Create a user message.
    #[must_use]
    pub fn user(content: impl Into<UserContent>) -> Self {
        Self::User(UserMessage::new(content))
    }

    /// Create an assistant message.
    #[must_use]
    pub fn assistant(content: Vec<AssistantContentPart>) -> Self {
        Self::Assistant(AssistantMessage::new(content))
    }

    /// Create a tool message.
    #[must_use]
    pub fn tool(content: Vec<ToolResultPart>) -> Self {
        Self::Tool(ToolMessage::new(content))
    }

    /// Message-level provider options, if any.
    #[must_use]
    pub fn provider_options(&self) -> Option<&ProviderOptions> {
        match self {
            Self::System(m) => m.provider_options.as_ref(),
            Self::User(m) => m.provider_options.as_ref(),
            Self::Assistant(m) => m.provider_options.as_ref(),
            Self::Tool(m) => m.provider_options.as_ref(),
        }
    }
}

/// System instructions message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemMessage {
    /// Plain text instructions.
    pub content: String,
    /// Provider-scoped metadata for this message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_options: Option<ProviderOptions>,
}

impl SystemMessage {
    /// Create a new system message.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            provider_options: None,
        }
    }

    /// Attach provider options.
    #[must_use]
    pub fn with_provider_options(mut self, options: ProviderOptions) -> Self {
        self.provider_options = Some(options);
        self
    }
}

/// User turn message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserMessage {
    /// The message content.
    pub content: UserContent,
    /// Provider-scoped metadata for this message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_options: Option<ProviderOptions>,
}

impl UserMessage {
    /// Create a new user message.
    #[must_use]
    pub fn new(content: impl Into<UserContent>) -> Self {
        Self {
            content: content.into(),
            provider_options: None,
        }
    }

    /// Attach provider options.
    #[must_use]
    pub fn with_provider_options(mut self, options: ProviderOptions) -> Self {
        self.provider_options = Some(options);
        self
    }
}

/// Assistant turn message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssistantMessage {
    /// The ordered content parts of the turn.
    pub content: Vec<AssistantContentPart>,
    /// Provider-scoped metadata for this message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_options: Option<ProviderOptions>,
}

impl AssistantMessage {
    /// Create a new assistant message.
    #[must_use]
    pub fn new(content: Vec<AssistantContentPart>) -> Self {
        Self {
            content,
            provider_options: None,
        }
    }

    /// Create an assistant message holding a single text part.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(vec![AssistantContentPart::Text(TextPart::new(text))])
    }

    /// Attach provider options.
    #[must_use]
    pub fn with_provider_options(mut self, options: ProviderOptions) -> Self {
        self.provider_options = Some(options);
        self
    }
}

/// Content part of an assistant turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssistantContentPart {
    /// Visible text.
    Text(TextPart),
    /// Reasoning trace (not replayed as visible text).
    Reasoning(ReasoningPart),
    /// Tool invocation.
    ToolCall(ToolCallPart),
}

/// Tool results turn message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolMessage {
    /// The tool results of the turn.
    pub content: Vec<ToolResultPart>,
    /// Provider-scoped metadata for this message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_options: Option<ProviderOptions>,
}

impl ToolMessage {
    /// Create a new tool message.
    #[must_use]
    pub fn new(content: Vec<ToolResultPart>) -> Self {
        Self {
            content,
            provider_options: None,
        }
    }

    /// Attach provider options.
    #[must_use]
    pub fn with_provider_options(mut self, options: ProviderOptions) -> Self {
        self.provider_options = Some(options);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_tagging() {
        let msg = Message::system("be nice");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains(r#""role":"system""#));

        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn test_provider_options_accessor() {
        let options = ProviderOptions::new()
            .with_namespace("venice", serde_json::Map::new());
        let msg = Message::User(UserMessage::new("hi").with_provider_options(options.clone()));
        assert_eq!(msg.provider_options(), Some(&options));
        assert_eq!(Message::system("x").provider_options(), None);
    }
}
