//! Shared content parts.
//!
//! These parts appear in assistant prompt messages and in model responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::metadata::ProviderOptions;

/// A text content part.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextPart {
    /// The text content.
    pub text: String,
    /// Provider-scoped metadata for this part.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_options: Option<ProviderOptions>,
}

impl TextPart {
    /// Create a new text part.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
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

impl From<&str> for TextPart {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TextPart {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// A reasoning (chain-of-thought) part.
///
/// Reasoning text is never concatenated into visible assistant text when a
/// prompt is converted back to the wire format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReasoningPart {
    /// The reasoning text.
    pub text: String,
    /// Provider-scoped metadata for this part.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_options: Option<ProviderOptions>,
}

impl ReasoningPart {
    /// Create a new reasoning part.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
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

/// A tool invocation, either requested by the model or replayed in an
/// assistant history message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallPart {
    /// Identifier correlating this call with its result.
    pub tool_call_id: String,
    /// Name of the tool being invoked.
    pub tool_name: String,
    /// Input payload for the tool.
    pub input: Value,
    /// Provider-scoped metadata for this part.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_options: Option<ProviderOptions>,
}

impl ToolCallPart {
    /// Create a new tool call part.
    #[must_use]
    pub fn new(
        tool_call_id: impl Into<String>,
        tool_name: impl Into<String>,
        input: Value,
    ) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            tool_name: tool_name.into(),
            input,
            provider_options: None,
        }
    }

    /// Attach provider options.
    #[must_use]
    pub fn with_provider_options(mut self, options: ProviderOptions) -> Self {
        self.provider_options = Some(options);
        self
    }

    /// The input payload serialized as a JSON string.
    #[must_use]
    pub fn input_json(&self) -> String {
        self.input.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_part_from_str() {
        let part = TextPart::from("hello");
        assert_eq!(part.text, "hello");
        assert!(part.provider_options.is_none());
    }

    #[test]
    fn test_tool_call_input_json() {
        let part = ToolCallPart::new("call_1", "search", json!({"q": "rust"}));
        assert_eq!(part.input_json(), r#"{"q":"rust"}"#);
    }
}
