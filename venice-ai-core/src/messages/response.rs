//! Model response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::parts::{ReasoningPart, TextPart, ToolCallPart};
use crate::metadata::ProviderOptions;
use crate::usage::Usage;

/// A complete (non-streamed) model response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelResponse {
    /// The ordered content parts of the response.
    pub content: Vec<ResponsePart>,
    /// Why generation stopped, if reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,
    /// Token usage for the exchange.
    pub usage: Usage,
    /// Model name reported by the provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    /// Provider-assigned response id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
    /// When the response was received.
    pub timestamp: DateTime<Utc>,
    /// Provider-scoped response metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_metadata: Option<ProviderOptions>,
}

impl ModelResponse {
    /// Create an empty response stamped with the current time.
    #[must_use]
    pub fn new() -> Self {
        Self {
            content: Vec::new(),
            finish_reason: None,
            usage: Usage::empty(),
            model_name: None,
            vendor_id: None,
            timestamp: Utc::now(),
            provider_metadata: None,
        }
    }

    /// All visible text parts concatenated.
    #[must_use]
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .filter_map(|part| match part {
                ResponsePart::Text(t) => Some(t.text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// The tool calls requested by the response.
    #[must_use]
    pub fn tool_calls(&self) -> Vec<&ToolCallPart> {
        self.content
            .iter()
            .filter_map(|part| match part {
                ResponsePart::ToolCall(tc) => Some(tc),
                _ => None,
            })
            .collect()
    }
}

impl Default for ModelResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Content part of a model response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponsePart {
    /// Visible text.
    Text(TextPart),
    /// Reasoning trace.
    Reasoning(ReasoningPart),
    /// Tool invocation request.
    ToolCall(ToolCallPart),
}

/// Why generation stopped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FinishReason {
    /// Natural stop.
    Stop,
    /// Token limit reached.
    Length,
    /// Content filter triggered.
    ContentFilter,
    /// The model requested tool calls.
    ToolCalls,
    /// The stream or response reported an error.
    Error,
    /// Unknown or not yet determined.
    #[default]
    Other,
}
