//! Streaming lifecycle events.
//!
//! A streamed response is reduced into the discrete events below. Ordering
//! invariants upheld by producers:
//!
//! - a `*Start` always precedes its `*Delta`s, which precede the `*End`;
//! - the reasoning channel is closed before text or tool input opens;
//! - `ToolInputEnd` immediately precedes its `ToolCall`;
//! - exactly one `Finish` is emitted, always last.

use serde::{Deserialize, Serialize};

use super::response::FinishReason;
use crate::metadata::ProviderOptions;
use crate::usage::Usage;

/// One event of a streamed chat response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ChatStreamEvent {
    /// Response envelope data from the first structured chunk.
    ResponseMetadata {
        /// Provider-assigned response id.
        id: Option<String>,
        /// Model that is generating.
        model: Option<String>,
        /// Creation timestamp (seconds since epoch).
        created: Option<u64>,
    },
    /// The visible text channel opened.
    TextStart {
        /// Channel id.
        id: String,
    },
    /// A visible text fragment.
    TextDelta {
        /// Channel id.
        id: String,
        /// The new fragment.
        delta: String,
    },
    /// The visible text channel closed.
    TextEnd {
        /// Channel id.
        id: String,
    },
    /// The reasoning channel opened.
    ReasoningStart {
        /// Channel id.
        id: String,
    },
    /// A reasoning fragment.
    ReasoningDelta {
        /// Channel id.
        id: String,
        /// The new fragment.
        delta: String,
    },
    /// The reasoning channel closed.
    ReasoningEnd {
        /// Channel id.
        id: String,
    },
    /// A tool call started receiving input.
    ToolInputStart {
        /// The tool call id.
        id: String,
        /// Name of the tool being invoked.
        tool_name: String,
    },
    /// A fragment of tool input arrived.
    ToolInputDelta {
        /// The tool call id.
        id: String,
        /// The new argument fragment.
        delta: String,
    },
    /// A tool call's input is complete.
    ToolInputEnd {
        /// The tool call id.
        id: String,
    },
    /// A fully assembled tool call.
    ToolCall {
        /// The tool call id.
        tool_call_id: String,
        /// Name of the tool being invoked.
        tool_name: String,
        /// Accumulated argument text (JSON when the stream was well formed).
        input: String,
        /// Provider-scoped metadata (e.g. a thought signature).
        #[serde(skip_serializing_if = "Option::is_none")]
        provider_metadata: Option<ProviderOptions>,
    },
    /// An in-band stream error. The stream keeps its shape: a `Finish` with
    /// an error finish reason still follows.
    Error {
        /// Human-readable description.
        message: String,
    },
    /// Terminal event.
    Finish {
        /// Final finish reason.
        finish_reason: FinishReason,
        /// Final usage conversion.
        usage: Usage,
        /// Accumulated provider metadata.
        #[serde(skip_serializing_if = "Option::is_none")]
        provider_metadata: Option<ProviderOptions>,
    },
}

impl ChatStreamEvent {
    /// Create a text delta event.
    #[must_use]
    pub fn text_delta(id: impl Into<String>, delta: impl Into<String>) -> Self {
        Self::TextDelta {
            id: id.into(),
            delta: delta.into(),
        }
    }

    /// Create a reasoning delta event.
    #[must_use]
    pub fn reasoning_delta(id: impl Into<String>, delta: impl Into<String>) -> Self {
        Self::ReasoningDelta {
            id: id.into(),
            delta: delta.into(),
        }
    }

    /// Create a tool input delta event.
    #[must_use]
    pub fn tool_input_delta(id: impl Into<String>, delta: impl Into<String>) -> Self {
        Self::ToolInputDelta {
            id: id.into(),
            delta: delta.into(),
        }
    }

    /// Check if this is the terminal event.
    #[must_use]
    pub fn is_finish(&self) -> bool {
        matches!(self, Self::Finish { .. })
    }

    /// Check if this is an in-band error event.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_tagging() {
        let event = ChatStreamEvent::text_delta("text-0", "Hello");
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"text-delta""#));
        let back: ChatStreamEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_predicates() {
        let finish = ChatStreamEvent::Finish {
            finish_reason: FinishReason::Stop,
            usage: Usage::empty(),
            provider_metadata: None,
        };
        assert!(finish.is_finish());
        assert!(!finish.is_error());
    }
}
