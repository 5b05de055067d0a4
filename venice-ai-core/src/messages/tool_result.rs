//! Tool result messages and output unions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::content::FileData;
use crate::metadata::ProviderOptions;

/// One tool result inside a tool message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResultPart {
    /// Identifier of the tool call this result answers.
    pub tool_call_id: String,
    /// Name of the tool that produced the result.
    pub tool_name: String,
    /// The tool's output.
    pub output: ToolOutput,
    /// Provider-scoped metadata for this part.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_options: Option<ProviderOptions>,
}

impl ToolResultPart {
    /// Create a new tool result part.
    #[must_use]
    pub fn new(
        tool_call_id: impl Into<String>,
        tool_name: impl Into<String>,
        output: ToolOutput,
    ) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            tool_name: tool_name.into(),
            output,
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

/// Output of a tool execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", content = "value")]
pub enum ToolOutput {
    /// Plain text output, passed through verbatim.
    Text(String),
    /// Structured JSON output, serialized onto the wire.
    Json(Value),
    /// Error described as text, passed through verbatim.
    ErrorText(String),
    /// Error described as JSON, serialized onto the wire.
    ErrorJson(Value),
    /// Rich output mixing text and media parts.
    Content(Vec<ToolResultContentPart>),
}

impl ToolOutput {
    /// Create plain text output.
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Create JSON output.
    #[must_use]
    pub fn json(value: Value) -> Self {
        Self::Json(value)
    }

    /// Create an error-text output.
    #[must_use]
    pub fn error_text(s: impl Into<String>) -> Self {
        Self::ErrorText(s.into())
    }

    /// Check whether this output is one of the error kinds.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::ErrorText(_) | Self::ErrorJson(_))
    }
}

/// Part of a rich (`content`-typed) tool output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolResultContentPart {
    /// Text fragment.
    Text {
        /// The text.
        text: String,
    },
    /// Media fragment (image, audio, video).
    Media {
        /// The media payload.
        #[serde(flatten)]
        data: FileData,
        /// IANA media type of the payload.
        media_type: String,
    },
}

impl ToolResultContentPart {
    /// Create a text fragment.
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text { text: s.into() }
    }

    /// Create a media fragment.
    #[must_use]
    pub fn media(data: FileData, media_type: impl Into<String>) -> Self {
        Self::Media {
            data,
            media_type: media_type.into(),
        }
    }

    /// Check whether this fragment is media.
    #[must_use]
    pub fn is_media(&self) -> bool {
        matches!(self, Self::Media { .. })
    }
}
