//! Venice API wire types.
//!
//! Request and response shapes for the Venice chat-completions endpoint.
//! Every message and content part carries a flattened `extra` map so that
//! provider-scoped metadata merges verbatim into the emitted wire object.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use venice_ai_core::{FinishReason, MetadataMap, ReasoningEffort, Usage};

use super::options::VeniceParameters;

// ============================================================================
// Request Types
// ============================================================================

/// Chat completion request body.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VeniceChatRequest {
    /// Model to use.
    pub model: String,
    /// Messages in the conversation.
    pub messages: Vec<VeniceMessage>,
    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Minimum temperature for dynamic temperature scaling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_temp: Option<f64>,
    /// Maximum temperature for dynamic temperature scaling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_temp: Option<f64>,
    /// Nucleus sampling parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    /// Top-k sampling parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u64>,
    /// Minimum probability threshold for token selection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_p: Option<f64>,
    /// Maximum tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u64>,
    /// Upper bound for completion tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_completion_tokens: Option<u64>,
    /// Frequency penalty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,
    /// Presence penalty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,
    /// Repetition penalty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repetition_penalty: Option<f64>,
    /// Stop sequences.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
    /// Token ids at which generation stops.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_token_ids: Option<Vec<u64>>,
    /// Random seed for reproducibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Reasoning effort level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning_effort: Option<ReasoningEffort>,
    /// Whether to include log probabilities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logprobs: Option<bool>,
    /// Number of top log probabilities per token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_logprobs: Option<u32>,
    /// End-user identifier (accepted for compatibility).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Response format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<VeniceResponseFormat>,
    /// Tool definitions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<VeniceTool>>,
    /// Tool choice strategy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<VeniceToolChoice>,
    /// Whether to allow parallel tool calls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallel_tool_calls: Option<bool>,
    /// Whether to stream the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    /// Stream options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_options: Option<VeniceStreamOptions>,
    /// Venice-specific extension parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venice_parameters: Option<VeniceParameters>,
}

/// Wire message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VeniceMessage {
    /// Role of the message author.
    pub role: String,
    /// Message content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<VeniceMessageContent>,
    /// Tool calls made by the assistant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<VeniceToolCall>>,
    /// Id of the tool call being answered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    /// Message-level metadata merged verbatim onto the envelope.
    #[serde(flatten)]
    pub extra: MetadataMap,
}

impl VeniceMessage {
    /// Create a message with a role and content.
    #[must_use]
    pub fn new(role: impl Into<String>, content: VeniceMessageContent) -> Self {
        Self {
            role: role.into(),
            content: Some(content),
            tool_calls: None,
            tool_call_id: None,
            extra: MetadataMap::new(),
        }
    }

    /// Create a user message with bare string content.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", VeniceMessageContent::Text(content.into()))
    }

    /// Create a tool message answering a tool call.
    #[must_use]
    pub fn tool(tool_call_id: impl Into<String>, content: VeniceMessageContent) -> Self {
        Self {
            role: "tool".to_string(),
            content: Some(content),
            tool_calls: None,
            tool_call_id: Some(tool_call_id.into()),
            extra: MetadataMap::new(),
        }
    }

    /// Attach envelope metadata.
    #[must_use]
    pub fn with_extra(mut self, extra: MetadataMap) -> Self {
        self.extra = extra;
        self
    }
}

/// Message content: a bare string or an array of typed parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VeniceMessageContent {
    /// Bare string content.
    Text(String),
    /// Array-wrapped content parts.
    Parts(Vec<VeniceContentPart>),
}

/// Typed content part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VeniceContentPart {
    /// Text part.
    Text(VeniceTextPart),
    /// Image part.
    ImageUrl(VeniceImagePart),
    /// Video part.
    VideoUrl(VeniceVideoPart),
    /// Inline audio part.
    InputAudio(VeniceAudioPart),
}

impl VeniceContentPart {
    /// Create a text part.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(VeniceTextPart {
            text: text.into(),
            extra: MetadataMap::new(),
        })
    }

    /// Create an image part.
    #[must_use]
    pub fn image_url(url: impl Into<String>) -> Self {
        Self::ImageUrl(VeniceImagePart {
            image_url: VeniceUrl { url: url.into() },
            extra: MetadataMap::new(),
        })
    }

    /// Create a video part.
    #[must_use]
    pub fn video_url(url: impl Into<String>) -> Self {
        Self::VideoUrl(VeniceVideoPart {
            video_url: VeniceUrl { url: url.into() },
            extra: MetadataMap::new(),
        })
    }

    /// Create an inline audio part.
    #[must_use]
    pub fn input_audio(data: impl Into<String>, format: VeniceAudioFormat) -> Self {
        Self::InputAudio(VeniceAudioPart {
            input_audio: VeniceInputAudio {
                data: data.into(),
                format,
            },
            extra: MetadataMap::new(),
        })
    }

    /// Attach part-level metadata, merging over any existing keys.
    #[must_use]
    pub fn with_extra(mut self, extra: MetadataMap) -> Self {
        let target = match &mut self {
            Self::Text(p) => &mut p.extra,
            Self::ImageUrl(p) => &mut p.extra,
            Self::VideoUrl(p) => &mut p.extra,
            Self::InputAudio(p) => &mut p.extra,
        };
        venice_ai_core::merge_metadata(target, &extra);
        self
    }
}

/// Text content part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VeniceTextPart {
    /// The text.
    pub text: String,
    /// Part-level metadata merged verbatim onto the part.
    #[serde(flatten)]
    pub extra: MetadataMap,
}

/// Image content part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VeniceImagePart {
    /// The image URL (remote or `data:` URI).
    pub image_url: VeniceUrl,
    /// Part-level metadata.
    #[serde(flatten)]
    pub extra: MetadataMap,
}

/// Video content part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VeniceVideoPart {
    /// The video URL (remote or `data:` URI).
    pub video_url: VeniceUrl,
    /// Part-level metadata.
    #[serde(flatten)]
    pub extra: MetadataMap,
}

/// Inline audio content part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VeniceAudioPart {
    /// The audio payload.
    pub input_audio: VeniceInputAudio,
    /// Part-level metadata.
    #[serde(flatten)]
    pub extra: MetadataMap,
}

/// A URL wrapper object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VeniceUrl {
    /// The URL.
    pub url: String,
}

/// Inline audio payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VeniceInputAudio {
    /// Base64-encoded audio bytes.
    pub data: String,
    /// Audio container format.
    pub format: VeniceAudioFormat,
}

/// Audio container format codes accepted by the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VeniceAudioFormat {
    /// WAV audio.
    Wav,
    /// MP3 audio.
    Mp3,
    /// AIFF audio.
    Aiff,
    /// AAC audio.
    Aac,
    /// Ogg audio.
    Ogg,
    /// FLAC audio.
    Flac,
    /// M4A audio.
    M4a,
    /// Raw PCM audio.
    Pcm,
}

impl VeniceAudioFormat {
    /// Resolve a MIME type to a format code. Unrecognized types default to
    /// WAV rather than failing.
    #[must_use]
    pub fn from_media_type(media_type: &str) -> Self {
        match media_type.to_ascii_lowercase().as_str() {
            "audio/mpeg" | "audio/mp3" => Self::Mp3,
            "audio/aiff" | "audio/x-aiff" => Self::Aiff,
            "audio/aac" => Self::Aac,
            "audio/ogg" => Self::Ogg,
            "audio/flac" | "audio/x-flac" => Self::Flac,
            "audio/m4a" | "audio/mp4" => Self::M4a,
            "audio/pcm" | "audio/l16" => Self::Pcm,
            _ => Self::Wav,
        }
    }
}

/// Normalize a video media type against the wire's container allow-list.
///
/// The wildcard `video/*` defaults to MP4; anything outside the allow-list
/// is rejected with `None`.
#[must_use]
pub fn normalize_video_media_type(media_type: &str) -> Option<&'static str> {
    match media_type.to_ascii_lowercase().as_str() {
        "video/mp4" | "video/*" => Some("video/mp4"),
        "video/mpeg" => Some("video/mpeg"),
        "video/quicktime" | "video/mov" => Some("video/quicktime"),
        "video/webm" => Some("video/webm"),
        _ => None,
    }
}

/// Tool definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VeniceTool {
    /// Tool type (always "function").
    #[serde(rename = "type")]
    pub tool_type: String,
    /// Function definition.
    pub function: VeniceFunctionDefinition,
}

impl VeniceTool {
    /// Create a function tool.
    #[must_use]
    pub fn function(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: JsonValue,
        strict: Option<bool>,
    ) -> Self {
        Self {
            tool_type: "function".to_string(),
            function: VeniceFunctionDefinition {
                name: name.into(),
                description: description.into(),
                parameters,
                strict,
            },
        }
    }
}

/// Function definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VeniceFunctionDefinition {
    /// Function name.
    pub name: String,
    /// Function description.
    pub description: String,
    /// Parameter JSON schema.
    pub parameters: JsonValue,
    /// Whether to use strict mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
}

/// A tool call on an assistant wire message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VeniceToolCall {
    /// Tool call id.
    pub id: String,
    /// Tool type (always "function").
    #[serde(rename = "type")]
    pub tool_type: String,
    /// The function invocation.
    pub function: VeniceFunctionCall,
    /// Part-level metadata.
    #[serde(flatten)]
    pub extra: MetadataMap,
}

impl VeniceToolCall {
    /// Create a function tool call.
    #[must_use]
    pub fn function(id: impl Into<String>, name: impl Into<String>, arguments: String) -> Self {
        Self {
            id: id.into(),
            tool_type: "function".to_string(),
            function: VeniceFunctionCall {
                name: name.into(),
                arguments,
            },
            extra: MetadataMap::new(),
        }
    }
}

/// Function call payload: name plus string-encoded arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VeniceFunctionCall {
    /// Function name.
    pub name: String,
    /// Arguments as a JSON string.
    pub arguments: String,
}

/// Tool choice directive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VeniceToolChoice {
    /// String choice: auto, none, required.
    Mode(String),
    /// A specific function.
    Function {
        /// Choice type (always "function").
        #[serde(rename = "type")]
        choice_type: String,
        /// The named function.
        function: VeniceFunctionName,
    },
}

impl VeniceToolChoice {
    /// Auto mode.
    #[must_use]
    pub fn auto() -> Self {
        Self::Mode("auto".to_string())
    }

    /// None mode.
    #[must_use]
    pub fn none() -> Self {
        Self::Mode("none".to_string())
    }

    /// Required mode.
    #[must_use]
    pub fn required() -> Self {
        Self::Mode("required".to_string())
    }

    /// A specific named function.
    #[must_use]
    pub fn function(name: impl Into<String>) -> Self {
        Self::Function {
            choice_type: "function".to_string(),
            function: VeniceFunctionName { name: name.into() },
        }
    }
}

/// Function name wrapper for tool choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VeniceFunctionName {
    /// The function name.
    pub name: String,
}

/// Response format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VeniceResponseFormat {
    /// Format type: json_object or json_schema.
    #[serde(rename = "type")]
    pub format_type: String,
    /// Schema payload for json_schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_schema: Option<VeniceJsonSchema>,
}

impl VeniceResponseFormat {
    /// JSON object format.
    #[must_use]
    pub fn json_object() -> Self {
        Self {
            format_type: "json_object".to_string(),
            json_schema: None,
        }
    }

    /// JSON schema format.
    #[must_use]
    pub fn json_schema(
        name: impl Into<String>,
        description: Option<String>,
        schema: JsonValue,
        strict: Option<bool>,
    ) -> Self {
        Self {
            format_type: "json_schema".to_string(),
            json_schema: Some(VeniceJsonSchema {
                name: name.into(),
                description,
                schema,
                strict,
            }),
        }
    }
}

/// Embedded JSON schema for structured output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VeniceJsonSchema {
    /// Schema name.
    pub name: String,
    /// Schema description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The JSON schema.
    pub schema: JsonValue,
    /// Whether to enforce strictly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
}

/// Stream options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VeniceStreamOptions {
    /// Include usage in the final stream chunk.
    pub include_usage: bool,
}

// ============================================================================
// Response Types
// ============================================================================

/// Chat completion response body.
#[derive(Debug, Clone, Deserialize)]
pub struct VeniceChatResponse {
    /// Response id.
    pub id: Option<String>,
    /// Creation timestamp (seconds since epoch).
    pub created: Option<u64>,
    /// Model used.
    pub model: Option<String>,
    /// Response choices.
    pub choices: Vec<VeniceChoice>,
    /// Token usage.
    pub usage: Option<VeniceUsage>,
}

/// One response choice.
#[derive(Debug, Clone, Deserialize)]
pub struct VeniceChoice {
    /// The assistant message.
    pub message: VeniceResponseMessage,
    /// Why generation stopped.
    pub finish_reason: Option<String>,
}

/// Assistant message in a response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VeniceResponseMessage {
    /// Visible text content.
    pub content: Option<String>,
    /// Reasoning trace (primary field name).
    pub reasoning_content: Option<String>,
    /// Reasoning trace (alternate field name, lower priority).
    pub reasoning: Option<String>,
    /// Tool calls.
    pub tool_calls: Option<Vec<VeniceResponseToolCall>>,
}

/// A tool call in a response.
#[derive(Debug, Clone, Deserialize)]
pub struct VeniceResponseToolCall {
    /// Tool call id (generated locally when absent).
    pub id: Option<String>,
    /// The function invocation.
    pub function: VeniceFunctionCall,
    /// Vendor side-channel metadata.
    pub extra_content: Option<VeniceExtraContent>,
}

/// Vendor side-channel metadata on a tool call.
#[derive(Debug, Clone, Deserialize)]
pub struct VeniceExtraContent {
    /// Google-specific metadata.
    pub google: Option<VeniceGoogleExtraContent>,
}

/// Google-specific side-channel metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct VeniceGoogleExtraContent {
    /// Opaque token tied to a reasoning trace.
    pub thought_signature: Option<String>,
}

impl VeniceExtraContent {
    /// Extract the thought signature, if any.
    #[must_use]
    pub fn thought_signature(&self) -> Option<&str> {
        self.google
            .as_ref()
            .and_then(|g| g.thought_signature.as_deref())
    }
}

/// Token usage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VeniceUsage {
    /// Prompt tokens.
    pub prompt_tokens: Option<u64>,
    /// Completion tokens.
    pub completion_tokens: Option<u64>,
    /// Total tokens.
    pub total_tokens: Option<u64>,
    /// Prompt token sub-counts.
    pub prompt_tokens_details: Option<VenicePromptTokensDetails>,
}

/// Prompt token sub-counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VenicePromptTokensDetails {
    /// Tokens read from cache.
    pub cached_tokens: Option<u64>,
    /// Tokens written to cache.
    pub cache_creation_input_tokens: Option<u64>,
}

/// Convert wire usage into the abstract shape.
///
/// Total absence yields the explicit empty usage object.
#[must_use]
pub fn convert_usage(usage: Option<&VeniceUsage>) -> Usage {
    let Some(usage) = usage else {
        return Usage::empty();
    };
    let details = usage.prompt_tokens_details.as_ref();
    let cache_creation = details
        .and_then(|d| d.cache_creation_input_tokens)
        .filter(|&tokens| tokens > 0);
    Usage {
        input_tokens: usage.prompt_tokens,
        output_tokens: usage.completion_tokens,
        total_tokens: usage.total_tokens,
        cache_read_tokens: details.and_then(|d| d.cached_tokens),
        cache_creation_tokens: cache_creation,
    }
}

/// Map a wire finish-reason string to the abstract enumeration.
#[must_use]
pub fn map_finish_reason(reason: &str) -> FinishReason {
    match reason {
        "stop" => FinishReason::Stop,
        "length" => FinishReason::Length,
        "content_filter" => FinishReason::ContentFilter,
        "tool_calls" | "function_call" => FinishReason::ToolCalls,
        "error" => FinishReason::Error,
        _ => FinishReason::Other,
    }
}

// ============================================================================
// Streaming Types
// ============================================================================

/// Streamed chat completion chunk.
#[derive(Debug, Clone, Deserialize)]
pub struct VeniceChatChunk {
    /// Response id.
    pub id: Option<String>,
    /// Creation timestamp (seconds since epoch).
    pub created: Option<u64>,
    /// Model used.
    pub model: Option<String>,
    /// Chunk choices.
    #[serde(default)]
    pub choices: Vec<VeniceChunkChoice>,
    /// Usage (on the final chunk when stream_options.include_usage is set).
    pub usage: Option<VeniceUsage>,
    /// Inline error payload.
    pub error: Option<VeniceErrorBody>,
}

/// One chunk choice.
#[derive(Debug, Clone, Deserialize)]
pub struct VeniceChunkChoice {
    /// Incremental delta.
    pub delta: Option<VeniceChunkDelta>,
    /// Why generation stopped.
    pub finish_reason: Option<String>,
}

/// Incremental delta in a chunk.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VeniceChunkDelta {
    /// Visible text delta.
    pub content: Option<String>,
    /// Reasoning delta (primary field name).
    pub reasoning_content: Option<String>,
    /// Reasoning delta (alternate field name, lower priority).
    pub reasoning: Option<String>,
    /// Tool call deltas.
    pub tool_calls: Option<Vec<VeniceChunkToolCall>>,
}

/// A tool call delta in a chunk.
#[derive(Debug, Clone, Deserialize)]
pub struct VeniceChunkToolCall {
    /// Position of the call in the response (defaults to next available).
    pub index: Option<u32>,
    /// Tool call id (required on the first delta for an index).
    pub id: Option<String>,
    /// Function delta.
    pub function: Option<VeniceChunkFunction>,
    /// Vendor side-channel metadata.
    pub extra_content: Option<VeniceExtraContent>,
}

/// Function fields in a tool call delta.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VeniceChunkFunction {
    /// Function name (required on the first delta for an index).
    pub name: Option<String>,
    /// Argument fragment.
    pub arguments: Option<String>,
}

// ============================================================================
// Error Types
// ============================================================================

/// API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct VeniceErrorResponse {
    /// Error details.
    pub error: VeniceErrorBody,
}

/// API error details.
#[derive(Debug, Clone, Deserialize)]
pub struct VeniceErrorBody {
    /// Error message.
    pub message: String,
    /// Error type.
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    /// Parameter that caused the error.
    pub param: Option<JsonValue>,
    /// Error code (string or number on the wire).
    pub code: Option<JsonValue>,
}

impl VeniceErrorBody {
    /// Error code normalized to a string.
    #[must_use]
    pub fn code_string(&self) -> Option<String> {
        match &self.code {
            Some(JsonValue::String(s)) => Some(s.clone()),
            Some(JsonValue::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_extra_flattens() {
        let mut extra = MetadataMap::new();
        extra.insert("character_slug".to_string(), json!("alan-watts"));
        let msg = VeniceMessage::user("hi").with_extra(extra);
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            value,
            json!({"role": "user", "content": "hi", "character_slug": "alan-watts"})
        );
    }

    #[test]
    fn test_content_part_tagging() {
        let part = VeniceContentPart::image_url("https://example.com/a.png");
        let value = serde_json::to_value(&part).unwrap();
        assert_eq!(
            value,
            json!({"type": "image_url", "image_url": {"url": "https://example.com/a.png"}})
        );
    }

    #[test]
    fn test_part_extra_merges_over_existing() {
        let mut first = MetadataMap::new();
        first.insert("detail".to_string(), json!("low"));
        let mut second = MetadataMap::new();
        second.insert("detail".to_string(), json!("high"));

        let part = VeniceContentPart::text("hi")
            .with_extra(first)
            .with_extra(second);
        let value = serde_json::to_value(&part).unwrap();
        assert_eq!(value["detail"], json!("high"));
    }

    #[test]
    fn test_audio_format_table() {
        assert_eq!(
            VeniceAudioFormat::from_media_type("audio/mpeg"),
            VeniceAudioFormat::Mp3
        );
        assert_eq!(
            VeniceAudioFormat::from_media_type("audio/flac"),
            VeniceAudioFormat::Flac
        );
        assert_eq!(
            VeniceAudioFormat::from_media_type("audio/mp4"),
            VeniceAudioFormat::M4a
        );
        // Unrecognized defaults to wav, including the wildcard.
        assert_eq!(
            VeniceAudioFormat::from_media_type("audio/*"),
            VeniceAudioFormat::Wav
        );
        assert_eq!(
            VeniceAudioFormat::from_media_type("audio/unknown"),
            VeniceAudioFormat::Wav
        );
    }

    #[test]
    fn test_video_allow_list() {
        assert_eq!(normalize_video_media_type("video/mp4"), Some("video/mp4"));
        assert_eq!(normalize_video_media_type("video/*"), Some("video/mp4"));
        assert_eq!(
            normalize_video_media_type("video/quicktime"),
            Some("video/quicktime")
        );
        assert_eq!(normalize_video_media_type("video/webm"), Some("video/webm"));
        assert_eq!(normalize_video_media_type("video/x-matroska"), None);
    }

    #[test]
    fn test_tool_choice_serialization() {
        assert_eq!(
            serde_json::to_value(VeniceToolChoice::auto()).unwrap(),
            json!("auto")
        );
        assert_eq!(
            serde_json::to_value(VeniceToolChoice::function("search")).unwrap(),
            json!({"type": "function", "function": {"name": "search"}})
        );
    }

    #[test]
    fn test_convert_usage() {
        assert_eq!(convert_usage(None), Usage::empty());

        let usage = VeniceUsage {
            prompt_tokens: Some(100),
            completion_tokens: Some(20),
            total_tokens: Some(120),
            prompt_tokens_details: Some(VenicePromptTokensDetails {
                cached_tokens: Some(30),
                cache_creation_input_tokens: Some(0),
            }),
        };
        let converted = convert_usage(Some(&usage));
        assert_eq!(converted.input_tokens, Some(100));
        assert_eq!(converted.output_tokens, Some(20));
        assert_eq!(converted.cache_read_tokens, Some(30));
        // Zero cache writes are treated as absent.
        assert_eq!(converted.cache_creation_tokens, None);
    }

    #[test]
    fn test_finish_reason_mapping() {
        assert_eq!(map_finish_reason("stop"), FinishReason::Stop);
        assert_eq!(map_finish_reason("length"), FinishReason::Length);
        assert_eq!(map_finish_reason("tool_calls"), FinishReason::ToolCalls);
        assert_eq!(map_finish_reason("function_call"), FinishReason::ToolCalls);
        assert_eq!(
            map_finish_reason("content_filter"),
            FinishReason::ContentFilter
        );
        assert_eq!(map_finish_reason("weird"), FinishReason::Other);
    }

    #[test]
    fn test_error_body_numeric_code() {
        let body: VeniceErrorResponse = serde_json::from_str(
            r#"{"error": {"message": "bad model", "type": "invalid_request_error", "code": 404}}"#,
        )
        .unwrap();
        assert_eq!(body.error.code_string(), Some("404".to_string()));
        assert_eq!(
            body.error.error_type.as_deref(),
            Some("invalid_request_error")
        );
    }

    #[test]
    fn test_deserialize_response_with_reasoning() {
        let json = r#"{
            "id": "chatcmpl-123",
            "created": 1234567890,
            "model": "qwen3-235b",
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": "Hello!",
                    "reasoning_content": "The user greeted me."
                },
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        }"#;

        let response: VeniceChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.choices.len(), 1);
        assert_eq!(
            response.choices[0].message.reasoning_content.as_deref(),
            Some("The user greeted me.")
        );
    }

    #[test]
    fn test_deserialize_chunk_with_thought_signature() {
        let json = r#"{
            "id": "chatcmpl-123",
            "created": 1234567890,
            "model": "gemini-25-pro",
            "choices": [{
                "delta": {
                    "tool_calls": [{
                        "index": 0,
                        "id": "call_1",
                        "function": {"name": "search", "arguments": "{}"},
                        "extra_content": {"google": {"thought_signature": "sig-abc"}}
                    }]
                },
                "finish_reason": null
            }]
        }"#;

        let chunk: VeniceChatChunk = serde_json::from_str(json).unwrap();
        let delta = chunk.choices[0].delta.as_ref().unwrap();
        let tc = &delta.tool_calls.as_ref().unwrap()[0];
        assert_eq!(
            tc.extra_content.as_ref().unwrap().thought_signature(),
            Some("sig-abc")
        );
    }
}
