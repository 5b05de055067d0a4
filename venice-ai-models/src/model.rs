//! Core model trait and request parameters.

use async_trait::async_trait;
use futures::Stream;
use serde_json::Value;
use std::pin::Pin;
use std::sync::Arc;

use venice_ai_core::{ChatStreamEvent, ModelResponse, ModelSettings, Prompt, ToolDefinition};

use crate::error::ModelError;
use crate::profile::ModelProfile;

/// Parameters for a model request.
#[derive(Debug, Clone, Default)]
pub struct ModelRequestParameters {
    /// Tool definitions to include (Arc to avoid cloning on every step).
    pub tools: Arc<Vec<ToolDefinition>>,
    /// Tool choice strategy.
    pub tool_choice: Option<ToolChoice>,
    /// Requested response format.
    pub response_format: Option<ResponseFormat>,
    /// Whether to include usage in streaming responses.
    pub stream_usage: bool,
}

impl ModelRequestParameters {
    /// Create new empty parameters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stream_usage: true,
            ..Self::default()
        }
    }

    /// Add tool definitions.
    #[must_use]
    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = Arc::new(tools);
        self
    }

    /// Set tool choice.
    #[must_use]
    pub fn with_tool_choice(mut self, choice: ToolChoice) -> Self {
        self.tool_choice = Some(choice);
        self
    }

    /// Set the response format.
    #[must_use]
    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = Some(format);
        self
    }

    /// Set whether usage is included in streaming responses.
    #[must_use]
    pub fn with_stream_usage(mut self, include: bool) -> Self {
        self.stream_usage = include;
        self
    }
}

/// Tool choice strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ToolChoice {
    /// Model decides whether to call tools.
    #[default]
    Auto,
    /// Model must call at least one tool.
    Required,
    /// Model should not call any tools.
    None,
    /// Model must call a specific tool.
    Specific(String),
}

/// Requested response format.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseFormat {
    /// Any syntactically valid JSON object.
    JsonObject,
    /// JSON constrained by a schema.
    JsonSchema {
        /// Schema name.
        name: String,
        /// Schema description.
        description: Option<String>,
        /// The JSON schema.
        schema: Value,
        /// Whether to enforce the schema strictly.
        strict: Option<bool>,
    },
}

/// Non-fatal warning produced while mapping tool declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolWarning {
    /// A tool definition could not be represented and was dropped.
    Unsupported {
        /// Name of the dropped tool.
        name: String,
        /// Why it was dropped.
        reason: String,
    },
}

/// Type alias for a streaming response.
pub type ChatStream = Pin<Box<dyn Stream<Item = Result<ChatStreamEvent, ModelError>> + Send>>;

/// Core model trait.
#[async_trait]
pub trait Model: Send + Sync {
    /// Get the model name.
    fn name(&self) -> &str;

    /// Get the model system/provider.
    fn system(&self) -> &str;

    /// Get the full model identifier.
    fn identifier(&self) -> String {
        format!("{}:{}", self.system(), self.name())
    }

    /// Get the model profile (capability flags).
    fn profile(&self) -> &ModelProfile;

    /// Make a request to the model.
    async fn request(
        &self,
        prompt: &Prompt,
        settings: &ModelSettings,
        params: &ModelRequestParameters,
    ) -> Result<ModelResponse, ModelError>;

    /// Make a streaming request to the model.
    async fn request_stream(
        &self,
        prompt: &Prompt,
        settings: &ModelSettings,
        params: &ModelRequestParameters,
    ) -> Result<ChatStream, ModelError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_parameters_builder() {
        let params = ModelRequestParameters::new()
            .with_tool_choice(ToolChoice::Required)
            .with_response_format(ResponseFormat::JsonObject)
            .with_stream_usage(false);

        assert_eq!(params.tool_choice, Some(ToolChoice::Required));
        assert_eq!(params.response_format, Some(ResponseFormat::JsonObject));
        assert!(!params.stream_usage);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(ToolChoice::default(), ToolChoice::Auto);
        assert!(ModelRequestParameters::new().stream_usage);
    }
}
