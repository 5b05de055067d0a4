//! Venice chat-completions model implementation.

use super::stream::VeniceStreamParser;
use super::types::*;
use super::{API_KEY_ENV, DEFAULT_BASE_URL};
use crate::error::ModelError;
use crate::model::{ChatStream, Model, ModelRequestParameters, ResponseFormat, ToolChoice, ToolWarning};
use crate::profile::{profile_for_model, ModelProfile};
use async_trait::async_trait;
use base64::Engine;
use chrono::Utc;
use reqwest::header::HeaderMap;
use reqwest::Client;
use serde_json::Value as JsonValue;
use std::time::Duration;

use venice_ai_core::messages::{
    AssistantContentPart, AssistantMessage, FileData, Message, ModelResponse, Prompt,
    ReasoningPart, ResponsePart, TextPart, ToolCallPart, ToolMessage, ToolOutput,
    ToolResultContentPart, UserContentPart, UserMessage,
};
use venice_ai_core::{
    merge_metadata, MetadataMap, ModelSettings, ProviderOptions, ToolDefinition,
};

use super::options::VeniceParameters;

/// Venice chat-completions model.
#[derive(Debug, Clone)]
pub struct VeniceChatModel {
    model_name: String,
    client: Client,
    api_key: String,
    base_url: String,
    profile: ModelProfile,
    venice_parameters: Option<VeniceParameters>,
    default_timeout: Duration,
}

impl VeniceChatModel {
    /// Create a new Venice chat model.
    pub fn new(model_name: impl Into<String>, api_key: impl Into<String>) -> Self {
        let model_name = model_name.into();
        let profile = profile_for_model(&model_name);

        Self {
            model_name,
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            profile,
            venice_parameters: None,
            default_timeout: Duration::from_secs(120),
        }
    }

    /// Create from the `VENICE_API_KEY` environment variable.
    pub fn from_env(model_name: impl Into<String>) -> Result<Self, ModelError> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| {
            ModelError::Configuration(format!("{API_KEY_ENV} environment variable not set"))
        })?;
        Ok(Self::new(model_name, api_key))
    }

    /// Set the base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Set a custom HTTP client.
    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Set the default timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Set a custom profile.
    #[must_use]
    pub fn with_profile(mut self, profile: ModelProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Set Venice extension parameters for every request.
    #[must_use]
    pub fn with_venice_parameters(mut self, parameters: VeniceParameters) -> Self {
        self.venice_parameters = Some(parameters);
        self
    }

    /// Convert the abstract prompt to the Venice message array.
    fn convert_messages(&self, prompt: &Prompt) -> Result<Vec<VeniceMessage>, ModelError> {
        let mut messages = Vec::new();

        for message in prompt {
            match message {
                Message::System(system) => {
                    let meta = venice_metadata(system.provider_options.as_ref());
                    let content = if self.profile.requires_array_content || !meta.is_empty() {
                        VeniceMessageContent::Parts(vec![
                            VeniceContentPart::text(system.content.clone()).with_extra(meta),
                        ])
                    } else {
                        VeniceMessageContent::Text(system.content.clone())
                    };
                    messages.push(VeniceMessage::new("system", content));
                }
                Message::User(user) => {
                    messages.push(self.convert_user_message(user)?);
                }
                Message::Assistant(assistant) => {
                    if let Some(converted) = self.convert_assistant_message(assistant) {
                        messages.push(converted);
                    }
                }
                Message::Tool(tool) => {
                    self.convert_tool_message(tool, &mut messages)?;
                }
            }
        }

        Ok(messages)
    }

    fn convert_user_message(&self, user: &UserMessage) -> Result<VeniceMessage, ModelError> {
        let envelope = venice_metadata(user.provider_options.as_ref());
        let parts = user.content.to_parts();

        // A lone text part with no metadata collapses to a bare string for
        // minimal wire size.
        if !self.profile.requires_array_content && parts.len() == 1 {
            if let UserContentPart::Text(text) = &parts[0] {
                let part_meta = venice_metadata(text.provider_options.as_ref());
                if part_meta.is_empty() {
                    return Ok(VeniceMessage::new(
                        "user",
                        VeniceMessageContent::Text(text.text.clone()),
                    )
                    .with_extra(envelope));
                }
            }
        }

        let mut wire_parts = Vec::with_capacity(parts.len());
        for part in &parts {
            match part {
                UserContentPart::Text(text) => {
                    let part_meta = venice_metadata(text.provider_options.as_ref());
                    wire_parts.push(VeniceContentPart::text(text.text.clone()).with_extra(part_meta));
                }
                UserContentPart::File(file) => {
                    let part_meta = venice_metadata(file.provider_options.as_ref());
                    wire_parts.push(self.convert_file_part(&file.data, &file.media_type, part_meta)?);
                }
            }
        }

        Ok(VeniceMessage::new("user", VeniceMessageContent::Parts(wire_parts)).with_extra(envelope))
    }

    /// Convert a file payload by media-type prefix.
    fn convert_file_part(
        &self,
        data: &FileData,
        media_type: &str,
        extra: MetadataMap,
    ) -> Result<VeniceContentPart, ModelError> {
        if media_type.starts_with("image/") {
            let url = match data {
                FileData::Url { url } => url.clone(),
                FileData::Binary { data } => {
                    // The wildcard subtype has no concrete encoding to name,
                    // so a constructed data URI claims JPEG.
                    let mime = if media_type == "image/*" {
                        "image/jpeg"
                    } else {
                        media_type
                    };
                    data_uri(mime, data)
                }
            };
            return Ok(VeniceContentPart::image_url(url).with_extra(extra));
        }

        if media_type.starts_with("audio/") {
            if !self.profile.supports_rich_media {
                return Err(ModelError::not_supported(format!(
                    "audio file parts ({media_type}): only Gemini-family models accept audio input"
                )));
            }
            let FileData::Binary { data } = data else {
                return Err(ModelError::not_supported(
                    "URL-sourced audio file parts: audio must be inline base64",
                ));
            };
            let format = VeniceAudioFormat::from_media_type(media_type);
            let encoded = base64::engine::general_purpose::STANDARD.encode(data);
            return Ok(VeniceContentPart::input_audio(encoded, format).with_extra(extra));
        }

        if media_type.starts_with("video/") {
            if !self.profile.supports_rich_media {
                return Err(ModelError::not_supported(format!(
                    "video file parts ({media_type}): only Gemini-family models accept video input"
                )));
            }
            let Some(mime) = normalize_video_media_type(media_type) else {
                return Err(ModelError::not_supported(format!(
                    "file part media type {media_type}"
                )));
            };
            let url = match data {
                FileData::Url { url } => url.clone(),
                FileData::Binary { data } => data_uri(mime, data),
            };
            return Ok(VeniceContentPart::video_url(url).with_extra(extra));
        }

        Err(ModelError::not_supported(format!(
            "file part media type {media_type}"
        )))
    }

    /// Convert an assistant turn. A turn with no text and no tool calls
    /// produces no wire message at all.
    fn convert_assistant_message(&self, assistant: &AssistantMessage) -> Option<VeniceMessage> {
        let envelope = venice_metadata(assistant.provider_options.as_ref());

        let mut text = String::new();
        let mut text_meta = MetadataMap::new();
        let mut tool_calls = Vec::new();

        for part in &assistant.content {
            match part {
                AssistantContentPart::Text(t) => {
                    text.push_str(&t.text);
                    merge_metadata(&mut text_meta, &venice_metadata(t.provider_options.as_ref()));
                }
                // Reasoning is not replayed as visible text.
                AssistantContentPart::Reasoning(_) => {}
                AssistantContentPart::ToolCall(tc) => {
                    let mut call = VeniceToolCall::function(
                        tc.tool_call_id.clone(),
                        tc.tool_name.clone(),
                        tc.input_json(),
                    );
                    merge_metadata(&mut call.extra, &venice_metadata(tc.provider_options.as_ref()));
                    tool_calls.push(call);
                }
            }
        }

        if text.is_empty() && tool_calls.is_empty() {
            return None;
        }

        let content = if self.profile.requires_array_content || !text_meta.is_empty() {
            // An array-wrapped text part may not be empty; a lone newline is
            // the minimal representation when only tool calls are present.
            let repr = if text.is_empty() {
                "\n".to_string()
            } else {
                text
            };
            VeniceMessageContent::Parts(vec![VeniceContentPart::text(repr).with_extra(text_meta)])
        } else {
            VeniceMessageContent::Text(text)
        };

        let mut message = VeniceMessage::new("assistant", content).with_extra(envelope);
        if !tool_calls.is_empty() {
            message.tool_calls = Some(tool_calls);
        }
        Some(message)
    }

    /// Convert a tool turn. Media-bearing rich results are re-routed into one
    /// synthesized user message appended after the turn's tool messages.
    fn convert_tool_message(
        &self,
        tool: &ToolMessage,
        messages: &mut Vec<VeniceMessage>,
    ) -> Result<(), ModelError> {
        let envelope = venice_metadata(tool.provider_options.as_ref());
        let mut rerouted: Vec<VeniceContentPart> = Vec::new();

        for result in &tool.content {
            let part_meta = venice_metadata(result.provider_options.as_ref());

            if let ToolOutput::Content(parts) = &result.output {
                let has_media = parts.iter().any(ToolResultContentPart::is_media);
                if has_media && self.profile.supports_rich_media {
                    rerouted.push(VeniceContentPart::text(format!(
                        "[Tool Result: {}]",
                        result.tool_call_id
                    )));
                    let mut last_media = None;
                    for content_part in parts {
                        match content_part {
                            ToolResultContentPart::Text { text } => {
                                rerouted.push(VeniceContentPart::text(text.clone()));
                            }
                            ToolResultContentPart::Media { data, media_type } => {
                                rerouted.push(self.convert_file_part(
                                    data,
                                    media_type,
                                    MetadataMap::new(),
                                )?);
                                last_media = Some(rerouted.len() - 1);
                            }
                        }
                    }
                    if !part_meta.is_empty() {
                        if let Some(index) = last_media {
                            let updated = rerouted[index].clone().with_extra(part_meta);
                            rerouted[index] = updated;
                        }
                    }
                    continue;
                }
            }

            let content_value = match &result.output {
                ToolOutput::Text(s) | ToolOutput::ErrorText(s) => s.clone(),
                ToolOutput::Json(v) | ToolOutput::ErrorJson(v) => v.to_string(),
                ToolOutput::Content(parts) => serde_json::to_string(parts)?,
            };

            let content = if self.profile.requires_array_content || !part_meta.is_empty() {
                VeniceMessageContent::Parts(vec![
                    VeniceContentPart::text(content_value).with_extra(part_meta),
                ])
            } else {
                VeniceMessageContent::Text(content_value)
            };

            messages.push(
                VeniceMessage::tool(result.tool_call_id.clone(), content)
                    .with_extra(envelope.clone()),
            );
        }

        if !rerouted.is_empty() {
            messages.push(VeniceMessage::new(
                "user",
                VeniceMessageContent::Parts(rerouted),
            ));
        }

        Ok(())
    }

    /// Convert tool definitions and the tool-choice directive, collecting
    /// non-fatal warnings for definitions that cannot be represented.
    fn convert_tools(
        &self,
        tools: &[ToolDefinition],
        choice: Option<&ToolChoice>,
    ) -> (Option<Vec<VeniceTool>>, Option<VeniceToolChoice>, Vec<ToolWarning>) {
        let mut warnings = Vec::new();
        let mut wire_tools = Vec::new();

        for tool in tools {
            if !tool.parameters_json_schema.is_object() {
                warnings.push(ToolWarning::Unsupported {
                    name: tool.name.clone(),
                    reason: "parameter schema is not a JSON object".to_string(),
                });
                continue;
            }
            let strict = if self.profile.supports_strict_tools {
                tool.strict
            } else {
                None
            };
            wire_tools.push(VeniceTool::function(
                &tool.name,
                &tool.description,
                tool.parameters_json_schema.clone(),
                strict,
            ));
        }

        let tools_out = if wire_tools.is_empty() {
            None
        } else {
            Some(wire_tools)
        };
        let choice_out = choice.map(|c| match c {
            ToolChoice::Auto => VeniceToolChoice::auto(),
            ToolChoice::Required => VeniceToolChoice::required(),
            ToolChoice::None => VeniceToolChoice::none(),
            ToolChoice::Specific(name) => VeniceToolChoice::function(name),
        });

        (tools_out, choice_out, warnings)
    }

    /// Build the request body.
    fn build_request(
        &self,
        prompt: &Prompt,
        settings: &ModelSettings,
        params: &ModelRequestParameters,
        stream: bool,
    ) -> Result<VeniceChatRequest, ModelError> {
        let messages = self.convert_messages(prompt)?;
        let (tools, tool_choice, warnings) =
            self.convert_tools(&params.tools, params.tool_choice.as_ref());
        for ToolWarning::Unsupported { name, reason } in &warnings {
            tracing::warn!(tool = %name, %reason, "dropping unsupported tool definition");
        }

        let response_format = params.response_format.as_ref().map(|format| match format {
            ResponseFormat::JsonObject => VeniceResponseFormat::json_object(),
            ResponseFormat::JsonSchema {
                name,
                description,
                schema,
                strict,
            } => VeniceResponseFormat::json_schema(name, description.clone(), schema.clone(), *strict),
        });

        Ok(VeniceChatRequest {
            model: self.model_name.clone(),
            messages,
            temperature: settings.temperature,
            min_temp: settings.min_temp,
            max_temp: settings.max_temp,
            top_p: settings.top_p,
            top_k: settings.top_k,
            min_p: settings.min_p,
            max_tokens: settings.max_tokens,
            max_completion_tokens: settings.max_completion_tokens,
            frequency_penalty: settings.frequency_penalty,
            presence_penalty: settings.presence_penalty,
            repetition_penalty: settings.repetition_penalty,
            stop: settings.stop.clone(),
            stop_token_ids: settings.stop_token_ids.clone(),
            seed: settings.seed,
            reasoning_effort: settings.reasoning_effort,
            logprobs: None,
            top_logprobs: None,
            user: None,
            response_format,
            tools,
            tool_choice,
            parallel_tool_calls: settings.parallel_tool_calls,
            stream: if stream { Some(true) } else { None },
            stream_options: if stream && params.stream_usage {
                Some(VeniceStreamOptions {
                    include_usage: true,
                })
            } else {
                None
            },
            venice_parameters: self
                .venice_parameters
                .clone()
                .filter(|parameters| !parameters.is_empty()),
        })
    }

    /// Parse a complete response body into the abstract shape.
    fn parse_response(&self, resp: VeniceChatResponse) -> Result<ModelResponse, ModelError> {
        let usage = convert_usage(resp.usage.as_ref());
        let choice = resp
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ModelError::invalid_response("no choices in response"))?;

        let mut content = Vec::new();

        // Two alternate field names carry reasoning; the first wins.
        let reasoning = choice
            .message
            .reasoning_content
            .or(choice.message.reasoning);
        if let Some(reasoning) = reasoning {
            if !reasoning.is_empty() {
                content.push(ResponsePart::Reasoning(ReasoningPart::new(reasoning)));
            }
        }

        if let Some(text) = choice.message.content {
            if !text.is_empty() {
                content.push(ResponsePart::Text(TextPart::new(text)));
            }
        }

        if let Some(tool_calls) = choice.message.tool_calls {
            for tc in tool_calls {
                let id = tc.id.unwrap_or_else(generate_tool_call_id);
                let input: JsonValue = serde_json::from_str(&tc.function.arguments)
                    .unwrap_or_else(|_| JsonValue::Object(Default::default()));
                let mut part = ToolCallPart::new(id, tc.function.name, input);
                if let Some(signature) = tc
                    .extra_content
                    .as_ref()
                    .and_then(VeniceExtraContent::thought_signature)
                {
                    part = part.with_provider_options(thought_signature_metadata(signature));
                }
                content.push(ResponsePart::ToolCall(part));
            }
        }

        Ok(ModelResponse {
            content,
            finish_reason: choice.finish_reason.as_deref().map(map_finish_reason),
            usage,
            model_name: resp.model,
            vendor_id: resp.id,
            timestamp: Utc::now(),
            provider_metadata: None,
        })
    }

    fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
        headers
            .get("retry-after")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<u64>().ok())
            .map(Duration::from_secs)
    }

    /// Map a non-2xx response to a structured error.
    fn handle_error_response(&self, status: u16, body: &str, headers: &HeaderMap) -> ModelError {
        if let Ok(parsed) = serde_json::from_str::<VeniceErrorResponse>(body) {
            if status == 401 {
                return ModelError::auth(parsed.error.message);
            }
            if status == 429 {
                return ModelError::rate_limited(Self::parse_retry_after(headers));
            }
            if status == 404 {
                return ModelError::NotFound(parsed.error.message);
            }

            let code = parsed.error.code_string();
            return ModelError::Api {
                message: parsed.error.message,
                error_type: parsed.error.error_type,
                param: parsed.error.param,
                code,
            };
        }

        if status == 429 {
            return ModelError::rate_limited(Self::parse_retry_after(headers));
        }

        ModelError::http(status, body)
    }

    fn user_agent() -> String {
        format!("venice-ai/{}", env!("CARGO_PKG_VERSION"))
    }
}

/// Read the Venice metadata bag for a message or part, falling back to the
/// generic-compatible namespace.
pub(crate) fn venice_metadata(options: Option<&ProviderOptions>) -> MetadataMap {
    options
        .and_then(|o| {
            o.namespace("venice")
                .or_else(|| o.namespace("openai-compatible"))
        })
        .cloned()
        .unwrap_or_default()
}

/// Wrap a thought signature as Venice-scoped provider metadata.
pub(crate) fn thought_signature_metadata(signature: &str) -> ProviderOptions {
    let mut inner = MetadataMap::new();
    inner.insert(
        "thought_signature".to_string(),
        JsonValue::String(signature.to_string()),
    );
    ProviderOptions::new().with_namespace("venice", inner)
}

/// Generate a tool call id for wire responses that omit one.
pub(crate) fn generate_tool_call_id() -> String {
    format!("call_{}", uuid::Uuid::new_v4().simple())
}

fn data_uri(media_type: &str, data: &[u8]) -> String {
    format!(
        "data:{media_type};base64,{}",
        base64::engine::general_purpose::STANDARD.encode(data)
    )
}

#[async_trait]
impl Model for VeniceChatModel {
    fn name(&self) -> &str {
        &self.model_name
    }

    fn system(&self) -> &str {
        "venice"
    }

    fn profile(&self) -> &ModelProfile {
        &self.profile
    }

    async fn request(
        &self,
        prompt: &Prompt,
        settings: &ModelSettings,
        params: &ModelRequestParameters,
    ) -> Result<ModelResponse, ModelError> {
        let body = self.build_request(prompt, settings, params, false)?;
        let timeout = settings.timeout.unwrap_or(self.default_timeout);

        tracing::debug!(model = %self.model_name, "sending chat completion request");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("User-Agent", Self::user_agent())
            .timeout(timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let headers = response.headers().clone();
            let body = response.text().await.unwrap_or_default();
            return Err(self.handle_error_response(status, &body, &headers));
        }

        let resp: VeniceChatResponse = response
            .json()
            .await
            .map_err(|e| ModelError::invalid_response(e.to_string()))?;

        self.parse_response(resp)
    }

    async fn request_stream(
        &self,
        prompt: &Prompt,
        settings: &ModelSettings,
        params: &ModelRequestParameters,
    ) -> Result<ChatStream, ModelError> {
        let body = self.build_request(prompt, settings, params, true)?;
        let timeout = settings.timeout.unwrap_or(self.default_timeout);

        tracing::debug!(model = %self.model_name, "sending streaming chat completion request");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("User-Agent", Self::user_agent())
            .timeout(timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let headers = response.headers().clone();
            let body = response.text().await.unwrap_or_default();
            return Err(self.handle_error_response(status, &body, &headers));
        }

        let byte_stream = response.bytes_stream();
        let parser = VeniceStreamParser::new(byte_stream, &self.profile);

        Ok(Box::pin(parser))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::options::WebSearchMode;
    use crate::profile::{claude_profile, gemini_profile};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;
    use venice_ai_core::messages::{ToolResultPart, UserContent};

    fn model(name: &str) -> VeniceChatModel {
        VeniceChatModel::new(name, "vk-test-key")
    }

    fn venice_options(values: serde_json::Value) -> ProviderOptions {
        ProviderOptions::new().with_namespace("venice", values.as_object().unwrap().clone())
    }

    #[test]
    fn test_model_builder() {
        let m = model("llama-3.3-70b")
            .with_base_url("https://proxy.example.com/v1/")
            .with_timeout(Duration::from_secs(30));
        assert_eq!(m.base_url, "https://proxy.example.com/v1");
        assert_eq!(m.default_timeout, Duration::from_secs(30));
        assert_eq!(m.name(), "llama-3.3-70b");
        assert_eq!(m.system(), "venice");
    }

    #[test]
    fn test_single_text_user_message_collapses_to_string() {
        let m = model("llama-3.3-70b");
        let prompt = vec![Message::user(UserContent::parts(vec![
            UserContentPart::text("hi"),
        ]))];

        let messages = m.convert_messages(&prompt).unwrap();
        let value = serde_json::to_value(&messages).unwrap();
        assert_eq!(value, json!([{"role": "user", "content": "hi"}]));
    }

    #[test]
    fn test_claude_family_forces_array_content() {
        let m = model("claude-35-sonnet");
        let prompt = vec![Message::user("hi")];

        let messages = m.convert_messages(&prompt).unwrap();
        let value = serde_json::to_value(&messages).unwrap();
        assert_eq!(
            value,
            json!([{"role": "user", "content": [{"type": "text", "text": "hi"}]}])
        );
    }

    #[test]
    fn test_system_metadata_wraps_content_inline() {
        let m = model("llama-3.3-70b");
        let prompt = vec![Message::System(
            venice_ai_core::SystemMessage::new("be helpful")
                .with_provider_options(venice_options(json!({"foo": 1}))),
        )];

        let messages = m.convert_messages(&prompt).unwrap();
        let value = serde_json::to_value(&messages).unwrap();
        assert_eq!(
            value,
            json!([{
                "role": "system",
                "content": [{"type": "text", "text": "be helpful", "foo": 1}]
            }])
        );
    }

    #[test]
    fn test_system_without_metadata_stays_bare() {
        let m = model("llama-3.3-70b");
        let messages = m
            .convert_messages(&vec![Message::system("be helpful")])
            .unwrap();
        let value = serde_json::to_value(&messages).unwrap();
        assert_eq!(value, json!([{"role": "system", "content": "be helpful"}]));
    }

    #[test]
    fn test_wildcard_image_becomes_jpeg_data_uri() {
        let m = model("llama-3.3-70b");
        let prompt = vec![Message::user(UserContent::parts(vec![
            UserContentPart::text("look:"),
            UserContentPart::file_binary(vec![1, 2, 3], "image/*"),
        ]))];

        let messages = m.convert_messages(&prompt).unwrap();
        let value = serde_json::to_value(&messages).unwrap();
        let encoded = base64::engine::general_purpose::STANDARD.encode([1u8, 2, 3]);
        assert_eq!(
            value[0]["content"][1]["image_url"]["url"],
            json!(format!("data:image/jpeg;base64,{encoded}"))
        );
    }

    #[test]
    fn test_remote_image_url_passes_through() {
        let m = model("llama-3.3-70b");
        let prompt = vec![Message::user(UserContent::parts(vec![
            UserContentPart::file_url("https://example.com/cat.png", "image/png"),
        ]))];

        let messages = m.convert_messages(&prompt).unwrap();
        let value = serde_json::to_value(&messages).unwrap();
        assert_eq!(
            value[0]["content"][0]["image_url"]["url"],
            json!("https://example.com/cat.png")
        );
    }

    #[rstest]
    #[case("audio/mpeg")]
    #[case("audio/wav")]
    fn test_audio_rejected_on_default_model(#[case] media_type: &str) {
        let m = model("llama-3.3-70b");
        let prompt = vec![Message::user(UserContent::parts(vec![
            UserContentPart::file_binary(vec![0u8; 4], media_type),
        ]))];

        let err = m.convert_messages(&prompt).unwrap_err();
        assert!(matches!(err, ModelError::NotSupported(_)));
    }

    #[test]
    fn test_audio_url_rejected_even_on_gemini() {
        let m = model("gemini-25-pro");
        let prompt = vec![Message::user(UserContent::parts(vec![
            UserContentPart::file_url("https://example.com/a.mp3", "audio/mpeg"),
        ]))];

        let err = m.convert_messages(&prompt).unwrap_err();
        assert!(matches!(err, ModelError::NotSupported(ref msg) if msg.contains("URL")));
    }

    #[test]
    fn test_audio_binary_on_gemini_resolves_format() {
        let m = model("gemini-25-pro");
        let prompt = vec![Message::user(UserContent::parts(vec![
            UserContentPart::file_binary(vec![9, 9], "audio/flac"),
        ]))];

        let messages = m.convert_messages(&prompt).unwrap();
        let value = serde_json::to_value(&messages).unwrap();
        assert_eq!(value[0]["content"][0]["input_audio"]["format"], json!("flac"));
    }

    #[test]
    fn test_video_allow_list_enforced() {
        let m = model("gemini-25-pro");
        let bad = vec![Message::user(UserContent::parts(vec![
            UserContentPart::file_binary(vec![0], "video/x-matroska"),
        ]))];
        assert!(matches!(
            m.convert_messages(&bad).unwrap_err(),
            ModelError::NotSupported(_)
        ));

        let wildcard = vec![Message::user(UserContent::parts(vec![
            UserContentPart::file_binary(vec![0], "video/*"),
        ]))];
        let messages = m.convert_messages(&wildcard).unwrap();
        let value = serde_json::to_value(&messages).unwrap();
        let url = value[0]["content"][0]["video_url"]["url"].as_str().unwrap();
        assert!(url.starts_with("data:video/mp4;base64,"));
    }

    #[test]
    fn test_unknown_media_type_rejected() {
        let m = model("llama-3.3-70b");
        let prompt = vec![Message::user(UserContent::parts(vec![
            UserContentPart::file_binary(vec![0], "application/zip"),
        ]))];

        let err = m.convert_messages(&prompt).unwrap_err();
        assert!(matches!(err, ModelError::NotSupported(ref msg) if msg.contains("application/zip")));
    }

    #[test]
    fn test_empty_assistant_turn_is_dropped() {
        let m = model("llama-3.3-70b");
        let prompt = vec![
            Message::user("hi"),
            Message::assistant(vec![]),
            Message::Assistant(AssistantMessage::new(vec![AssistantContentPart::Text(
                TextPart::new(""),
            )])),
        ];

        let messages = m.convert_messages(&prompt).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, "user");
    }

    #[test]
    fn test_assistant_reasoning_not_replayed() {
        let m = model("llama-3.3-70b");
        let prompt = vec![Message::assistant(vec![
            AssistantContentPart::Reasoning(ReasoningPart::new("thinking...")),
            AssistantContentPart::Text(TextPart::new("answer")),
        ])];

        let messages = m.convert_messages(&prompt).unwrap();
        let value = serde_json::to_value(&messages).unwrap();
        assert_eq!(value[0]["content"], json!("answer"));
    }

    #[test]
    fn test_assistant_tool_calls_with_empty_text_on_claude() {
        let m = model("claude-35-sonnet");
        let prompt = vec![Message::assistant(vec![AssistantContentPart::ToolCall(
            ToolCallPart::new("call_1", "search", json!({"q": "rust"})),
        )])];

        let messages = m.convert_messages(&prompt).unwrap();
        let value = serde_json::to_value(&messages).unwrap();
        // Array-shaped content may not hold an empty text part.
        assert_eq!(value[0]["content"], json!([{"type": "text", "text": "\n"}]));
        assert_eq!(
            value[0]["tool_calls"][0]["function"]["arguments"],
            json!(r#"{"q":"rust"}"#)
        );
    }

    #[test]
    fn test_assistant_tool_calls_with_empty_text_bare() {
        let m = model("llama-3.3-70b");
        let prompt = vec![Message::assistant(vec![AssistantContentPart::ToolCall(
            ToolCallPart::new("call_1", "search", json!({})),
        )])];

        let messages = m.convert_messages(&prompt).unwrap();
        let value = serde_json::to_value(&messages).unwrap();
        assert_eq!(value[0]["content"], json!(""));
    }

    #[test]
    fn test_tool_result_text_passes_verbatim() {
        let m = model("llama-3.3-70b");
        let prompt = vec![Message::tool(vec![ToolResultPart::new(
            "call_1",
            "search",
            ToolOutput::text("plain result"),
        )])];

        let messages = m.convert_messages(&prompt).unwrap();
        let value = serde_json::to_value(&messages).unwrap();
        assert_eq!(
            value,
            json!([{"role": "tool", "tool_call_id": "call_1", "content": "plain result"}])
        );
    }

    #[test]
    fn test_tool_result_json_is_stringified() {
        let m = model("llama-3.3-70b");
        let prompt = vec![Message::tool(vec![ToolResultPart::new(
            "call_1",
            "lookup",
            ToolOutput::json(json!({"n": 42})),
        )])];

        let messages = m.convert_messages(&prompt).unwrap();
        let value = serde_json::to_value(&messages).unwrap();
        assert_eq!(value[0]["content"], json!(r#"{"n":42}"#));
    }

    #[test]
    fn test_media_tool_result_reroutes_to_user_message() {
        let m = model("gemini-25-pro");
        let result = ToolResultPart::new(
            "call_9",
            "screenshot",
            ToolOutput::Content(vec![
                ToolResultContentPart::text("captured"),
                ToolResultContentPart::media(FileData::binary(vec![7]), "image/png"),
            ]),
        )
        .with_provider_options(venice_options(json!({"detail": "high"})));
        let prompt = vec![Message::tool(vec![result])];

        let messages = m.convert_messages(&prompt).unwrap();
        assert_eq!(messages.len(), 1);
        let value = serde_json::to_value(&messages).unwrap();
        assert_eq!(value[0]["role"], json!("user"));
        assert_eq!(
            value[0]["content"][0],
            json!({"type": "text", "text": "[Tool Result: call_9]"})
        );
        assert_eq!(value[0]["content"][1], json!({"type": "text", "text": "captured"}));
        // Part metadata lands on the last media part of the group.
        assert_eq!(value[0]["content"][2]["detail"], json!("high"));
        assert!(value[0]["content"][2]["image_url"]["url"]
            .as_str()
            .unwrap()
            .starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_media_tool_result_stays_tool_message_without_rich_media() {
        let m = model("llama-3.3-70b");
        let prompt = vec![Message::tool(vec![ToolResultPart::new(
            "call_9",
            "screenshot",
            ToolOutput::Content(vec![ToolResultContentPart::media(
                FileData::binary(vec![7]),
                "image/png",
            )]),
        )])];

        let messages = m.convert_messages(&prompt).unwrap();
        assert_eq!(messages[0].role, "tool");
    }

    #[test]
    fn test_message_metadata_merges_on_envelope() {
        let m = model("llama-3.3-70b");
        let prompt = vec![Message::User(
            UserMessage::new("hi").with_provider_options(venice_options(json!({"priority": 2}))),
        )];

        let messages = m.convert_messages(&prompt).unwrap();
        let value = serde_json::to_value(&messages).unwrap();
        assert_eq!(
            value,
            json!([{"role": "user", "content": "hi", "priority": 2}])
        );
    }

    #[test]
    fn test_openai_compatible_namespace_fallback() {
        let m = model("llama-3.3-70b");
        let options = ProviderOptions::new()
            .with_namespace("openai-compatible", json!({"foo": "bar"}).as_object().unwrap().clone());
        let prompt = vec![Message::User(UserMessage::new("hi").with_provider_options(options))];

        let messages = m.convert_messages(&prompt).unwrap();
        let value = serde_json::to_value(&messages).unwrap();
        assert_eq!(value[0]["foo"], json!("bar"));
    }

    #[test]
    fn test_convert_tools_warns_on_bad_schema() {
        let m = model("llama-3.3-70b");
        let tools = vec![
            ToolDefinition::new("good", "works"),
            ToolDefinition::new("bad", "broken").with_parameters(json!("not a schema")),
        ];

        let (wire, _, warnings) = m.convert_tools(&tools, None);
        assert_eq!(wire.unwrap().len(), 1);
        assert_eq!(
            warnings,
            vec![ToolWarning::Unsupported {
                name: "bad".to_string(),
                reason: "parameter schema is not a JSON object".to_string(),
            }]
        );
    }

    #[test]
    fn test_convert_tool_choice() {
        let m = model("llama-3.3-70b");
        let (_, choice, _) = m.convert_tools(&[], Some(&ToolChoice::Specific("search".into())));
        assert_eq!(
            serde_json::to_value(choice.unwrap()).unwrap(),
            json!({"type": "function", "function": {"name": "search"}})
        );
    }

    #[test]
    fn test_build_request_maps_settings() {
        let m = model("qwen3-235b")
            .with_venice_parameters(VeniceParameters::new().web_search(WebSearchMode::On));
        let prompt = vec![Message::user("hi")];
        let settings = ModelSettings::new()
            .temperature(0.7)
            .top_k(50)
            .min_p(0.1)
            .repetition_penalty(1.1)
            .stop_token_ids(vec![100, 200])
            .reasoning_effort(venice_ai_core::ReasoningEffort::High);
        let params = ModelRequestParameters::new();

        let request = m.build_request(&prompt, &settings, &params, true).unwrap();
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["model"], json!("qwen3-235b"));
        assert_eq!(value["temperature"], json!(0.7));
        assert_eq!(value["top_k"], json!(50));
        assert_eq!(value["min_p"], json!(0.1));
        assert_eq!(value["repetition_penalty"], json!(1.1));
        assert_eq!(value["stop_token_ids"], json!([100, 200]));
        assert_eq!(value["reasoning_effort"], json!("high"));
        assert_eq!(value["stream"], json!(true));
        assert_eq!(value["stream_options"], json!({"include_usage": true}));
        assert_eq!(value["venice_parameters"], json!({"enable_web_search": "on"}));
        // Unset options are omitted entirely, never emitted as null.
        assert!(value.get("max_tokens").is_none());
        assert!(value.get("presence_penalty").is_none());
    }

    #[test]
    fn test_build_request_non_streaming_omits_stream_fields() {
        let m = model("llama-3.3-70b");
        let request = m
            .build_request(
                &vec![Message::user("hi")],
                &ModelSettings::new(),
                &ModelRequestParameters::new(),
                false,
            )
            .unwrap();
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("stream").is_none());
        assert!(value.get("stream_options").is_none());
        assert!(value.get("venice_parameters").is_none());
    }

    #[test]
    fn test_build_request_response_format() {
        let m = model("llama-3.3-70b");
        let params = ModelRequestParameters::new().with_response_format(ResponseFormat::JsonSchema {
            name: "output".to_string(),
            description: None,
            schema: json!({"type": "object"}),
            strict: Some(true),
        });
        let request = m
            .build_request(&vec![Message::user("hi")], &ModelSettings::new(), &params, false)
            .unwrap();
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value["response_format"],
            json!({
                "type": "json_schema",
                "json_schema": {"name": "output", "schema": {"type": "object"}, "strict": true}
            })
        );
    }

    #[test]
    fn test_parse_response_reasoning_priority() {
        let m = model("qwen3-235b");
        let resp: VeniceChatResponse = serde_json::from_value(json!({
            "id": "chatcmpl-1",
            "model": "qwen3-235b",
            "choices": [{
                "message": {
                    "content": "answer",
                    "reasoning_content": "primary",
                    "reasoning": "secondary"
                },
                "finish_reason": "stop"
            }]
        }))
        .unwrap();

        let parsed = m.parse_response(resp).unwrap();
        assert!(matches!(
            &parsed.content[0],
            ResponsePart::Reasoning(r) if r.text == "primary"
        ));
        assert_eq!(parsed.text_content(), "answer");
        assert_eq!(parsed.finish_reason, Some(venice_ai_core::FinishReason::Stop));
        assert!(parsed.usage.is_empty());
    }

    #[test]
    fn test_parse_response_drops_empty_text() {
        let m = model("llama-3.3-70b");
        let resp: VeniceChatResponse = serde_json::from_value(json!({
            "choices": [{
                "message": {"content": "", "reasoning": ""},
                "finish_reason": "stop"
            }]
        }))
        .unwrap();

        let parsed = m.parse_response(resp).unwrap();
        assert!(parsed.content.is_empty());
    }

    #[test]
    fn test_parse_response_generates_missing_tool_call_id() {
        let m = model("llama-3.3-70b");
        let resp: VeniceChatResponse = serde_json::from_value(json!({
            "choices": [{
                "message": {
                    "tool_calls": [{
                        "function": {"name": "search", "arguments": "{\"q\":\"x\"}"},
                        "extra_content": {"google": {"thought_signature": "sig"}}
                    }]
                },
                "finish_reason": "tool_calls"
            }]
        }))
        .unwrap();

        let parsed = m.parse_response(resp).unwrap();
        let calls = parsed.tool_calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].tool_call_id.starts_with("call_"));
        assert_eq!(calls[0].input, json!({"q": "x"}));
        let meta = calls[0].provider_options.as_ref().unwrap();
        assert_eq!(
            meta.namespace("venice").unwrap()["thought_signature"],
            json!("sig")
        );
        assert_eq!(
            parsed.finish_reason,
            Some(venice_ai_core::FinishReason::ToolCalls)
        );
    }

    #[test]
    fn test_parse_response_no_choices_fails() {
        let m = model("llama-3.3-70b");
        let resp: VeniceChatResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        assert!(matches!(
            m.parse_response(resp).unwrap_err(),
            ModelError::InvalidResponse(_)
        ));
    }

    #[test]
    fn test_handle_error_response() {
        let m = model("llama-3.3-70b");
        let headers = HeaderMap::new();

        let err = m.handle_error_response(
            400,
            r#"{"error": {"message": "bad param", "type": "invalid_request_error", "param": "temperature", "code": "invalid_value"}}"#,
            &headers,
        );
        match err {
            ModelError::Api {
                message,
                error_type,
                param,
                code,
            } => {
                assert_eq!(message, "bad param");
                assert_eq!(error_type.as_deref(), Some("invalid_request_error"));
                assert_eq!(param, Some(json!("temperature")));
                assert_eq!(code.as_deref(), Some("invalid_value"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }

        let err = m.handle_error_response(401, r#"{"error": {"message": "bad key"}}"#, &headers);
        assert!(matches!(err, ModelError::Authentication(_)));

        let err = m.handle_error_response(500, "oops", &headers);
        assert!(matches!(err, ModelError::Http { status: 500, .. }));
    }

    #[test]
    fn test_profile_overrides() {
        let m = model("llama-3.3-70b").with_profile(gemini_profile());
        assert!(m.profile().supports_rich_media);

        let m = model("llama-3.3-70b").with_profile(claude_profile());
        assert!(m.profile().requires_array_content);
    }
}
