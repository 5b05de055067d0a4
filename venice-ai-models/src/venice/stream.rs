//! Venice SSE stream reducer.
//!
//! Consumes the byte stream of a streamed chat completion and reduces it into
//! discrete [`ChatStreamEvent`]s. The reducer state is explicit: channel
//! flags, a latch for inline thinking-tag emulation, and a sparse map of
//! in-progress tool calls keyed by wire index, each slot transitioning from
//! open to finished exactly once.

use super::chat::thought_signature_metadata;
use super::types::{
    convert_usage, map_finish_reason, VeniceChatChunk, VeniceChunkToolCall, VeniceExtraContent,
    VeniceUsage,
};
use crate::error::ModelError;
use crate::profile::ModelProfile;
use bytes::Bytes;
use futures::Stream;
use pin_project_lite::pin_project;
use std::collections::{BTreeMap, VecDeque};
use std::pin::Pin;
use std::task::{Context, Poll};
use venice_ai_core::{ChatStreamEvent, FinishReason, ProviderOptions};

/// Fixed id for the visible text channel.
const TEXT_ID: &str = "text-0";
/// Fixed id for the reasoning channel.
const REASONING_ID: &str = "reasoning-0";

type Pending = VecDeque<Result<ChatStreamEvent, ModelError>>;

pin_project! {
    /// Venice SSE stream parser.
    pub struct VeniceStreamParser<S> {
        #[pin]
        inner: S,
        buffer: String,
        state: StreamState,
        pending: Pending,
        done: bool,
    }
}

/// Explicit reducer state.
#[derive(Debug)]
struct StreamState {
    thinking_open: String,
    thinking_close: String,
    metadata_emitted: bool,
    text_active: bool,
    reasoning_active: bool,
    // Latch for inline <think> tag emulation across chunks.
    mock_reasoning_active: bool,
    finish_reason: FinishReason,
    usage: Option<VeniceUsage>,
    tool_calls: BTreeMap<u32, ToolCallSlot>,
    terminated: bool,
    fatal: bool,
}

/// State for one in-progress tool call.
#[derive(Debug)]
struct ToolCallSlot {
    id: String,
    tool_name: String,
    arguments: String,
    provider_metadata: Option<ProviderOptions>,
    lifecycle: SlotLifecycle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotLifecycle {
    Open,
    Finished,
}

impl<S> VeniceStreamParser<S>
where
    S: Stream<Item = Result<Bytes, reqwest::Error>>,
{
    /// Create a new stream parser for a model profile.
    pub fn new(inner: S, profile: &ModelProfile) -> Self {
        Self {
            inner,
            buffer: String::new(),
            state: StreamState {
                thinking_open: profile.thinking_open_tag().to_string(),
                thinking_close: profile.thinking_close_tag().to_string(),
                metadata_emitted: false,
                text_active: false,
                reasoning_active: false,
                mock_reasoning_active: false,
                finish_reason: FinishReason::Other,
                usage: None,
                tool_calls: BTreeMap::new(),
                terminated: false,
                fatal: false,
            },
            pending: Pending::new(),
            done: false,
        }
    }
}

impl<S> Stream for VeniceStreamParser<S>
where
    S: Stream<Item = Result<Bytes, reqwest::Error>>,
{
    type Item = Result<ChatStreamEvent, ModelError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if let Some(event) = this.pending.pop_front() {
                return Poll::Ready(Some(event));
            }
            if *this.done {
                return Poll::Ready(None);
            }

            // Drain complete lines from the buffer.
            while let Some(newline_pos) = this.buffer.find('\n') {
                let line: String = this.buffer.drain(..=newline_pos).collect();
                this.state.process_line(line.trim(), this.pending);
                if !this.pending.is_empty() || this.state.terminated || this.state.fatal {
                    break;
                }
            }

            // A malformed tool-call delta is fatal: the error is delivered
            // and no further chunks are processed.
            if this.state.fatal || this.state.terminated {
                *this.done = true;
                continue;
            }
            if !this.pending.is_empty() {
                continue;
            }

            match this.inner.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(bytes))) => {
                    if let Ok(text) = std::str::from_utf8(&bytes) {
                        this.buffer.push_str(text);
                    }
                }
                Poll::Ready(Some(Err(e))) => {
                    return Poll::Ready(Some(Err(ModelError::Other(e.into()))));
                }
                Poll::Ready(None) => {
                    // Transport ended; process any trailing partial line and
                    // close out every open channel.
                    if !this.buffer.is_empty() {
                        let remaining = std::mem::take(this.buffer);
                        for line in remaining.lines() {
                            this.state.process_line(line.trim(), this.pending);
                            if this.state.terminated || this.state.fatal {
                                break;
                            }
                        }
                    }
                    if !this.state.terminated && !this.state.fatal {
                        this.state.flush(this.pending);
                        this.state.terminated = true;
                    }
                    *this.done = true;
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

impl StreamState {
    /// Process one SSE line.
    fn process_line(&mut self, line: &str, pending: &mut Pending) {
        if line.is_empty() || line.starts_with(':') {
            return;
        }
        let Some(data) = line.strip_prefix("data: ") else {
            return;
        };

        if data == "[DONE]" {
            self.flush(pending);
            self.terminated = true;
            return;
        }

        match serde_json::from_str::<VeniceChatChunk>(data) {
            Ok(chunk) => self.process_chunk(chunk, pending),
            Err(e) => {
                // Chunk-level validation failures are recoverable: the error
                // goes in-band and remaining chunks are still processed.
                tracing::warn!("failed to parse stream chunk: {e}");
                self.finish_reason = FinishReason::Error;
                pending.push_back(Ok(ChatStreamEvent::Error {
                    message: format!("failed to parse stream chunk: {e}"),
                }));
            }
        }
    }

    /// Reduce one parsed chunk into events.
    fn process_chunk(&mut self, chunk: VeniceChatChunk, pending: &mut Pending) {
        if let Some(error) = chunk.error {
            self.finish_reason = FinishReason::Error;
            pending.push_back(Ok(ChatStreamEvent::Error {
                message: error.message,
            }));
            return;
        }

        if !self.metadata_emitted {
            self.metadata_emitted = true;
            pending.push_back(Ok(ChatStreamEvent::ResponseMetadata {
                id: chunk.id,
                model: chunk.model,
                created: chunk.created,
            }));
        }

        // Last usage value wins; it is converted at flush time.
        if let Some(usage) = chunk.usage {
            self.usage = Some(usage);
        }

        let Some(choice) = chunk.choices.into_iter().next() else {
            return;
        };
        if let Some(reason) = choice.finish_reason.as_deref() {
            self.finish_reason = map_finish_reason(reason);
        }
        let Some(delta) = choice.delta else {
            return;
        };

        let mut text = delta.content.unwrap_or_default();
        let mut reasoning = delta
            .reasoning_content
            .or(delta.reasoning)
            .unwrap_or_default();

        // Some models emit reasoning inline between thinking tags instead of
        // using a reasoning field. Strip the tags and divert that text into
        // the reasoning channel until a chunk ends with the close tag. Tags
        // split across a chunk boundary are not reassembled.
        if !text.is_empty() && (self.mock_reasoning_active || text.starts_with(&self.thinking_open))
        {
            let closes = text.ends_with(&self.thinking_close);
            let mut stripped = text.as_str();
            if let Some(rest) = stripped.strip_prefix(self.thinking_open.as_str()) {
                stripped = rest;
            }
            if let Some(rest) = stripped.strip_suffix(self.thinking_close.as_str()) {
                stripped = rest;
            }
            reasoning.push_str(stripped);
            self.mock_reasoning_active = !closes;
            text.clear();
        }

        if !reasoning.is_empty() {
            if !self.reasoning_active {
                self.reasoning_active = true;
                pending.push_back(Ok(ChatStreamEvent::ReasoningStart {
                    id: REASONING_ID.to_string(),
                }));
            }
            pending.push_back(Ok(ChatStreamEvent::reasoning_delta(REASONING_ID, reasoning)));
        }

        if !text.is_empty() {
            // Text and reasoning are never open simultaneously.
            self.close_reasoning(pending);
            if !self.text_active {
                self.text_active = true;
                pending.push_back(Ok(ChatStreamEvent::TextStart {
                    id: TEXT_ID.to_string(),
                }));
            }
            pending.push_back(Ok(ChatStreamEvent::text_delta(TEXT_ID, text)));
        }

        if let Some(tool_calls) = delta.tool_calls {
            if !tool_calls.is_empty() {
                self.close_reasoning(pending);
            }
            for tc in tool_calls {
                self.process_tool_call_delta(tc, pending);
                if self.fatal {
                    return;
                }
            }
        }
    }

    fn process_tool_call_delta(&mut self, tc: VeniceChunkToolCall, pending: &mut Pending) {
        let index = tc.index.unwrap_or_else(|| self.next_index());
        let signature = tc
            .extra_content
            .as_ref()
            .and_then(VeniceExtraContent::thought_signature)
            .map(str::to_string);

        match self.tool_calls.get_mut(&index) {
            None => {
                let name = tc.function.as_ref().and_then(|f| f.name.clone());
                let (Some(id), Some(tool_name)) = (tc.id, name) else {
                    self.fatal = true;
                    pending.push_back(Err(ModelError::invalid_response(format!(
                        "tool call delta opened index {index} without an id or function name"
                    ))));
                    return;
                };

                pending.push_back(Ok(ChatStreamEvent::ToolInputStart {
                    id: id.clone(),
                    tool_name: tool_name.clone(),
                }));

                let arguments = tc.function.and_then(|f| f.arguments).unwrap_or_default();
                if !arguments.is_empty() {
                    pending.push_back(Ok(ChatStreamEvent::tool_input_delta(&id, &arguments)));
                }

                let mut slot = ToolCallSlot {
                    id,
                    tool_name,
                    arguments,
                    provider_metadata: signature.map(|s| thought_signature_metadata(&s)),
                    lifecycle: SlotLifecycle::Open,
                };
                // A vendor may deliver an entire call in one chunk.
                if is_complete_json(&slot.arguments) {
                    finish_slot(&mut slot, pending);
                }
                self.tool_calls.insert(index, slot);
            }
            // Deltas targeting a finished slot are ignored.
            Some(slot) if slot.lifecycle == SlotLifecycle::Finished => {}
            Some(slot) => {
                if let Some(signature) = signature {
                    slot.provider_metadata = Some(thought_signature_metadata(&signature));
                }
                if let Some(arguments) = tc.function.and_then(|f| f.arguments) {
                    if !arguments.is_empty() {
                        slot.arguments.push_str(&arguments);
                        pending.push_back(Ok(ChatStreamEvent::tool_input_delta(
                            &slot.id, &arguments,
                        )));
                    }
                }
                if is_complete_json(&slot.arguments) {
                    finish_slot(slot, pending);
                }
            }
        }
    }

    fn next_index(&self) -> u32 {
        self.tool_calls.keys().next_back().map_or(0, |k| k + 1)
    }

    fn close_reasoning(&mut self, pending: &mut Pending) {
        if self.reasoning_active {
            self.reasoning_active = false;
            pending.push_back(Ok(ChatStreamEvent::ReasoningEnd {
                id: REASONING_ID.to_string(),
            }));
        }
    }

    /// Close every open channel, force-complete unfinished tool calls, and
    /// emit the single terminal finish event.
    fn flush(&mut self, pending: &mut Pending) {
        self.close_reasoning(pending);
        if self.text_active {
            self.text_active = false;
            pending.push_back(Ok(ChatStreamEvent::TextEnd {
                id: TEXT_ID.to_string(),
            }));
        }
        for slot in self.tool_calls.values_mut() {
            if slot.lifecycle == SlotLifecycle::Open {
                finish_slot(slot, pending);
            }
        }
        pending.push_back(Ok(ChatStreamEvent::Finish {
            finish_reason: self.finish_reason,
            usage: convert_usage(self.usage.as_ref()),
            provider_metadata: None,
        }));
    }
}

fn finish_slot(slot: &mut ToolCallSlot, pending: &mut Pending) {
    slot.lifecycle = SlotLifecycle::Finished;
    pending.push_back(Ok(ChatStreamEvent::ToolInputEnd {
        id: slot.id.clone(),
    }));
    pending.push_back(Ok(ChatStreamEvent::ToolCall {
        tool_call_id: slot.id.clone(),
        tool_name: slot.tool_name.clone(),
        input: slot.arguments.clone(),
        provider_metadata: slot.provider_metadata.clone(),
    }));
}

/// Check whether accumulated argument text parses as complete JSON.
fn is_complete_json(text: &str) -> bool {
    !text.trim().is_empty() && serde_json::from_str::<serde::de::IgnoredAny>(text).is_ok()
}
