//! Message types for chat model interactions.
//!
//! - **Prompt types**: [`Prompt`], [`Message`], and the per-role structs
//! - **Content types**: [`UserContent`] and multi-modal content parts
//! - **Tool types**: [`ToolCallPart`], [`ToolResultPart`], [`ToolOutput`]
//! - **Response types**: [`ModelResponse`], [`ResponsePart`], [`FinishReason`]
//! - **Streaming**: [`ChatStreamEvent`]

pub mod content;
pub mod events;
pub mod parts;
pub mod prompt;
pub mod response;
pub mod tool_result;

// Re-exports for convenience
pub use content::{FileData, FilePart, UserContent, UserContentPart};
pub use events::ChatStreamEvent;
pub use parts::{ReasoningPart, TextPart, ToolCallPart};
pub use prompt::{
    AssistantContentPart, AssistantMessage, Message, Prompt, SystemMessage, ToolMessage,
    UserMessage,
};
pub use response::{FinishReason, ModelResponse, ResponsePart};
pub use tool_result::{ToolOutput, ToolResultContentPart, ToolResultPart};
