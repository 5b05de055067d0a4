//! # venice-ai-core
//!
//! Vendor-neutral chat types for the venice-ai adapter.
//!
//! This crate defines the provider-agnostic side of the conversion: abstract
//! prompt messages and content parts, tool outputs, provider-metadata bags,
//! streaming lifecycle events, token usage, and model settings. The wire
//! types for the Venice chat-completions API live in `venice-ai-models`.
//!
//! ## Example
//!
//! ```rust
//! use venice_ai_core::{
//!     messages::{Message, UserContent},
//!     settings::ModelSettings,
//! };
//!
//! let prompt = vec![
//!     Message::system("You are a helpful assistant."),
//!     Message::user(UserContent::text("Hello!")),
//! ];
//!
//! let settings = ModelSettings::new()
//!     .max_tokens(1000)
//!     .temperature(0.7);
//! # let _ = (prompt, settings);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod messages;
pub mod metadata;
pub mod settings;
pub mod tools;
pub mod usage;

// Re-exports for convenience
pub use messages::{
    AssistantContentPart, AssistantMessage, ChatStreamEvent, FileData, FilePart, FinishReason,
    Message, ModelResponse, Prompt, ReasoningPart, ResponsePart, SystemMessage, TextPart,
    ToolCallPart, ToolMessage, ToolOutput, ToolResultContentPart, ToolResultPart, UserContent,
    UserContentPart, UserMessage,
};
pub use metadata::{merge_metadata, MetadataMap, ProviderOptions};
pub use settings::{ModelSettings, ReasoningEffort};
pub use tools::ToolDefinition;
pub use usage::Usage;

/// Prelude module for common imports.
///
/// ```rust
/// use venice_ai_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::messages::{
        AssistantContentPart, AssistantMessage, ChatStreamEvent, FileData, FilePart, FinishReason,
        Message, ModelResponse, Prompt, ReasoningPart, ResponsePart, SystemMessage, TextPart,
        ToolCallPart, ToolMessage, ToolOutput, ToolResultContentPart, ToolResultPart, UserContent,
        UserContentPart, UserMessage,
    };
    pub use crate::metadata::{merge_metadata, MetadataMap, ProviderOptions};
    pub use crate::settings::{ModelSettings, ReasoningEffort};
    pub use crate::tools::ToolDefinition;
    pub use crate::usage::Usage;
}
