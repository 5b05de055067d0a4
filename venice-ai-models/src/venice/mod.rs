//! Venice model implementations.
//!
//! This module provides the chat-completions adapter for the Venice API:
//!
//! - [`VeniceChatModel`]: chat completions for every Venice-hosted model
//!   (Llama, Qwen, DeepSeek, Mistral, and the Claude/Gemini families)
//!
//! ## Example
//!
//! ```rust,ignore
//! use venice_ai_models::venice::VeniceChatModel;
//! use venice_ai_models::Model;
//!
//! let model = VeniceChatModel::from_env("qwen3-235b")?;
//! let response = model.request(&prompt, &settings, &params).await?;
//! ```

pub mod chat;
pub mod options;
pub mod stream;
pub mod types;

// Re-exports
pub use chat::VeniceChatModel;
pub use options::{VeniceParameters, WebSearchMode};
pub use stream::VeniceStreamParser;
pub use types::{
    VeniceChatChunk, VeniceChatRequest, VeniceChatResponse, VeniceContentPart, VeniceMessage,
    VeniceMessageContent, VeniceResponseFormat, VeniceTool, VeniceToolChoice,
};

/// Default Venice API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.venice.ai/v1";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "VENICE_API_KEY";

/// Create a new Venice chat model.
///
/// # Example
///
/// ```rust,ignore
/// use venice_ai_models::venice;
///
/// let model = venice::chat("llama-3.3-70b", "vk-...");
/// ```
pub fn chat(model_name: impl Into<String>, api_key: impl Into<String>) -> VeniceChatModel {
    VeniceChatModel::new(model_name, api_key)
}

/// Common Venice model names.
pub mod models {
    /// Llama 3.3 70B (default general model)
    pub const LLAMA_3_3_70B: &str = "llama-3.3-70b";
    /// Qwen 3 235B (reasoning)
    pub const QWEN_3_235B: &str = "qwen3-235b";
    /// DeepSeek R1 671B (reasoning)
    pub const DEEPSEEK_R1_671B: &str = "deepseek-r1-671b";
    /// Mistral Small 3.1 24B
    pub const MISTRAL_31_24B: &str = "mistral-31-24b";
    /// Venice Uncensored
    pub const VENICE_UNCENSORED: &str = "venice-uncensored";
}
