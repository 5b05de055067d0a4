//! # venice-ai-models
//!
//! Model trait and the Venice chat-completions adapter.
//!
//! This crate translates the vendor-neutral chat types of [`venice_ai_core`]
//! into the Venice wire format and back:
//!
//! - **Request side**: message conversion with per-model capability rules,
//!   parameter mapping, and tool declaration mapping
//! - **Response side**: full-body parsing and SSE stream reduction into
//!   discrete lifecycle events
//!
//! ## Example
//!
//! ```rust,ignore
//! use venice_ai_models::venice::VeniceChatModel;
//! use venice_ai_models::{Model, ModelRequestParameters};
//! use venice_ai_core::{Message, ModelSettings};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let model = VeniceChatModel::from_env("qwen3-235b")?;
//!
//!     let prompt = vec![Message::user("Hello!")];
//!     let settings = ModelSettings::new().temperature(0.7);
//!     let params = ModelRequestParameters::new();
//!
//!     let response = model.request(&prompt, &settings, &params).await?;
//!     println!("{}", response.text_content());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod model;
pub mod profile;
pub mod venice;

pub use error::{ModelError, ModelResult};
pub use model::{
    ChatStream, Model, ModelRequestParameters, ResponseFormat, ToolChoice, ToolWarning,
};
pub use profile::ModelProfile;
pub use venice::VeniceChatModel;
