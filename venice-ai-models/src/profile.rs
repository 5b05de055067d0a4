//! Model profiles and capability flags.
//!
//! Venice hosts several upstream model families behind one API. A profile
//! captures the per-family conversion rules the adapter must apply.

/// Capability flags and conversion rules for a model family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelProfile {
    /// Message content must always be array-wrapped, never a bare string.
    pub requires_array_content: bool,
    /// Model accepts audio/video input and media-bearing tool results.
    pub supports_rich_media: bool,
    /// Model supports strict mode for tool schemas.
    pub supports_strict_tools: bool,
    /// Model emits reasoning content.
    pub supports_reasoning: bool,
    /// Tags delimiting inline thinking in streamed text.
    pub thinking_tags: (String, String),
}

impl Default for ModelProfile {
    fn default() -> Self {
        Self {
            requires_array_content: false,
            supports_rich_media: false,
            supports_strict_tools: true,
            supports_reasoning: false,
            thinking_tags: ("<think>".to_string(), "</think>".to_string()),
        }
    }
}

impl ModelProfile {
    /// Create a profile with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether content must be array-wrapped.
    #[must_use]
    pub fn with_array_content(mut self, required: bool) -> Self {
        self.requires_array_content = required;
        self
    }

    /// Set rich-media (audio/video) support.
    #[must_use]
    pub fn with_rich_media(mut self, supported: bool) -> Self {
        self.supports_rich_media = supported;
        self
    }

    /// Set strict tool schema support.
    #[must_use]
    pub fn with_strict_tools(mut self, supported: bool) -> Self {
        self.supports_strict_tools = supported;
        self
    }

    /// Set reasoning support.
    #[must_use]
    pub fn with_reasoning(mut self, supported: bool) -> Self {
        self.supports_reasoning = supported;
        self
    }

    /// Set the thinking tags.
    #[must_use]
    pub fn with_thinking_tags(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.thinking_tags = (open.into(), close.into());
        self
    }

    /// Get the opening thinking tag.
    #[must_use]
    pub fn thinking_open_tag(&self) -> &str {
        &self.thinking_tags.0
    }

    /// Get the closing thinking tag.
    #[must_use]
    pub fn thinking_close_tag(&self) -> &str {
        &self.thinking_tags.1
    }
}

/// Profile for Venice-hosted Claude-family models, which reject bare-string
/// message content.
pub fn claude_profile() -> ModelProfile {
    ModelProfile::new().with_array_content(true)
}

/// Profile for Venice-hosted Gemini-family models, which accept audio and
/// video input.
pub fn gemini_profile() -> ModelProfile {
    ModelProfile::new().with_rich_media(true)
}

/// Profile for reasoning models that stream inline thinking tags
/// (DeepSeek, Qwen, and the Venice reasoning models).
pub fn reasoning_profile() -> ModelProfile {
    ModelProfile::new().with_reasoning(true)
}

/// Select the profile for a model id.
pub fn profile_for_model(model_id: &str) -> ModelProfile {
    let id = model_id.to_ascii_lowercase();
    if id.contains("claude") {
        claude_profile()
    } else if id.contains("gemini") {
        gemini_profile()
    } else if id.contains("deepseek") || id.contains("qwen") || id.contains("reasoning") {
        reasoning_profile()
    } else {
        ModelProfile::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let profile = ModelProfile::default();
        assert!(!profile.requires_array_content);
        assert!(!profile.supports_rich_media);
        assert_eq!(profile.thinking_open_tag(), "<think>");
        assert_eq!(profile.thinking_close_tag(), "</think>");
    }

    #[test]
    fn test_profile_for_model() {
        assert!(profile_for_model("claude-35-sonnet").requires_array_content);
        assert!(profile_for_model("gemini-25-pro").supports_rich_media);
        assert!(profile_for_model("deepseek-r1-671b").supports_reasoning);
        assert!(profile_for_model("qwen3-235b").supports_reasoning);

        let default = profile_for_model("llama-3.3-70b");
        assert!(!default.requires_array_content);
        assert!(!default.supports_rich_media);
    }

    #[test]
    fn test_builder() {
        let profile = ModelProfile::new()
            .with_thinking_tags("<reasoning>", "</reasoning>")
            .with_strict_tools(false);
        assert_eq!(profile.thinking_open_tag(), "<reasoning>");
        assert!(!profile.supports_strict_tools);
    }
}
