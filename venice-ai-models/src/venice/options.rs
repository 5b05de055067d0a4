//! Venice-specific extension parameters.
//!
//! These knobs ride under the `venice_parameters` key of the request body.

use serde::{Deserialize, Serialize};

/// Venice extension parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VeniceParameters {
    /// Real-time web search mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_web_search: Option<WebSearchMode>,

    /// Scrape URLs detected in the user message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_web_scraping: Option<bool>,

    /// Include citations in web search results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_web_citations: Option<bool>,

    /// Hide reasoning steps from the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strip_thinking_response: Option<bool>,

    /// Disable reasoning mode entirely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_thinking: Option<bool>,

    /// Include Venice system prompts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_venice_system_prompt: Option<bool>,

    /// Use a specific AI character by slug.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character_slug: Option<String>,

    /// Include search results in the streaming response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_search_results_in_stream: Option<bool>,

    /// Return search results as documents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_search_results_as_documents: Option<bool>,
}

impl VeniceParameters {
    /// Create an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the web search mode.
    #[must_use]
    pub fn web_search(mut self, mode: WebSearchMode) -> Self {
        self.enable_web_search = Some(mode);
        self
    }

    /// Enable or disable URL scraping.
    #[must_use]
    pub fn web_scraping(mut self, enabled: bool) -> Self {
        self.enable_web_scraping = Some(enabled);
        self
    }

    /// Enable or disable web citations.
    #[must_use]
    pub fn web_citations(mut self, enabled: bool) -> Self {
        self.enable_web_citations = Some(enabled);
        self
    }

    /// Hide reasoning steps from the response.
    #[must_use]
    pub fn strip_thinking_response(mut self, strip: bool) -> Self {
        self.strip_thinking_response = Some(strip);
        self
    }

    /// Disable reasoning mode entirely.
    #[must_use]
    pub fn disable_thinking(mut self, disable: bool) -> Self {
        self.disable_thinking = Some(disable);
        self
    }

    /// Include Venice system prompts.
    #[must_use]
    pub fn include_venice_system_prompt(mut self, include: bool) -> Self {
        self.include_venice_system_prompt = Some(include);
        self
    }

    /// Use a specific AI character.
    #[must_use]
    pub fn character(mut self, slug: impl Into<String>) -> Self {
        self.character_slug = Some(slug.into());
        self
    }

    /// Include search results in the streaming response.
    #[must_use]
    pub fn include_search_results_in_stream(mut self, include: bool) -> Self {
        self.include_search_results_in_stream = Some(include);
        self
    }

    /// Return search results as documents.
    #[must_use]
    pub fn return_search_results_as_documents(mut self, as_documents: bool) -> Self {
        self.return_search_results_as_documents = Some(as_documents);
        self
    }

    /// Check whether every parameter is unset.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Web search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebSearchMode {
    /// No web search.
    Off,
    /// Always search.
    On,
    /// Model decides.
    Auto,
}
