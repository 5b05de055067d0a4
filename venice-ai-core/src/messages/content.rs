//! Multi-modal content for user messages.

use serde::{Deserialize, Serialize};

use super::parts::TextPart;
use crate::metadata::ProviderOptions;

/// User message content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserContent {
    /// Plain text content.
    Text(String),
    /// Multi-part content.
    Parts(Vec<UserContentPart>),
}

impl UserContent {
    /// Create text content.
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Create multi-part content.
    #[must_use]
    pub fn parts(parts: Vec<UserContentPart>) -> Self {
        Self::Parts(parts)
    }

    /// Get all parts, wrapping plain text in a single text part.
    #[must_use]
    pub fn to_parts(&self) -> Vec<UserContentPart> {
        match self {
            Self::Text(s) => vec![UserContentPart::Text(TextPart::new(s.clone()))],
            Self::Parts(parts) => parts.clone(),
        }
    }
}

impl Default for UserContent {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<&str> for UserContent {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for UserContent {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<UserContentPart>> for UserContent {
    fn from(parts: Vec<UserContentPart>) -> Self {
        Self::Parts(parts)
    }
}

/// Individual content part in a multi-part user message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UserContentPart {
    /// Text content.
    Text(TextPart),
    /// File content (image, audio, video, ...), dispatched by media type.
    File(FilePart),
}

impl UserContentPart {
    /// Create a text part.
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(TextPart::new(s))
    }

    /// Create a file part from a remote URL.
    #[must_use]
    pub fn file_url(url: impl Into<String>, media_type: impl Into<String>) -> Self {
        Self::File(FilePart::new(FileData::url(url), media_type))
    }

    /// Create a file part from inline bytes.
    #[must_use]
    pub fn file_binary(data: Vec<u8>, media_type: impl Into<String>) -> Self {
        Self::File(FilePart::new(FileData::binary(data), media_type))
    }
}

/// A file content part: a payload plus its media type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilePart {
    /// The file payload.
    #[serde(flatten)]
    pub data: FileData,
    /// IANA media type, possibly with a wildcard subtype (e.g. `image/*`).
    pub media_type: String,
    /// Provider-scoped metadata for this part.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_options: Option<ProviderOptions>,
}

impl FilePart {
    /// Create a new file part.
    #[must_use]
    pub fn new(data: FileData, media_type: impl Into<String>) -> Self {
        Self {
            data,
            media_type: media_type.into(),
            provider_options: None,
        }
    }

    /// Attach provider options.
    #[must_use]
    pub fn with_provider_options(mut self, options: ProviderOptions) -> Self {
        self.provider_options = Some(options);
        self
    }
}

/// File payload: a remote URL or inline bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileData {
    /// Remote URL.
    Url {
        /// The URL.
        url: String,
    },
    /// Inline binary data.
    Binary {
        /// The raw bytes.
        data: Vec<u8>,
    },
}

impl FileData {
    /// Create a URL payload.
    #[must_use]
    pub fn url(url: impl Into<String>) -> Self {
        Self::Url { url: url.into() }
    }

    /// Create a binary payload.
    #[must_use]
    pub fn binary(data: Vec<u8>) -> Self {
        Self::Binary { data }
    }

    /// Check whether this payload is URL-sourced.
    #[must_use]
    pub fn is_url(&self) -> bool {
        matches!(self, Self::Url { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_to_parts() {
        let content = UserContent::text("hi");
        let parts = content.to_parts();
        assert_eq!(parts.len(), 1);
        assert!(matches!(&parts[0], UserContentPart::Text(t) if t.text == "hi"));
    }

    #[test]
    fn test_file_part_roundtrip() {
        let part = UserContentPart::file_url("https://example.com/cat.png", "image/png");
        let json = serde_json::to_string(&part).unwrap();
        assert!(json.contains(r#""type":"file""#));
        assert!(json.contains(r#""url":"https://example.com/cat.png""#));
        let back: UserContentPart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, part);
    }

    #[test]
    fn test_file_data_is_url() {
        assert!(FileData::url("https://example.com").is_url());
        assert!(!FileData::binary(vec![1, 2, 3]).is_url());
    }
}
