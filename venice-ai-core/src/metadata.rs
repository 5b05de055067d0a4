//! Provider-scoped metadata bags.
//!
//! Messages and content parts may carry opaque, provider-scoped metadata that
//! is merged verbatim into the emitted wire object. The merge is an explicit
//! right-biased overwrite: later sources win, and applying the same bag twice
//! yields the same result as applying it once.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A flat JSON object used as a metadata payload.
pub type MetadataMap = serde_json::Map<String, Value>;

/// Provider-scoped options attached to a message or content part.
///
/// Keyed by provider namespace (e.g. `"venice"`), each entry holding a JSON
/// object of extra wire fields. Consumers read their own namespace and may
/// fall back to a generic-compatible one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderOptions(
    /// Namespace-keyed metadata payloads.
    pub MetadataMap,
);

impl ProviderOptions {
    /// Create an empty options bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a namespace with its metadata payload.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>, values: MetadataMap) -> Self {
        self.0.insert(namespace.into(), Value::Object(values));
        self
    }

    /// Get the metadata payload for a namespace, if present and an object.
    #[must_use]
    pub fn namespace(&self, namespace: &str) -> Option<&MetadataMap> {
        match self.0.get(namespace) {
            Some(Value::Object(map)) => Some(map),
            _ => None,
        }
    }

    /// Check whether the bag holds no namespaces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<MetadataMap> for ProviderOptions {
    fn from(map: MetadataMap) -> Self {
        Self(map)
    }
}

/// Merge `overlay` into `target`, overwriting existing keys.
///
/// Right-biased: a key present in both maps takes the overlay's value. This
/// is a pure overwrite, not a deep merge, so the operation is idempotent.
pub fn merge_metadata(target: &mut MetadataMap, overlay: &MetadataMap) {
    for (key, value) in overlay {
        target.insert(key.clone(), value.clone());
    }
}
