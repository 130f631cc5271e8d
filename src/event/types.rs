//! Canonical event types sent downstream.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single named property with an advisory type tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeEntry {
    pub value: String,

    /// Declared primitive type (e.g. "string", "integer"). Not parsed or enforced.
    #[serde(rename = "type")]
    pub kind: String,
}

impl AttributeEntry {
    pub fn new(value: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: kind.into(),
        }
    }
}

/// Attribute or trait name → entry. Names are unique; a later insert replaces an earlier one.
pub type AttributeSet = BTreeMap<String, AttributeEntry>;

/// Fully assembled event relayed to the downstream receiver.
///
/// Built once per request and never mutated after assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalEvent {
    /// Event-scoped properties.
    pub attributes: AttributeSet,

    /// Actor-scoped properties.
    pub traits: AttributeSet,

    pub event: String,
    pub event_type: String,
    pub app_id: String,
    pub user_id: String,
    pub message_id: String,
    pub page_title: String,
    pub page_url: String,
    pub browser_language: String,
    pub screen_size: String,
}
