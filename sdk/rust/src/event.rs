use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One attribute or trait as the tracker sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub kind: String, // e.g. "string", "integer"
    pub value: String,
}

/// A tracking event before it is flattened for the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackEvent {
    pub event: String,
    pub event_type: String,
    pub app_id: String,
    pub user_id: String,
    pub message_id: String,
    pub page_title: String,
    pub page_url: String,
    pub browser_language: String,
    pub screen_size: String,
    pub attributes: Vec<Property>,
    pub traits: Vec<Property>,
}

impl TrackEvent {
    pub fn new(event: &str, event_type: &str) -> Self {
        Self {
            event: event.to_string(),
            event_type: event_type.to_string(),
            ..Default::default()
        }
    }

    /// Add an event-scoped attribute.
    pub fn attribute(mut self, name: &str, kind: &str, value: &str) -> Self {
        self.attributes.push(Property {
            name: name.to_string(),
            kind: kind.to_string(),
            value: value.to_string(),
        });
        self
    }

    /// Add a user-scoped trait.
    pub fn user_trait(mut self, name: &str, kind: &str, value: &str) -> Self {
        self.traits.push(Property {
            name: name.to_string(),
            kind: kind.to_string(),
            value: value.to_string(),
        });
        self
    }

    /// Flatten into the positional payload the relay ingests.
    ///
    /// Attributes become `atrk<i>`/`atrt<i>`/`atrv<i>` and traits
    /// `uatrk<i>`/`uatrt<i>`/`uatrv<i>`, with `i` counting from 1.
    pub fn to_payload(&self) -> Map<String, Value> {
        let mut payload = Map::new();
        let scalars = [
            ("ev", &self.event),
            ("et", &self.event_type),
            ("id", &self.app_id),
            ("uid", &self.user_id),
            ("mid", &self.message_id),
            ("t", &self.page_title),
            ("p", &self.page_url),
            ("l", &self.browser_language),
            ("sc", &self.screen_size),
        ];
        for (key, value) in scalars {
            payload.insert(key.to_string(), Value::String(value.clone()));
        }

        encode_properties(&mut payload, "atr", &self.attributes);
        encode_properties(&mut payload, "uatr", &self.traits);
        payload
    }
}

fn encode_properties(payload: &mut Map<String, Value>, prefix: &str, properties: &[Property]) {
    for (i, property) in properties.iter().enumerate() {
        let index = i + 1;
        payload.insert(format!("{}k{}", prefix, index), Value::String(property.name.clone()));
        payload.insert(format!("{}t{}", prefix, index), Value::String(property.kind.clone()));
        payload.insert(format!("{}v{}", prefix, index), Value::String(property.value.clone()));
    }
}
