//! Canonical event assembly.

use crate::event::error::EventResult;
use crate::event::extractor::extract;
use crate::event::payload::{decode_payload, lookup_str, RawPayload};
use crate::event::types::{AttributeSet, CanonicalEvent};

/// Payload keys of the nine required scalar fields.
pub const REQUIRED_FIELDS: [&str; 9] = ["ev", "et", "id", "uid", "mid", "t", "p", "l", "sc"];

/// Combine the required scalar fields with the extracted sets.
///
/// Every required key must be present and hold a string. There are no defaults.
pub fn assemble(
    payload: &RawPayload,
    attributes: AttributeSet,
    traits: AttributeSet,
) -> EventResult<CanonicalEvent> {
    let field = |key: &str| lookup_str(payload, key).map(str::to_string);

    Ok(CanonicalEvent {
        attributes,
        traits,
        event: field("ev")?,
        event_type: field("et")?,
        app_id: field("id")?,
        user_id: field("uid")?,
        message_id: field("mid")?,
        page_title: field("t")?,
        page_url: field("p")?,
        browser_language: field("l")?,
        screen_size: field("sc")?,
    })
}

/// Decode, extract and assemble a request body in one step.
pub fn decode_event(body: &[u8]) -> EventResult<CanonicalEvent> {
    let payload = decode_payload(body)?;
    let (attributes, traits) = extract(&payload)?;
    assemble(&payload, attributes, traits)
}
