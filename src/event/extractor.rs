//! Attribute and trait extraction from positional key families.
//!
//! The tracker flattens variable-length lists into triplets of keys sharing
//! a suffix:
//!
//! ```text
//! atrk<i>  → attribute name      uatrk<i> → trait name
//! atrt<i>  → attribute type      uatrt<i> → trait type
//! atrv<i>  → attribute value     uatrv<i> → trait value
//! ```
//!
//! The suffix is opaque. It only correlates the three keys of a triplet, so an
//! empty or non-numeric suffix is as valid as `1`.

use crate::event::error::EventResult;
use crate::event::payload::{lookup_str, RawPayload};
use crate::event::types::{AttributeEntry, AttributeSet};

/// Prefixes of one name/type/value key family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyFamily {
    pub name: &'static str,
    pub kind: &'static str,
    pub value: &'static str,
}

/// Event-scoped attributes.
pub const ATTRIBUTE_FAMILY: KeyFamily = KeyFamily {
    name: "atrk",
    kind: "atrt",
    value: "atrv",
};

/// Actor-scoped traits.
pub const TRAIT_FAMILY: KeyFamily = KeyFamily {
    name: "uatrk",
    kind: "uatrt",
    value: "uatrv",
};

/// Extract `(attributes, traits)` from the payload.
///
/// Fails on the first triplet with a missing or non-string member.
pub fn extract(payload: &RawPayload) -> EventResult<(AttributeSet, AttributeSet)> {
    let attributes = extract_family(payload, &ATTRIBUTE_FAMILY)?;
    let traits = extract_family(payload, &TRAIT_FAMILY)?;
    Ok((attributes, traits))
}

/// Collect every triplet of a single key family.
pub fn extract_family(payload: &RawPayload, family: &KeyFamily) -> EventResult<AttributeSet> {
    let mut set = AttributeSet::new();

    for key in payload.keys() {
        // Leading-character match only: "uatrk1" must not count as an "atrk" key.
        let Some(suffix) = key.strip_prefix(family.name) else {
            continue;
        };

        let name = lookup_str(payload, key)?;
        let kind = lookup_str(payload, &format!("{}{}", family.kind, suffix))?;
        let value = lookup_str(payload, &format!("{}{}", family.value, suffix))?;

        set.insert(name.to_string(), AttributeEntry::new(value, kind));
    }

    Ok(set)
}
