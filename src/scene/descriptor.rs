//! Placement descriptor parsing.
//!
//! A descriptor is the raw `nbt` text attached to an exported element. It addresses the
//! in-world entity the element drives, either by an explicit `UUID:[I;a,b,c,d]` array, by a
//! `Tags:[...]` array, by a hyphenated identity literal, or by nothing recognizable at all.

use regex::Regex;
use std::sync::LazyLock;

static UUID_ARRAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"UUID:\[I;\s*(-?\d+)\s*,\s*(-?\d+)\s*,\s*(-?\d+)\s*,\s*(-?\d+)\s*\]")
        .expect("uuid array pattern")
});

static TAG_ARRAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Tags:\[([^\]]*)\],?").expect("tag array pattern"));

static IDENTITY_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[a-zA-Z0-9]+(?:-[a-zA-Z0-9]+){4}\b").expect("identity literal pattern")
});

/// How a resolved element addresses its target entity.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Selector {
    /// Filtered tag list, never empty.
    Tags(Vec<String>),
    /// Hyphenated identity, e.g. `1-0-2-3-4`.
    Identity(String),
    /// Nothing recognizable; the trimmed descriptor text.
    Raw(String),
}

impl Selector {
    /// Key that identifies the target entity across frames.
    pub fn key(&self) -> String {
        match self {
            Self::Tags(tags) => tags.join(","),
            Self::Identity(id) => id.clone(),
            Self::Raw(text) => text.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedDescriptor {
    pub selector: Selector,
    /// Descriptor text after identity rewriting (and tag stripping, when an identity was found).
    pub text: String,
}

/// `[I;a,b,c,d]` as `hex(a)-0-hex(b)-hex(c)-hex(d)`; `a` is masked to 64 bits, the rest to 32.
pub fn canonical_identity(parts: [i128; 4]) -> String {
    const MASK_64: u128 = 0xFFFF_FFFF_FFFF_FFFF;
    const MASK_32: u128 = 0xFFFF_FFFF;
    let [a, b, c, d] = parts.map(|p| p as u128);
    format!(
        "{:x}-0-{:x}-{:x}-{:x}",
        a & MASK_64,
        b & MASK_32,
        c & MASK_32,
        d & MASK_32
    )
}

pub fn parse_descriptor(raw: &str) -> ParsedDescriptor {
    if let Some((identity, text)) = rewrite_uuid_array(raw) {
        return ParsedDescriptor {
            selector: Selector::Identity(identity),
            text,
        };
    }

    let text = raw.trim().to_owned();
    if let Some(tags) = parse_tags(&text) {
        return ParsedDescriptor {
            selector: Selector::Tags(tags),
            text,
        };
    }
    if let Some(m) = IDENTITY_LITERAL.find(&text) {
        return ParsedDescriptor {
            selector: Selector::Identity(m.as_str().to_owned()),
            text,
        };
    }
    ParsedDescriptor {
        selector: Selector::Raw(text.clone()),
        text,
    }
}

fn rewrite_uuid_array(raw: &str) -> Option<(String, String)> {
    let caps = UUID_ARRAY.captures(raw)?;
    let mut parts = [0i128; 4];
    for (slot, i) in parts.iter_mut().zip(1..=4) {
        *slot = caps[i].parse().ok()?;
    }
    let identity = canonical_identity(parts);
    let replaced = UUID_ARRAY.replace(raw, identity.as_str());
    let text = TAG_ARRAY.replace_all(&replaced, "").trim().to_owned();
    Some((identity, text))
}

/// Tags from the first `Tags:[...]` fragment, minus auto-generated index tags.
///
/// Duplicates are dropped; the first occurrence keeps its position.
pub fn parse_tags(descriptor: &str) -> Option<Vec<String>> {
    let inner = TAG_ARRAY.captures(descriptor)?.get(1)?.as_str();
    let mut tags: Vec<String> = Vec::new();
    for tag in inner.split(',').map(|t| t.trim().replace('"', "")) {
        if tag.is_empty() || is_index_tag(&tag) || tags.contains(&tag) {
            continue;
        }
        tags.push(tag);
    }
    (!tags.is_empty()).then_some(tags)
}

/// Editor-generated index tags end in `0` right after a non-digit, e.g. `bone_0`.
pub(crate) fn is_index_tag(tag: &str) -> bool {
    let mut rev = tag.chars().rev();
    matches!(
        (rev.next(), rev.next()),
        (Some('0'), Some(prev)) if !prev.is_ascii_digit()
    )
}

#[cfg(test)]
#[path = "../../tests/unit/scene/descriptor.rs"]
mod tests;
