//! Cross-frame deduplication.
//!
//! Each frame is compared only against the frame processed immediately before it. The
//! comparison state is an explicit value threaded through [`deduplicate`]; it is replaced
//! wholesale after every frame, never merged.

use crate::emit::command::CommandLine;
use std::collections::HashMap;

/// Values last sent for one selector key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RetainedEntry {
    pub transform: Option<String>,
    pub texture: Option<String>,
}

/// Last known transform text and texture per selector key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RetainedState {
    entries: HashMap<String, RetainedEntry>,
}

impl RetainedState {
    pub fn get(&self, key: &str) -> Option<&RetainedEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// What happened to one candidate line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineDecision {
    /// Key not seen in the previous frame; line kept verbatim.
    New,
    /// Nothing changed; line dropped.
    Unchanged,
    /// Transform changed, texture did not; kept without the texture payload.
    TransformChanged,
    /// Only the texture changed; rewritten to a head-slot replacement.
    TextureChanged,
    /// Both changed; line kept verbatim.
    BothChanged,
}

/// Decide how `line` relates to the previous frame's entry under the same key.
pub fn classify(line: &CommandLine, previous: &RetainedState) -> LineDecision {
    let Some(prev) = previous.get(&line.key) else {
        return LineDecision::New;
    };
    let transform_changed = line.transform_text() != prev.transform.as_deref();
    let texture_changed = line
        .texture()
        .is_some_and(|t| prev.texture.as_deref() != Some(t));
    match (texture_changed, transform_changed) {
        (false, false) => LineDecision::Unchanged,
        (false, true) => LineDecision::TransformChanged,
        (true, false) => LineDecision::TextureChanged,
        (true, true) => LineDecision::BothChanged,
    }
}

/// Per-frame line counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DedupStats {
    /// Lines written to the frame function, rewrites included.
    pub kept: usize,
    pub dropped: usize,
    /// Lines turned into head-slot replacements.
    pub rewritten: usize,
}

/// Result of deduplicating one frame.
#[derive(Clone, Debug, Default)]
pub struct DedupOutcome {
    pub lines: Vec<CommandLine>,
    /// State to hand to the next frame.
    pub state: RetainedState,
    pub stats: DedupStats,
}

/// Filter a frame's candidate lines against the previous frame's state.
pub fn deduplicate(candidates: Vec<CommandLine>, previous: &RetainedState) -> DedupOutcome {
    let mut out = DedupOutcome {
        lines: Vec::with_capacity(candidates.len()),
        ..Default::default()
    };

    for line in candidates {
        out.state.entries.insert(
            line.key.clone(),
            RetainedEntry {
                transform: line.transform_text().map(str::to_owned),
                texture: line.texture().map(str::to_owned),
            },
        );

        let kept = match classify(&line, previous) {
            LineDecision::New | LineDecision::BothChanged => Some(line),
            LineDecision::Unchanged => None,
            LineDecision::TransformChanged => Some(line.without_texture()),
            LineDecision::TextureChanged => {
                out.stats.rewritten += 1;
                line.into_head_replacement()
            }
        };

        match kept {
            Some(line) if !line.is_empty() => {
                out.stats.kept += 1;
                out.lines.push(line);
            }
            _ => out.stats.dropped += 1,
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/dedup/retained.rs"]
mod tests;
