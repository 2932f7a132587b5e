use crate::config::settings::Settings;
use crate::sequence::frames::FrameName;

/// Dispatcher row: frame `frame` fires when the counter equals `threshold`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreEntry {
    pub frame: u64,
    pub threshold: i64,
}

/// Counter value at which each frame's function fires, in insertion order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreTable {
    counter: i64,
    entries: Vec<ScoreEntry>,
}

impl ScoreTable {
    /// Table whose first step-1 frame fires at `start`.
    pub fn new(start: i64) -> Self {
        Self {
            counter: start - 1,
            entries: Vec::new(),
        }
    }

    /// Advance the counter by the frame's step and record its threshold.
    ///
    /// The threshold is the advanced counter, so `step` is the delay between the previous
    /// frame and this one.
    pub fn record(&mut self, frame: &FrameName) -> i64 {
        self.counter += frame.step();
        let threshold = self.counter;
        match self.entries.iter_mut().find(|e| e.frame == frame.index) {
            Some(existing) => existing.threshold = threshold,
            None => self.entries.push(ScoreEntry {
                frame: frame.index,
                threshold,
            }),
        }
        threshold
    }

    /// Last threshold handed out, or `start - 1` before any frame.
    pub fn counter(&self) -> i64 {
        self.counter
    }

    /// Rows in first-recorded order.
    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }
}

/// Dispatcher script: one `execute if score` line per table entry.
pub fn dispatcher_lines(table: &ScoreTable, settings: &Settings) -> Vec<String> {
    table
        .entries()
        .iter()
        .map(|e| {
            format!(
                "execute if score {} {} matches {} run function {}f{}",
                settings.player, settings.objective, e.threshold, settings.namespace, e.frame
            )
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/score.rs"]
mod tests;
