use regex::Regex;
use std::sync::LazyLock;

static FRAME_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"f\d+.*\.bdengine$").expect("frame file pattern"));
static FRAME_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"f(\d+)").expect("frame token pattern"));
static INTERPOLATION_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"i(\d+)").expect("interpolation token pattern"));
static STEP_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"s(\d+)").expect("score step token pattern"));

/// Metadata encoded in an input file name, e.g. `f12i3s2.bdengine`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameName {
    pub index: u64,
    /// `i<N>`: interpolation duration override for this frame.
    pub interpolation: Option<u32>,
    /// `s<N>`: how far the score counter advances for this frame.
    pub score_step: Option<u32>,
}

impl FrameName {
    /// Read the `f`, `i` and `s` tokens; `None` without an `f<N>` token.
    pub fn parse(file_name: &str) -> Option<Self> {
        let index = first_number(&FRAME_TOKEN, file_name)?;
        Some(Self {
            index,
            interpolation: first_number(&INTERPOLATION_TOKEN, file_name),
            score_step: first_number(&STEP_TOKEN, file_name),
        })
    }

    /// Counter advance; a missing or zero `s` token counts as 1.
    pub fn step(&self) -> i64 {
        match self.score_step {
            Some(s) if s > 0 => i64::from(s),
            _ => 1,
        }
    }

    /// Output function name, `f<N>`.
    pub fn function_name(&self) -> String {
        format!("f{}", self.index)
    }
}

fn first_number<T: std::str::FromStr>(re: &Regex, s: &str) -> Option<T> {
    re.captures(s)?.get(1)?.as_str().parse().ok()
}

/// `true` for names that look like exported frame files.
pub fn is_frame_file(file_name: &str) -> bool {
    FRAME_FILE.is_match(file_name)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameEntry<T> {
    pub name: FrameName,
    pub source: T,
}

/// Two-phase processing order.
///
/// The highest-index frame is the rest pose: it is processed once up front, output discarded,
/// only to seed deduplication state, and again as the last frame of the ascending pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FramePlan<T> {
    pub seed: FrameEntry<T>,
    pub ascending: Vec<FrameEntry<T>>,
}

impl<T: Clone> FramePlan<T> {
    /// `None` when there are no frames.
    pub fn new(mut frames: Vec<FrameEntry<T>>) -> Option<Self> {
        frames.sort_by_key(|f| f.name.index);
        let seed = frames.last()?.clone();
        tracing::debug!(
            seed = seed.name.index,
            frames = frames.len(),
            "planned frame order"
        );
        Some(Self {
            seed,
            ascending: frames,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/frames.rs"]
mod tests;
