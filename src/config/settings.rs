use crate::emit::command::Mode;
use crate::foundation::error::{BdError, BdResult};
use std::path::{Path, PathBuf};

pub const DEFAULT_PLAYER: &str = "@s";
pub const DEFAULT_OBJECTIVE: &str = "frame";
pub const DEFAULT_DISPATCHER_NAME: &str = "frame";

/// Settings read from the `key: value` settings file.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub mode: Mode,
    /// Score holder used by the dispatcher's `execute if score` checks.
    pub player: String,
    pub objective: String,
    /// Interpolation applied when a frame's file name carries no `i<N>` override.
    pub default_interpolation: Option<u32>,
    pub score_start: i64,
    /// Prepended verbatim to `f<N>` in dispatcher function calls, e.g. `pack:anim/`.
    pub namespace: String,
    pub dispatcher_name: String,
    pub frame_dir: Option<PathBuf>,
    pub dispatcher_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: Mode::Context,
            player: DEFAULT_PLAYER.to_owned(),
            objective: DEFAULT_OBJECTIVE.to_owned(),
            default_interpolation: None,
            score_start: 0,
            namespace: String::new(),
            dispatcher_name: DEFAULT_DISPATCHER_NAME.to_owned(),
            frame_dir: None,
            dispatcher_dir: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Key {
    Mode,
    Player,
    Objective,
    Interpolation,
    ScoreStart,
    Namespace,
    DispatcherName,
    FrameDir,
    DispatcherDir,
}

// (english, legacy) spellings; legacy keys are what existing setting files use.
const KEYS: &[(&str, &str, Key)] = &[
    ("mode", "생성모드", Key::Mode),
    ("player", "임시플레이어(선택)", Key::Player),
    ("objective", "스코어 이름(선택)", Key::Objective),
    ("interpolation", "기본 보간값(선택)", Key::Interpolation),
    ("score_start", "시작 스코어 값(선택)", Key::ScoreStart),
    ("namespace", "네임스페이스", Key::Namespace),
    ("dispatcher_name", "score저장이름(기본값frame)", Key::DispatcherName),
    ("frame_dir", "frame저장위치(선택)", Key::FrameDir),
    ("dispatcher_dir", "score저장위치(선택)", Key::DispatcherDir),
];

fn lookup_key(raw: &str) -> Option<Key> {
    KEYS.iter()
        .find(|(en, legacy, _)| raw.eq_ignore_ascii_case(en) || raw == *legacy)
        .map(|(_, _, k)| *k)
}

impl Settings {
    pub fn parse(text: &str) -> BdResult<Self> {
        let mut out = Self::default();
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim().trim_start_matches('\u{feff}');
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let (key, value) = (key.trim(), value.trim());
            if value.is_empty() {
                continue;
            }
            let Some(key) = lookup_key(key) else {
                tracing::debug!(line = line_no + 1, key, "ignoring unknown settings key");
                continue;
            };
            out.apply(key, value, line_no + 1)?;
        }
        Ok(out)
    }

    pub fn from_path(path: impl AsRef<Path>) -> BdResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            BdError::config(format!("read settings file '{}': {e}", path.display()))
        })?;
        Self::parse(&text)
    }

    fn apply(&mut self, key: Key, value: &str, line: usize) -> BdResult<()> {
        match key {
            Key::Mode => {
                let n: u8 = value.parse().map_err(|_| {
                    BdError::config(format!("line {line}: mode must be 0 or 1, got '{value}'"))
                })?;
                self.mode = Mode::try_from(n)
                    .map_err(|e| BdError::config(format!("line {line}: {e}")))?;
            }
            Key::Player => self.player = value.to_owned(),
            Key::Objective => self.objective = value.to_owned(),
            Key::Interpolation => {
                let n: u32 = value.parse().map_err(|_| {
                    BdError::config(format!(
                        "line {line}: interpolation must be a non-negative integer, got '{value}'"
                    ))
                })?;
                self.default_interpolation = Some(n);
            }
            Key::ScoreStart => match value.parse::<i64>() {
                Ok(n) => self.score_start = n,
                Err(_) => {
                    tracing::warn!(line, value, "score start is not an integer; using 0");
                    self.score_start = 0;
                }
            },
            Key::Namespace => self.namespace = value.to_owned(),
            Key::DispatcherName => self.dispatcher_name = value.to_owned(),
            Key::FrameDir => self.frame_dir = Some(PathBuf::from(value)),
            Key::DispatcherDir => self.dispatcher_dir = Some(PathBuf::from(value)),
        }
        Ok(())
    }

    /// Directory for `f<N>.mcfunction` files.
    pub fn frame_dir_or<'a>(&'a self, result_dir: &'a Path) -> &'a Path {
        self.frame_dir.as_deref().unwrap_or(result_dir)
    }

    pub fn dispatcher_dir_or<'a>(&'a self, result_dir: &'a Path) -> &'a Path {
        self.dispatcher_dir.as_deref().unwrap_or(result_dir)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/settings.rs"]
mod tests;
