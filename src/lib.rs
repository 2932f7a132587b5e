//! `bdfunc` turns an exported display-entity keyframe animation into command functions.
//!
//! Each input frame is a scene graph of nested transforms. Frames are flattened to one
//! command line per display element, then diffed against the previous frame so only real
//! changes are written. A dispatcher function maps a scoreboard counter to the frame to run.
//!
//! - Parse [`Settings`]
//! - Run a [`run_batch`] over a directory of frame files, or
//! - Drive the pieces directly: [`decode_frame_document`] → [`process_frame`]
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod config;
pub(crate) mod dedup;
pub(crate) mod emit;
pub(crate) mod io;
pub(crate) mod scene;
pub(crate) mod sequence;
pub(crate) mod session;

pub use crate::foundation::error::{BdError, BdResult};
pub use crate::foundation::math::{Mat4, compose, transformation_text};

pub use crate::config::settings::Settings;
pub use crate::dedup::retained::{
    DedupOutcome, DedupStats, LineDecision, RetainedEntry, RetainedState, classify, deduplicate,
};
pub use crate::emit::command::{
    Action, CommandLine, EmitContext, Mode, Target, TransformPayload, emit,
};
pub use crate::io::decode::{decode_frame_bytes, decode_frame_document, encode_frame_document};
pub use crate::io::files::{
    FUNCTION_EXT, clear_stale_outputs, discover_frames, function_path, write_lines,
};
pub use crate::scene::descriptor::{
    ParsedDescriptor, Selector, canonical_identity, parse_descriptor, parse_tags,
};
pub use crate::scene::model::{DisplayKind, ElementNode, GroupNode, SceneGraph, SceneNode};
pub use crate::scene::resolve::{ResolvedElement, resolve};
pub use crate::sequence::frames::{FrameEntry, FrameName, FramePlan, is_frame_file};
pub use crate::sequence::score::{ScoreEntry, ScoreTable, dispatcher_lines};
pub use crate::session::batch::{
    BatchOpts, BatchReport, candidate_lines, frame_context, load_frame, process_frame, run_batch,
};
