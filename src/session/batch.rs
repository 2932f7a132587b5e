use crate::config::settings::Settings;
use crate::dedup::retained::{DedupOutcome, RetainedState, deduplicate};
use crate::emit::command::{CommandLine, EmitContext, emit};
use crate::foundation::error::{BdError, BdResult};
use crate::io::decode::decode_frame_document;
use crate::io::files::{clear_stale_outputs, discover_frames, function_path, write_lines};
use crate::scene::model::SceneGraph;
use crate::scene::resolve::resolve;
use crate::sequence::frames::{FrameName, FramePlan};
use crate::sequence::score::{ScoreTable, dispatcher_lines};
use std::path::{Path, PathBuf};

/// Locations for a batch run.
#[derive(Clone, Debug)]
pub struct BatchOpts {
    /// Directory scanned for `f<N>*.bdengine` files.
    pub input_dir: PathBuf,
    /// Default destination for frame and dispatcher functions.
    pub result_dir: PathBuf,
}

impl Default for BatchOpts {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            result_dir: PathBuf::from("result"),
        }
    }
}

/// Totals for a finished batch run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub frames_written: u64,
    pub frames_skipped: u64,
    /// Dispatcher targets with no function file (their frame was skipped).
    pub dangling_functions: Vec<String>,
    pub lines_written: u64,
    pub lines_dropped: u64,
    pub lines_rewritten: u64,
    pub stale_removed: usize,
    pub dispatcher_path: PathBuf,
}

/// Generation context for one frame: `i<N>` overrides the configured interpolation.
pub fn frame_context(settings: &Settings, name: &FrameName) -> EmitContext {
    EmitContext {
        mode: settings.mode,
        interpolation: name.interpolation.or(settings.default_interpolation),
    }
}

/// Undeduplicated lines for a frame, in traversal order.
pub fn candidate_lines(graph: &SceneGraph, ctx: &EmitContext) -> Vec<CommandLine> {
    resolve(graph).iter().map(|el| emit(el, ctx)).collect()
}

/// Resolve, emit and deduplicate one frame against its predecessor's state.
#[tracing::instrument(skip(graph, previous), fields(elements = graph.element_count()))]
pub fn process_frame(
    graph: &SceneGraph,
    ctx: &EmitContext,
    previous: &RetainedState,
) -> DedupOutcome {
    deduplicate(candidate_lines(graph, ctx), previous)
}

pub fn load_frame(path: &Path) -> BdResult<SceneGraph> {
    let body = std::fs::read(path)
        .map_err(|e| BdError::io(format!("read frame '{}': {e}", path.display())))?;
    decode_frame_document(&body)
        .map_err(|e| BdError::decode(format!("'{}': {e}", path.display())))
}

/// Run the whole conversion: seed pass, ascending pass, dispatcher.
pub fn run_batch(settings: &Settings, opts: &BatchOpts) -> BdResult<BatchReport> {
    let frames = discover_frames(&opts.input_dir)?;
    let plan = FramePlan::new(frames).ok_or_else(|| {
        BdError::validation(format!(
            "no frame files (f<N>*.bdengine) found in '{}'",
            opts.input_dir.display()
        ))
    })?;

    let frame_dir = settings.frame_dir_or(&opts.result_dir).to_path_buf();
    let dispatcher_dir = settings.dispatcher_dir_or(&opts.result_dir).to_path_buf();

    let mut report = BatchReport::default();
    let mut cleared: Vec<&Path> = Vec::with_capacity(3);
    for dir in [
        opts.result_dir.as_path(),
        frame_dir.as_path(),
        dispatcher_dir.as_path(),
    ] {
        if cleared.contains(&dir) {
            continue;
        }
        report.stale_removed += clear_stale_outputs(dir, &settings.dispatcher_name)?;
        cleared.push(dir);
    }

    let mut state = RetainedState::default();
    match load_frame(&plan.seed.source) {
        Ok(graph) => {
            let ctx = frame_context(settings, &plan.seed.name);
            state = process_frame(&graph, &ctx, &state).state;
        }
        Err(e) if e.is_frame_local() => {
            tracing::warn!(frame = plan.seed.name.index, error = %e, "seed frame skipped");
        }
        Err(e) => return Err(e),
    }
    if state.is_empty() {
        tracing::warn!(
            frame = plan.seed.name.index,
            "seed frame resolved no elements; first frame is written in full"
        );
    }

    let mut table = ScoreTable::new(settings.score_start);
    for frame in &plan.ascending {
        let threshold = table.record(&frame.name);
        let graph = match load_frame(&frame.source) {
            Ok(graph) => graph,
            Err(e) if e.is_frame_local() => {
                let function = frame.name.function_name();
                tracing::warn!(frame = frame.name.index, error = %e, "frame skipped");
                tracing::warn!(
                    threshold,
                    "dispatcher still calls '{}{function}', which has no function file",
                    settings.namespace
                );
                report.frames_skipped += 1;
                report.dangling_functions.push(function);
                continue;
            }
            Err(e) => return Err(e),
        };

        let ctx = frame_context(settings, &frame.name);
        let outcome = process_frame(&graph, &ctx, &state);
        let lines: Vec<String> = outcome.lines.iter().map(ToString::to_string).collect();
        let path = function_path(&frame_dir, &frame.name.function_name());
        write_lines(&path, &lines)?;

        tracing::info!(
            frame = frame.name.index,
            threshold,
            lines = lines.len(),
            dropped = outcome.stats.dropped,
            rewritten = outcome.stats.rewritten,
            "wrote {}",
            path.display()
        );
        report.frames_written += 1;
        report.lines_written += lines.len() as u64;
        report.lines_dropped += outcome.stats.dropped as u64;
        report.lines_rewritten += outcome.stats.rewritten as u64;
        state = outcome.state;
    }

    let dispatcher_path = function_path(&dispatcher_dir, &settings.dispatcher_name);
    write_lines(&dispatcher_path, &dispatcher_lines(&table, settings))?;
    tracing::info!(entries = table.entries().len(), "wrote {}", dispatcher_path.display());
    report.dispatcher_path = dispatcher_path;
    Ok(report)
}

#[cfg(test)]
#[path = "../../tests/unit/session/batch.rs"]
mod tests;
