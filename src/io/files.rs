use crate::foundation::error::{BdError, BdResult};
use crate::sequence::frames::{FrameEntry, FrameName, is_frame_file};
use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

pub const FUNCTION_EXT: &str = "mcfunction";

static FRAME_OUTPUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^f\d+\.mcfunction$").expect("frame output pattern"));

/// Frame files directly inside `dir`, in directory order.
pub fn discover_frames(dir: &Path) -> BdResult<Vec<FrameEntry<PathBuf>>> {
    let read = fs::read_dir(dir).map_err(|e| {
        BdError::io(format!("read input directory '{}': {e}", dir.display()))
    })?;
    let mut out = Vec::new();
    for entry in read {
        let entry = entry.map_err(|e| BdError::io(format!("read input directory entry: {e}")))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !is_frame_file(file_name) {
            continue;
        }
        let Some(name) = FrameName::parse(file_name) else {
            continue;
        };
        out.push(FrameEntry { name, source: path });
    }
    Ok(out)
}

/// `true` for files a previous run may have produced.
pub fn is_stale_output(file_name: &str, dispatcher_name: &str) -> bool {
    FRAME_OUTPUT.is_match(file_name) || file_name == format!("{dispatcher_name}.{FUNCTION_EXT}")
}

/// Delete previous outputs in `dir`; a missing directory is not an error.
pub fn clear_stale_outputs(dir: &Path, dispatcher_name: &str) -> BdResult<usize> {
    let read = match fs::read_dir(dir) {
        Ok(read) => read,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => {
            return Err(BdError::io(format!(
                "read output directory '{}': {e}",
                dir.display()
            )));
        }
    };
    let mut removed = 0;
    for entry in read.flatten() {
        let path = entry.path();
        let stale = path.is_file()
            && path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| is_stale_output(n, dispatcher_name));
        if !stale {
            continue;
        }
        fs::remove_file(&path)
            .map_err(|e| BdError::io(format!("remove '{}': {e}", path.display())))?;
        removed += 1;
    }
    Ok(removed)
}

/// `<dir>/<stem>.mcfunction`
pub fn function_path(dir: &Path, stem: &str) -> PathBuf {
    dir.join(format!("{stem}.{FUNCTION_EXT}"))
}

/// Write newline-terminated lines through a temp file and rename.
pub fn write_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> BdResult<()> {
    let mut text = String::new();
    for line in lines {
        text.push_str(line.as_ref());
        text.push('\n');
    }
    write_text_atomic(path, &text)
        .map_err(|e| BdError::io(format!("write '{}': {e}", path.display())))
}

fn write_text_atomic(path: &Path, text: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = temp_path_for(path);
    fs::write(&tmp_path, text)?;
    if let Err(error) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(error);
    }
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("output");
    let tmp_name = format!("{file_name}.tmp");
    match path.parent() {
        Some(parent) => parent.join(tmp_name),
        None => PathBuf::from(tmp_name),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/io/files.rs"]
mod tests;
