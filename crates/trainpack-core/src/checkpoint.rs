use crate::layout::RunLayout;
use regex::Regex;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{info, warn};

/// Best-effort patch of the checkpoint index file.
///
/// TensorFlow-style trainers write a small text index whose entries embed
/// absolute paths to checkpoint shards. Those paths break as soon as the
/// artifact moves, so each line is reduced to its base filename. The rewrite
/// is two-phase: the patched content goes to a temporary file, is validated,
/// and only then atomically replaces the original. Failure here never aborts
/// the run; the original file is left untouched.
///
/// Returns whether the file was actually patched.
pub fn patch_checkpoint(layout: &RunLayout) -> bool {
    if !layout.checkpoint_dir().is_dir() {
        info!("no checkpoint directory; skipping path patch");
        return false;
    }
    let file = layout.checkpoint_file();
    if !file.is_file() {
        info!("no checkpoint index file; skipping path patch");
        return false;
    }

    match rewrite_checkpoint(&file) {
        Ok(()) => {
            info!("stripped path prefixes from {}", file.display());
            true
        }
        Err(err) => {
            warn!("checkpoint patch failed ({err}); keeping the original file");
            false
        }
    }
}

fn rewrite_checkpoint(path: &Path) -> io::Result<()> {
    let original = fs::read_to_string(path)?;
    let patched = strip_path_prefixes(&original)?;

    let tmp = path.with_extension("patched");
    fs::write(&tmp, &patched)?;

    // Commit only after the temporary passes validation.
    if let Err(err) = validate_rewrite(&tmp, original.lines().count()) {
        let _ = fs::remove_file(&tmp);
        return Err(err);
    }
    fs::rename(&tmp, path)
}

/// Reduce every line to its base filename, the moral equivalent of
/// `sed 's|.*/||'`: the greedy match consumes everything up to the last slash.
fn strip_path_prefixes(content: &str) -> io::Result<String> {
    let prefix = Regex::new(r".*/").map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    let mut patched = String::with_capacity(content.len());
    for line in content.lines() {
        patched.push_str(&prefix.replace(line, ""));
        patched.push('\n');
    }
    Ok(patched)
}

fn validate_rewrite(tmp: &Path, expected_lines: usize) -> io::Result<()> {
    let rewritten = fs::read_to_string(tmp)?;
    if rewritten.lines().count() != expected_lines {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "rewritten checkpoint index has a different line count",
        ));
    }
    Ok(())
}
