use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{ConsoleError, ConsoleResult};

/// Saves `bytes` as `dir/filename`, creating `dir` when missing.
///
/// Only the last path component of `filename` is used, so a server-supplied
/// name cannot point outside the download directory.
pub fn save(dir: &Path, filename: &str, bytes: &[u8]) -> ConsoleResult<PathBuf> {
    let name = sanitize_filename(filename)?;
    std::fs::create_dir_all(dir)?;
    let path = dir.join(name);
    std::fs::write(&path, bytes)?;
    info!("Saved {} ({} bytes)", path.display(), bytes.len());
    Ok(path)
}

pub fn sanitize_filename(filename: &str) -> ConsoleResult<String> {
    let last = filename
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or("")
        .trim();
    let cleaned: String = last.chars().filter(|c| !c.is_control()).collect();
    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        return Err(ConsoleError::InvalidInput(format!("Invalid download filename: {:?}", filename)));
    }
    Ok(cleaned)
}
