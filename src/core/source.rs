//! Replay file discovery and loading.
//!
//! This is the I/O edge of the core: it finds log files in a folder, reads
//! their bytes and hands them to the parser.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::error::{AppError, from_io_error, from_parse_error};
use super::parser;
use super::replay::Replay;

/// List files in `folder` whose name ends with `suffix`, sorted by path.
///
/// Not recursive. Fails when the folder is missing or nothing matches.
pub fn discover_logs(folder: &Path, suffix: &str) -> Result<Vec<PathBuf>, AppError> {
    if !folder.is_dir() {
        return Err(AppError::FolderNotFound {
            path: folder.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(folder).map_err(|e| from_io_error(folder.to_path_buf(), e))?;

    let mut paths: Vec<PathBuf> = entries
        .map(|entry| entry.map(|e| e.path()))
        .filter_map(|entry| readable_entry(folder, entry))
        .filter(|path| path.is_file())
        .filter(|path| {
            path.file_name()
                .is_some_and(|name| name.to_string_lossy().ends_with(suffix))
        })
        .collect();
    paths.sort();

    if paths.is_empty() {
        return Err(AppError::NoInputFiles {
            folder: folder.to_path_buf(),
            suffix: suffix.to_string(),
        });
    }

    debug!(folder = %folder.display(), count = paths.len(), "discovered replay logs");
    Ok(paths)
}

/// Path of a directory entry, or `None` with a warning if it could not be read.
fn readable_entry(folder: &Path, entry: std::io::Result<PathBuf>) -> Option<PathBuf> {
    match entry {
        Ok(path) => Some(path),
        Err(e) => {
            warn!(folder = %folder.display(), error = %e, "skipping unreadable entry");
            None
        }
    }
}

/// Read and parse one replay file.
///
/// The replay's source label is the file name.
pub fn read_replay(path: &Path) -> Result<Replay, AppError> {
    let bytes = std::fs::read(path).map_err(|e| from_io_error(path.to_path_buf(), e))?;
    let label = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());

    let replay = parser::parse_bytes(&bytes, label)
        .map_err(|e| from_parse_error(path.to_path_buf(), &e))?;

    info!(
        path = %path.display(),
        frames = replay.len(),
        width = replay.width,
        height = replay.height,
        "loaded replay"
    );
    Ok(replay)
}
