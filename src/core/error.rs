//! Application error types for user-facing error handling.
//!
//! Per-file problems (unreadable, unparsable) are reported and skipped;
//! configuration problems stop the viewer before any window opens.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::parser::ParseError;

/// Application-level errors.
#[derive(Debug, Clone, Error)]
pub enum AppError {
    /// File was not found at the specified path
    #[error("File not found: {}", .path.display())]
    FileNotFound {
        /// Path to the file that was not found
        path: PathBuf,
    },

    /// File exists but cannot be read (permissions, locked, etc.)
    #[error("Cannot read file {}: {reason}", .path.display())]
    FileReadError {
        /// Path to the file that could not be read
        path: PathBuf,
        /// Reason for the failure
        reason: String,
    },

    /// File content is not a usable replay log
    #[error("Invalid replay log {}: {message}", .path.display())]
    InvalidFormat {
        /// Path to the file with invalid content
        path: PathBuf,
        /// Description of what's wrong
        message: String,
    },

    /// The replay folder does not exist or is not a directory
    #[error("Folder not found: {}", .path.display())]
    FolderNotFound {
        /// Folder that was requested
        path: PathBuf,
    },

    /// No replay folder was given and none was picked
    #[error("No replay folder selected")]
    NoFolderSelected,

    /// The folder holds no files with the replay suffix
    #[error("No {suffix} files found in: {}", .folder.display())]
    NoInputFiles {
        /// Folder that was scanned
        folder: PathBuf,
        /// File name suffix that was searched for
        suffix: String,
    },

    /// Every discovered file failed to load
    #[error("None of the {attempted} replay files could be loaded")]
    NoReplaysLoaded {
        /// Number of files that were tried
        attempted: usize,
    },

    /// Settings file exists but could not be used
    #[error("Settings load error: {reason}")]
    SettingsLoadError {
        /// Description of the failure
        reason: String,
    },
}

impl AppError {
    /// Returns true if the viewer cannot start after this error.
    ///
    /// Per-file and settings errors only drop the affected input.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::FolderNotFound { .. }
                | Self::NoFolderSelected
                | Self::NoInputFiles { .. }
                | Self::NoReplaysLoaded { .. }
        )
    }

    /// Get the file path associated with this error, if any.
    pub fn file_path(&self) -> Option<&Path> {
        match self {
            Self::FileNotFound { path }
            | Self::FileReadError { path, .. }
            | Self::InvalidFormat { path, .. }
            | Self::FolderNotFound { path } => Some(path.as_path()),
            Self::NoInputFiles { folder, .. } => Some(folder.as_path()),
            Self::NoFolderSelected
            | Self::NoReplaysLoaded { .. }
            | Self::SettingsLoadError { .. } => None,
        }
    }

    /// Get a short title describing the error class.
    pub fn title(&self) -> &'static str {
        match self {
            Self::FileNotFound { .. } => "File Not Found",
            Self::FileReadError { .. } => "Cannot Read File",
            Self::InvalidFormat { .. } => "Invalid Replay Log",
            Self::FolderNotFound { .. } => "Folder Not Found",
            Self::NoFolderSelected => "No Folder Selected",
            Self::NoInputFiles { .. } => "No Replay Files",
            Self::NoReplaysLoaded { .. } => "No Replays Loaded",
            Self::SettingsLoadError { .. } => "Settings Error",
        }
    }

    /// Get a brief description of the error suitable for display.
    pub fn brief_description(&self) -> String {
        match self {
            Self::FileNotFound { path } => {
                format!("The file '{}' could not be found.", display_name(path))
            }
            Self::FileReadError { path, .. } => {
                format!("Could not read the file '{}'.", display_name(path))
            }
            Self::InvalidFormat { path, message } => {
                format!("'{}' is not a replay log: {}", display_name(path), message)
            }
            other => other.to_string(),
        }
    }

    /// Get detailed error information for bug reports.
    pub fn detailed_info(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Error Type: {}", self.title()));
        lines.push(format!("Description: {}", self.brief_description()));

        if let Some(path) = self.file_path() {
            lines.push(format!("Full Path: {}", path.display()));
        }
        match self {
            Self::FileReadError { reason, .. } | Self::SettingsLoadError { reason } => {
                lines.push(format!("Reason: {}", reason));
            }
            Self::InvalidFormat { message, .. } => {
                lines.push(format!("Details: {}", message));
            }
            _ => {}
        }

        lines.join("\n")
    }
}

/// File name of `path` for messages, falling back to the full path.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// Create an AppError from a file path and I/O error.
pub fn from_io_error(path: PathBuf, error: std::io::Error) -> AppError {
    match error.kind() {
        std::io::ErrorKind::NotFound => AppError::FileNotFound { path },
        std::io::ErrorKind::PermissionDenied => AppError::FileReadError {
            path,
            reason: "Permission denied".to_string(),
        },
        _ => AppError::FileReadError {
            path,
            reason: error.to_string(),
        },
    }
}

/// Create an AppError from a parse error for the file at `path`.
pub fn from_parse_error(path: PathBuf, error: &ParseError) -> AppError {
    AppError::InvalidFormat {
        path,
        message: error.to_string(),
    }
}
