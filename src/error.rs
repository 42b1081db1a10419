//! Error types for bbsync
//!
//! Covers the failure modes of a sync run:
//! - Input files (release metadata, website entry page)
//! - Git operations (open, status, commit, remote, push)
//! - File I/O (reading pages, writing the version record)
//!
//! A version mismatch and uncommitted working-tree changes are not errors;
//! they are ordinary states the workflow reports and asks the operator about.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result type alias for bbsync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for bbsync
#[derive(Debug)]
pub enum Error {
    /// Required input file problems
    Input(InputError),
    /// Git operation errors
    Git(GitError),
    /// I/O errors
    Io(IoError),
}

/// Required input file errors
#[derive(Debug)]
pub enum InputError {
    /// Release metadata file is missing (the run cannot proceed without
    /// knowing the authoritative release version)
    MissingRelease(PathBuf),
    /// Website entry file is missing (there is nothing to rewrite)
    MissingEntry(PathBuf),
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
    /// Directory is not (and could not become) a git repository
    OpenFailed { path: PathBuf, source: String },
    /// Underlying git2 operation failed
    OperationFailed { operation: String, source: String },
    /// Remote rejected the push or the network failed
    PushRejected(String),
}

/// File I/O errors
#[derive(Debug)]
pub enum IoError {
    /// Failed to read file
    ReadFailed { path: PathBuf, source: io::Error },
    /// Failed to write file
    WriteFailed { path: PathBuf, source: io::Error },
    /// Other I/O error
    Other(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Input(e) => write!(f, "Input error: {}", e),
            Error::Git(e) => write!(f, "Git error: {}", e),
            Error::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::MissingRelease(path) => {
                write!(f, "Release metadata file not found: {}", path.display())
            }
            InputError::MissingEntry(path) => {
                write!(f, "Website entry file not found: {}", path.display())
            }
        }
    }
}

impl fmt::Display for GitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GitError::OpenFailed { path, source } => {
                write!(f, "Failed to open repository at {}: {}", path.display(), source)
            }
            GitError::OperationFailed { operation, source } => {
                write!(f, "Git operation '{}' failed: {}", operation, source)
            }
            GitError::PushRejected(source) => {
                write!(f, "Push failed: {}", source)
            }
        }
    }
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoError::ReadFailed { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            IoError::WriteFailed { path, source } => {
                write!(f, "Failed to write {}: {}", path.display(), source)
            }
            IoError::Other(source) => write!(f, "{}", source),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(IoError::ReadFailed { source, .. })
            | Error::Io(IoError::WriteFailed { source, .. })
            | Error::Io(IoError::Other(source)) => Some(source),
            _ => None,
        }
    }
}

impl std::error::Error for InputError {}
impl std::error::Error for GitError {}
impl std::error::Error for IoError {}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(IoError::Other(err))
    }
}

impl Error {
    /// Check if error is a missing required input (fatal before any
    /// website file is touched)
    pub fn is_missing_input(&self) -> bool {
        matches!(self, Error::Input(_))
    }

    /// Operator-facing remediation hint, where one exists.
    ///
    /// A rejected push is the only case with a standard fix the tool can
    /// suggest; everything else needs the underlying message.
    pub fn remediation(&self) -> Option<&'static str> {
        match self {
            Error::Git(GitError::PushRejected(_)) => {
                Some("Check your credentials and network connection, then re-run bbsync.")
            }
            _ => None,
        }
    }
}
