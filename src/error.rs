use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, InspectError>;

/// Everything that can go wrong while inspecting a repository. All of these
/// are fatal: callers propagate them up to `main`, which prints the message
/// and exits nonzero. Nothing is retried or downgraded to a warning.
#[derive(Debug, Error)]
pub enum InspectError {
    /// The path is neither a working tree with a `.git` directory nor a
    /// bare layout containing `objects/` and `refs/`.
    #[error("not a git repository: {}", .0.display())]
    NotARepository(PathBuf),

    /// A well-formed object id with no backing file in the object store.
    #[error("object {0} not found")]
    ObjectNotFound(String),

    /// The object exists but cannot be decoded: decompression failed, the
    /// header separator is missing, the payload is truncated, or the object
    /// is not of the type the caller expected.
    #[error("malformed object {oid}: {reason}")]
    MalformedObject { oid: String, reason: String },

    /// No reference file exists for the given branch name.
    #[error("branch '{0}' not found")]
    BranchNotFound(String),

    /// A commit payload with no `tree ` line names no snapshot at all.
    #[error("commit {0} has no tree")]
    CommitMissingTree(String),

    /// The command line did not match `<repository> [branch]`.
    #[error("usage: git-inspect <repository> [branch]")]
    Usage,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl InspectError {
    pub(crate) fn malformed(oid: &str, reason: impl Into<String>) -> Self {
        InspectError::MalformedObject {
            oid: oid.to_string(),
            reason: reason.into(),
        }
    }
}
