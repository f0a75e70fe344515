use std::fs;
use std::io;
use std::path::Path;

use crate::error::{InspectError, Result};

// Get the commit hash a branch currently points to. The reference lives at
// the fixed path refs/heads/<name>; branch names may contain slashes, which
// map onto nested directories. Read fresh on every call, never cached.
pub fn read_branch(git_dir: &Path, name: &str) -> Result<String> {
    let ref_path = git_dir.join("refs").join("heads").join(name);

    match fs::read_to_string(&ref_path) {
        Ok(content) => Ok(content.trim().to_string()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            Err(InspectError::BranchNotFound(name.to_string()))
        }
        Err(err) => Err(err.into()),
    }
}

// List all branches as paths relative to refs/heads, recursively, sorted
// lexicographically. A repository without a heads directory has no branches.
pub fn list_branches(git_dir: &Path) -> Result<Vec<String>> {
    super::sorted_files_under(&git_dir.join("refs").join("heads"))
}

/// Resolve HEAD to a commit hash: a `ref: <refname>` line goes through the
/// named reference file, anything else is a detached direct hash.
pub fn head_commit(git_dir: &Path) -> Result<String> {
    let content = fs::read_to_string(git_dir.join("HEAD"))?;

    if let Some(ref_name) = content.strip_prefix("ref: ") {
        let ref_name = ref_name.trim();
        match fs::read_to_string(git_dir.join(ref_name)) {
            Ok(target) => Ok(target.trim().to_string()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(InspectError::BranchNotFound(ref_name.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    } else {
        Ok(content.trim().to_string())
    }
}
