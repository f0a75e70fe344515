use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{InspectError, Result};

pub mod history;
pub mod objects;
pub mod refs;

/// A located repository. Holds only the metadata root; everything else is
/// read fresh from disk on each call.
pub struct Repository {
    pub git_dir: PathBuf,
}

impl Repository {
    /// Open an existing repository.
    ///
    /// A `.git` subdirectory under `path` is the metadata root (non-bare
    /// layout). Failing that, `path` itself is the root when it directly
    /// contains both `objects/` and `refs/` (bare layout). Parent
    /// directories are never searched.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = fs::canonicalize(path.as_ref())
            .map_err(|_| InspectError::NotARepository(path.as_ref().to_path_buf()))?;
        let git_dir = locate_git_dir(&path)?;

        Ok(Self { git_dir })
    }

    pub fn objects_dir(&self) -> PathBuf {
        self.git_dir.join("objects")
    }
}

fn locate_git_dir(path: &Path) -> Result<PathBuf> {
    let dotgit = path.join(".git");
    if dotgit.is_dir() {
        return Ok(dotgit);
    }

    if path.join("objects").is_dir() && path.join("refs").is_dir() {
        return Ok(path.to_path_buf());
    }

    Err(InspectError::NotARepository(path.to_path_buf()))
}

/// List every file under `root`, recursively, as paths relative to `root`,
/// sorted lexicographically by their string form. A missing root is an
/// empty listing. Shared by the branch listing and the loose-object scan.
pub(crate) fn sorted_files_under(root: &Path) -> Result<Vec<String>> {
    if !root.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Ok(relative) = entry.path().strip_prefix(root) {
            files.push(relative.to_string_lossy().into_owned());
        }
    }

    files.sort();
    Ok(files)
}
