use std::path::Path;

use anyhow::Result;

use crate::repository::{refs, Repository};

/// Print every branch of the repository at `path`, one path relative to the
/// heads directory per line, sorted.
pub fn execute(path: &Path) -> Result<()> {
    let repo = Repository::open(path)?;

    for branch in refs::list_branches(&repo.git_dir)? {
        println!("{}", branch);
    }

    Ok(())
}
