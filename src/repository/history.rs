use crate::error::Result;
use crate::repository::objects::{self, Commit};
use crate::repository::Repository;

/// First-parent walk over commit history, decoding one commit per step.
/// Yields the tip first and stops after a root commit. A failed lookup or
/// decode is yielded once as an error and ends the walk.
pub struct History<'repo> {
    repo: &'repo Repository,
    next_id: Option<String>,
}

impl<'repo> History<'repo> {
    pub fn new(repo: &'repo Repository, tip: &str) -> Self {
        History {
            repo,
            next_id: Some(tip.to_string()),
        }
    }
}

impl Iterator for History<'_> {
    type Item = Result<Commit>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next_id.take()?;

        match objects::read_commit(&self.repo.objects_dir(), &id) {
            Ok(commit) => {
                // Merge commits contribute only their first parent
                self.next_id = commit.parents.first().cloned();
                Some(Ok(commit))
            }
            Err(err) => Some(Err(err)),
        }
    }
}
