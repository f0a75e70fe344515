use std::path::Path;

use anyhow::Result;

use crate::repository::history::History;
use crate::repository::objects::{self, Commit, TreeEntry};
use crate::repository::{refs, Repository};

/// Print the head commit of `branch`, a blank line, its snapshot, and then
/// the full first-parent history of snapshots from the tip down to the root.
pub fn execute(path: &Path, branch: &str) -> Result<()> {
    let repo = Repository::open(path)?;
    let objects_dir = repo.objects_dir();

    let tip = refs::read_branch(&repo.git_dir, branch)?;
    let head = objects::read_commit(&objects_dir, &tip)?;

    print_commit(&head);
    println!();
    print_tree(&objects::read_tree(&objects_dir, &head.tree)?);

    for commit in History::new(&repo, &tip) {
        let commit = commit?;
        println!("commit {}", commit.oid);
        print_tree(&objects::read_tree(&objects_dir, &commit.tree)?);
    }

    Ok(())
}

fn print_commit(commit: &Commit) {
    println!("tree {}", commit.tree);
    for parent in &commit.parents {
        println!("parent {}", parent);
    }
    println!("author {}", commit.author);
    println!("committer {}", commit.committer);
    println!();
    print!("{}", with_final_newline(&commit.message));
}

fn print_tree(entries: &[TreeEntry]) {
    for entry in entries {
        println!("{} {}    {}", entry.kind, entry.oid, entry.name);
    }
}

// Guarantee the printed message ends in a line break without altering one
// that already does. An empty message stays empty.
fn with_final_newline(message: &str) -> String {
    if !message.is_empty() && !message.ends_with('\n') {
        format!("{}\n", message)
    } else {
        message.to_string()
    }
}
