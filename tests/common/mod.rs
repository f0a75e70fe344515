use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use tempfile::TempDir;

/// A throwaway on-disk repository fixture. Objects and references are
/// written in the same loose formats the inspector reads back.
pub struct TestRepo {
    dir: TempDir,
    git_dir: PathBuf,
}

impl TestRepo {
    /// Working-tree layout: metadata under `<root>/.git`.
    pub fn non_bare() -> Result<TestRepo> {
        let dir = tempfile::tempdir()?;
        let git_dir = dir.path().join(".git");
        init_layout(&git_dir)?;
        Ok(TestRepo { dir, git_dir })
    }

    /// Bare layout: `objects/` and `refs/` directly under the root.
    pub fn bare() -> Result<TestRepo> {
        let dir = tempfile::tempdir()?;
        let git_dir = dir.path().to_path_buf();
        init_layout(&git_dir)?;
        Ok(TestRepo { dir, git_dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_object(&self, id: &str, kind: &str, payload: &[u8]) -> Result<()> {
        let mut content = format!("{} {}", kind, payload.len()).into_bytes();
        content.push(0);
        content.extend_from_slice(payload);

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&content)?;
        self.write_raw_object(id, &encoder.finish()?)
    }

    /// Write arbitrary bytes at an object's storage path, bypassing
    /// compression. Used to plant corrupt objects.
    pub fn write_raw_object(&self, id: &str, bytes: &[u8]) -> Result<()> {
        let dir = self.git_dir.join("objects").join(&id[0..2]);
        fs::create_dir_all(&dir)?;
        fs::write(dir.join(&id[2..]), bytes)?;
        Ok(())
    }

    pub fn write_commit(
        &self,
        id: &str,
        tree: &str,
        parents: &[&str],
        identity: &str,
        message: &str,
    ) -> Result<()> {
        let mut payload = format!("tree {}\n", tree);
        for parent in parents {
            payload.push_str(&format!("parent {}\n", parent));
        }
        payload.push_str(&format!("author {} 1700000000 +0000\n", identity));
        payload.push_str(&format!("committer {} 1700000000 +0000\n", identity));
        payload.push('\n');
        payload.push_str(message);
        self.write_object(id, "commit", payload.as_bytes())
    }

    pub fn write_tree(&self, id: &str, entries: &[(&str, &str, &str)]) -> Result<()> {
        let mut payload = Vec::new();
        for (mode, name, entry_id) in entries {
            payload.extend_from_slice(mode.as_bytes());
            payload.push(b' ');
            payload.extend_from_slice(name.as_bytes());
            payload.push(0);
            payload.extend_from_slice(&hex::decode(entry_id)?);
        }
        self.write_object(id, "tree", &payload)
    }

    pub fn write_branch(&self, name: &str, commit_id: &str) -> Result<()> {
        let ref_path = self.git_dir.join("refs").join("heads").join(name);
        if let Some(parent) = ref_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(ref_path, format!("{}\n", commit_id))?;
        Ok(())
    }
}

fn init_layout(git_dir: &Path) -> Result<()> {
    fs::create_dir_all(git_dir.join("objects"))?;
    fs::create_dir_all(git_dir.join("refs").join("heads"))?;
    Ok(())
}

/// A synthetic 40-character object id built from one hex digit.
pub fn oid(digit: char) -> String {
    digit.to_string().repeat(40)
}
