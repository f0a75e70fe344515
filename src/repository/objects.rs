use std::fs;
use std::io;
use std::io::Read;
use std::path::{Path, PathBuf};

use flate2::read::ZlibDecoder;

use crate::error::{InspectError, Result};

/// A decoded commit. `oid` is the identity the caller looked the commit up
/// under; it is recorded verbatim and never verified against the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub oid: String,
    pub tree: String,
    pub parents: Vec<String>,
    pub author: String,
    pub committer: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Tree,
    Blob,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Tree => "tree",
            EntryKind::Blob => "blob",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a tree payload, in the order it was encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub kind: EntryKind,
    pub oid: String,
    pub name: String,
}

// Validate an object id: exactly 40 hex characters once surrounding
// whitespace is trimmed. Lookups are case-insensitive, storage is lowercase.
fn normalize_id(raw: &str) -> Result<String> {
    let id = raw.trim();
    if id.len() == 40 && id.bytes().all(|b| b.is_ascii_hexdigit()) {
        Ok(id.to_ascii_lowercase())
    } else {
        Err(InspectError::malformed(id, "invalid object id"))
    }
}

// The first two hex characters name the fan-out directory, the remaining
// 38 name the file. `id` must already be normalized.
fn object_path(objects_dir: &Path, id: &str) -> PathBuf {
    objects_dir.join(&id[0..2]).join(&id[2..])
}

/// Read a loose object from the store and split it into its type tag and
/// raw payload. The on-disk bytes are zlib-compressed
/// `<type> <size>\0<payload>`; the first NUL is the only separator honored
/// and the size field is not enforced.
pub fn read_object(objects_dir: &Path, id: &str) -> Result<(String, Vec<u8>)> {
    let id = normalize_id(id)?;
    let path = object_path(objects_dir, &id);

    let compressed = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(InspectError::ObjectNotFound(id));
        }
        Err(err) => return Err(err.into()),
    };

    let mut decoder = ZlibDecoder::new(&compressed[..]);
    let mut decompressed = Vec::new();
    decoder
        .read_to_end(&mut decompressed)
        .map_err(|_| InspectError::malformed(&id, "decompression failed"))?;

    // Split header from payload at the first NUL
    let null_pos = decompressed
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| InspectError::malformed(&id, "missing header separator"))?;

    let header = String::from_utf8_lossy(&decompressed[0..null_pos]);
    let kind = header.split(' ').next().unwrap_or("").to_string();
    let payload = decompressed[null_pos + 1..].to_vec();

    Ok((kind, payload))
}

/// Read and decode the commit stored under `id`.
pub fn read_commit(objects_dir: &Path, id: &str) -> Result<Commit> {
    let id = normalize_id(id)?;
    let (kind, payload) = read_object(objects_dir, &id)?;
    if kind != "commit" {
        return Err(InspectError::malformed(&id, "not a commit object"));
    }

    parse_commit(&id, &payload)
}

/// Read and decode the tree stored under `id`.
pub fn read_tree(objects_dir: &Path, id: &str) -> Result<Vec<TreeEntry>> {
    let id = normalize_id(id)?;
    let (kind, payload) = read_object(objects_dir, &id)?;
    if kind != "tree" {
        return Err(InspectError::malformed(&id, "not a tree object"));
    }

    parse_tree(&id, &payload)
}

#[derive(Default)]
struct CommitFields {
    tree: Option<String>,
    parents: Vec<String>,
    author: String,
    committer: String,
}

/// Decode a commit payload. The text splits at the first blank line into a
/// header block and the message; header lines are folded into the record,
/// and unrecognized lines (encodings, signatures) are skipped.
pub fn parse_commit(oid: &str, payload: &[u8]) -> Result<Commit> {
    let text = String::from_utf8_lossy(payload);
    let (header, message) = match text.find("\n\n") {
        Some(pos) => (&text[..pos], &text[pos + 2..]),
        None => (&text[..], ""),
    };

    let fields = header.lines().fold(CommitFields::default(), |mut fields, line| {
        if let Some(rest) = line.strip_prefix("tree ") {
            if let Some(token) = rest.split_whitespace().next() {
                fields.tree = Some(token.to_string());
            }
        } else if let Some(rest) = line.strip_prefix("parent ") {
            fields.parents.push(rest.to_string());
        } else if let Some(rest) = line.strip_prefix("author ") {
            fields.author = identity(rest);
        } else if let Some(rest) = line.strip_prefix("committer ") {
            fields.committer = identity(rest);
        }
        fields
    });

    let tree = fields
        .tree
        .ok_or_else(|| InspectError::CommitMissingTree(oid.to_string()))?;

    Ok(Commit {
        oid: oid.to_string(),
        tree,
        parents: fields.parents,
        author: fields.author,
        committer: fields.committer,
        message: message.to_string(),
    })
}

// Everything up to and including the first '>', or the whole rest when the
// line never closes the address.
fn identity(rest: &str) -> String {
    match rest.find('>') {
        Some(pos) => rest[..=pos].to_string(),
        None => rest.to_string(),
    }
}

/// Decode a tree payload: a run of `<mode> <name>\0<20-byte hash>` entries
/// with no padding, consumed linearly until exhausted.
pub fn parse_tree(oid: &str, payload: &[u8]) -> Result<Vec<TreeEntry>> {
    let mut entries = Vec::new();
    let mut rest = payload;

    while !rest.is_empty() {
        let space_pos = rest
            .iter()
            .position(|&b| b == b' ')
            .ok_or_else(|| InspectError::malformed(oid, "truncated tree entry"))?;
        let mode = &rest[..space_pos];

        let after_mode = &rest[space_pos + 1..];
        let null_pos = after_mode
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| InspectError::malformed(oid, "truncated tree entry"))?;
        let name = &after_mode[..null_pos];

        let hash_start = null_pos + 1;
        let hash_end = hash_start + 20;
        if after_mode.len() < hash_end {
            return Err(InspectError::malformed(oid, "truncated tree entry"));
        }

        // 40000 is the only mode treated as a subdirectory; executables,
        // symlinks and gitlinks all land on blob here.
        let kind = if mode == b"40000" {
            EntryKind::Tree
        } else {
            EntryKind::Blob
        };

        entries.push(TreeEntry {
            kind,
            oid: hex::encode(&after_mode[hash_start..hash_end]),
            name: String::from_utf8_lossy(name).into_owned(),
        });

        rest = &after_mode[hash_end..];
    }

    Ok(entries)
}

/// Enumerate every loose object id in the store, sorted. Only paths shaped
/// like `<2 hex>/<38 hex>` count; pack and info files are skipped.
pub fn loose_objects(objects_dir: &Path) -> Result<Vec<String>> {
    let mut ids = Vec::new();

    for relative in super::sorted_files_under(objects_dir)? {
        if let Some((dir, file)) = relative.split_once('/') {
            if dir.len() == 2
                && file.len() == 38
                && dir.bytes().chain(file.bytes()).all(|b| b.is_ascii_hexdigit())
            {
                ids.push(format!("{dir}{file}"));
            }
        }
    }

    Ok(ids)
}
