use std::io;

use super::{Id, Kind, Object};
use crate::FileMode;

/// One named entry of a tree: a mode, a name, and the ID of the target object.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreeEntry {
    mode: FileMode,
    name: String,
    id: Id,
}

impl TreeEntry {
    pub fn new(mode: FileMode, name: &str, id: Id) -> TreeEntry {
        TreeEntry {
            mode,
            name: name.to_string(),
            id,
        }
    }

    pub fn mode(&self) -> FileMode {
        self.mode
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    /// Appends `<mode> <name>\0<20 raw id bytes>` to `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.mode.to_string().as_bytes());
        out.push(b' ');
        out.extend_from_slice(self.name.as_bytes());
        out.push(0);
        out.extend_from_slice(self.id.as_bytes());
    }
}

/// A single directory level: an ordered list of entries.
///
/// Entries are encoded in exactly the order given. Neither sorting nor
/// duplicate names are checked; callers that care must do so themselves.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    pub fn new(entries: Vec<TreeEntry>) -> Tree {
        Tree { entries }
    }

    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    /// Returns the tree payload (without object header).
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for entry in &self.entries {
            entry.encode_into(&mut out);
        }
        out
    }

    /// Builds the tree object ready to be stored.
    pub fn to_object(&self) -> io::Result<Object> {
        Object::new(Kind::Tree, Box::new(self.encode()))
    }
}
