use std::fmt::{self, Display, Formatter};

/// Describes the fundamental object type (blob, tree, or commit).
/// We use the word `kind` here to avoid conflict with the Rust reserved word `type`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Kind {
    Blob,
    Tree,
    Commit,
}

impl Kind {
    /// The type tag as it appears in an object header.
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Blob => "blob",
            Kind::Tree => "tree",
            Kind::Commit => "commit",
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
