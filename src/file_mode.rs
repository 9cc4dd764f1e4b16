use std::fmt::{self, Display, Formatter};
use std::fs::Metadata;

/// Mode recorded for an entry in a tree object.
///
/// Only the modes this store produces are represented: regular files
/// (`100644`), executables (`100755`) and subtrees (`40000`).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FileMode {
    Normal,
    Executable,
    Tree,
}

impl FileMode {
    /// The numeric mode, as written (in octal) into a tree entry.
    pub fn bits(self) -> u32 {
        match self {
            FileMode::Normal => 0o100644,
            FileMode::Executable => 0o100755,
            FileMode::Tree => 0o040000,
        }
    }

    /// Pick the mode for a regular file from its on-disk metadata.
    ///
    /// Only Unix has an executable bit; everywhere else this is `Normal`.
    #[cfg(unix)]
    pub fn from_metadata(metadata: &Metadata) -> FileMode {
        use std::os::unix::fs::PermissionsExt;

        if metadata.permissions().mode() & 0o111 != 0 {
            FileMode::Executable
        } else {
            FileMode::Normal
        }
    }

    #[cfg(not(unix))]
    pub fn from_metadata(_metadata: &Metadata) -> FileMode {
        FileMode::Normal
    }
}

impl Display for FileMode {
    // Octal without leading zero, as it appears inside a tree payload.
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{:o}", self.bits())
    }
}
