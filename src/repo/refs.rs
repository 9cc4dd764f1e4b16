use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use super::{write_atomically, Error, Repo, Result};
use crate::object::Id;

/// Name of the ref that tracks the current position in history.
pub const HEAD: &str = "HEAD";

/// How many symbolic hops `resolve_ref` follows before giving up.
const MAX_SYMBOLIC_DEPTH: usize = 5;

const SYMBOLIC_PREFIX: &str = "ref: ";

/// The content of a ref file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RefValue {
    /// Points directly at a commit.
    Direct(Id),

    /// Points at another ref, named relative to the control directory
    /// (e.g. `refs/heads/master`).
    Symbolic(String),
}

impl RefValue {
    /// Parse the content of the ref file `name`.
    pub fn parse(name: &str, content: &str) -> Result<RefValue> {
        let value = content.trim_end();

        if let Some(target) = value.strip_prefix(SYMBOLIC_PREFIX) {
            let target = target.trim();
            check_ref_name(target)?;
            return Ok(RefValue::Symbolic(target.to_string()));
        }

        Id::from_hex(value)
            .map(RefValue::Direct)
            .map_err(|_| Error::InvalidRef {
                name: name.to_string(),
                content: content.to_string(),
            })
    }
}

impl fmt::Display for RefValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefValue::Direct(id) => write!(f, "{}", id),
            RefValue::Symbolic(target) => write!(f, "{}{}", SYMBOLIC_PREFIX, target),
        }
    }
}

/// Where a chain of refs ends up.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedRef {
    /// The last ref in the chain; this is the file a new commit should update.
    pub name: String,

    /// The commit it holds, or `None` if that ref has not been written yet.
    pub id: Option<Id>,
}

impl Repo {
    /// Return the path of the ref file `name`.
    ///
    /// Ref names are relative paths inside the control directory; absolute
    /// paths and `..` components are rejected.
    pub fn ref_path(&self, name: &str) -> Result<PathBuf> {
        check_ref_name(name)?;
        Ok(self.vcs_dir.join(name))
    }

    /// Read a single ref without following it.
    ///
    /// Returns `None` if the ref file does not exist.
    pub fn read_ref(&self, name: &str) -> Result<Option<RefValue>> {
        let path = self.ref_path(name)?;

        match fs::read_to_string(&path) {
            Ok(content) => RefValue::parse(name, &content).map(Some),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Follow symbolic refs starting at `name` until reaching a direct ref or
    /// a ref that does not exist yet.
    pub fn resolve_ref(&self, name: &str) -> Result<ResolvedRef> {
        let mut visited: Vec<String> = Vec::new();
        let mut current = name.to_string();

        for _ in 0..=MAX_SYMBOLIC_DEPTH {
            if visited.contains(&current) {
                break;
            }

            let value = self.read_ref(&current)?;
            visited.push(current.clone());

            match value {
                None => {
                    return Ok(ResolvedRef {
                        name: current,
                        id: None,
                    })
                }
                Some(RefValue::Direct(id)) => {
                    return Ok(ResolvedRef {
                        name: current,
                        id: Some(id),
                    })
                }
                Some(RefValue::Symbolic(target)) => current = target,
            }
        }

        Err(Error::SymbolicRefLoop(name.to_string()))
    }

    /// Point the ref `name` directly at `id`, replacing whatever it held.
    pub fn update_ref(&self, name: &str, id: &Id) -> Result<()> {
        let path = self.ref_path(name)?;
        write_atomically(&path, format!("{}\n", id).as_bytes())?;

        debug!(ref_name = name, %id, "updated ref");
        Ok(())
    }

    /// Make `name` a symbolic ref pointing at `target`.
    pub fn update_symbolic_ref(&self, name: &str, target: &str) -> Result<()> {
        check_ref_name(target)?;
        let path = self.ref_path(name)?;

        let value = RefValue::Symbolic(target.to_string());
        write_atomically(&path, format!("{}\n", value).as_bytes())?;

        debug!(ref_name = name, points_to = target, "updated symbolic ref");
        Ok(())
    }
}

fn check_ref_name(name: &str) -> Result<()> {
    let path = Path::new(name);
    let valid = !name.is_empty()
        && path
            .components()
            .all(|component| matches!(component, Component::Normal(_)));

    if valid {
        Ok(())
    } else {
        Err(Error::InvalidRefName(name.to_string()))
    }
}
