use std::fs;
use std::path::PathBuf;

use tracing::{debug, warn};

use super::object_store::read_blob;
use super::{Error, Repo, Result, HEAD, VCS_DIR_NAME};
use crate::object::{Attribution, Commit, Id, Tree, TreeEntry};
use crate::FileMode;

/// What [`Repo::commit`] produced.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommitOutcome {
    /// ID of the new commit.
    pub id: Id,

    /// ID of the snapshot tree.
    pub tree: Id,

    /// Parents recorded in the commit: empty for the first commit.
    pub parents: Vec<Id>,

    /// The ref that now points at the commit (`HEAD` when detached).
    pub updated_ref: String,
}

impl CommitOutcome {
    /// Name of the branch that advanced, if HEAD was attached to one.
    pub fn branch(&self) -> Option<&str> {
        self.updated_ref.strip_prefix("refs/heads/")
    }
}

impl Repo {
    /// Record the current top level of the work tree as a new commit.
    ///
    /// Every regular file directly inside the work directory is stored as a
    /// blob; subdirectories are not descended into. The commit's parent is
    /// whatever HEAD resolves to, and that same ref is moved to the new commit.
    pub fn commit(&self, message: &str) -> Result<CommitOutcome> {
        // A broken HEAD should fail the commit before any object is written.
        if !self.ref_path(HEAD)?.is_file() {
            return Err(Error::RefNotFound(HEAD.to_string()));
        }
        let head = self.resolve_ref(HEAD)?;
        let parents: Vec<Id> = head.id.into_iter().collect();

        let tree = Tree::new(self.store_work_dir_files()?);
        let tree_id = self.put_loose_object(&tree.to_object()?)?;

        let (name, email) = self.identity();
        let commit = Commit::new(
            tree_id,
            parents.clone(),
            Attribution::now(name, email),
            message,
        );
        let id = self.put_loose_object(&commit.to_object()?)?;

        self.update_ref(&head.name, &id)?;

        debug!(%id, tree = %tree_id, parents = parents.len(), "created commit");

        Ok(CommitOutcome {
            id,
            tree: tree_id,
            parents,
            updated_ref: head.name,
        })
    }

    /// List the regular files directly inside the work directory, sorted by
    /// name. The control directory and anything that is not a regular file
    /// (directories, symlinks, ...) are skipped.
    pub fn scan_work_dir(&self) -> Result<Vec<(String, PathBuf)>> {
        let mut files = Vec::new();

        for entry in fs::read_dir(&self.work_dir)? {
            let entry = entry?;

            if entry.file_name().to_str() == Some(VCS_DIR_NAME) {
                continue;
            }

            if !entry.file_type()?.is_file() {
                continue;
            }

            match entry.file_name().into_string() {
                Ok(name) => files.push((name, entry.path())),
                Err(name) => warn!(file_name = ?name, "skipping file whose name is not valid UTF-8"),
            }
        }

        files.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
        Ok(files)
    }

    fn store_work_dir_files(&self) -> Result<Vec<TreeEntry>> {
        let mut entries = Vec::new();

        for (name, path) in self.scan_work_dir()? {
            let (object, metadata) = read_blob(&path)?;
            let mode = FileMode::from_metadata(&metadata);
            let id = self.put_loose_object(&object)?;

            entries.push(TreeEntry::new(mode, &name, id));
        }

        Ok(entries)
    }
}
