//! A repository stored on the local file system.
//!
//! All metadata lives in a `.vcs` control directory at the top of the work
//! tree:
//!
//! ```text
//! .vcs/
//!   objects/<40-hex-id>      zlib-compressed header + payload
//!   refs/heads/<branch>      40-hex commit ID + newline
//!   HEAD                     "ref: refs/heads/<branch>\n" or "<40-hex-id>\n"
//!   config                   [core] repositoryformatversion = 0, ...
//! ```
//!
//! A [`Repo`] is opened (or created) once per command and passed to every
//! operation; nothing here is global.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

mod commit;
pub use commit::CommitOutcome;

mod config;
pub use config::Config;

mod error;
pub use error::{Error, Result};

mod object_store;

mod refs;
pub use refs::{RefValue, ResolvedRef, HEAD};

/// Name of the control directory inside the work tree.
pub const VCS_DIR_NAME: &str = ".vcs";

/// Branch that `HEAD` points at in a new repository.
pub const DEFAULT_BRANCH: &str = "master";

/// The only `core.repositoryformatversion` this crate understands.
pub const SUPPORTED_FORMAT_VERSION: u32 = 0;

/// Identity recorded in commits when `[user]` is not configured.
pub const DEFAULT_AUTHOR_NAME: &str = "Anonymous";
pub const DEFAULT_AUTHOR_EMAIL: &str = "anonymous@localhost";

/// A repository on the local file system.
#[derive(Debug)]
pub struct Repo {
    work_dir: PathBuf,
    vcs_dir: PathBuf,
    config: Config,
}

/// Result of [`Repo::init`].
#[derive(Debug)]
pub enum InitOutcome {
    /// A new, empty repository was created.
    Created(Repo),

    /// A control directory was already present; nothing was touched.
    AlreadyInitialized,
}

impl Repo {
    /// Open an existing repository.
    ///
    /// `work_dir` should be the top-level working directory. A `.vcs` directory
    /// with a supported `config` must exist at this path. Use [`Repo::init`] to
    /// create an empty repository if necessary.
    pub fn open(work_dir: &Path) -> Result<Repo> {
        let work_dir = work_dir.to_path_buf();
        if !work_dir.is_dir() {
            return Err(Error::WorkDirDoesntExist(work_dir));
        }

        let vcs_dir = work_dir.join(VCS_DIR_NAME);
        if !vcs_dir.is_dir() {
            return Err(Error::NotARepository(work_dir));
        }

        let config_path = vcs_dir.join("config");
        if !config_path.is_file() {
            return Err(Error::ConfigNotFound(config_path));
        }

        let config = Config::from_file(&config_path)?;
        check_format_version(&config)?;

        Ok(Repo {
            work_dir,
            vcs_dir,
            config,
        })
    }

    /// Creates a new, empty repository on the local file system.
    ///
    /// If a control directory already exists this is a no-op and reports
    /// [`InitOutcome::AlreadyInitialized`].
    pub fn init(work_dir: &Path) -> Result<InitOutcome> {
        let vcs_dir = work_dir.join(VCS_DIR_NAME);
        if vcs_dir.exists() {
            debug!(path = %vcs_dir.display(), "repository already initialized");
            return Ok(InitOutcome::AlreadyInitialized);
        }

        create_objects_dir(&vcs_dir)?;
        create_refs_dir(&vcs_dir)?;

        let repo = Repo {
            work_dir: work_dir.to_path_buf(),
            vcs_dir,
            config: Config::for_new_repo(),
        };

        let default_branch = format!("refs/heads/{}", DEFAULT_BRANCH);
        repo.update_symbolic_ref(HEAD, &default_branch)?;
        repo.config.write_to(&repo.vcs_dir.join("config"))?;

        debug!(path = %repo.vcs_dir.display(), "initialized repository");
        Ok(InitOutcome::Created(repo))
    }

    /// Return the working directory for this repo.
    pub fn work_dir(&self) -> &Path {
        self.work_dir.as_path()
    }

    /// Return the path to the `.vcs` directory.
    pub fn vcs_dir(&self) -> &Path {
        self.vcs_dir.as_path()
    }

    /// Return the settings loaded from `.vcs/config`.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Name and e-mail recorded as author and committer of new commits.
    pub fn identity(&self) -> (&str, &str) {
        (
            self.config.get("user", "name").unwrap_or(DEFAULT_AUTHOR_NAME),
            self.config
                .get("user", "email")
                .unwrap_or(DEFAULT_AUTHOR_EMAIL),
        )
    }
}

fn check_format_version(config: &Config) -> Result<()> {
    let version = config
        .get("core", "repositoryformatversion")
        .ok_or(Error::MissingFormatVersion)?;

    match version.trim().parse::<u32>() {
        Ok(SUPPORTED_FORMAT_VERSION) => Ok(()),
        _ => Err(Error::UnsupportedFormatVersion(version.to_string())),
    }
}

fn create_objects_dir(vcs_dir: &Path) -> Result<()> {
    let objects_dir = vcs_dir.join("objects");
    fs::create_dir_all(&objects_dir).map_err(|e| e.into())
}

fn create_refs_dir(vcs_dir: &Path) -> Result<()> {
    let heads_dir = vcs_dir.join("refs/heads");
    fs::create_dir_all(&heads_dir).map_err(|e| e.into())
}

// Writes through a temporary file in the same directory and renames it into
// place, so readers never observe a partially written file.
fn write_atomically(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(dir) => dir,
        None => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(contents)?;
    temp.persist(path).map_err(|e| e.error)?;

    Ok(())
}
