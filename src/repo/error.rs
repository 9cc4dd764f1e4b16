use std::path::PathBuf;

use thiserror::Error;

/// Describes the potential error conditions that might arise from `Repo` operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("work directory does not exist: {0}")]
    WorkDirDoesntExist(PathBuf),

    #[error("not a repository (no .vcs directory): {0}")]
    NotARepository(PathBuf),

    #[error("configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("malformed configuration at line {line}: {text:?}")]
    InvalidConfig { line: usize, text: String },

    #[error("repository format version is not declared")]
    MissingFormatVersion,

    #[error("unsupported repository format version: {0}")]
    UnsupportedFormatVersion(String),

    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("ref does not exist: {0}")]
    RefNotFound(String),

    #[error("invalid ref name: {0:?}")]
    InvalidRefName(String),

    #[error("ref {name} has unrecognized content: {content:?}")]
    InvalidRef { name: String, content: String },

    #[error("symbolic ref {0} is cyclic or nested too deeply")]
    SymbolicRefLoop(String),

    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// A specialized `Result` type for `Repo` operations.
pub type Result<T> = std::result::Result<T, Error>;
