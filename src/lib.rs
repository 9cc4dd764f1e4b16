//! A minimal content-addressed version-control object store.
//!
//! Files are stored as blobs, a directory level as a tree, and a snapshot
//! as a commit chained to its parent. A `HEAD` ref (usually symbolic, via
//! a branch) tracks the current position in history.
//!
//! Everything lives under a `.vcs` control directory inside the work tree.

mod file_mode;
pub use file_mode::FileMode;

pub mod object;
pub mod repo;

#[cfg(test)]
mod test_support;
