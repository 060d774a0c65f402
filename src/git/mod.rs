//! Git operations abstraction layer
//!
//! The version engine reads history only through the [Repository] trait:
//!
//! - [repository::Git2Repository]: a real implementation using the `git2` crate
//! - [mock::MockRepository]: an in-memory implementation for tests
//!
//! Both share the ancestor traversal in [walk::AncestorWalk], so walk order
//! is identical no matter where the commits come from.

pub mod mock;
pub mod repository;
pub mod walk;

pub use mock::MockRepository;
pub use repository::Git2Repository;
pub use walk::{AncestorWalk, WalkOrder};

use crate::error::Result;

/// Commit data needed by the walker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    /// Full commit hash
    pub hash: String,
    /// Full commit message
    pub message: String,
    /// Parent hashes, first parent first
    pub parents: Vec<String>,
}

/// A tag name together with the commit it resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    pub name: String,
    /// Hash of the tagged commit (annotated tags are peeled)
    pub target: String,
}

/// The currently checked out reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadRef {
    /// Short branch name, `None` when HEAD is detached
    pub branch: Option<String>,
    /// Hash of the commit HEAD points at
    pub hash: String,
}

impl HeadRef {
    pub fn is_detached(&self) -> bool {
        self.branch.is_none()
    }
}

/// Lazy, finite sequence of commits produced by [Repository::walk]
pub type CommitIter<'a> = Box<dyn Iterator<Item = Result<CommitInfo>> + 'a>;

/// Repository capabilities the version engine depends on
///
/// Implementations map their storage errors onto [crate::error::GhSemverError];
/// none of the methods retry.
pub trait Repository {
    /// All tags whose name starts with `prefix` (every tag when `None`)
    ///
    /// Annotated tags are resolved to the commit they point at. Tags that do
    /// not point at a commit are skipped.
    fn tags(&self, prefix: Option<&str>) -> Result<Vec<TagRef>>;

    /// Walk the ancestors of `start` (inclusive) in the given order
    ///
    /// The iterator is not restartable; dropping it releases any handle it holds.
    fn walk<'a>(&'a self, start: &str, order: WalkOrder) -> Result<CommitIter<'a>>;

    /// Paths touched by a commit relative to its first parent
    fn changed_files(&self, hash: &str) -> Result<Vec<String>>;

    /// The current HEAD reference
    fn head(&self) -> Result<HeadRef>;

    /// Default branch advertised by `remote`, if the repository records one
    fn remote_default_branch(&self, remote: &str) -> Result<Option<String>>;

    /// Create an annotated tag on `target` unless a tag named `name` exists
    ///
    /// Returns `true` when a tag was created.
    fn create_annotated_tag(&self, name: &str, target: &str, message: &str) -> Result<bool>;
}
