use crate::error::{GhSemverError, Result};
use crate::git::{AncestorWalk, CommitInfo, CommitIter, HeadRef, Repository, TagRef, WalkOrder};
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct MockCommit {
    message: String,
    parents: Vec<String>,
    files: Vec<String>,
}

/// In-memory repository for testing without actual git operations
///
/// Commits are keyed by whatever hash the test chooses. Tags are listed in
/// insertion order.
pub struct MockRepository {
    commits: HashMap<String, MockCommit>,
    tags: RefCell<Vec<TagRef>>,
    head: Option<HeadRef>,
    remote_heads: HashMap<String, String>,
    failing_commits: Vec<String>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            commits: HashMap::new(),
            tags: RefCell::new(Vec::new()),
            head: None,
            remote_heads: HashMap::new(),
            failing_commits: Vec::new(),
        }
    }

    /// Add a commit touching no files
    pub fn add_commit(&mut self, hash: &str, message: &str, parents: &[&str]) {
        self.add_commit_with_files(hash, message, parents, &[]);
    }

    /// Add a commit touching the given files
    pub fn add_commit_with_files(
        &mut self,
        hash: &str,
        message: &str,
        parents: &[&str],
        files: &[&str],
    ) {
        self.commits.insert(
            hash.to_string(),
            MockCommit {
                message: message.to_string(),
                parents: parents.iter().map(|p| p.to_string()).collect(),
                files: files.iter().map(|f| f.to_string()).collect(),
            },
        );
    }

    /// Add a tag pointing at a commit
    pub fn add_tag(&mut self, name: &str, target: &str) {
        self.tags.get_mut().push(TagRef {
            name: name.to_string(),
            target: target.to_string(),
        });
    }

    /// Check out a branch at a commit
    pub fn set_head(&mut self, branch: &str, hash: &str) {
        self.head = Some(HeadRef {
            branch: Some(branch.to_string()),
            hash: hash.to_string(),
        });
    }

    /// Check out a commit without a branch
    pub fn set_detached_head(&mut self, hash: &str) {
        self.head = Some(HeadRef {
            branch: None,
            hash: hash.to_string(),
        });
    }

    /// Record the default branch a remote advertises
    pub fn set_remote_head(&mut self, remote: &str, branch: &str) {
        self.remote_heads
            .insert(remote.to_string(), branch.to_string());
    }

    /// Make loading a commit fail, simulating a corrupt object store
    pub fn fail_on_commit(&mut self, hash: &str) {
        self.failing_commits.push(hash.to_string());
    }

    /// Names of all tags, including those created through the trait
    pub fn tag_names(&self) -> Vec<String> {
        self.tags.borrow().iter().map(|t| t.name.clone()).collect()
    }

    fn load_commit(&self, hash: &str) -> Result<CommitInfo> {
        if self.failing_commits.iter().any(|h| h == hash) {
            return Err(GhSemverError::traversal(format!("object {} is corrupt", hash)));
        }

        let commit = self
            .commits
            .get(hash)
            .ok_or_else(|| GhSemverError::traversal(format!("commit {} not found", hash)))?;

        Ok(CommitInfo {
            hash: hash.to_string(),
            message: commit.message.clone(),
            parents: commit.parents.clone(),
        })
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn tags(&self, prefix: Option<&str>) -> Result<Vec<TagRef>> {
        Ok(self
            .tags
            .borrow()
            .iter()
            .filter(|t| prefix.map_or(true, |p| t.name.starts_with(p)))
            .cloned()
            .collect())
    }

    fn walk<'a>(&'a self, start: &str, order: WalkOrder) -> Result<CommitIter<'a>> {
        Ok(Box::new(AncestorWalk::new(start, order, move |hash: &str| {
            self.load_commit(hash)
        })))
    }

    fn changed_files(&self, hash: &str) -> Result<Vec<String>> {
        self.commits
            .get(hash)
            .map(|c| c.files.clone())
            .ok_or_else(|| GhSemverError::traversal(format!("commit {} not found", hash)))
    }

    fn head(&self) -> Result<HeadRef> {
        self.head
            .clone()
            .ok_or_else(|| GhSemverError::traversal("HEAD is unborn"))
    }

    fn remote_default_branch(&self, remote: &str) -> Result<Option<String>> {
        Ok(self.remote_heads.get(remote).cloned())
    }

    fn create_annotated_tag(&self, name: &str, target: &str, _message: &str) -> Result<bool> {
        let mut tags = self.tags.borrow_mut();
        if tags.iter().any(|t| t.name == name) {
            return Ok(false);
        }
        tags.push(TagRef {
            name: name.to_string(),
            target: target.to_string(),
        });
        Ok(true)
    }
}
