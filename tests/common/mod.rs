//! Helpers for building throwaway git repositories in tests.
#![allow(dead_code)]

use git2::build::CheckoutBuilder;
use git2::{Oid, Repository, RepositoryInitOptions, Signature};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub struct TestRepo {
    pub dir: TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Initialise an empty repository whose first branch is `main`
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Could not create temp dir");
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("main");
        let repo = Repository::init_opts(dir.path(), &opts).expect("Could not init git repo");

        {
            let mut config = repo.config().expect("Could not get config");
            config
                .set_str("user.name", "Test User")
                .expect("Could not set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Could not set user.email");
        }

        TestRepo { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    fn signature(&self) -> Signature<'static> {
        Signature::now("Test User", "test@example.com").expect("Could not create signature")
    }

    fn head_commit(&self) -> Option<git2::Commit<'_>> {
        self.repo.head().ok().and_then(|h| h.peel_to_commit().ok())
    }

    /// Write `content` to `path` and commit it on the current branch
    pub fn commit(&self, path: &str, content: &str, message: &str) -> Oid {
        let full_path = self.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Could not create directories");
        }
        fs::write(&full_path, content).expect("Could not write file");

        let mut index = self.repo.index().expect("Could not get index");
        index
            .add_path(Path::new(path))
            .expect("Could not add file to index");
        index.write().expect("Could not write index");
        let tree_id = index.write_tree().expect("Could not write tree");
        let tree = self.repo.find_tree(tree_id).expect("Could not find tree");

        let sig = self.signature();
        let parent = self.head_commit();
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Could not create commit")
    }

    /// Record a merge of `other` into the current branch, keeping our tree
    pub fn merge(&self, other: Oid, message: &str) -> Oid {
        let head = self.head_commit().expect("HEAD has no commit");
        let theirs = self.repo.find_commit(other).expect("Could not find commit");
        let tree = head.tree().expect("Could not get tree");
        let sig = self.signature();
        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &[&head, &theirs])
            .expect("Could not create merge commit")
    }

    pub fn tag_lightweight(&self, name: &str, target: Oid) {
        let object = self.repo.find_object(target, None).expect("Could not find object");
        self.repo
            .tag_lightweight(name, &object, false)
            .expect("Could not create tag");
    }

    pub fn tag_annotated(&self, name: &str, target: Oid) {
        let object = self.repo.find_object(target, None).expect("Could not find object");
        self.repo
            .tag(name, &object, &self.signature(), name, false)
            .expect("Could not create annotated tag");
    }

    /// Create `name` at HEAD and switch to it
    pub fn create_branch(&self, name: &str) {
        let head = self.head_commit().expect("HEAD has no commit");
        self.repo
            .branch(name, &head, false)
            .expect("Could not create branch");
        self.checkout(name);
    }

    pub fn checkout(&self, name: &str) {
        self.repo
            .set_head(&format!("refs/heads/{}", name))
            .expect("Could not set HEAD");
        self.repo
            .checkout_head(Some(CheckoutBuilder::new().force()))
            .expect("Could not check out HEAD");
    }

    /// Point HEAD at a branch that has no commits yet
    pub fn checkout_orphan(&self, name: &str) {
        self.repo
            .set_head(&format!("refs/heads/{}", name))
            .expect("Could not set HEAD");
    }

    pub fn detach(&self, target: Oid) {
        self.repo
            .set_head_detached(target)
            .expect("Could not detach HEAD");
    }

    pub fn short(oid: Oid) -> String {
        oid.to_string()[..7].to_string()
    }
}
