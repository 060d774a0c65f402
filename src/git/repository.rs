use crate::error::{GhSemverError, Result};
use crate::git::{AncestorWalk, CommitInfo, CommitIter, HeadRef, TagRef, WalkOrder};
use git2::{ErrorCode, Oid, Repository as Git2Repo};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Git2Repo::discover(path).map_err(|e| {
            GhSemverError::config(format!(
                "couldn't open git repository at '{}': {}",
                path.display(),
                e
            ))
        })?;
        debug!(path = %repo.path().display(), "opened git repository");

        Ok(Git2Repository { repo })
    }

    /// Working directory of the repository, if it is not bare
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    fn load_commit(&self, hash: &str) -> Result<CommitInfo> {
        let commit = self.repo.find_commit(Oid::from_str(hash)?)?;

        Ok(CommitInfo {
            hash: commit.id().to_string(),
            message: String::from_utf8_lossy(commit.message_bytes()).into_owned(),
            parents: commit.parent_ids().map(|oid| oid.to_string()).collect(),
        })
    }
}

impl super::Repository for Git2Repository {
    #[instrument(skip(self))]
    fn tags(&self, prefix: Option<&str>) -> Result<Vec<TagRef>> {
        let names = self.repo.tag_names(None)?;
        let mut tags = Vec::new();

        for name in names.iter().flatten() {
            if prefix.is_some_and(|p| !name.starts_with(p)) {
                continue;
            }

            let reference = self.repo.find_reference(&format!("refs/tags/{}", name))?;
            match reference.peel_to_commit() {
                Ok(commit) => tags.push(TagRef {
                    name: name.to_string(),
                    target: commit.id().to_string(),
                }),
                Err(e) => {
                    debug!(tag = name, error = %e, "skipping tag that does not point at a commit")
                }
            }
        }

        debug!(count = tags.len(), "listed tags");
        Ok(tags)
    }

    fn walk<'a>(&'a self, start: &str, order: WalkOrder) -> Result<CommitIter<'a>> {
        let start = self.repo.revparse_single(start)?.peel_to_commit()?.id();

        Ok(Box::new(AncestorWalk::new(
            start.to_string(),
            order,
            move |hash: &str| self.load_commit(hash),
        )))
    }

    fn changed_files(&self, hash: &str) -> Result<Vec<String>> {
        let commit = self.repo.find_commit(Oid::from_str(hash)?)?;
        let tree = commit.tree()?;
        let parent_tree = match commit.parents().next() {
            Some(parent) => Some(parent.tree()?),
            None => None,
        };

        let diff = self
            .repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)?;

        let mut seen = HashSet::new();
        let mut files = Vec::new();
        for delta in diff.deltas() {
            for path in [delta.old_file().path(), delta.new_file().path()]
                .into_iter()
                .flatten()
            {
                let path = path.to_string_lossy().into_owned();
                if seen.insert(path.clone()) {
                    files.push(path);
                }
            }
        }

        Ok(files)
    }

    fn head(&self) -> Result<HeadRef> {
        let head = self.repo.head()?;
        let hash = head.peel_to_commit()?.id().to_string();
        let branch = if head.is_branch() {
            head.shorthand().map(str::to_string)
        } else {
            None
        };

        Ok(HeadRef { branch, hash })
    }

    fn remote_default_branch(&self, remote: &str) -> Result<Option<String>> {
        let head_ref = format!("refs/remotes/{}/HEAD", remote);
        let reference = match self.repo.find_reference(&head_ref) {
            Ok(reference) => reference,
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let branch_prefix = format!("refs/remotes/{}/", remote);
        Ok(reference
            .symbolic_target()
            .and_then(|target| target.strip_prefix(&branch_prefix))
            .filter(|branch| !branch.is_empty() && *branch != "HEAD")
            .map(str::to_string))
    }

    #[instrument(skip(self, message))]
    fn create_annotated_tag(&self, name: &str, target: &str, message: &str) -> Result<bool> {
        match self.repo.find_reference(&format!("refs/tags/{}", name)) {
            Ok(_) => {
                debug!(name, "tag already exists");
                return Ok(false);
            }
            Err(e) if e.code() == ErrorCode::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        let object = self
            .repo
            .find_object(Oid::from_str(target)?, None)
            .map_err(|e| GhSemverError::tag(format!("Cannot find object: {}", e)))?;
        let signature = self.repo.signature()?;

        self.repo
            .tag(name, &object, &signature, message, false)
            .map_err(|e| GhSemverError::tag(format!("Cannot create tag '{}': {}", name, e)))?;

        info!(name, target, "created annotated tag");
        Ok(true)
    }
}
