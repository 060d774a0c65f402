use crate::conventional::Classifier;
use crate::domain::{SemVer, VersionBump};
use crate::error::{GhSemverError, Result};
use crate::git::{Repository, WalkOrder};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Tagged commit hash -> tag name
pub type TagIndex = HashMap<String, String>;

/// Result of walking back from a commit to the nearest tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkOutcome {
    /// The nearest tag as a version carrying distance and hash, `None` when
    /// the walk reached the root without passing a tag
    pub latest: Option<SemVer>,
    /// Bump requested by the relevant commits passed on the way
    pub bump: VersionBump,
}

/// Walks commit ancestry until the first tagged commit
pub struct CommitWalker<'a, R> {
    repo: &'a R,
    classifier: &'a Classifier,
    filter_path: Option<&'a str>,
}

impl<'a, R: Repository> CommitWalker<'a, R> {
    pub fn new(repo: &'a R, classifier: &'a Classifier) -> Self {
        CommitWalker {
            repo,
            classifier,
            filter_path: None,
        }
    }

    /// Only classify commits touching a file under `path`
    pub fn with_filter_path(mut self, path: Option<&'a str>) -> Self {
        self.filter_path = path.filter(|p| !p.is_empty());
        self
    }

    #[instrument(skip(self, tags))]
    pub fn traverse(&self, tags: &TagIndex, order: WalkOrder, start: &str) -> Result<WalkOutcome> {
        let mut bump = VersionBump::default();
        let mut commit_distance: u64 = 0;
        let mut commit_hash: Option<String> = None;
        let mut latest_tag: Option<&str> = None;

        let commits = self.repo.walk(start, order).map_err(|e| {
            GhSemverError::traversal(format!("couldn't get commits from '{}': {}", start, e))
        })?;

        for commit in commits {
            let commit = commit.map_err(|e| {
                GhSemverError::traversal(format!("couldn't determine latest tag: {}", e))
            })?;

            if commit_hash.is_none() {
                commit_hash = Some(commit.hash.clone());
            }

            if let Some(tag) = tags.get(&commit.hash) {
                latest_tag = Some(tag.as_str());
                break;
            }
            commit_distance += 1;

            if self.is_relevant(&commit.hash)? {
                bump |= self.classifier.classify(&commit.message);
            }
        }

        let Some(tag) = latest_tag else {
            debug!(?order, distance = commit_distance, "no tag among ancestors");
            return Ok(WalkOutcome { latest: None, bump });
        };

        let mut latest = SemVer::parse(tag)?;
        latest.set_commit_distance(commit_distance);
        if let Some(hash) = &commit_hash {
            latest.set_commit_hash(hash);
        }
        debug!(?order, tag, distance = commit_distance, ?bump, "found latest tag");

        Ok(WalkOutcome {
            latest: Some(latest),
            bump,
        })
    }

    fn is_relevant(&self, hash: &str) -> Result<bool> {
        let Some(filter) = self.filter_path else {
            return Ok(true);
        };

        let files = self.repo.changed_files(hash).map_err(|e| {
            GhSemverError::traversal(format!("couldn't list files of commit {}: {}", hash, e))
        })?;
        Ok(files.iter().any(|file| file.starts_with(filter)))
    }
}
