//! Resolution of the repository's main line branch name

use crate::error::{GhSemverError, Result};
use crate::git::Repository;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Source of the main line branch's short name
pub trait MainBranchSource {
    fn main_branch(&self) -> Result<String>;
}

/// A main branch name known up front (configuration, tests)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedMainBranch(pub String);

impl FixedMainBranch {
    pub fn new(name: impl Into<String>) -> Self {
        FixedMainBranch(name.into())
    }
}

impl MainBranchSource for FixedMainBranch {
    fn main_branch(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Detects the default branch from the remote's symbolic HEAD, falling back
/// to asking the GitHub CLI.
pub struct DetectMainBranch<'r, R> {
    repo: &'r R,
    remote: String,
    gh_workdir: Option<PathBuf>,
}

impl<'r, R: Repository> DetectMainBranch<'r, R> {
    pub fn new(repo: &'r R, remote: impl Into<String>) -> Self {
        DetectMainBranch {
            repo,
            remote: remote.into(),
            gh_workdir: None,
        }
    }

    /// Enable the `gh repo view` fallback, run from `workdir`
    pub fn with_gh_fallback(mut self, workdir: impl Into<PathBuf>) -> Self {
        self.gh_workdir = Some(workdir.into());
        self
    }
}

impl<R: Repository> MainBranchSource for DetectMainBranch<'_, R> {
    fn main_branch(&self) -> Result<String> {
        if let Some(branch) = self.repo.remote_default_branch(&self.remote)? {
            debug!(remote = %self.remote, branch = %branch, "main branch from remote HEAD");
            return Ok(branch);
        }

        let Some(workdir) = &self.gh_workdir else {
            return Err(GhSemverError::main_branch(format!(
                "remote '{}' has no HEAD reference; set main_branch in the configuration",
                self.remote
            )));
        };

        let branch = query_github_default_branch(workdir).map_err(|e| {
            GhSemverError::main_branch(format!(
                "remote '{}' has no HEAD reference and the GitHub CLI query failed: {}",
                self.remote, e
            ))
        })?;
        debug!(branch = %branch, "main branch from GitHub CLI");
        Ok(branch)
    }
}

fn query_github_default_branch(workdir: &Path) -> Result<String> {
    let output = Command::new("gh")
        .args([
            "repo",
            "view",
            "--json",
            "defaultBranchRef",
            "--jq",
            ".defaultBranchRef.name",
        ])
        .current_dir(workdir)
        .output()?;

    if !output.status.success() {
        return Err(GhSemverError::main_branch(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }

    let branch = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if branch.is_empty() {
        return Err(GhSemverError::main_branch("gh returned an empty branch name"));
    }
    Ok(branch)
}
