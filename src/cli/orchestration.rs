//! Main workflow orchestration logic
//!
//! Resolves the next version, renders it and optionally tags HEAD with it.
//! Kept apart from `main.rs` so the workflow can run against any
//! [Repository] without depending on clap.

use std::env;

use tracing::{info, instrument, warn};

use crate::analyzer::{ResolveOptions, VersionResolver};
use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::git::{Git2Repository, Repository};
use crate::main_branch::{DetectMainBranch, FixedMainBranch, MainBranchSource};

/// Arguments for the version workflow
///
/// Built from the configuration file with command-line flags layered on top.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub prefix: Option<String>,
    pub filter_path: Option<String>,
    /// Print the version without the branch/distance/hash suffix
    pub release: bool,
    /// Create an annotated tag named after the version on HEAD
    pub tag: bool,
    pub format: OutputFormat,
    /// Main line branch name; detected when unset
    pub main_branch: Option<String>,
    pub remote: String,
    /// Current branch name, for checkouts with a detached HEAD
    pub branch: Option<String>,
}

impl From<Config> for RunOptions {
    fn from(config: Config) -> Self {
        RunOptions {
            prefix: config.prefix,
            filter_path: config.filter_path,
            release: config.output.release,
            tag: false,
            format: config.output.format,
            main_branch: config.main_branch,
            remote: config.remote,
            branch: None,
        }
    }
}

impl RunOptions {
    fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            prefix: self.prefix.clone(),
            filter_path: self.filter_path.clone(),
            branch: self.branch.clone(),
        }
    }
}

/// Result of a successful workflow
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    /// The rendered version
    pub version: String,
    /// Whether a new tag was created
    pub tagged: bool,
}

/// Run the workflow in the repository containing the working directory.
pub fn run(options: &RunOptions) -> Result<RunOutcome> {
    let repo = Git2Repository::open(env::current_dir()?)?;

    match &options.main_branch {
        Some(name) => run_with(&repo, &FixedMainBranch::new(name.clone()), options),
        None => {
            let mut detect = DetectMainBranch::new(&repo, options.remote.clone());
            if let Some(workdir) = repo.workdir() {
                detect = detect.with_gh_fallback(workdir);
            }
            run_with(&repo, &detect, options)
        }
    }
}

/// Run the workflow against an already opened repository.
#[instrument(skip_all, fields(tag = options.tag, release = options.release))]
pub fn run_with<R: Repository>(
    repo: &R,
    main_branch: &dyn MainBranchSource,
    options: &RunOptions,
) -> Result<RunOutcome> {
    let next = VersionResolver::new(repo, main_branch, options.resolve_options())?.resolve()?;
    let version = next.print(options.release);

    let mut tagged = false;
    if options.tag {
        let head = repo.head()?;
        tagged = repo.create_annotated_tag(&version, &head.hash, &version)?;
        if tagged {
            info!(tag = %version, commit = %head.hash, "tagged HEAD");
        } else {
            warn!(tag = %version, "tag already exists, leaving it in place");
        }
    }

    Ok(RunOutcome { version, tagged })
}
