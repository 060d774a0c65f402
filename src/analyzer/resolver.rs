use crate::analyzer::walker::{CommitWalker, TagIndex};
use crate::conventional::Classifier;
use crate::domain::SemVer;
use crate::error::{GhSemverError, Result};
use crate::git::{Repository, TagRef, WalkOrder};
use crate::main_branch::MainBranchSource;
use std::collections::hash_map::Entry;
use tracing::{debug, info, instrument, warn};

/// Short name used for a detached HEAD without a branch override
const DETACHED_HEAD: &str = "HEAD";

/// Monorepo and branch options for a resolution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Only tags starting with this prefix count; the result carries it
    pub prefix: Option<String>,
    /// Only commits touching files under this path are classified
    pub filter_path: Option<String>,
    /// Name of the current branch, overriding the HEAD short name
    pub branch: Option<String>,
}

/// Computes the next version from the main-line and current-position walks
pub struct VersionResolver<'a, R> {
    repo: &'a R,
    main_branch: &'a dyn MainBranchSource,
    options: ResolveOptions,
    classifier: Classifier,
}

impl<'a, R: Repository> VersionResolver<'a, R> {
    pub fn new(
        repo: &'a R,
        main_branch: &'a dyn MainBranchSource,
        options: ResolveOptions,
    ) -> Result<Self> {
        Ok(VersionResolver {
            repo,
            main_branch,
            options,
            classifier: Classifier::new()?,
        })
    }

    #[instrument(skip_all)]
    pub fn resolve(&self) -> Result<SemVer> {
        let prefix = self.options.prefix.as_deref().filter(|p| !p.is_empty());
        let tag_refs = self
            .repo
            .tags(prefix)
            .map_err(|e| GhSemverError::traversal(format!("couldn't get tags: {}", e)))?;
        let tags = build_tag_index(tag_refs);

        if tags.is_empty() {
            debug!("no tags in repository, starting at 0.1.0");
            let mut first = SemVer::new(0, 1, 0);
            if let Some(prefix) = prefix {
                first.prefix = prefix.to_string();
            }
            return Ok(first);
        }

        let head = self
            .repo
            .head()
            .map_err(|e| GhSemverError::traversal(format!("couldn't get head: {}", e)))?;
        let walker = CommitWalker::new(self.repo, &self.classifier)
            .with_filter_path(self.options.filter_path.as_deref());

        let main = walker.traverse(&tags, WalkOrder::MainLine, &head.hash)?;
        let mut latest_main = main.latest;
        if let Some(version) = latest_main.as_mut() {
            version.set_branch(self.main_branch.main_branch()?);
        }

        let branch = walker.traverse(&tags, WalkOrder::CurrentPosition, &head.hash)?;
        let mut latest_branch = branch.latest;
        if let Some(version) = latest_branch.as_mut() {
            let name = match &self.options.branch {
                Some(name) => name.clone(),
                None if head.is_detached() => DETACHED_HEAD.to_string(),
                None => head.branch.clone().unwrap_or_default(),
            };
            version.set_branch(name);
        }

        let base = match (&latest_main, &latest_branch) {
            (None, None) => {
                warn!(tags = tags.len(), "no tag reachable from HEAD");
                return Err(GhSemverError::UnreachableTags);
            }
            (Some(main), None) => main,
            (None, Some(branch)) => branch,
            // Equal triples favour the current branch
            (Some(main), Some(branch)) if main.greater_than(branch) => main,
            (Some(_), Some(branch)) => branch,
        };

        let mut bump = main.bump;
        bump |= branch.bump;
        let mut next = base.apply(&bump);

        if let (Some(main), Some(branch)) = (&latest_main, &latest_branch) {
            if branch.same_branch(main) {
                next.strip_extended();
            }
        }
        if let Some(prefix) = prefix {
            next.prefix = prefix.to_string();
        }

        info!(base = %base, ?bump, next = %next, "resolved version");
        Ok(next)
    }
}

/// Index tags by commit; when several tags share a commit the greater version wins
fn build_tag_index(tag_refs: Vec<TagRef>) -> TagIndex {
    let mut index = TagIndex::new();

    for tag in tag_refs {
        match index.entry(tag.target) {
            Entry::Vacant(slot) => {
                slot.insert(tag.name);
            }
            Entry::Occupied(mut slot) => {
                if outranks(&tag.name, slot.get()) {
                    slot.insert(tag.name);
                }
            }
        }
    }

    index
}

fn outranks(candidate: &str, current: &str) -> bool {
    match (SemVer::parse(candidate), SemVer::parse(current)) {
        (Ok(a), Ok(b)) if a.greater_than(&b) => true,
        (Ok(a), Ok(b)) if b.greater_than(&a) => false,
        (Ok(_), Err(_)) => true,
        (Err(_), Ok(_)) => false,
        _ => candidate > current,
    }
}
