use crate::error::{GhSemverError, Result};
use regex::Regex;
use std::fmt;
use std::ops::BitOrAssign;
use std::sync::LazyLock;

const TAG_PATTERN: &str = concat!(
    r"(?P<prefix>.+-)?(?P<v>v)?",
    r"(?P<major>\d+)\.(?P<minor>\d+)\.(?P<patch>\d+)",
    r"(?P<extended>-(?P<branch>\w+)\.(?P<commit_distance>\d+)\.(?P<commit_hash>\w+))?",
);

const SHORT_HASH_LEN: usize = 7;

static TAG_REGEX: LazyLock<std::result::Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(TAG_PATTERN));

/// Branch, distance and hash suffix of a pre-release version
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extended {
    pub branch: String,
    pub commit_distance: u64,
    pub commit_hash: String,
}

/// Semantic version as it appears in a tag
///
/// The shape is `[<prefix>-][v]<major>.<minor>.<patch>[-<branch>.<distance>.<hash>]`.
/// Only the `(major, minor, patch)` triple takes part in ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SemVer {
    pub prefix: String,
    pub leading_v: bool,
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub extended: Option<Extended>,
}

impl SemVer {
    /// Create a bare version without prefix, leading `v` or extended metadata
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemVer {
            prefix: String::new(),
            leading_v: false,
            major,
            minor,
            patch,
            extended: None,
        }
    }

    /// Parse a version from a tag name (e.g. "v1.2.3", "api-v1.2.3-featurex.4.abc1234")
    pub fn parse(input: &str) -> Result<Self> {
        let re = TAG_REGEX.as_ref().map_err(Clone::clone)?;
        let captures = re.captures(input).ok_or_else(|| {
            GhSemverError::parse(input, "version", "expected [prefix-][v]MAJOR.MINOR.PATCH")
        })?;

        let number = |name: &'static str, component: &'static str| -> Result<u64> {
            let digits = captures.name(name).map(|m| m.as_str()).unwrap_or_default();
            digits
                .parse::<u32>()
                .map(u64::from)
                .map_err(|e| GhSemverError::parse(input, component, e))
        };

        let mut version = SemVer::new(
            number("major", "major")?,
            number("minor", "minor")?,
            number("patch", "patch")?,
        );
        version.leading_v = captures.name("v").is_some();
        if let Some(prefix) = captures.name("prefix") {
            let prefix = prefix.as_str();
            version.prefix = prefix.strip_suffix('-').unwrap_or(prefix).to_string();
        }

        if captures.name("extended").is_some() {
            version.extended = Some(Extended {
                branch: captures["branch"].to_string(),
                commit_distance: number("commit_distance", "commit distance")?,
                commit_hash: captures["commit_hash"].to_string(),
            });
        }

        Ok(version)
    }

    /// Strictly greater on `(major, minor, patch)`; extended metadata is ignored
    pub fn greater_than(&self, other: &SemVer) -> bool {
        (self.major, self.minor, self.patch) > (other.major, other.minor, other.patch)
    }

    /// True only when both sides carry extended metadata with equal branch names
    pub fn same_branch(&self, other: &SemVer) -> bool {
        match (&self.extended, &other.extended) {
            (Some(mine), Some(theirs)) => mine.branch == theirs.branch,
            _ => false,
        }
    }

    pub fn inc_major(&self) -> SemVer {
        SemVer {
            major: self.major + 1,
            minor: 0,
            patch: 0,
            ..self.clone()
        }
    }

    pub fn inc_minor(&self) -> SemVer {
        SemVer {
            minor: self.minor + 1,
            patch: 0,
            ..self.clone()
        }
    }

    pub fn inc_patch(&self) -> SemVer {
        SemVer {
            patch: self.patch + 1,
            ..self.clone()
        }
    }

    /// Apply the highest level requested by `bump`, or return an unchanged copy
    pub fn apply(&self, bump: &VersionBump) -> SemVer {
        match bump.highest() {
            Some(BumpLevel::Major) => self.inc_major(),
            Some(BumpLevel::Minor) => self.inc_minor(),
            Some(BumpLevel::Patch) => self.inc_patch(),
            None => self.clone(),
        }
    }

    fn extended_mut(&mut self) -> &mut Extended {
        self.extended.get_or_insert_with(Extended::default)
    }

    pub fn set_branch(&mut self, branch: impl Into<String>) -> &mut Self {
        self.extended_mut().branch = branch.into();
        self
    }

    pub fn set_commit_distance(&mut self, commit_distance: u64) -> &mut Self {
        self.extended_mut().commit_distance = commit_distance;
        self
    }

    /// Store the short form (first 7 characters) of `commit_hash`
    pub fn set_commit_hash(&mut self, commit_hash: &str) -> &mut Self {
        let short = match commit_hash.char_indices().nth(SHORT_HASH_LEN) {
            Some((end, _)) => &commit_hash[..end],
            None => commit_hash,
        };
        self.extended_mut().commit_hash = short.to_string();
        self
    }

    /// Drop the extended metadata, leaving a release-style version
    pub fn strip_extended(&mut self) -> &mut Self {
        self.extended = None;
        self
    }

    /// Render the tag name; `release` omits the extended suffix
    pub fn print(&self, release: bool) -> String {
        let leading_v = if self.leading_v { "v" } else { "" };
        let version = match &self.extended {
            Some(ext) if !release => {
                let branch: String = ext
                    .branch
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric())
                    .collect();
                format!(
                    "{}{}.{}.{}-{}.{}.{}",
                    leading_v,
                    self.major,
                    self.minor,
                    self.patch,
                    branch,
                    ext.commit_distance,
                    ext.commit_hash
                )
            }
            _ => format!("{}{}.{}.{}", leading_v, self.major, self.minor, self.patch),
        };

        if self.prefix.is_empty() {
            version
        } else {
            format!("{}-{}", self.prefix, version)
        }
    }
}

impl fmt::Display for SemVer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.print(false))
    }
}

/// A single increment level, highest first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpLevel {
    Major,
    Minor,
    Patch,
}

/// Increment requested by the commits of a walk
///
/// Flags only ever accumulate; the highest set flag decides the increment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VersionBump {
    pub major: bool,
    pub minor: bool,
    pub patch: bool,
}

impl VersionBump {
    pub fn merge(&mut self, other: VersionBump) {
        self.major |= other.major;
        self.minor |= other.minor;
        self.patch |= other.patch;
    }

    pub fn highest(&self) -> Option<BumpLevel> {
        if self.major {
            Some(BumpLevel::Major)
        } else if self.minor {
            Some(BumpLevel::Minor)
        } else if self.patch {
            Some(BumpLevel::Patch)
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.highest().is_none()
    }
}

impl BitOrAssign for VersionBump {
    fn bitor_assign(&mut self, rhs: Self) {
        self.merge(rhs);
    }
}
