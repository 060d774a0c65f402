use crate::domain::VersionBump;
use crate::error::Result;
use regex::Regex;

const MAJOR_PATTERN: &str = r"^(fix|feat)(\(.+\))?!: |(?m:^BREAKING CHANGE: )";
const MINOR_PATTERN: &str = r"^feat(\(.+\))?: ";
const PATCH_PATTERN: &str = r"^fix(\(.+\))?: ";

/// Maps conventional commit messages to the bump they request.
///
/// Matching is case-sensitive and anchored at the start of the message, except
/// for a `BREAKING CHANGE: ` footer which may start any line.
#[derive(Debug, Clone)]
pub struct Classifier {
    major: Regex,
    minor: Regex,
    patch: Regex,
}

impl Classifier {
    pub fn new() -> Result<Self> {
        Ok(Classifier {
            major: Regex::new(MAJOR_PATTERN)?,
            minor: Regex::new(MINOR_PATTERN)?,
            patch: Regex::new(PATCH_PATTERN)?,
        })
    }

    /// Classify one commit message; several flags may be set at once
    pub fn classify(&self, message: &str) -> VersionBump {
        VersionBump {
            major: self.major.is_match(message),
            minor: self.minor.is_match(message),
            patch: self.patch.is_match(message),
        }
    }
}
