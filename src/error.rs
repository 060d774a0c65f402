use thiserror::Error;

/// Unified error type for gh-semver operations
#[derive(Error, Debug)]
pub enum GhSemverError {
    #[error("couldn't parse {component} of '{input}': {reason}")]
    Parse {
        input: String,
        component: &'static str,
        reason: String,
    },

    #[error("commit traversal failed: {0}")]
    Traversal(String),

    #[error("tags exist in the repository, but not in ancestors of HEAD")]
    UnreachableTags,

    #[error("couldn't figure out main branch: {0}")]
    MainBranch(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Configuration error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Convenience type alias for Results in gh-semver
pub type Result<T> = std::result::Result<T, GhSemverError>;

impl GhSemverError {
    /// Create a parse error for one component of a version string
    pub fn parse(
        input: impl Into<String>,
        component: &'static str,
        reason: impl ToString,
    ) -> Self {
        GhSemverError::Parse {
            input: input.into(),
            component,
            reason: reason.to_string(),
        }
    }

    /// Create a traversal error with context
    pub fn traversal(msg: impl Into<String>) -> Self {
        GhSemverError::Traversal(msg.into())
    }

    /// Create a main branch resolution error with context
    pub fn main_branch(msg: impl Into<String>) -> Self {
        GhSemverError::MainBranch(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GhSemverError::Config(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        GhSemverError::Tag(msg.into())
    }
}
