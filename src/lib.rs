pub mod analyzer;
pub mod cli;
pub mod config;
pub mod conventional;
pub mod domain;
pub mod error;
pub mod git;
pub mod main_branch;
pub mod ui;

pub use analyzer::{ResolveOptions, VersionResolver};
pub use domain::{SemVer, VersionBump};
pub use error::{GhSemverError, Result};
