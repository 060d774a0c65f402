//! Version computation: commit graph walks and their reconciliation

pub mod resolver;
pub mod walker;

pub use resolver::{ResolveOptions, VersionResolver};
pub use walker::{CommitWalker, TagIndex, WalkOutcome};
