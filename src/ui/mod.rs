//! User interface module - version output and error reporting.
//!
//! - `formatter` - Pure formatting functions
//! - This module - Writing to stdout, stderr and the GitHub Actions output file

use std::env;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use console::style;

use crate::config::OutputFormat;
use crate::error::Result;

pub mod formatter;

/// Environment variable naming the GitHub Actions step output file
pub const GITHUB_OUTPUT_ENV: &str = "GITHUB_OUTPUT";

/// Format and print an error message in red to stderr.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("error:").red().bold(), message);
}

/// Write the computed version to stdout.
///
/// With the action format the version is also appended to the file named by
/// `GITHUB_OUTPUT`, when that variable is set.
pub fn write_version(version: &str, format: OutputFormat) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(formatter::render(version, format).as_bytes())?;
    stdout.flush()?;

    if format == OutputFormat::Action {
        if let Some(path) = env::var_os(GITHUB_OUTPUT_ENV).filter(|p| !p.is_empty()) {
            append_github_output(Path::new(&path), version)?;
        }
    }
    Ok(())
}

/// Append the version entry to a GitHub Actions output file.
pub fn append_github_output(path: &Path, version: &str) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(formatter::github_output_entry(version).as_bytes())?;
    Ok(())
}
