//! Pure formatting functions for version output.

use crate::config::OutputFormat;

/// Name of the output variable exposed to GitHub Actions
pub const OUTPUT_NAME: &str = "version";

/// Render the version line written to stdout.
///
/// # Example
/// ```
/// use gh_semver::config::OutputFormat;
/// use gh_semver::ui::formatter::render;
///
/// assert_eq!(render("v1.2.3", OutputFormat::Plain), "v1.2.3\n");
/// assert_eq!(
///     render("v1.2.3", OutputFormat::Action),
///     "::set-output name=version::v1.2.3\n"
/// );
/// ```
pub fn render(version: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Plain => format!("{}\n", version),
        OutputFormat::Action => format!("::set-output name={}::{}\n", OUTPUT_NAME, version),
    }
}

/// Render the `key=value` line appended to the `GITHUB_OUTPUT` file.
pub fn github_output_entry(version: &str) -> String {
    format!("{}={}\n", OUTPUT_NAME, version)
}
