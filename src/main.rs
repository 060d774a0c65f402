use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gh_semver::cli::{self, RunOptions};
use gh_semver::config::{self, OutputFormat};
use gh_semver::ui;

#[derive(clap::Parser)]
#[command(
    name = "gh-semver",
    version,
    about = "Calculate the next semantic version from git tags and conventional commits"
)]
struct Args {
    #[arg(long, help = "GitHub Action output format named 'version'")]
    action: bool,

    #[arg(long, help = "The path to filter commits (in case of a mono-repo)")]
    filter_path: Option<String>,

    #[arg(long, help = "The prefix of the tag (in case of a mono-repo)")]
    prefix: Option<String>,

    #[arg(long, help = "Force release tag")]
    release: bool,

    #[arg(long, help = "Commit the tag")]
    tag: bool,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Main branch name (detected from the remote when omitted)")]
    main_branch: Option<String>,

    #[arg(long, help = "Remote used to detect the main branch")]
    remote: Option<String>,

    #[arg(
        long,
        env = "GITHUB_HEAD_REF",
        help = "Current branch name (for a detached HEAD)"
    )]
    branch: Option<String>,
}

impl Args {
    /// Layer the command-line flags over the loaded configuration
    fn into_options(self, config: config::Config) -> RunOptions {
        let mut options = RunOptions::from(config);
        if self.prefix.is_some() {
            options.prefix = self.prefix;
        }
        if self.filter_path.is_some() {
            options.filter_path = self.filter_path;
        }
        if self.main_branch.is_some() {
            options.main_branch = self.main_branch;
        }
        if let Some(remote) = self.remote {
            options.remote = remote;
        }
        if self.action {
            options.format = OutputFormat::Action;
        }
        options.release |= self.release;
        options.tag = self.tag;
        options.branch = self.branch.filter(|b| !b.is_empty());
        options
    }
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    match execute(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn execute(args: Args) -> anyhow::Result<()> {
    let config = config::load_config(args.config.as_deref())?;
    let options = args.into_options(config);

    let outcome = cli::run(&options)?;
    ui::write_version(&outcome.version, options.format)?;
    Ok(())
}

/// Log to stderr so stdout only carries the version; `RUST_LOG` overrides the
/// default `warn` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
