//! Generate command

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use console::style;
use tracing::info;

use relnotes_changelog::{
    write_github_outputs, write_release_notes, ChangelogGenerator, ReleaseNotes,
};
use relnotes_core::config::load_config_or_default;
use relnotes_core::{Config, ConfigError};
use relnotes_github::{GitHubSource, IssueSource, JsonFileSource};

use crate::cli::{output, Cli, OutputFormat};

/// Repository label used when issues come from a file
const LOCAL_REPOSITORY: &str = "local";

/// Generate release notes for a milestone
#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Milestone to collect closed pull requests for
    #[arg(short, long, env = "RELNOTES_MILESTONE")]
    pub milestone: Option<String>,

    /// Repository in owner/name form
    #[arg(short, long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    /// GitHub API token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Read issues from a JSON file instead of GitHub
    #[arg(long, value_name = "PATH")]
    pub issues_file: Option<PathBuf>,

    /// Write to file (default: print to stdout)
    #[arg(short, long)]
    pub write: bool,

    /// Output file (defaults to the configured file name)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// GitHub Actions output file to receive `contents` and `file`
    #[arg(long, env = "GITHUB_OUTPUT", value_name = "PATH")]
    pub github_output: Option<PathBuf>,
}

impl GenerateCommand {
    /// Execute the generate command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            milestone = ?self.milestone,
            repository = ?self.repository,
            issues_file = ?self.issues_file,
            write = self.write,
            "executing generate command"
        );
        let cwd = std::env::current_dir()?;
        let (config, _) = load_config_or_default(&cwd)?;

        // Fail before any fetch if required inputs are missing.
        let milestone = resolve_required(
            self.milestone.as_deref(),
            config.milestone.as_deref(),
            "milestone (--milestone or RELNOTES_MILESTONE)",
        )?;
        let (source, repository) = self.build_source(&config)?;

        let rt = tokio::runtime::Runtime::new()?;
        let issues = rt
            .block_on(source.fetch(&repository, &milestone))
            .with_context(|| format!("collecting pull requests from {}", source.name()))?;

        let mut output_config = config.output.clone();
        if let Some(path) = &self.output {
            output_config.file = path.clone();
        }
        let generator = ChangelogGenerator::new(config.taxonomy.clone(), output_config);
        let notes = generator.generate(&issues);

        if !cli.quiet {
            report_summary(&notes);
        }

        if self.write {
            let path = write_release_notes(&notes, &cwd)?;
            if !cli.quiet {
                output::success(&format!(
                    "Release notes written to {}",
                    style(path.display()).cyan()
                ));
            }
        }

        if let Some(path) = &self.github_output {
            write_github_outputs(&notes, path)?;
            info!(path = %path.display(), "github outputs set");
        }

        match cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&notes)?);
            }
            OutputFormat::Text => {
                if !self.write {
                    print!("{}", notes.contents);
                }
            }
        }

        Ok(())
    }

    /// Pick the issue source and the repository it reads from
    fn build_source(&self, config: &Config) -> anyhow::Result<(Box<dyn IssueSource>, String)> {
        if let Some(path) = &self.issues_file {
            let repository = self
                .repository
                .clone()
                .or_else(|| config.repository.clone())
                .unwrap_or_else(|| LOCAL_REPOSITORY.to_string());
            return Ok((Box::new(JsonFileSource::new(path)), repository));
        }

        let repository = resolve_required(
            self.repository.as_deref(),
            config.repository.as_deref(),
            "repository (--repository or GITHUB_REPOSITORY)",
        )?;
        let token = self
            .token
            .clone()
            .or_else(|| std::env::var(&config.github.token_env).ok());
        let source = GitHubSource::new(config.github.clone(), token)?;

        Ok((Box::new(source), repository))
    }
}

/// Take a value from the command line, falling back to the config file
fn resolve_required(
    flag: Option<&str>,
    configured: Option<&str>,
    field: &str,
) -> Result<String, ConfigError> {
    flag.or(configured)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ConfigError::MissingField(field.to_string()))
}

fn report_summary(notes: &ReleaseNotes) {
    let summary = &notes.summary;
    output::info(&format!("CLI issues: {}", summary.cli_total));
    output::info(&format!("Library issues: {}", summary.library_total));

    for diagnostic in &notes.diagnostics {
        output::warning(&diagnostic.to_string());
    }

    if summary.dropped() > 0 {
        eprintln!(
            "{}",
            output::key_value("uncategorized", &summary.uncategorized.to_string())
        );
        eprintln!(
            "{}",
            output::key_value("multi-categorized", &summary.multi_categorized.to_string())
        );
        eprintln!(
            "{}",
            output::key_value("unknown category", &summary.unknown_category.to_string())
        );
    }
    output::info("Note: issues whose type has no category are not presented");

    if notes.is_empty() {
        output::warning("No categorized pull requests; release notes are empty");
    }
}
