//! Validate command

use clap::Args;
use console::style;
use tracing::info;

use relnotes_core::config::{find_config, load_config};
use relnotes_core::Config;

use crate::cli::{Cli, OutputFormat};
use crate::exit_codes;

/// Validate configuration
#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// Strict mode - treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

impl ValidateCommand {
    /// Execute the validate command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(strict = self.strict, "executing validate command");
        let cwd = std::env::current_dir()?;

        let mut errors: Vec<String> = Vec::new();
        let mut warnings: Vec<String> = Vec::new();

        let config_path = find_config(&cwd);
        let config = match &config_path {
            Some(path) => match load_config(path) {
                Ok(config) => Some(config),
                Err(e) => {
                    errors.push(format!("Configuration: {}", e));
                    None
                }
            },
            None => {
                warnings.push("No configuration file found, defaults apply".to_string());
                Some(Config::default())
            }
        };

        if let Some(cfg) = &config {
            warnings.extend(environment_warnings(cfg, |var| std::env::var(var).ok()));
        }

        if self.strict {
            errors.append(&mut warnings);
        }

        let passed = errors.is_empty();

        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "valid": passed,
                    "config_path": config_path.map(|p| p.to_string_lossy().to_string()),
                    "errors": errors,
                    "warnings": warnings
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    println!("{}", style("Validation Results").bold());
                    println!();

                    if let Some(path) = &config_path {
                        println!("Config: {}", style(path.display()).cyan());
                        println!();
                    }

                    if !errors.is_empty() {
                        println!("{}", style("Errors:").red().bold());
                        for error in &errors {
                            println!("  {} {}", style("✗").red(), error);
                        }
                        println!();
                    }

                    if !warnings.is_empty() {
                        println!("{}", style("Warnings:").yellow().bold());
                        for warning in &warnings {
                            println!("  {} {}", style("!").yellow(), warning);
                        }
                        println!();
                    }

                    if passed {
                        if warnings.is_empty() {
                            println!("{}", style("✓ All checks passed").green().bold());
                        } else {
                            println!(
                                "{} with {} warning(s)",
                                style("✓ Validation passed").green().bold(),
                                warnings.len()
                            );
                        }
                    } else {
                        println!(
                            "{} with {} error(s)",
                            style("✗ Validation failed").red().bold(),
                            errors.len()
                        );
                    }
                }
            }
        }

        if !passed {
            std::process::exit(exit_codes::VALIDATION_ERROR);
        }

        Ok(())
    }
}

/// Inputs that `generate` will need but that are not available yet
fn environment_warnings<F>(config: &Config, lookup: F) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut warnings = Vec::new();

    if config.repository.is_none() && lookup("GITHUB_REPOSITORY").is_none() {
        warnings.push("Repository not set (config, --repository or GITHUB_REPOSITORY)".to_string());
    }

    if config.milestone.is_none() && lookup("RELNOTES_MILESTONE").is_none() {
        warnings.push("Milestone not set (config, --milestone or RELNOTES_MILESTONE)".to_string());
    }

    if lookup(&config.github.token_env).is_none() && lookup("GITHUB_TOKEN").is_none() {
        warnings.push(format!(
            "No API token in {}; only --issues-file runs will work",
            config.github.token_env
        ));
    }

    warnings
}
