//! Init command

use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use dialoguer::{Confirm, Select};
use tracing::info;

use relnotes_core::config::defaults::{DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_YAML};
use relnotes_core::Config;

use crate::cli::Cli;

/// Initialize a new relnotes configuration
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Use defaults without prompting
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configuration file format
    #[arg(long, value_enum)]
    pub config_format: Option<ConfigFormat>,
}

/// Format of the generated configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, yes = self.yes, "executing init command");
        let cwd = std::env::current_dir()?;
        let requested = self
            .output
            .clone()
            .unwrap_or_else(|| cwd.join(DEFAULT_CONFIG_YAML));

        let format = self.choose_format(&requested)?;
        let config_path = target_path(requested, format);

        if config_path.exists() && !self.force {
            if self.yes {
                anyhow::bail!(
                    "Configuration file already exists at {}. Use --force to overwrite.",
                    config_path.display()
                );
            }

            let overwrite = Confirm::new()
                .with_prompt(format!(
                    "Configuration file already exists at {}. Overwrite?",
                    config_path.display()
                ))
                .default(false)
                .interact()?;

            if !overwrite {
                eprintln!("{}", style("Aborted.").yellow());
                return Ok(());
            }
        }

        let content = render_config(format)?;
        std::fs::write(&config_path, &content)?;

        if !cli.quiet {
            eprintln!(
                "{} Created configuration at {}",
                style("✓").green().bold(),
                style(config_path.display()).cyan()
            );
            eprintln!();
            eprintln!("Next steps:");
            eprintln!(
                "  1. Edit {} to match your repository's labels",
                config_path.display()
            );
            eprintln!("  2. Run {} to verify your setup", style("relnotes validate").cyan());
            eprintln!(
                "  3. Run {} to draft notes",
                style("relnotes generate --milestone <name>").cyan()
            );
        }

        Ok(())
    }

    /// An explicit flag or `.toml` path decides the format; otherwise ask.
    fn choose_format(&self, requested: &Path) -> anyhow::Result<ConfigFormat> {
        if let Some(format) = self.config_format {
            return Ok(format);
        }
        if requested.extension().is_some_and(|e| e == "toml") {
            return Ok(ConfigFormat::Toml);
        }
        if self.yes {
            return Ok(ConfigFormat::Yaml);
        }

        let formats = [ConfigFormat::Yaml, ConfigFormat::Toml];
        let selection = Select::new()
            .with_prompt("Configuration format")
            .items(&["yaml", "toml"])
            .default(0)
            .interact()?;
        Ok(formats[selection])
    }
}

/// The file that will actually be written for a format
fn target_path(requested: PathBuf, format: ConfigFormat) -> PathBuf {
    let extension = match format {
        ConfigFormat::Yaml => "yaml",
        ConfigFormat::Toml => "toml",
    };
    let other = match format {
        ConfigFormat::Yaml => "toml",
        ConfigFormat::Toml => "yaml",
    };

    if requested.extension().is_some_and(|e| e == other) {
        requested.with_extension(extension)
    } else {
        requested
    }
}

/// Render the default configuration in the requested format
fn render_config(format: ConfigFormat) -> anyhow::Result<String> {
    match format {
        ConfigFormat::Toml => {
            let config: Config = serde_yaml::from_str(DEFAULT_CONFIG_TEMPLATE)?;
            Ok(toml::to_string_pretty(&config)?)
        }
        ConfigFormat::Yaml => Ok(DEFAULT_CONFIG_TEMPLATE.to_string()),
    }
}
