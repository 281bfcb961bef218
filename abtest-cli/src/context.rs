//! CLI execution context

use anyhow::Result;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::config::CliConfig;
use crate::output::{OutputFormat, OutputWriter};

/// Execution context for CLI commands
pub struct Context {
    /// CLI configuration
    pub config: CliConfig,

    /// Explicit configuration file, if one was given
    pub config_path: Option<PathBuf>,

    /// Output format
    pub output_format: OutputFormat,

    /// Output writer
    pub output: OutputWriter,

    /// Verbose mode
    pub verbose: bool,
}

impl Context {
    /// Create a new context from CLI arguments
    pub fn new(cli: &Cli) -> Result<Self> {
        let config = CliConfig::load(cli.config.as_deref())?;

        let output_format = cli.output.unwrap_or(config.output_format);
        let output = OutputWriter::new(output_format, cli.no_color || !config.color);

        Ok(Self {
            config,
            config_path: cli.config.clone(),
            output_format,
            output,
            verbose: cli.verbose,
        })
    }

    /// Effective configuration file location
    pub fn resolved_config_path(&self) -> Result<PathBuf> {
        match &self.config_path {
            Some(path) => Ok(path.clone()),
            None => CliConfig::config_path(),
        }
    }
}
