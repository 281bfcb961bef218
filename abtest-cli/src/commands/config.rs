//! Configuration commands

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;

use crate::config::{CliConfig, ENV_PREFIX, KEYS};
use crate::context::Context;

/// Configuration management commands
#[derive(Debug, Args)]
pub struct ConfigCommands {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., confidence_level)
        key: String,

        /// Value to set
        value: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// Show configuration file path
    Path,

    /// Reset configuration to defaults
    Reset,
}

/// Execute configuration commands
pub fn execute(ctx: &Context, cmd: ConfigCommands) -> Result<()> {
    match cmd.command {
        ConfigSubcommand::Show => show(ctx),
        ConfigSubcommand::Set { key, value } => set(ctx, &key, &value),
        ConfigSubcommand::Get { key } => get(ctx, &key),
        ConfigSubcommand::Path => show_path(ctx),
        ConfigSubcommand::Reset => reset(ctx),
    }
}

fn show(ctx: &Context) -> Result<()> {
    println!("{}", "Configuration".bold().underline());
    println!();

    println!("{}", "Settings:".cyan());
    for key in KEYS {
        println!("  {}: {}", key, ctx.config.get(key)?);
    }

    println!();
    println!(
        "{}",
        format!("Environment variables {}_<KEY> override file values.", ENV_PREFIX).dimmed()
    );
    Ok(())
}

fn set(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let mut config = ctx.config.clone();
    config.set(key, value)?;
    let path = config.save(ctx.config_path.as_deref())?;

    ctx.output
        .success(&format!("Set {} = {} in {}", key, config.get(key)?, path.display()));
    Ok(())
}

fn get(ctx: &Context, key: &str) -> Result<()> {
    println!("{}", ctx.config.get(key)?);
    Ok(())
}

fn show_path(ctx: &Context) -> Result<()> {
    let path = ctx.resolved_config_path()?;
    let status = if path.exists() {
        "exists".green()
    } else {
        "not created".yellow()
    };
    println!("{} ({})", path.display(), status);
    Ok(())
}

fn reset(ctx: &Context) -> Result<()> {
    let path = CliConfig::default().save(ctx.config_path.as_deref())?;
    ctx.output
        .success(&format!("Configuration reset to defaults in {}", path.display()));
    Ok(())
}
