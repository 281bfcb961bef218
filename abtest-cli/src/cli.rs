//! Command-line argument definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{
    analyze::AnalyzeArgs, config::ConfigCommands, describe::DescribeArgs,
    generate::GenerateArgs, template::TemplateArgs, test::TestArgs,
};
use crate::output::OutputFormat;

/// Compare two groups of outcomes with Welch's t-test
#[derive(Debug, Parser)]
#[command(name = "abtest", version, about, long_about = None)]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the configuration file
    #[arg(long, global = true, env = "ABTEST_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a synthetic A/B dataset as CSV
    Generate(GenerateArgs),

    /// Write the example CSV showing the expected layout
    Template(TemplateArgs),

    /// Show summary statistics and distributions of a dataset
    Describe(DescribeArgs),

    /// Run the hypothesis test on a dataset
    Test(TestArgs),

    /// Summarize and test a dataset in one step
    Analyze(AnalyzeArgs),

    /// Manage configuration
    Config(ConfigCommands),
}
