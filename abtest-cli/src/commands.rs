//! Command implementations and the argument groups they share

pub mod analyze;
pub mod config;
pub mod describe;
pub mod generate;
pub mod template;

use abtest_core::{
    csv_io, parse_confidence_level, Alternative, Dataset, HypothesisType, TestConfiguration,
};
use anyhow::{bail, Context as _, Result};
use clap::Args;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::context::Context;

/// Hypothesis test settings shared by `test` and `analyze`
#[derive(Debug, Clone, Args)]
pub struct TestSettingsArgs {
    /// Confidence level, as a fraction (0.95) or percentage (95%)
    #[arg(short, long)]
    pub confidence: Option<String>,

    /// Hypothesis type: "One Tail" or "Two Tails"
    #[arg(long = "hypothesis")]
    pub hypothesis_type: Option<HypothesisType>,

    /// Direction for a one-tailed test (greater: A > B, less: A < B).
    /// Without it the two-tailed p-value is simply halved.
    #[arg(long)]
    pub alternative: Option<Alternative>,
}

impl TestSettingsArgs {
    /// Merge command-line settings over configured defaults
    pub fn resolve(&self, ctx: &Context) -> Result<TestConfiguration> {
        let confidence_level = match &self.confidence {
            Some(raw) => parse_confidence_level(raw)?,
            None => ctx.config.confidence_level,
        };
        let hypothesis_type = self.hypothesis_type.unwrap_or(ctx.config.hypothesis_type);

        if self.alternative.is_some() && hypothesis_type == HypothesisType::TwoTailed {
            bail!("--alternative only applies to one-tailed tests (use --hypothesis \"One Tail\")");
        }

        let mut config = TestConfiguration::new(confidence_level, hypothesis_type)?;
        if let Some(alternative) = self.alternative {
            config = config.with_alternative(alternative);
        }
        Ok(config)
    }
}

/// Load a CSV dataset, describing the file in any error
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    csv_io::read_csv_path(path)
        .with_context(|| format!("Dataset {:?} was rejected", path))
}

/// Open `path` for writing, or stdout when no path is given
pub fn open_output(path: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    match path {
        Some(p) => {
            let file = File::create(p).with_context(|| format!("Failed to create {:?}", p))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}
