//! Full analysis: load or generate data, review it, run the test

use abtest_core::DatasetSource;
use abtest_metrics::{AnalysisReport, AnalysisSession, GeneratorPolicy};
use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use crate::commands::describe::{print_histograms, print_summary_compact, print_summary_table};
use crate::commands::generate::{generate_dataset, GenerateArgs};
use crate::commands::test::{print_result, warn_degenerate};
use crate::commands::{load_dataset, TestSettingsArgs};
use crate::context::Context;
use crate::output::{print_field, print_section, TableDisplay};

#[derive(Debug, Clone, Args)]
pub struct AnalyzeArgs {
    /// CSV file with `group` and `outcome` columns
    #[arg(required_unless_present = "generate", conflicts_with = "generate")]
    pub file: Option<PathBuf>,

    /// Analyze a freshly generated dataset with this many rows per group
    #[arg(short = 'g', long, value_name = "SAMPLE_SIZE")]
    pub generate: Option<usize>,

    /// Generation policy when generating: fixed or randomized
    #[arg(short, long, requires = "generate")]
    pub policy: Option<GeneratorPolicy>,

    /// Seed for a reproducible generated dataset
    #[arg(long, requires = "generate")]
    pub seed: Option<u64>,

    /// Accept generated sample sizes below the configured minimum
    #[arg(long, requires = "generate")]
    pub allow_small: bool,

    /// Number of histogram bins (defaults to the configured value)
    #[arg(short, long)]
    pub bins: Option<usize>,

    #[command(flatten)]
    pub settings: TestSettingsArgs,
}

/// Execute the analyze command
pub fn execute(ctx: &Context, args: AnalyzeArgs) -> Result<()> {
    let config = args.settings.resolve(ctx)?;
    let bins = args.bins.unwrap_or(ctx.config.bins);

    let dataset = match (&args.file, args.generate) {
        (Some(path), _) => load_dataset(path)?,
        (None, sample_size) => generate_dataset(
            ctx,
            &GenerateArgs {
                sample_size,
                policy: args.policy,
                seed: args.seed,
                allow_small: args.allow_small,
                out: None,
            },
        )?,
    };

    let mut session = AnalysisSession::new();
    session.load(dataset);

    let report = session.analyze(&config, bins)?;
    warn_degenerate(ctx, &report.result);
    let source = session.dataset()?.source.clone();
    ctx.output.write(&ReportDisplay {
        source,
        report,
        verbose: ctx.verbose,
    })?;
    Ok(())
}

/// Displayable analysis report
#[derive(Debug, Serialize)]
struct ReportDisplay {
    source: DatasetSource,
    #[serde(flatten)]
    report: AnalysisReport,
    #[serde(skip)]
    verbose: bool,
}

impl TableDisplay for ReportDisplay {
    fn display_single(&self) {
        print_section("Dataset");
        match &self.source {
            DatasetSource::Upload { path } => print_field("File", &path.display().to_string()),
            DatasetSource::Synthetic {
                generator,
                parameters,
                seed,
            } => {
                print_field("Generator", generator);
                print_field("Per group", &parameters.sample_size.to_string());
                if self.verbose {
                    print_field(
                        "Parameters",
                        &format!(
                            "A ~ N({:.2}, {:.2}), B ~ N({:.2}, {:.2})",
                            parameters.mean_a, parameters.sd_a, parameters.mean_b, parameters.sd_b
                        ),
                    );
                }
                if let Some(seed) = seed {
                    print_field("Seed", &seed.to_string());
                }
            }
            DatasetSource::Inline => print_field("Source", "inline"),
        }

        print_summary_table(&self.report.summary);
        if self.verbose {
            print_histograms(&self.report.histograms);
        }
        print_result(&self.report.result, self.report.configuration.alternative);
    }

    fn display_compact(&self) {
        print_summary_compact(&self.report.summary);
        let r = &self.report.result;
        println!(
            "t={:.4}\tp={:.6}\treject_null={}",
            r.t_statistic, r.p_value, r.reject_null
        );
    }
}
