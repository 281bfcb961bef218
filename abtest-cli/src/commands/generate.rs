//! Synthetic dataset generation

use abtest_core::{csv_io, Dataset, DatasetSource};
use abtest_metrics::GeneratorPolicy;
use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::commands::open_output;
use crate::context::Context;
use crate::output::{format_float, print_field, print_optional_field, print_section, TableDisplay};

#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Rows per group (defaults to the configured sample size)
    #[arg(short = 'n', long)]
    pub sample_size: Option<usize>,

    /// Generation policy: fixed or randomized
    #[arg(short, long)]
    pub policy: Option<GeneratorPolicy>,

    /// Seed for a reproducible dataset
    #[arg(long)]
    pub seed: Option<u64>,

    /// Accept sample sizes below the configured minimum
    #[arg(long)]
    pub allow_small: bool,

    /// Output file (CSV is written to stdout when omitted)
    #[arg(long = "out")]
    pub out: Option<PathBuf>,
}

/// Draw a dataset according to the arguments and configured defaults
pub fn generate_dataset(ctx: &Context, args: &GenerateArgs) -> Result<Dataset> {
    let sample_size = args.sample_size.unwrap_or(ctx.config.sample_size);
    if sample_size < ctx.config.min_sample_size && !args.allow_small {
        bail!(
            "Sample size {} is below the minimum of {} per group (pass --allow-small to override)",
            sample_size,
            ctx.config.min_sample_size
        );
    }

    let generator = args.policy.unwrap_or(ctx.config.policy).generator();
    let dataset = match args.seed {
        Some(seed) => generator.generate_seeded(sample_size, seed)?,
        None => generator.generate(sample_size)?,
    };
    Ok(dataset)
}

/// Execute the generate command
pub fn execute(ctx: &Context, args: GenerateArgs) -> Result<()> {
    let dataset = generate_dataset(ctx, &args)?;

    let writer = open_output(args.out.as_ref())?;
    csv_io::write_csv(&dataset, writer)?;

    if let Some(path) = &args.out {
        ctx.output
            .success(&format!("Wrote {} rows to {}", dataset.len(), path.display()));
        if let Some(display) = GenerationDisplay::from_dataset(&dataset, path) {
            ctx.output.write(&display)?;
        }
    }
    Ok(())
}

/// Displayable generation summary
#[derive(Debug, Serialize)]
struct GenerationDisplay {
    path: PathBuf,
    generator: String,
    rows: usize,
    sample_size: usize,
    mean_a: f64,
    sd_a: f64,
    mean_b: f64,
    sd_b: f64,
    seed: Option<u64>,
}

impl GenerationDisplay {
    fn from_dataset(dataset: &Dataset, path: &Path) -> Option<Self> {
        let params = dataset.generation_parameters()?;
        let (generator, seed) = match &dataset.source {
            DatasetSource::Synthetic { generator, seed, .. } => {
                (generator.clone(), *seed)
            }
            _ => return None,
        };
        Some(Self {
            path: path.to_path_buf(),
            generator,
            rows: dataset.len(),
            sample_size: params.sample_size,
            mean_a: params.mean_a,
            sd_a: params.sd_a,
            mean_b: params.mean_b,
            sd_b: params.sd_b,
            seed,
        })
    }
}

impl TableDisplay for GenerationDisplay {
    fn display_single(&self) {
        print_section("Generated Dataset");
        print_field("File", &self.path.display().to_string());
        print_field("Generator", &self.generator);
        print_field("Rows", &self.rows.to_string());
        print_field("Per group", &self.sample_size.to_string());
        print_field(
            "Group A",
            &format!("N({}, {})", format_float(self.mean_a, 2), format_float(self.sd_a, 2)),
        );
        print_field(
            "Group B",
            &format!("N({}, {})", format_float(self.mean_b, 2), format_float(self.sd_b, 2)),
        );
        print_optional_field("Seed", self.seed.map(|s| s.to_string()).as_deref());
    }

    fn display_compact(&self) {
        println!(
            "{}\t{}\t{}\tA=N({:.2},{:.2})\tB=N({:.2},{:.2})",
            self.path.display(),
            self.generator,
            self.rows,
            self.mean_a,
            self.sd_a,
            self.mean_b,
            self.sd_b
        );
    }
}
