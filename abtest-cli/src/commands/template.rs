//! Example CSV download

use abtest_core::csv_io::SAMPLE_TEMPLATE;
use anyhow::{Context as _, Result};
use clap::Args;
use std::io::Write;
use std::path::PathBuf;

use crate::commands::open_output;
use crate::context::Context;

#[derive(Debug, Clone, Args)]
pub struct TemplateArgs {
    /// Output file (written to stdout when omitted)
    #[arg(long = "out")]
    pub out: Option<PathBuf>,
}

/// Execute the template command
pub fn execute(ctx: &Context, args: TemplateArgs) -> Result<()> {
    let mut writer = open_output(args.out.as_ref())?;
    writer
        .write_all(SAMPLE_TEMPLATE.as_bytes())
        .and_then(|_| writer.flush())
        .context("Failed to write template")?;

    if let Some(path) = &args.out {
        ctx.output
            .success(&format!("Sample file written to {}", path.display()));
    }
    Ok(())
}
