//! Dataset review: summary statistics and distributions per group

use abtest_core::Group;
use abtest_metrics::{AnalysisSession, GroupHistograms, GroupSummary, MetricAggregator, SummaryStatistics};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use comfy_table::Cell;
use serde::Serialize;
use std::path::PathBuf;

use crate::commands::load_dataset;
use crate::context::Context;
use crate::output::{bar, format_float, new_table, print_section, TableDisplay};

const BAR_WIDTH: usize = 40;

#[derive(Debug, Clone, Args)]
pub struct DescribeArgs {
    /// CSV file with `group` and `outcome` columns
    pub file: PathBuf,

    /// Number of histogram bins (defaults to the configured value)
    #[arg(short, long)]
    pub bins: Option<usize>,
}

/// Execute the describe command
pub fn execute(ctx: &Context, args: DescribeArgs) -> Result<()> {
    let mut session = AnalysisSession::new();
    session.load(load_dataset(&args.file)?);

    let dataset = session.dataset()?;
    let (group_a, group_b) = dataset.split();
    let bins = args.bins.unwrap_or(ctx.config.bins);

    let display = DescribeDisplay {
        summary: session.summarize()?,
        histograms: MetricAggregator::shared_histograms(&group_a, &group_b, bins)?,
    };
    ctx.output.write(&display)?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct DescribeDisplay {
    summary: GroupSummary,
    histograms: GroupHistograms,
}

impl TableDisplay for DescribeDisplay {
    fn display_single(&self) {
        print_summary_table(&self.summary);
        print_histograms(&self.histograms);
    }

    fn display_compact(&self) {
        print_summary_compact(&self.summary);
    }
}

/// Side-by-side summary statistics of both groups
pub fn print_summary_table(summary: &GroupSummary) {
    print_section("Groups Summary Statistics");

    let mut table = new_table(&["", "Group A", "Group B"]);
    let rows: [(&str, fn(&SummaryStatistics) -> String); 8] = [
        ("count", |s| s.count.to_string()),
        ("mean", |s| format_float(s.mean, 4)),
        ("std", |s| s.std_dev.map(|v| format_float(v, 4)).unwrap_or_else(|| "-".to_string())),
        ("min", |s| format_float(s.min, 4)),
        ("25%", |s| format_float(s.q25, 4)),
        ("50%", |s| format_float(s.median, 4)),
        ("75%", |s| format_float(s.q75, 4)),
        ("max", |s| format_float(s.max, 4)),
    ];
    for (label, value) in rows {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(value(&summary.group_a)),
            Cell::new(value(&summary.group_b)),
        ]);
    }
    println!("{table}");
}

/// One line per group
pub fn print_summary_compact(summary: &GroupSummary) {
    for group in Group::ALL {
        let s = summary.get(group);
        println!(
            "{}\tn={}\tmean={:.4}\tmedian={:.4}\tmin={:.4}\tmax={:.4}",
            group, s.count, s.mean, s.median, s.min, s.max
        );
    }
}

/// Text histograms of both groups over the shared bins
pub fn print_histograms(histograms: &GroupHistograms) {
    print_section("Outcome Distribution by Group");

    let max_density = histograms
        .group_a
        .bins
        .iter()
        .chain(&histograms.group_b.bins)
        .map(|b| b.density)
        .fold(0.0, f64::max);

    for (a, b) in histograms.group_a.bins.iter().zip(&histograms.group_b.bins) {
        println!(
            "{:>10} │ {} {}",
            format_float(a.lower_bound, 2),
            "A".blue(),
            bar(a.density, max_density, BAR_WIDTH).blue()
        );
        println!(
            "{:>10} │ {} {}",
            "",
            "B".red(),
            bar(b.density, max_density, BAR_WIDTH).red()
        );
    }
}
