//! `abtest`: compare two groups of outcomes with Welch's t-test

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod config;
mod context;
mod output;

use cli::{Cli, Commands};
use context::Context;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = match Context::new(&cli) {
        Ok(ctx) => ctx,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            return ExitCode::FAILURE;
        }
    };

    match run(&ctx, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            ctx.output.error(&format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}

fn run(ctx: &Context, command: Commands) -> Result<()> {
    tracing::debug!(output = %ctx.output_format, "Running command");
    match command {
        Commands::Generate(args) => commands::generate::execute(ctx, args),
        Commands::Template(args) => commands::template::execute(ctx, args),
        Commands::Describe(args) => commands::describe::execute(ctx, args),
        Commands::Test(args) => commands::test::execute(ctx, args),
        Commands::Analyze(args) => commands::analyze::execute(ctx, args),
        Commands::Config(cmd) => commands::config::execute(ctx, cmd),
    }
}

/// Logs go to stderr so CSV written to stdout stays clean
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "abtest_core=debug,abtest_metrics=debug,abtest_cli=debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
