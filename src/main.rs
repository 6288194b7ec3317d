use anyhow::{Context, Result};
use clap::Parser;
use decodestat::cli::{Cli, Command, DecodeArgs, SizeArgs};
use decodestat::{analysis, chart, report, size};
use std::io;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber; RUST_LOG overrides the default level
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run_decode(args: DecodeArgs) -> Result<()> {
    let config = args.resolve_config()?;
    if !args.no_plot {
        chart::ensure_svg_path(&config.chart.output)?;
    }

    let reports = analysis::analyze_sources(&args.inputs, &config.batch);
    print!("{}", report::render(args.format, &reports, &config.batch)?);

    let succeeded = reports.iter().filter(|r| r.stats().is_some()).count();
    if !args.no_plot {
        let chart = analysis::mean_latency_chart(&reports, &config.chart);
        if chart.is_empty() {
            tracing::warn!("No statistics to plot; skipping chart");
        } else {
            chart
                .render(&config.chart.output)
                .with_context(|| format!("Failed to write chart {}", config.chart.output.display()))?;
        }
    }

    if !reports.is_empty() && succeeded == 0 {
        anyhow::bail!("None of the {} source(s) produced statistics", reports.len());
    }
    Ok(())
}

fn run_size(args: SizeArgs) -> Result<()> {
    if !args.divisor.is_finite() || args.divisor <= 0.0 {
        anyhow::bail!(
            "Invalid value for --divisor: {} (must be a positive number)",
            args.divisor
        );
    }

    if !args.no_plot {
        chart::ensure_svg_path(&args.output)?;
    }

    let sizes = size::measure_payloads(&args.payloads, args.divisor)?;
    print!("{}", size::to_text(&sizes));

    if !args.no_plot {
        size::size_chart(&sizes, &args.title)
            .render(&args.output)
            .with_context(|| format!("Failed to write chart {}", args.output.display()))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Decode(args) => run_decode(args),
        Command::Size(args) => run_size(args),
    }
}
