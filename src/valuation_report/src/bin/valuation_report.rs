use anyhow::Result;
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use metrics_ingestor::registry;
use shared_utils::layout::{DEFAULT_DATA_DIR, DEFAULT_OUTPUT_DIR, DataLayout};
use tracing::info;
use tracing_subscriber::EnvFilter;
use valuation_report::{Analysis, Percentile, Temperature, run_report};

#[derive(Parser)]
#[command(version, about = "Index valuation reports")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Whole-history percentile rank of PE and PB
    Percentile(Dirs),
    /// Expanding-window normal-CDF score of PE and PB
    Temperature(Dirs),
}

#[derive(Args)]
struct Dirs {
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    data_dir: String,
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let (analysis, dirs): (&dyn Analysis, Dirs) = match cli.cmd {
        Cmd::Percentile(dirs) => (&Percentile, dirs),
        Cmd::Temperature(dirs) => (&Temperature, dirs),
    };
    let layout = DataLayout::new(dirs.data_dir, dirs.output_dir);
    let now = Local::now();

    let summary = run_report(analysis, &layout, registry::all(), &Local, now.date_naive())?;

    info!(
        reports = summary.reports.len(),
        missing = summary.missing.len(),
        aggregate = %summary.aggregate.display(),
        rows = summary.aggregate_rows,
        "report finished"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subcommand_defaults() {
        let cli = Cli::try_parse_from(["valuation-report", "temperature"]).unwrap();
        let Cmd::Temperature(dirs) = cli.cmd else {
            panic!("expected temperature");
        };
        assert_eq!(dirs.data_dir, DEFAULT_DATA_DIR);
        assert_eq!(dirs.output_dir, DEFAULT_OUTPUT_DIR);
    }

    #[test]
    fn dirs_override() {
        let cli = Cli::try_parse_from([
            "valuation-report",
            "percentile",
            "--data-dir",
            "/tmp/d",
            "--output-dir",
            "/tmp/o",
        ])
        .unwrap();
        let Cmd::Percentile(dirs) = cli.cmd else {
            panic!("expected percentile");
        };
        assert_eq!(dirs.data_dir, "/tmp/d");
        assert_eq!(dirs.output_dir, "/tmp/o");
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["valuation-report"]).is_err());
    }
}
