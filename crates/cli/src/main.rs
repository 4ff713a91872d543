//! Command Line Interface for the equity curve simulator.
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use dotenv::dotenv;
use eqsim_domain::{EquityCurve, compute_metrics};
use eqsim_report::Report;
use eqsim_report::format::format_value;
use eqsim_simulation::monte_carlo::MonteCarloRunner;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;

use config::ParameterArgs;

#[derive(Parser)]
#[command(name = "eqsim")]
#[command(about = "Monte Carlo equity curve simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Terminal tables
    Table,
    /// JSON document
    Json,
    /// Standalone HTML report with chart
    Html,
    /// Raw equity points, one column per simulation
    Csv,
    /// Per-simulation metrics
    ResultsCsv,
    /// Excel workbook (requires --output)
    Xlsx,
    /// Paginated PDF report (requires --output)
    Pdf,
}

impl OutputFormat {
    fn is_binary(self) -> bool {
        matches!(self, Self::Xlsx | Self::Pdf)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a batch of equity curves and report their metrics
    Simulate {
        #[command(flatten)]
        params: ParameterArgs,

        /// Seed for reproducible runs
        #[arg(short, long, env = "EQSIM_SEED")]
        seed: Option<u64>,

        /// Run simulations across all cores
        #[arg(long, env = "EQSIM_PARALLEL")]
        parallel: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Embed every equity curve in JSON output
        #[arg(long)]
        include_curves: bool,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compute metrics for one equity curve given as a JSON array
    Metrics {
        /// Path to a JSON array of equity values
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Simulate {
            params,
            seed,
            parallel,
            format,
            include_curves,
            output,
        } => {
            if format.is_binary() && output.is_none() {
                bail!("--format {format:?} writes binary data and needs --output");
            }
            let params = params
                .resolve()?
                .into_parameters()
                .context("invalid simulation parameters")?;

            let mut runner = MonteCarloRunner::new(params.clone()).parallel(*parallel);
            if let Some(seed) = seed {
                runner = runner.with_seed(*seed);
            }
            let (seed, batch) = runner.run()?;

            let report = Report::new(&params, &batch).with_seed(seed);
            let rendered = match format {
                OutputFormat::Table => report.to_text().into_bytes(),
                OutputFormat::Json => report.to_json(*include_curves)?.into_bytes(),
                OutputFormat::Html => report.to_html().into_bytes(),
                OutputFormat::Csv => report.curves_csv()?.into_bytes(),
                OutputFormat::ResultsCsv => report.results_csv()?.into_bytes(),
                OutputFormat::Xlsx => report.to_xlsx()?,
                OutputFormat::Pdf => report.to_pdf()?,
            };

            match output {
                Some(path) => {
                    fs::write(path, rendered)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    info!(path = %path.display(), format = ?format, "report written");
                }
                None => {
                    let mut stdout = io::stdout().lock();
                    stdout.write_all(&rendered)?;
                    writeln!(stdout)?;
                }
            }
        }
        Commands::Metrics { file } => {
            let text = fs::read_to_string(file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let curve: EquityCurve = serde_json::from_str(&text)
                .with_context(|| format!("{} is not a JSON array of equity values", file.display()))?;
            let metrics = compute_metrics(&curve);

            println!("Points:             {}", curve.len());
            println!("Final Equity:       {}", format_value(curve.final_equity()));
            println!("Total Return (%):   {}", format_value(metrics.total_return));
            println!("Max Drawdown (%):   {}", format_value(metrics.max_drawdown));
            println!("Sharpe Ratio:       {}", format_value(metrics.sharpe_ratio));
            println!("Profit Factor:      {}", format_value(metrics.profit_factor));
            println!("Volatility (%):     {}", format_value(metrics.volatility));
            println!("Average Return (%): {}", format_value(metrics.average_return));
        }
    }

    Ok(())
}
