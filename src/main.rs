use anyhow::bail;
use clap::{Parser, ValueEnum};
use fare_summary::config::{self, ExtractorConfig};
use fare_summary::{report, FareSearchProcessor};
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Format {
    Table,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "fare-summary", version, about = "Summarize air fare search responses")]
struct Cli {
    /// Response files to summarize (default: the bundled samples)
    files: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    format: Format,

    /// Print the extracted route records as JSON instead of a summary
    #[arg(long)]
    routes: bool,

    /// chrono format of DepartureTimeStamp / ArrivalTimeStamp
    #[arg(long, default_value = config::DEFAULT_TIMESTAMP_FORMAT)]
    timestamp_format: String,

    /// ChargeType recorded in the payment mapping
    #[arg(long = "charge-type", default_value = config::DEFAULT_TOTAL_CHARGE_TYPE)]
    charge_type: String,
}

impl Cli {
    fn to_config(&self) -> ExtractorConfig {
        ExtractorConfig {
            timestamp_format: self.timestamp_format.clone(),
            total_charge_type: self.charge_type.clone(),
            ..ExtractorConfig::default()
        }
    }

    fn input_files(&self) -> Vec<PathBuf> {
        if self.files.is_empty() {
            config::SAMPLE_PATHS.iter().map(PathBuf::from).collect()
        } else {
            self.files.clone()
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let processor = FareSearchProcessor::with_config(cli.to_config())?;

    let files = cli.input_files();
    let mut failed = 0;
    for path in &files {
        // each file is independent; a failure is reported and the next file still runs
        if let Err(e) = run_file(&processor, &cli, path) {
            error!(file = %path.display(), kind = e.kind(), "{e}");
            failed += 1;
        }
    }

    info!(files = files.len(), failed, "done");
    if failed > 0 {
        bail!("{failed} of {} file(s) failed", files.len());
    }
    Ok(())
}

fn run_file(
    processor: &FareSearchProcessor,
    cli: &Cli,
    path: &Path,
) -> fare_summary::Result<()> {
    if cli.routes {
        let routes = processor.routes_file(path)?;
        println!("{}", report::render_routes_json(&routes)?);
        return Ok(());
    }

    let file = processor.process_file(path)?;
    match cli.format {
        Format::Table => println!("{}", report::render_table(&file.title, &file.summary)),
        Format::Json => println!("{}", report::render_json(&file)?),
    }
    Ok(())
}
