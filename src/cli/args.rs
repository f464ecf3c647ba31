use crate::core::ParseMode;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "line_parser")]
#[command(about = "Parse a CSV or NDJSON file in parallel, one record per line")]
#[command(version)]
pub struct Cli {
    /// Input format
    pub mode: ParseMode,

    /// File to parse
    pub file: PathBuf,

    /// Number of worker threads (defaults to the number of CPUs)
    pub threads: Option<usize>,

    /// Maximum number of lines buffered between reader and workers
    pub queue_capacity: Option<usize>,

    /// Emit a progress line each time a worker has processed this many records
    #[arg(short, long)]
    pub report_every: Option<usize>,

    /// JSON configuration file (worker_count, queue_capacity, report_every)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of records to echo to stdout
    #[arg(short = 'n', long, default_value = "5")]
    pub print_first: u64,

    /// Write a JSON run summary to this path
    #[arg(short, long)]
    pub summary: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}
