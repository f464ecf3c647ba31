use crate::cli::Cli;
use crate::core::{ParseMode, ParserConfig, RunSummary};
use crate::engine::ParsingPipeline;
use crate::services::{ConsoleProgressReporter, DefaultParserConfig, FileLineSource, ScopedTimer};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Configuration struct for the parse command
#[derive(Debug, Clone)]
pub struct ParseOptions {
    pub mode: ParseMode,
    pub file: PathBuf,
    pub threads: Option<usize>,
    pub queue_capacity: Option<usize>,
    pub report_every: Option<usize>,
    pub config_file: Option<PathBuf>,
    pub print_first: u64,
    pub summary: Option<PathBuf>,
    pub quiet: bool,
}

impl From<Cli> for ParseOptions {
    fn from(cli: Cli) -> Self {
        Self {
            mode: cli.mode,
            file: cli.file,
            threads: cli.threads,
            queue_capacity: cli.queue_capacity,
            report_every: cli.report_every,
            config_file: cli.config,
            print_first: cli.print_first,
            summary: cli.summary,
            quiet: cli.quiet,
        }
    }
}

/// JSON summary written by `--summary`
#[derive(Debug, Serialize)]
struct SummaryReport<'a> {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    run: &'a RunSummary,
}

/// Build the pipeline configuration: config file (if any), then command-line overrides
pub fn build_config(options: &ParseOptions) -> Result<DefaultParserConfig> {
    let mut config = match &options.config_file {
        Some(path) => DefaultParserConfig::from_json_file(path)?,
        None => DefaultParserConfig::default(),
    };

    if let Some(threads) = options.threads {
        config = config.with_worker_count(threads);
    }
    if let Some(queue_capacity) = options.queue_capacity {
        config = config.with_queue_capacity(queue_capacity);
    }
    if let Some(report_every) = options.report_every {
        config = config.with_report_every(report_every);
    }

    config.validate()?;
    Ok(config)
}

/// Execute the parse command
pub fn execute_parse(options: &ParseOptions) -> Result<RunSummary> {
    let source = FileLineSource::new(&options.file);
    if !source.exists() {
        anyhow::bail!("File not found: {}", options.file.display());
    }

    let config = build_config(options)?;
    let report_every = config.report_every();
    let reporter = if options.quiet {
        ConsoleProgressReporter::quiet()
    } else {
        ConsoleProgressReporter::new()
    };
    let pipeline = ParsingPipeline::new(config, reporter);
    let counter = AtomicU64::new(0);
    let print_first = options.print_first;

    let timer_name = format!("{} parse", options.mode);
    let _timer = if options.quiet {
        ScopedTimer::silent(timer_name)
    } else {
        ScopedTimer::new(timer_name)
    };

    let summary = match options.mode {
        ParseMode::Csv => pipeline.run_structured(
            &source,
            |index: u64, fields: &[String], raw: &str| {
                if counter.fetch_add(1, Ordering::Relaxed) < print_first {
                    println!("[CSV {index}] fields={} raw={raw}", fields.len());
                }
            },
            report_every,
        ),
        ParseMode::Ndjson => pipeline.run_raw(
            &source,
            |index: u64, raw: &str| {
                if counter.fetch_add(1, Ordering::Relaxed) < print_first {
                    println!("[NDJSON {index}] {raw}");
                }
            },
            report_every,
        ),
    }
    .with_context(|| format!("Failed to parse {}", options.file.display()))?;

    println!(
        "Total {} records processed: {}",
        options.mode,
        counter.load(Ordering::Relaxed)
    );

    if let Some(path) = &options.summary {
        write_summary(path, &summary)?;
        println!("Summary written to: {}", path.display());
    }

    Ok(summary)
}

/// Serialize the run summary with a generation timestamp
pub fn write_summary(path: &Path, summary: &RunSummary) -> Result<()> {
    let report = SummaryReport {
        generated_at: Utc::now(),
        run: summary,
    };
    let json = serde_json::to_string_pretty(&report)?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write summary: {}", path.display()))?;
    Ok(())
}
