// エラーハンドリング統合テスト
#[path = "../fixtures/mod.rs"]
mod fixtures;

use fixtures::{write_bytes, write_lines, RecordingReporter};
use line_parser::{
    cli::{build_config, execute_parse, ParseOptions},
    core::traits::MockProgressReporter,
    DefaultParserConfig, FileLineSource, MemoryLineSource, NoOpProgressReporter, ParseMode,
    ParserError, ParsingPipeline,
};
use std::fs;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tempfile::TempDir;

#[test]
fn test_missing_file_reports_source_unavailable() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("does_not_exist.csv");
    let reporter = RecordingReporter::new();
    let pipeline = ParsingPipeline::new(DefaultParserConfig::new(4), &reporter);
    let calls = AtomicUsize::new(0);

    let result = pipeline.run_structured(
        &FileLineSource::new(&missing),
        |_: u64, _: &[String], _: &str| {
            calls.fetch_add(1, Ordering::SeqCst);
        },
        1,
    );

    match result {
        Err(ParserError::SourceUnavailable { source_name, .. }) => {
            assert_eq!(source_name, missing.display().to_string());
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(reporter.errors().len(), 1);
    assert!(reporter.completed().is_none());
    // 全ワーカーjoin済みで、次の実行を受け付ける
    assert!(!pipeline.is_running());
}

#[test]
fn test_invalid_utf8_fails_after_processing_prefix() {
    let (_temp_dir, path) = write_bytes("broken.ndjson", b"{\"a\":1}\n{\"a\":2}\n\xff\xfe\n{\"a\":3}\n");
    let pipeline = ParsingPipeline::new(DefaultParserConfig::new(2), NoOpProgressReporter::new());
    let processed = AtomicU64::new(0);

    let result = pipeline.run_raw(
        &FileLineSource::new(&path),
        |_: u64, _: &str| {
            processed.fetch_add(1, Ordering::SeqCst);
        },
        1,
    );

    match result {
        Err(ParserError::ReadFailed { line, .. }) => assert_eq!(line, 3),
        other => panic!("unexpected result: {other:?}"),
    }
    // 失敗前に投入された2行は処理されている
    assert_eq!(processed.load(Ordering::SeqCst), 2);
    assert!(!pipeline.is_running());
}

#[test]
fn test_zero_sized_configuration_rejected() {
    let source = MemoryLineSource::from_lines(["x"]);

    let mut reporter = MockProgressReporter::new();
    reporter.expect_report_started().never();
    reporter.expect_report_worker_progress().never();
    reporter.expect_report_error().never();
    reporter.expect_report_completed().never();

    let zero_workers = ParsingPipeline::new(DefaultParserConfig::new(0), reporter);
    assert!(matches!(
        zero_workers.run_raw(&source, |_: u64, _: &str| {}, 1),
        Err(ParserError::Configuration { .. })
    ));

    let zero_capacity = ParsingPipeline::new(
        DefaultParserConfig::new(1).with_queue_capacity(0),
        NoOpProgressReporter::new(),
    );
    assert!(matches!(
        zero_capacity.run_raw(&source, |_: u64, _: &str| {}, 1),
        Err(ParserError::Configuration { .. })
    ));
}

#[test]
fn test_panicking_callback_aborts_run() {
    let lines: Vec<String> = (0..10_000).map(|i| format!("{i},x")).collect();
    let line_refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let (_temp_dir, path) = write_lines("large.csv", &line_refs);
    let reporter = RecordingReporter::new();
    let pipeline = ParsingPipeline::new(
        DefaultParserConfig::new(4).with_queue_capacity(8),
        &reporter,
    );

    let result = pipeline.run_structured(
        &FileLineSource::new(&path),
        |_: u64, fields: &[String], _: &str| {
            if fields[0] == "100" {
                panic!("refusing record {}", fields[0]);
            }
        },
        1_000_000,
    );

    match result {
        Err(ParserError::WorkerPanicked { message, .. }) => {
            assert!(message.contains("refusing record 100"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(reporter.errors().len(), 1);
    assert!(!pipeline.is_running());

    // 同じインスタンスで再実行できる
    let summary = pipeline
        .run_structured(
            &MemoryLineSource::from_lines(["1,2"]),
            |_: u64, _: &[String], _: &str| {},
            1,
        )
        .unwrap();
    assert_eq!(summary.lines_processed, 1);
}

#[test]
fn test_invalid_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.json");
    fs::write(&config_path, r#"{"worker_count": "many"}"#).unwrap();

    let options = ParseOptions {
        mode: ParseMode::Csv,
        file: temp_dir.path().join("data.csv"),
        threads: None,
        queue_capacity: None,
        report_every: None,
        config_file: Some(config_path.clone()),
        print_first: 0,
        summary: None,
        quiet: true,
    };

    let error = build_config(&options).unwrap_err();
    match error.downcast_ref::<ParserError>() {
        Some(ParserError::ConfigFile { path, .. }) => assert_eq!(path, &config_path),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_cli_rejects_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let options = ParseOptions {
        mode: ParseMode::Ndjson,
        file: temp_dir.path().join("absent.ndjson"),
        threads: Some(1),
        queue_capacity: None,
        report_every: None,
        config_file: None,
        print_first: 5,
        summary: None,
        quiet: true,
    };

    let error = execute_parse(&options).unwrap_err();

    assert!(error.to_string().starts_with("File not found"));
}
