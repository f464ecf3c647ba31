// 行単位テキストの並列パーサー
// core: 基盤（キュー・トレイト・型・エラー）
// services: 設定・進捗報告・行パース・入力ソース
// engine: Producer-Consumerパイプライン
// cli: コマンドラインインターフェース

pub mod cli;
pub mod core;
pub mod engine;
pub mod services;

// 公開API
pub use crate::core::{
    BoundedQueue, ParseMode, ParserConfig, ParserError, ParserResult, ProgressReporter, Record,
    RecordProcessor, RunSummary, WorkerStats,
};
pub use engine::{
    create_default_pipeline, create_quiet_pipeline, parse_csv_file, parse_ndjson_file,
    ParsingPipeline,
};
pub use services::{
    split_csv_line, ConsoleProgressReporter, CsvLineSplitter, DefaultParserConfig, FileLineSource,
    LineSource, MemoryLineSource, NoOpProgressReporter, RawCallback, ScopedTimer,
    StructuredCallback,
};
