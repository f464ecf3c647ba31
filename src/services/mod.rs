// サービス層 - 機能別のロジック
// 各サービスは特定の責任を持ち、疎結合で設計されている

pub mod config;
pub mod monitoring;
pub mod parsing;
pub mod source;

// 公開API - 各サービスの主要機能を明示的にエクスポート
pub use config::DefaultParserConfig;
pub use monitoring::{ConsoleProgressReporter, NoOpProgressReporter, ScopedTimer};
pub use parsing::{split_csv_line, CsvLineSplitter, RawCallback, StructuredCallback};
pub use source::{FileLineSource, LineSource, MemoryLineSource};
