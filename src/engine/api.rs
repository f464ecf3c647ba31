// 高レベル公開API
// ParsingPipelineを簡単に使用できるようにするための便利な関数

use super::ParsingPipeline;
use crate::{
    core::{ParserConfig, ParserResult, RunSummary},
    services::{ConsoleProgressReporter, DefaultParserConfig, FileLineSource, NoOpProgressReporter},
};
use std::path::Path;

/// ParsingPipeline作成のヘルパー関数
///
/// CPU数のワーカーと標準キュー容量、コンソール出力付き
pub fn create_default_pipeline() -> ParsingPipeline<DefaultParserConfig, ConsoleProgressReporter> {
    ParsingPipeline::new(DefaultParserConfig::default(), ConsoleProgressReporter::new())
}

/// ParsingPipeline作成のヘルパー関数（静音版）
///
/// テストやバックグラウンド処理用
pub fn create_quiet_pipeline() -> ParsingPipeline<DefaultParserConfig, NoOpProgressReporter> {
    ParsingPipeline::new(DefaultParserConfig::default(), NoOpProgressReporter::new())
}

/// CSVファイルをデフォルト設定でパースする
pub fn parse_csv_file<F>(path: impl AsRef<Path>, callback: F) -> ParserResult<RunSummary>
where
    F: Fn(u64, &[String], &str) + Send + Sync,
{
    let pipeline = create_default_pipeline();
    let report_every = pipeline.config().report_every();
    pipeline.run_structured(&FileLineSource::new(path.as_ref()), callback, report_every)
}

/// NDJSONファイルをデフォルト設定でパースする
pub fn parse_ndjson_file<F>(path: impl AsRef<Path>, callback: F) -> ParserResult<RunSummary>
where
    F: Fn(u64, &str) + Send + Sync,
{
    let pipeline = create_default_pipeline();
    let report_every = pipeline.config().report_every();
    pipeline.run_raw(&FileLineSource::new(path.as_ref()), callback, report_every)
}
