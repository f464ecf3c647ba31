// 設定管理の具象実装

use crate::core::{ParserConfig, ParserError, ParserResult};
use serde::Deserialize;
use std::path::Path;

/// 既定のキュー容量
pub const DEFAULT_QUEUE_CAPACITY: usize = 16_384;

/// 既定の進捗報告間隔
pub const DEFAULT_REPORT_EVERY: usize = 1_000_000;

/// デフォルト設定実装
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultParserConfig {
    worker_count: usize,
    queue_capacity: usize,
    report_every: usize,
}

/// 設定ファイル（JSON）の内容。省略されたキーは既定値のまま
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    worker_count: Option<usize>,
    queue_capacity: Option<usize>,
    report_every: Option<usize>,
}

impl DefaultParserConfig {
    pub fn new(worker_count: usize) -> Self {
        Self {
            worker_count,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            report_every: DEFAULT_REPORT_EVERY,
        }
    }

    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    pub fn with_queue_capacity(mut self, queue_capacity: usize) -> Self {
        self.queue_capacity = queue_capacity;
        self
    }

    pub fn with_report_every(mut self, report_every: usize) -> Self {
        self.report_every = report_every;
        self
    }

    /// JSON設定ファイルを読み込み、既定値に上書きする
    pub fn from_json_file(path: impl AsRef<Path>) -> ParserResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ParserError::config_file(path, e.into()))?;
        Self::from_json_str(&text).map_err(|e| match e {
            ParserError::ConfigFile { source, .. } => ParserError::config_file(path, source),
            other => other,
        })
    }

    /// JSON文字列から設定を作成する
    pub fn from_json_str(text: &str) -> ParserResult<Self> {
        let file: ConfigFile = serde_json::from_str(text)
            .map_err(|e| ParserError::config_file("<inline>", e.into()))?;

        let mut config = Self::default();
        if let Some(worker_count) = file.worker_count {
            config.worker_count = worker_count;
        }
        if let Some(queue_capacity) = file.queue_capacity {
            config.queue_capacity = queue_capacity;
        }
        if let Some(report_every) = file.report_every {
            config.report_every = report_every;
        }
        config.validate()?;
        Ok(config)
    }

    /// 全ての値が正であることを検証
    pub fn validate(&self) -> ParserResult<()> {
        validate_config(self)
    }
}

impl Default for DefaultParserConfig {
    fn default() -> Self {
        Self::new(num_cpus::get().max(1))
    }
}

impl ParserConfig for DefaultParserConfig {
    fn worker_count(&self) -> usize {
        self.worker_count
    }

    fn queue_capacity(&self) -> usize {
        self.queue_capacity
    }

    fn report_every(&self) -> usize {
        self.report_every
    }
}

/// 任意の `ParserConfig` 実装を検証する
pub fn validate_config<C: ParserConfig + ?Sized>(config: &C) -> ParserResult<()> {
    validate_worker_settings(config)?;
    if config.report_every() == 0 {
        return Err(ParserError::configuration(
            "進捗報告間隔は1以上である必要があります",
        ));
    }
    Ok(())
}

/// パイプライン実行に必要なワーカー数とキュー容量だけを検証する
///
/// 進捗報告間隔は実行ごとに引数で渡されるため、ここでは見ない。
pub fn validate_worker_settings<C: ParserConfig + ?Sized>(config: &C) -> ParserResult<()> {
    if config.worker_count() == 0 {
        return Err(ParserError::configuration(
            "ワーカー数は1以上である必要があります",
        ));
    }
    if config.queue_capacity() == 0 {
        return Err(ParserError::configuration(
            "キュー容量は1以上である必要があります",
        ));
    }
    Ok(())
}
