// パース処理に関連するデータ型定義

use serde::{Deserialize, Serialize};
use std::fmt;

/// 1回の実行で使う処理バリアント（実行ごとに一度だけ選択される）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// 行をCSVフィールドに分解してから渡す
    Csv,
    /// 行をそのまま生のNDJSONレコードとして渡す
    Ndjson,
}

impl ParseMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Ndjson => "NDJSON",
        }
    }
}

impl fmt::Display for ParseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 処理ケイパビリティに渡される1件分の入力
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record<'a> {
    Structured { fields: &'a [String], raw: &'a str },
    Raw { raw: &'a str },
}

impl<'a> Record<'a> {
    /// 元の行テキスト
    pub fn raw(&self) -> &'a str {
        match *self {
            Self::Structured { raw, .. } | Self::Raw { raw } => raw,
        }
    }

    /// 分解済みフィールド（Rawの場合は `None`）
    pub fn fields(&self) -> Option<&'a [String]> {
        match *self {
            Self::Structured { fields, .. } => Some(fields),
            Self::Raw { .. } => None,
        }
    }
}

/// ワーカー1つ分の処理統計
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorkerStats {
    pub worker_id: usize,
    /// このワーカーが自分で処理した件数（ワーカーローカル）
    pub processed: u64,
    /// 発行した進捗シグナルの回数
    pub progress_reports: u64,
}

/// 1回の実行全体のサマリー
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub mode: ParseMode,
    pub source: String,
    /// Producerがキューに投入した行数
    pub lines_read: u64,
    /// 全ワーカーが処理した行数の合計
    pub lines_processed: u64,
    pub workers: Vec<WorkerStats>,
    pub elapsed_ms: u64,
}

impl RunSummary {
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// 1秒あたりの処理行数
    pub fn lines_per_second(&self) -> f64 {
        if self.elapsed_ms == 0 {
            return self.lines_processed as f64;
        }
        self.lines_processed as f64 * 1000.0 / self.elapsed_ms as f64
    }
}
