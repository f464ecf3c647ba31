// 進捗監視の具象実装

use crate::core::{ParseMode, ProgressReporter, RunSummary};

/// 標準エラー出力による進捗報告実装
///
/// `eprintln!` は1回の呼び出しごとにstderrをロックするため、
/// 複数ワーカーから同時に呼ばれても行が混ざらない。
#[derive(Debug, Default, Clone)]
pub struct ConsoleProgressReporter {
    quiet: bool,
}

impl ConsoleProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// エラー以外を出力しないレポーター
    pub fn quiet() -> Self {
        Self { quiet: true }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

impl ProgressReporter for ConsoleProgressReporter {
    fn report_started(&self, source: &str, mode: ParseMode, worker_count: usize) {
        if !self.quiet {
            eprintln!("Starting {mode} parse of {source} with {worker_count} workers");
        }
    }

    fn report_worker_progress(&self, worker_id: usize, processed: u64) {
        if !self.quiet {
            eprintln!("[Worker {worker_id}] processed {processed} items");
        }
    }

    fn report_error(&self, message: &str) {
        eprintln!("Error: {message}");
    }

    fn report_completed(&self, summary: &RunSummary) {
        if !self.quiet {
            eprintln!(
                "Completed {} parse: read {}, processed {} ({:.0} lines/s)",
                summary.mode,
                summary.lines_read,
                summary.lines_processed,
                summary.lines_per_second()
            );
        }
    }
}

/// 何もしない進捗報告実装（テスト・ベンチマーク用）
#[derive(Debug, Default, Clone)]
pub struct NoOpProgressReporter;

impl NoOpProgressReporter {
    pub fn new() -> Self {
        Self
    }
}

impl ProgressReporter for NoOpProgressReporter {
    fn report_started(&self, _source: &str, _mode: ParseMode, _worker_count: usize) {
        // 何もしない
    }

    fn report_worker_progress(&self, _worker_id: usize, _processed: u64) {
        // 何もしない
    }

    fn report_error(&self, _message: &str) {
        // 何もしない
    }

    fn report_completed(&self, _summary: &RunSummary) {
        // 何もしない
    }
}
