// パイプラインの全ての抽象化インターフェースを定義

use super::types::{ParseMode, Record, RunSummary};
use mockall::automock;

/// パイプラインの設定を抽象化するトレイト
///
/// 実行中は不変。値の妥当性はパイプライン側で実行前に検証される。
pub trait ParserConfig: Send + Sync {
    /// ワーカースレッド数
    fn worker_count(&self) -> usize;

    /// キューの最大保持行数
    fn queue_capacity(&self) -> usize;

    /// 進捗シグナルを発行する間隔（ワーカーローカルの処理件数）
    fn report_every(&self) -> usize;
}

/// 進捗報告の抽象化トレイト
///
/// 全ワーカーから並行に呼ばれるため、実装は行単位の書き込みが混ざらないこと。
#[automock]
pub trait ProgressReporter: Send + Sync {
    /// 実行開始時の報告
    fn report_started(&self, source: &str, mode: ParseMode, worker_count: usize);

    /// ワーカーが `report_every` 件処理するごとの報告
    fn report_worker_progress(&self, worker_id: usize, processed: u64);

    /// エラー発生時の報告
    fn report_error(&self, message: &str);

    /// 実行完了時の報告
    fn report_completed(&self, summary: &RunSummary);
}

impl<R: ProgressReporter + ?Sized> ProgressReporter for &R {
    fn report_started(&self, source: &str, mode: ParseMode, worker_count: usize) {
        (**self).report_started(source, mode, worker_count)
    }

    fn report_worker_progress(&self, worker_id: usize, processed: u64) {
        (**self).report_worker_progress(worker_id, processed)
    }

    fn report_error(&self, message: &str) {
        (**self).report_error(message)
    }

    fn report_completed(&self, summary: &RunSummary) {
        (**self).report_completed(summary)
    }
}

/// 1行ごとの処理ケイパビリティ
///
/// ワーカースレッド上で同期的に呼ばれる。`index` は消費インデックスであり、
/// 元ファイルの行番号とは一致しない。
pub trait RecordProcessor: Send + Sync {
    fn process(&self, index: u64, record: Record<'_>);
}

impl<P: RecordProcessor + ?Sized> RecordProcessor for &P {
    fn process(&self, index: u64, record: Record<'_>) {
        (**self).process(index, record)
    }
}
