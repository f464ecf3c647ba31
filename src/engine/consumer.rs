// Consumer - 並列ワーカープール

use crate::core::{
    error::panic_message, BoundedQueue, ParseMode, ParserError, ParserResult, ProgressReporter,
    RecordProcessor, WorkerStats,
};
use crate::services::parsing::{dispatch_line, CsvLineSplitter};
use std::thread::{self, Scope, ScopedJoinHandle};

/// 全ワーカーで共有する実行コンテキスト（実行中は不変）
pub struct WorkerContext<'a, P: ?Sized, R: ?Sized> {
    pub queue: &'a BoundedQueue<String>,
    pub processor: &'a P,
    pub reporter: &'a R,
    pub mode: ParseMode,
    /// ワーカーローカルの処理件数がこの倍数になるたびに進捗を報告
    pub report_every: u64,
}

/// ワーカーがpanicで終了するときにキューをcloseするガード
///
/// closeによりProducerの次の `push` が拒否され、読み込みが止まる。
struct CloseOnPanic<'a, T>(&'a BoundedQueue<T>);

impl<T> Drop for CloseOnPanic<'_, T> {
    fn drop(&mut self) {
        if thread::panicking() {
            self.0.close();
        }
    }
}

/// 単一ワーカーのループ
///
/// キューがclose済みかつ空になるまで取り出しと処理を繰り返す。
pub fn worker_loop<P, R>(worker_id: usize, ctx: &WorkerContext<'_, P, R>) -> WorkerStats
where
    P: RecordProcessor + ?Sized,
    R: ProgressReporter + ?Sized,
{
    let _guard = CloseOnPanic(ctx.queue);
    let mut splitter = CsvLineSplitter::new();
    let mut stats = WorkerStats {
        worker_id,
        ..WorkerStats::default()
    };

    while let Some((index, line)) = ctx.queue.pop_with_sequence() {
        dispatch_line(ctx.mode, index, &line, ctx.processor, &mut splitter);

        stats.processed += 1;
        if stats.processed % ctx.report_every == 0 {
            ctx.reporter
                .report_worker_progress(worker_id, stats.processed);
            stats.progress_reports += 1;
        }
    }

    stats
}

/// Consumers: `worker_count` 個のワーカースレッドをスコープ内に起動
///
/// 起動に失敗した場合、既に起動済みのワーカーはスコープ終了時に回収される。
/// 呼び出し側はその前にキューをcloseすること。
pub fn spawn_workers<'scope, 'env, P, R>(
    scope: &'scope Scope<'scope, 'env>,
    ctx: &'env WorkerContext<'env, P, R>,
    worker_count: usize,
) -> ParserResult<Vec<ScopedJoinHandle<'scope, WorkerStats>>>
where
    P: RecordProcessor + ?Sized,
    R: ProgressReporter + ?Sized,
{
    let mut handles = Vec::with_capacity(worker_count);

    for worker_id in 0..worker_count {
        let handle = thread::Builder::new()
            .name(format!("parser-worker-{worker_id}"))
            .spawn_scoped(scope, move || worker_loop(worker_id, ctx))
            .map_err(|e| ParserError::worker_spawn(worker_id, e))?;
        handles.push(handle);
    }

    Ok(handles)
}

/// 全ワーカーをjoinし、統計をworker_id順に返す
///
/// 1つでもpanicしていれば、全員のjoinを終えてから最初のpanicをエラーとして返す。
pub fn join_workers(
    handles: Vec<ScopedJoinHandle<'_, WorkerStats>>,
) -> ParserResult<Vec<WorkerStats>> {
    let mut stats = Vec::with_capacity(handles.len());
    let mut first_panic = None;

    for (worker_id, handle) in handles.into_iter().enumerate() {
        match handle.join() {
            Ok(worker_stats) => stats.push(worker_stats),
            Err(payload) => {
                if first_panic.is_none() {
                    first_panic = Some(ParserError::worker_panicked(
                        worker_id,
                        panic_message(payload.as_ref()),
                    ));
                }
            }
        }
    }

    match first_panic {
        Some(error) => Err(error),
        None => Ok(stats),
    }
}
