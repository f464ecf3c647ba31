// Pipeline - Producer-Consumer パイプライン
// ワーカー起動、Producer実行、close、join までのオーケストレーション

use super::consumer::{join_workers, spawn_workers, WorkerContext};
use super::producer::run_producer;
use crate::{
    core::{
        BoundedQueue, ParseMode, ParserConfig, ParserError, ParserResult, ProgressReporter,
        RecordProcessor, RunSummary, WorkerStats,
    },
    services::{
        config::validate_worker_settings,
        parsing::{RawCallback, StructuredCallback},
        source::LineSource,
    },
};
use std::sync::{Mutex, MutexGuard};
use std::thread;
use std::time::Instant;

/// パイプラインのライフサイクル状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Running,
}

/// 実行中フラグを保持し、ドロップ時に必ず `Idle` へ戻すガード
struct RunGuard<'a> {
    state: &'a Mutex<PipelineState>,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        *lock_state(self.state) = PipelineState::Idle;
    }
}

fn lock_state(state: &Mutex<PipelineState>) -> MutexGuard<'_, PipelineState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// 行単位入力の並列パースパイプライン
///
/// 1インスタンスにつき同時に1つの実行だけを受け付ける。実行ごとに新しいキューと
/// ワーカー群を作り、実行が終わると全ワーカーをjoinしてから `Idle` に戻る。
/// 状態はインスタンスごとに独立しているため、別インスタンス同士は干渉しない。
pub struct ParsingPipeline<C, R> {
    config: C,
    reporter: R,
    state: Mutex<PipelineState>,
}

impl<C, R> ParsingPipeline<C, R>
where
    C: ParserConfig,
    R: ProgressReporter,
{
    /// 新しいパイプラインを作成
    pub fn new(config: C, reporter: R) -> Self {
        Self {
            config,
            reporter,
            state: Mutex::new(PipelineState::Idle),
        }
    }

    /// 各行をCSVフィールドに分解してコールバックへ渡す
    pub fn run_structured<S, F>(
        &self,
        source: &S,
        callback: F,
        report_every: usize,
    ) -> ParserResult<RunSummary>
    where
        S: LineSource + ?Sized,
        F: Fn(u64, &[String], &str) + Send + Sync,
    {
        self.run(
            source,
            ParseMode::Csv,
            &StructuredCallback(callback),
            report_every,
        )
    }

    /// 各行をそのままコールバックへ渡す
    pub fn run_raw<S, F>(
        &self,
        source: &S,
        callback: F,
        report_every: usize,
    ) -> ParserResult<RunSummary>
    where
        S: LineSource + ?Sized,
        F: Fn(u64, &str) + Send + Sync,
    {
        self.run(source, ParseMode::Ndjson, &RawCallback(callback), report_every)
    }

    /// 1回の実行
    ///
    /// 1. `W` 個のワーカーを起動
    /// 2. 呼び出しスレッド上でProducerを実行
    /// 3. Producerの成否にかかわらずキューをcloseし、全ワーカーをjoin
    /// 4. `Idle` に戻ってから結果を返す
    ///
    /// `AlreadyRunning` と `Configuration` はキューもワーカーも作らずに返る。
    /// それ以外のエラーは全ワーカーのjoin後に返る。
    pub fn run<S, P>(
        &self,
        source: &S,
        mode: ParseMode,
        processor: &P,
        report_every: usize,
    ) -> ParserResult<RunSummary>
    where
        S: LineSource + ?Sized,
        P: RecordProcessor + ?Sized,
    {
        validate_worker_settings(&self.config)?;
        if report_every == 0 {
            return Err(ParserError::configuration(
                "進捗報告間隔は1以上である必要があります",
            ));
        }

        let _run = self.begin_run()?;
        let start_time = Instant::now();
        let source_name = source.describe();
        let worker_count = self.config.worker_count();

        self.reporter
            .report_started(&source_name, mode, worker_count);

        let queue = BoundedQueue::new(self.config.queue_capacity());
        let ctx = WorkerContext {
            queue: &queue,
            processor,
            reporter: &self.reporter,
            mode,
            report_every: report_every as u64,
        };

        let (produced, joined) = thread::scope(|scope| {
            let handles = match spawn_workers(scope, &ctx, worker_count) {
                Ok(handles) => handles,
                Err(error) => {
                    // 起動済みのワーカーをスコープ終了時に回収できるようにする
                    queue.close();
                    return (Err(error), Ok(Vec::new()));
                }
            };

            let produced = produce(source, &source_name, &queue);
            queue.close();
            (produced, join_workers(handles))
        });

        let result = match (produced, joined) {
            (Ok(lines_read), Ok(workers)) => Ok(self.summarize(
                mode,
                source_name,
                lines_read,
                workers,
                start_time,
            )),
            (Err(error), Ok(_)) | (Ok(_), Err(error)) => Err(error),
            (Err(producer_error), Err(worker_error)) => {
                self.reporter.report_error(&worker_error.to_string());
                Err(producer_error)
            }
        };

        match &result {
            Ok(summary) => self.reporter.report_completed(summary),
            Err(error) => self.reporter.report_error(&error.to_string()),
        }
        result
    }

    /// 現在実行中かどうか
    pub fn is_running(&self) -> bool {
        *lock_state(&self.state) == PipelineState::Running
    }

    /// 設定への参照を取得（読み取り専用アクセス）
    pub fn config(&self) -> &C {
        &self.config
    }

    /// レポーターへの参照を取得
    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// `Idle -> Running` 遷移。既に実行中なら副作用なしで拒否
    fn begin_run(&self) -> ParserResult<RunGuard<'_>> {
        let mut state = lock_state(&self.state);
        if *state == PipelineState::Running {
            return Err(ParserError::AlreadyRunning);
        }
        *state = PipelineState::Running;
        Ok(RunGuard { state: &self.state })
    }

    fn summarize(
        &self,
        mode: ParseMode,
        source_name: String,
        lines_read: u64,
        workers: Vec<WorkerStats>,
        start_time: Instant,
    ) -> RunSummary {
        RunSummary {
            mode,
            source: source_name,
            lines_read,
            lines_processed: workers.iter().map(|w| w.processed).sum(),
            workers,
            elapsed_ms: start_time.elapsed().as_millis() as u64,
        }
    }
}

/// 入力を開いてProducerを実行する
fn produce<S>(
    source: &S,
    source_name: &str,
    queue: &BoundedQueue<String>,
) -> ParserResult<u64>
where
    S: LineSource + ?Sized,
{
    let reader = source
        .open()
        .map_err(|e| ParserError::source_unavailable(source_name, e))?;
    run_producer(reader, queue, source_name)
}
