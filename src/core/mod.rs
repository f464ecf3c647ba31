// コアレイヤー - 基盤となるトレイト、型、エラー定義、キュー
// 他のレイヤーから参照される基本的な抽象化を提供

pub mod error;
pub mod queue;
pub mod traits;
pub mod types;

// 公開API - 明示的にエクスポートして曖昧性を回避
pub use error::{ParserError, ParserResult};
pub use queue::BoundedQueue;
pub use traits::{ParserConfig, ProgressReporter, RecordProcessor};
pub use types::{ParseMode, Record, RunSummary, WorkerStats};
