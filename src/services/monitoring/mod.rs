// 進捗監視機能
// ワーカー進捗の報告、エラー通知、完了通知、経過時間計測

pub mod implementations;
pub mod timer;

// 公開API
pub use implementations::{ConsoleProgressReporter, NoOpProgressReporter};
pub use timer::ScopedTimer;
