// 設定管理
// 既定値、ビルダー、JSON設定ファイル

pub mod implementations;

// 公開API
pub use implementations::{
    validate_config, validate_worker_settings, DefaultParserConfig, DEFAULT_QUEUE_CAPACITY,
    DEFAULT_REPORT_EVERY,
};
