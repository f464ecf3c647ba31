// エンジン層 - 並列処理とオーケストレーション
// サービス層を組み合わせて高レベルな処理を提供

pub mod api;
pub mod consumer; // ParsingPipeline内部でのみ使用
pub mod pipeline;
pub mod producer; // ParsingPipeline内部でのみ使用

// 公開API - 主要パイプラインクラス
pub use api::{create_default_pipeline, create_quiet_pipeline, parse_csv_file, parse_ndjson_file};
pub use pipeline::{ParsingPipeline, PipelineState};
