// パース処理専用のカスタムエラー型定義

use std::path::PathBuf;
use thiserror::Error;

/// パイプライン実行で発生するエラー
#[derive(Error, Debug)]
pub enum ParserError {
    #[error("入力を開けません: {source_name} - {source}")]
    SourceUnavailable {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("入力の読み込みに失敗しました: {source_name} ({line}行目) - {source}")]
    ReadFailed {
        source_name: String,
        line: u64,
        #[source]
        source: std::io::Error,
    },

    #[error("このパイプラインは既に実行中です")]
    AlreadyRunning,

    #[error("設定エラー: {message}")]
    Configuration { message: String },

    #[error("ワーカー {worker_id} を起動できません: {source}")]
    WorkerSpawn {
        worker_id: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("ワーカー {worker_id} がパニックしました: {message}")]
    WorkerPanicked { worker_id: usize, message: String },

    #[error("設定ファイルエラー: {} - {source}", path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

impl ParserError {
    /// 入力オープン失敗エラーの作成
    pub fn source_unavailable(source_name: impl Into<String>, source: std::io::Error) -> Self {
        Self::SourceUnavailable {
            source_name: source_name.into(),
            source,
        }
    }

    /// 読み込み途中の失敗エラーの作成
    pub fn read_failed(source_name: impl Into<String>, line: u64, source: std::io::Error) -> Self {
        Self::ReadFailed {
            source_name: source_name.into(),
            line,
            source,
        }
    }

    /// 設定エラーの作成
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// ワーカー起動失敗エラーの作成
    pub fn worker_spawn(worker_id: usize, source: std::io::Error) -> Self {
        Self::WorkerSpawn { worker_id, source }
    }

    /// ワーカーpanicエラーの作成
    pub fn worker_panicked(worker_id: usize, message: impl Into<String>) -> Self {
        Self::WorkerPanicked {
            worker_id,
            message: message.into(),
        }
    }

    /// 設定ファイルエラーの作成
    pub fn config_file(path: impl Into<PathBuf>, source: anyhow::Error) -> Self {
        Self::ConfigFile {
            path: path.into(),
            source,
        }
    }

    /// 同じ入力・同じ設定で再実行すれば成功し得るかどうか
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::SourceUnavailable { .. } | Self::ReadFailed { .. } => true,
            Self::AlreadyRunning | Self::WorkerSpawn { .. } => true,
            Self::Configuration { .. } | Self::ConfigFile { .. } => false,
            Self::WorkerPanicked { .. } => false,
        }
    }
}

/// パース処理の結果型
pub type ParserResult<T> = std::result::Result<T, ParserError>;

/// panicペイロードから表示用メッセージを取り出す
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
