// Custom error types for batch conversion
// バッチ変換専用のカスタムエラー型定義

use std::time::Duration;
use thiserror::Error;

/// バッチ全体を中断させるエラー型
///
/// ファイル単位の失敗はJobResultとして記録されるため、ここには含まれない。
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("ファイル発見エラー: {path} - {source}")]
    FileDiscoveryError {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("設定エラー: {message}")]
    ConfigurationError { message: String },

    #[error("作業ディレクトリエラー: {path} - {source}")]
    WorkspaceError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("永続化エラー: {source}")]
    PersistenceError {
        #[source]
        source: anyhow::Error,
    },

    #[error("タスクエラー: {source}")]
    TaskError {
        #[source]
        source: tokio::task::JoinError,
    },

    #[error("内部エラー: {source}")]
    InternalError {
        #[source]
        source: anyhow::Error,
    },
}

impl ConversionError {
    /// ファイル発見エラーの作成
    pub fn file_discovery(path: impl Into<String>, source: anyhow::Error) -> Self {
        Self::FileDiscoveryError {
            path: path.into(),
            source,
        }
    }

    /// 設定エラーの作成
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }

    /// 出力・スクラッチディレクトリ関連エラーの作成
    pub fn workspace(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::WorkspaceError {
            path: path.into(),
            source,
        }
    }

    /// 永続化エラーの作成
    pub fn persistence(source: anyhow::Error) -> Self {
        Self::PersistenceError { source }
    }
}

impl From<anyhow::Error> for ConversionError {
    fn from(error: anyhow::Error) -> Self {
        ConversionError::InternalError { source: error }
    }
}

impl From<tokio::task::JoinError> for ConversionError {
    fn from(error: tokio::task::JoinError) -> Self {
        ConversionError::TaskError { source: error }
    }
}

/// バッチ処理の結果型
pub type ConversionResult<T> = std::result::Result<T, ConversionError>;

/// 外部コマンド実行時のエラー
///
/// メッセージはJobResultのerror欄にそのまま記録される。
#[derive(Error, Debug)]
pub enum RunError {
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} timed out after {}s", timeout.as_secs_f64())]
    Timeout { program: String, timeout: Duration },

    #[error("failed to collect output of {program}: {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl RunError {
    pub fn launch(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Launch {
            program: program.into(),
            source,
        }
    }

    pub fn timeout(program: impl Into<String>, timeout: Duration) -> Self {
        Self::Timeout {
            program: program.into(),
            timeout,
        }
    }

    pub fn io(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            program: program.into(),
            source,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
