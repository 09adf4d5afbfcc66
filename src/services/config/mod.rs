// 設定管理機能
// ワーカー数・検証有無・外部ツール配置

pub mod implementations;

// 公開API
pub use implementations::{
    DefaultBatchConfig, Toolchain, DEFAULT_CONVERTER, DEFAULT_SOURCE_EXTENSION,
    DEFAULT_VALIDATION_TIMEOUT, DEFAULT_WORKERS,
};
