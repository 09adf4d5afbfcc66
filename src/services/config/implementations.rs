// 設定管理の具象実装

use crate::core::BatchConfig;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 既定のワーカー数
pub const DEFAULT_WORKERS: usize = 4;

/// 既定の入力拡張子
pub const DEFAULT_SOURCE_EXTENSION: &str = "xml";

/// 既定の変換コマンド
pub const DEFAULT_CONVERTER: &str = "mjai";

/// 検証ツールの既定タイムアウト
pub const DEFAULT_VALIDATION_TIMEOUT: Duration = Duration::from_secs(10);

/// デフォルト設定実装
#[derive(Debug, Clone)]
pub struct DefaultBatchConfig {
    workers: usize,
    validate: bool,
    limit: Option<usize>,
    extension: String,
    enable_progress: bool,
}

impl DefaultBatchConfig {
    pub fn new(workers: usize) -> Self {
        Self {
            workers,
            ..Self::default()
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    pub fn with_progress_reporting(mut self, enable: bool) -> Self {
        self.enable_progress = enable;
        self
    }
}

impl Default for DefaultBatchConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            validate: false,
            limit: None,
            extension: DEFAULT_SOURCE_EXTENSION.to_string(),
            enable_progress: true,
        }
    }
}

impl BatchConfig for DefaultBatchConfig {
    fn worker_count(&self) -> usize {
        self.workers
    }

    fn validate_output(&self) -> bool {
        self.validate
    }

    fn file_limit(&self) -> Option<usize> {
        self.limit
    }

    fn source_extension(&self) -> String {
        self.extension.clone()
    }

    fn enable_progress_reporting(&self) -> bool {
        self.enable_progress
    }
}

/// 外部ツールの配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub converter: PathBuf,
    /// Noneまたは存在しないパスなら検証はスキップされる
    pub validator: Option<PathBuf>,
    pub validation_timeout: Duration,
}

impl Toolchain {
    pub fn new(converter: impl Into<PathBuf>) -> Self {
        Self {
            converter: converter.into(),
            ..Self::default()
        }
    }

    pub fn with_validator(mut self, validator: Option<PathBuf>) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_validation_timeout(mut self, timeout: Duration) -> Self {
        self.validation_timeout = timeout;
        self
    }

    pub fn converter(&self) -> &Path {
        &self.converter
    }
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            converter: PathBuf::from(DEFAULT_CONVERTER),
            validator: None,
            validation_timeout: DEFAULT_VALIDATION_TIMEOUT,
        }
    }
}
