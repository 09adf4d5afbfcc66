// 変換処理に関連するデータ型定義

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// JobResultに記録するエラーメッセージの最大文字数
pub const MAX_ERROR_CHARS: usize = 200;

/// 文字境界を保ったまま先頭max_chars文字に切り詰める
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}

/// ファイル単位の最終ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Converted,
    Failed,
    Error,
    Skipped,
}

impl JobStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Converted => "converted",
            Self::Failed => "failed",
            Self::Error => "error",
            Self::Skipped => "skipped",
        }
    }

    /// 失敗扱い（failed または error）かどうか
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed | Self::Error)
    }
}

/// 検証結果（未実施はOption::Noneで表す）
///
/// JSONでは "passed" / "failed: <理由>" の文字列になる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Passed,
    Failed(String),
}

impl ValidationOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    pub fn to_label(&self) -> String {
        match self {
            Self::Passed => "passed".to_string(),
            Self::Failed(reason) => format!("failed: {reason}"),
        }
    }
}

impl Serialize for ValidationOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_label())
    }
}

impl<'de> Deserialize<'de> for ValidationOutcome {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        if label == "passed" {
            return Ok(Self::Passed);
        }
        match label.strip_prefix("failed: ") {
            Some(reason) => Ok(Self::Failed(reason.to_string())),
            None => Err(serde::de::Error::custom(format!(
                "unknown validation outcome: {label}"
            ))),
        }
    }
}

/// 入力ファイル1つにつき1つだけ生成される処理結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobResult {
    pub file: String,
    pub status: JobStatus,
    pub error: Option<String>,
    pub validation: Option<ValidationOutcome>,
}

impl JobResult {
    pub fn converted(file: impl Into<String>, validation: Option<ValidationOutcome>) -> Self {
        Self {
            file: file.into(),
            status: JobStatus::Converted,
            error: None,
            validation,
        }
    }

    pub fn failed(file: impl Into<String>, message: &str) -> Self {
        Self::with_error(file, JobStatus::Failed, message)
    }

    pub fn error(file: impl Into<String>, message: &str) -> Self {
        Self::with_error(file, JobStatus::Error, message)
    }

    pub fn skipped(file: impl Into<String>, reason: &str) -> Self {
        Self::with_error(file, JobStatus::Skipped, reason)
    }

    fn with_error(file: impl Into<String>, status: JobStatus, message: &str) -> Self {
        Self {
            file: file.into(),
            status,
            error: Some(truncate_chars(message, MAX_ERROR_CHARS)),
            validation: None,
        }
    }
}

/// ファイルパスから結果識別用のファイル名を取り出す
pub fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// バッチ全体のサマリー（終了時に一度だけ計算）
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    pub total_files: usize,
    pub converted: usize,
    pub failed: usize,
    pub errored: usize,
    pub skipped: usize,
    /// 検証を要求した場合のみSome((passed, attempted))
    pub validation: Option<(usize, usize)>,
    pub elapsed: Duration,
}

impl BatchSummary {
    pub fn from_results(results: &[JobResult], elapsed: Duration, validation_requested: bool) -> Self {
        let count = |status: JobStatus| results.iter().filter(|r| r.status == status).count();

        let validation = validation_requested.then(|| {
            let attempted: Vec<_> = results.iter().filter_map(|r| r.validation.as_ref()).collect();
            let passed = attempted.iter().filter(|v| v.is_passed()).count();
            (passed, attempted.len())
        });

        Self {
            total_files: results.len(),
            converted: count(JobStatus::Converted),
            failed: count(JobStatus::Failed),
            errored: count(JobStatus::Error),
            skipped: count(JobStatus::Skipped),
            validation,
            elapsed,
        }
    }

    /// failed と error の合計
    pub fn failure_count(&self) -> usize {
        self.failed + self.errored
    }

    /// 1秒あたりの処理ファイル数
    pub fn throughput(&self) -> f64 {
        let seconds = self.elapsed.as_secs_f64();
        if seconds > 0.0 {
            self.total_files as f64 / seconds
        } else {
            0.0
        }
    }

    pub fn percent_of_total(&self, count: usize) -> f64 {
        if self.total_files == 0 {
            0.0
        } else {
            count as f64 / self.total_files as f64 * 100.0
        }
    }
}

/// 外部コマンドの起動指定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub timeout: Option<Duration>,
}

impl CommandSpec {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn program_name(&self) -> String {
        self.program.display().to_string()
    }
}

/// 外部コマンドの実行結果
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// シグナル終了時はNone
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// 完了のたびに再計算される進捗スナップショット
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSnapshot {
    pub completed: usize,
    pub total: usize,
    pub converted: usize,
    pub failed: usize,
    pub skipped: usize,
    pub elapsed: Duration,
}

impl ProgressSnapshot {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }

    /// files/s
    pub fn rate(&self) -> f64 {
        let seconds = self.elapsed.as_secs_f64();
        if seconds > 0.0 {
            self.completed as f64 / seconds
        } else {
            0.0
        }
    }

    pub fn eta(&self) -> Duration {
        let rate = self.rate();
        let remaining = self.total.saturating_sub(self.completed);
        if rate > 0.0 {
            Duration::from_secs_f64(remaining as f64 / rate)
        } else {
            Duration::ZERO
        }
    }
}
