// 検証ツール呼び出し機能
// 変換済み.mjsonを検証ツールに渡す（助言的な検査であり、変換結果は覆さない）

use crate::core::{truncate_chars, CommandRunner, CommandSpec, ValidationOutcome};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub const VALIDATOR_MISSING_MESSAGE: &str = "Validator not found, skipping validation";
pub const VALIDATION_PASSED_MESSAGE: &str = "Validation passed";
pub const VALIDATION_TIMEOUT_MESSAGE: &str = "Validation timeout";
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// 検証ツールが失敗行に含める文字列
pub const FAILURE_MARKER: &str = "fails";

const MAX_REASON_CHARS: usize = 100;

/// 検証の判定とメッセージ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationVerdict {
    pub passed: bool,
    pub message: String,
}

impl ValidationVerdict {
    fn pass(message: &str) -> Self {
        Self {
            passed: true,
            message: message.to_string(),
        }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: message.into(),
        }
    }
}

impl From<ValidationVerdict> for ValidationOutcome {
    fn from(verdict: ValidationVerdict) -> Self {
        if verdict.passed {
            ValidationOutcome::Passed
        } else {
            ValidationOutcome::Failed(verdict.message)
        }
    }
}

/// 検証ツールの呼び出し
pub struct ValidatorInvoker<R> {
    runner: Arc<R>,
    validator: Option<PathBuf>,
    timeout: Duration,
}

impl<R: CommandRunner> ValidatorInvoker<R> {
    pub fn new(runner: Arc<R>, validator: Option<PathBuf>, timeout: Duration) -> Self {
        Self {
            runner,
            validator,
            timeout,
        }
    }

    /// 検証ツールが設定され、実際に存在するかどうか
    pub fn is_available(&self) -> bool {
        self.validator.as_deref().is_some_and(Path::exists)
    }

    pub async fn validate(&self, converted: &Path) -> ValidationVerdict {
        let validator = match self.validator.as_deref() {
            Some(path) if path.exists() => path,
            _ => {
                debug!(file = %converted.display(), "validator not found, skipping");
                return ValidationVerdict::pass(VALIDATOR_MISSING_MESSAGE);
            }
        };

        let spec = CommandSpec::new(validator)
            .arg(converted.to_string_lossy())
            .with_timeout(self.timeout);

        match self.runner.run(&spec).await {
            Ok(output) if output.success() => ValidationVerdict::pass(VALIDATION_PASSED_MESSAGE),
            Ok(output) => ValidationVerdict::fail(first_failure_line(&output.stderr)),
            Err(error) if error.is_timeout() => ValidationVerdict::fail(VALIDATION_TIMEOUT_MESSAGE),
            Err(error) => ValidationVerdict::fail(error.to_string()),
        }
    }
}

/// 標準エラーから最初の失敗行を取り出す
fn first_failure_line(stderr: &str) -> String {
    stderr
        .lines()
        .find(|line| line.contains(FAILURE_MARKER))
        .map(|line| truncate_chars(line, MAX_REASON_CHARS))
        .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string())
}
