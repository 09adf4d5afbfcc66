// Worker - 単一ファイルの変換パイプライン
// 圧縮 → 変換 → （任意）検証。スクラッチは全経路で削除される

use crate::core::{file_label, CommandRunner, JobResult, PreFilter};
use crate::services::compression::compress_to_scratch;
use crate::services::conversion::{ConversionOutcome, ConverterInvoker};
use crate::services::validation::ValidatorInvoker;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// 1ファイル分のジョブ
///
/// 全ワーカーでArc共有される。可変状態は持たない。
pub struct FileJob<R> {
    converter: ConverterInvoker<R>,
    validator: Option<ValidatorInvoker<R>>,
    prefilter: Option<Arc<dyn PreFilter>>,
    scratch_dir: PathBuf,
    output_dir: PathBuf,
}

impl<R> FileJob<R>
where
    R: CommandRunner + 'static,
{
    pub fn new(
        converter: ConverterInvoker<R>,
        scratch_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            converter,
            validator: None,
            prefilter: None,
            scratch_dir: scratch_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// 変換成功後に検証を行う
    pub fn with_validator(mut self, validator: ValidatorInvoker<R>) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn with_prefilter(mut self, prefilter: Option<Arc<dyn PreFilter>>) -> Self {
        self.prefilter = prefilter;
        self
    }

    /// 単一ファイルの処理
    ///
    /// 必ずJobResultを1つ返し、エラーを外へ伝播しない。
    pub async fn process(&self, input: &Path) -> JobResult {
        let file = file_label(input);
        let start_time = Instant::now();

        let result = match self.run_steps(input, &file).await {
            Ok(result) => result,
            Err(error) => JobResult::error(file, &format!("{error:#}")),
        };

        debug!(
            file = %result.file,
            status = result.status.as_str(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "job finished"
        );
        result
    }

    async fn run_steps(&self, input: &Path, file: &str) -> anyhow::Result<JobResult> {
        // 事前判定（ブロッキングI/O）
        if let Some(reason) = self.skip_reason(input).await? {
            debug!(file = %file, reason = %reason, "skipped by pre-filter");
            return Ok(JobResult::skipped(file, &reason));
        }

        // 圧縮（ブロッキングI/O）
        let source = input.to_path_buf();
        let scratch_dir = self.scratch_dir.clone();
        let scratch =
            tokio::task::spawn_blocking(move || compress_to_scratch(&source, &scratch_dir))
                .await??;

        // 変換
        let outcome = self.converter.convert(scratch.path(), &self.output_dir).await;

        let result = match outcome {
            ConversionOutcome::Converted { output } => {
                let validation = match &self.validator {
                    Some(validator) if output.exists() => {
                        Some(validator.validate(&output).await.into())
                    }
                    _ => None,
                };
                JobResult::converted(file, validation)
            }
            failed => {
                let message = failed.failure_message().unwrap_or_default();
                JobResult::failed(file, &message)
            }
        };

        // scratchはここでDropされ削除される
        drop(scratch);
        Ok(result)
    }

    async fn skip_reason(&self, input: &Path) -> anyhow::Result<Option<String>> {
        let Some(filter) = self.prefilter.clone() else {
            return Ok(None);
        };
        let input = input.to_path_buf();
        Ok(tokio::task::spawn_blocking(move || filter.skip_reason(&input)).await?)
    }
}
