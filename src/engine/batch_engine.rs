// BatchEngine - 依存性注入によるバッチ変換エンジン
// 入力探索から結果保存までを管理する

use super::pipeline::BatchPipeline;
use crate::{
    core::{
        BatchConfig, BatchSummary, CommandRunner, ConversionError, ConversionResult, JobResult,
        PreFilter, ProgressReporter, ResultPersistence,
    },
    services::{
        config::Toolchain,
        conversion::ConverterInvoker,
        discovery::InputScanner,
        monitoring::NoOpProgressReporter,
        processing::FileJob,
        validation::ValidatorInvoker,
    },
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// スクラッチディレクトリ名の接頭辞
const SCRATCH_PREFIX: &str = "mjlog-scratch-";

/// 1回のバッチ実行の結果
#[derive(Debug, Clone)]
pub struct BatchRun {
    /// 完了順
    pub results: Vec<JobResult>,
    pub summary: BatchSummary,
}

/// バッチ変換エンジン
///
/// 全ての依存関係はコンストラクタで注入され、並列処理で共有されるものはArcで保持する。
pub struct BatchEngine<R, C, P, S> {
    runner: Arc<R>,
    config: Arc<C>,
    reporter: Arc<P>,
    persistence: Arc<S>,
    toolchain: Toolchain,
    prefilter: Option<Arc<dyn PreFilter>>,
}

impl<R, C, P, S> BatchEngine<R, C, P, S>
where
    R: CommandRunner + 'static,
    C: BatchConfig,
    P: ProgressReporter + 'static,
    S: ResultPersistence + 'static,
{
    pub fn new(runner: R, config: C, reporter: P, persistence: S, toolchain: Toolchain) -> Self {
        Self {
            runner: Arc::new(runner),
            config: Arc::new(config),
            reporter: Arc::new(reporter),
            persistence: Arc::new(persistence),
            toolchain,
            prefilter: None,
        }
    }

    /// 変換前スキップ判定を差し込む
    pub fn with_prefilter(mut self, prefilter: Arc<dyn PreFilter>) -> Self {
        self.prefilter = Some(prefilter);
        self
    }

    /// 入力ディレクトリ内の全ファイルを変換
    ///
    /// 入力が1件もなければ何も作らずNoneを返す。
    pub async fn convert_directory(
        &self,
        input_dir: &Path,
        output_dir: &Path,
    ) -> ConversionResult<Option<BatchRun>> {
        let worker_count = self.config.worker_count();
        if worker_count == 0 {
            return Err(ConversionError::configuration(
                "ワーカー数は1以上である必要があります",
            ));
        }

        let mut files = self.discover_input_files(input_dir)?;
        if files.is_empty() {
            info!(input = %input_dir.display(), "no input files found");
            return Ok(None);
        }
        if let Some(limit) = self.config.file_limit().filter(|limit| *limit > 0) {
            files.truncate(limit);
        }
        info!(files = files.len(), workers = worker_count, "starting batch");

        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|e| ConversionError::workspace(output_dir.display().to_string(), e))?;

        let scratch = tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .tempdir()
            .map_err(|e| ConversionError::workspace(std::env::temp_dir().display().to_string(), e))?;

        let pipeline = BatchPipeline::new(Arc::new(self.build_job(scratch.path(), output_dir)));
        let reporter: Arc<dyn ProgressReporter> = if self.config.enable_progress_reporting() {
            Arc::clone(&self.reporter) as Arc<dyn ProgressReporter>
        } else {
            Arc::new(NoOpProgressReporter::new())
        };

        let start_time = Instant::now();
        let results = pipeline.execute(files, worker_count, reporter).await?;
        let elapsed = start_time.elapsed();

        if let Err(e) = scratch.close() {
            warn!(error = %e, "failed to remove scratch directory");
        }

        let summary = BatchSummary::from_results(&results, elapsed, self.config.validate_output());

        self.persistence
            .store_results(&results)
            .await
            .map_err(ConversionError::persistence)?;

        Ok(Some(BatchRun { results, summary }))
    }

    /// 入力ファイルを発見（直下のみ、辞書順）
    fn discover_input_files(&self, input_dir: &Path) -> ConversionResult<Vec<PathBuf>> {
        let extension = self.config.source_extension();
        InputScanner::scan_directory(input_dir, &extension)
            .map_err(|e| ConversionError::file_discovery(input_dir.display().to_string(), e))
    }

    fn build_job(&self, scratch_dir: &Path, output_dir: &Path) -> FileJob<R> {
        let converter =
            ConverterInvoker::new(Arc::clone(&self.runner), self.toolchain.converter());
        let job = FileJob::new(converter, scratch_dir, output_dir)
            .with_prefilter(self.prefilter.clone());

        if !self.config.validate_output() {
            return job;
        }

        let validator = ValidatorInvoker::new(
            Arc::clone(&self.runner),
            self.toolchain.validator.clone(),
            self.toolchain.validation_timeout,
        );
        if !validator.is_available() {
            warn!("validator not found, converted files will be marked as passed");
        }
        job.with_validator(validator)
    }

    /// 永続化への参照を取得
    pub fn persistence(&self) -> &S {
        &self.persistence
    }
}
