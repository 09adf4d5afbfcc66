// Pipeline - Producer-Consumer パイプライン
// 結果の収集と進捗更新はこのタスクだけが行う

use super::{consumer::spawn_consumers, producer::spawn_producer};
use crate::{
    core::{CommandRunner, ConversionResult, JobResult, ProgressReporter},
    services::{monitoring::ProgressTracker, processing::FileJob},
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// ワーカープールでジョブを実行し、完了順に結果を集める
pub struct BatchPipeline<R> {
    job: Arc<FileJob<R>>,
}

impl<R> BatchPipeline<R>
where
    R: CommandRunner + 'static,
{
    pub fn new(job: Arc<FileJob<R>>) -> Self {
        Self { job }
    }

    /// ファイルリストを処理
    ///
    /// 全入力を先に作業キューへ投入してから結果を待つ。
    pub async fn execute<P>(
        &self,
        files: Vec<PathBuf>,
        worker_count: usize,
        reporter: Arc<P>,
    ) -> ConversionResult<Vec<JobResult>>
    where
        P: ProgressReporter + ?Sized + 'static,
    {
        let total_files = files.len();
        let capacity = total_files.max(1);

        let (work_tx, work_rx) = mpsc::channel::<PathBuf>(capacity);
        let (result_tx, mut result_rx) = mpsc::channel::<JobResult>(capacity);

        reporter.report_started(total_files, worker_count).await;

        // Producer起動
        let producer_handle = spawn_producer(files, work_tx);

        // Consumer Pool起動
        let consumer_handles =
            spawn_consumers(Arc::clone(&self.job), work_rx, result_tx, worker_count);

        // 完了順に収集
        let mut tracker = ProgressTracker::new(total_files);
        let mut results = Vec::with_capacity(total_files);
        while let Some(result) = result_rx.recv().await {
            let snapshot = tracker.record(&result);
            if result.status.is_failure() {
                reporter
                    .report_error(&result.file, result.error.as_deref().unwrap_or_default())
                    .await;
            }
            reporter.report_progress(&snapshot).await;
            results.push(result);
        }

        producer_handle.await??;
        for handle in consumer_handles {
            handle.await??;
        }

        reporter.report_completed(&tracker.snapshot()).await;

        if results.len() != total_files {
            warn!(
                expected = total_files,
                collected = results.len(),
                "result count does not match input count"
            );
        }
        debug!(collected = results.len(), "pipeline drained");

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::{MockCommandRunner, MockProgressReporter};
    use crate::core::{CommandOutput, JobStatus};
    use crate::services::conversion::ConverterInvoker;
    use crate::services::NoOpProgressReporter;
    use std::collections::HashSet;
    use std::fs;
    use tempfile::TempDir;

    struct Dirs {
        input: TempDir,
        scratch: TempDir,
        output: TempDir,
    }

    impl Dirs {
        fn new() -> Self {
            Self {
                input: TempDir::new().unwrap(),
                scratch: TempDir::new().unwrap(),
                output: TempDir::new().unwrap(),
            }
        }

        fn inputs(&self, count: usize) -> Vec<PathBuf> {
            (0..count)
                .map(|i| {
                    let path = self.input.path().join(format!("{i:03}.xml"));
                    fs::write(&path, "<mjloggm/>").unwrap();
                    path
                })
                .collect()
        }
    }

    /// stemが奇数なら非対応として失敗させるランナー
    fn odd_failing_runner() -> MockCommandRunner {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().returning(|spec| {
            let stem = std::path::Path::new(&spec.args[1])
                .file_stem()
                .unwrap()
                .to_string_lossy()
                .into_owned();
            let number: usize = stem.parse().unwrap();
            if number % 2 == 1 {
                return Ok(CommandOutput {
                    exit_code: Some(1),
                    stderr: "Skipping unsupported file".to_string(),
                    ..Default::default()
                });
            }
            fs::write(&spec.args[2], b"{}\n").unwrap();
            Ok(CommandOutput {
                exit_code: Some(0),
                ..Default::default()
            })
        });
        runner
    }

    fn pipeline(dirs: &Dirs) -> BatchPipeline<MockCommandRunner> {
        BatchPipeline::new(Arc::new(FileJob::new(
            ConverterInvoker::new(Arc::new(odd_failing_runner()), "mjai"),
            dirs.scratch.path(),
            dirs.output.path(),
        )))
    }

    #[tokio::test]
    async fn test_pipeline_empty_files() {
        let dirs = Dirs::new();

        let results = pipeline(&dirs)
            .execute(vec![], 4, Arc::new(NoOpProgressReporter::new()))
            .await
            .unwrap();

        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_pipeline_one_result_per_input() {
        let dirs = Dirs::new();
        let files = dirs.inputs(6);

        let results = pipeline(&dirs)
            .execute(files, 4, Arc::new(NoOpProgressReporter::new()))
            .await
            .unwrap();

        assert_eq!(results.len(), 6);
        let names: HashSet<_> = results.iter().map(|r| r.file.as_str()).collect();
        assert_eq!(names.len(), 6);
        assert_eq!(
            results.iter().filter(|r| r.status == JobStatus::Converted).count(),
            3
        );
        assert_eq!(
            results.iter().filter(|r| r.status == JobStatus::Failed).count(),
            3
        );
    }

    #[tokio::test]
    async fn test_pool_size_does_not_change_outcomes() {
        let dirs_single = Dirs::new();
        let dirs_pool = Dirs::new();

        let single = pipeline(&dirs_single)
            .execute(dirs_single.inputs(10), 1, Arc::new(NoOpProgressReporter::new()))
            .await
            .unwrap();
        let pooled = pipeline(&dirs_pool)
            .execute(dirs_pool.inputs(10), 4, Arc::new(NoOpProgressReporter::new()))
            .await
            .unwrap();

        let as_set = |results: &[JobResult]| -> HashSet<(String, JobStatus)> {
            results.iter().map(|r| (r.file.clone(), r.status)).collect()
        };
        assert_eq!(as_set(single.as_slice()), as_set(pooled.as_slice()));
    }

    #[tokio::test]
    async fn test_reporter_driven_after_each_completion() {
        let dirs = Dirs::new();
        let files = dirs.inputs(4);

        let mut reporter = MockProgressReporter::new();
        reporter
            .expect_report_started()
            .withf(|total, workers| *total == 4 && *workers == 2)
            .times(1)
            .returning(|_, _| ());
        reporter.expect_report_progress().times(4).returning(|_| ());
        reporter
            .expect_report_error()
            .withf(|_, error| error.to_string() == "Unsupported format")
            .times(2)
            .returning(|_, _| ());
        reporter
            .expect_report_completed()
            .withf(|snapshot| {
                snapshot.completed == 4 && snapshot.converted == 2 && snapshot.failed == 2
            })
            .times(1)
            .returning(|_| ());

        let results = pipeline(&dirs)
            .execute(files, 2, Arc::new(reporter))
            .await
            .unwrap();

        assert_eq!(results.len(), 4);
    }
}
