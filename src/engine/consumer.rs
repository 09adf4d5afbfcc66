// Consumer - 並列ワーカー機能

use crate::core::{file_label, CommandRunner, JobResult};
use crate::services::processing::FileJob;
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, trace};

/// 単一Consumerワーカー
///
/// ジョブごとに別タスクで実行し、パニックはそのファイルのerror結果に変換する。
pub fn spawn_single_consumer<R>(
    worker_id: usize,
    job: Arc<FileJob<R>>,
    work_rx: Arc<tokio::sync::Mutex<mpsc::Receiver<PathBuf>>>,
    result_tx: mpsc::Sender<JobResult>,
) -> tokio::task::JoinHandle<Result<()>>
where
    R: CommandRunner + 'static,
{
    tokio::spawn(async move {
        loop {
            // 次の作業を取得
            let input = {
                let mut rx = work_rx.lock().await;
                match rx.recv().await {
                    Some(path) => path,
                    None => break, // チャンネル終了
                }
            };
            trace!(worker_id, file = %input.display(), "job picked up");

            let task = {
                let job = Arc::clone(&job);
                let input = input.clone();
                tokio::spawn(async move { job.process(&input).await })
            };

            let result = match task.await {
                Ok(result) => result,
                Err(join_error) => {
                    error!(worker_id, file = %input.display(), error = %join_error, "job aborted");
                    JobResult::error(file_label(&input), &format!("job panicked: {join_error}"))
                }
            };

            // 結果送信
            if (result_tx.send(result).await).is_err() {
                // 結果チャンネルが閉じられた場合は終了
                break;
            }
        }
        Ok(())
    })
}

/// Consumers: 固定サイズのワーカープール
pub fn spawn_consumers<R>(
    job: Arc<FileJob<R>>,
    work_rx: mpsc::Receiver<PathBuf>,
    result_tx: mpsc::Sender<JobResult>,
    worker_count: usize,
) -> Vec<tokio::task::JoinHandle<Result<()>>>
where
    R: CommandRunner + 'static,
{
    let work_rx = Arc::new(tokio::sync::Mutex::new(work_rx));

    (0..worker_count)
        .map(|worker_id| {
            spawn_single_consumer(
                worker_id,
                Arc::clone(&job),
                Arc::clone(&work_rx),
                result_tx.clone(),
            )
        })
        .collect()
}
