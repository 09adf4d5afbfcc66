// Producer - 入力ファイル配信機能

use anyhow::Result;
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Producer: 入力ファイルパスを作業キューへ投入
pub fn spawn_producer(
    files: Vec<PathBuf>,
    work_tx: mpsc::Sender<PathBuf>,
) -> tokio::task::JoinHandle<Result<()>> {
    tokio::spawn(async move {
        for file_path in files {
            if (work_tx.send(file_path).await).is_err() {
                // チャンネルが閉じられた場合は正常終了
                break;
            }
        }
        // work_txをドロップしてチャンネル終了シグナル
        Ok(())
    })
}
