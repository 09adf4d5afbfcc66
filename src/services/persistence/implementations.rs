// 結果永続化の具象実装

use crate::core::{JobResult, ResultPersistence};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::fs::OpenOptions;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::info;

/// 結果ファイル名
pub const RESULTS_FILE_NAME: &str = "conversion_results.json";

/// 出力ディレクトリ内の結果ファイルパス
pub fn results_path_in(output_dir: &Path) -> PathBuf {
    output_dir.join(RESULTS_FILE_NAME)
}

/// メモリ内保存の永続化実装（テスト用）
#[derive(Debug, Clone, Default)]
pub struct MemoryResultPersistence {
    stored: Arc<Mutex<Option<Vec<JobResult>>>>,
}

impl MemoryResultPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// テスト用：保存された結果を取得
    pub fn stored_results(&self) -> Option<Vec<JobResult>> {
        self.stored.lock().ok().and_then(|guard| guard.clone())
    }

    pub fn is_stored(&self) -> bool {
        self.stored_results().is_some()
    }
}

#[async_trait]
impl ResultPersistence for MemoryResultPersistence {
    async fn store_results(&self, results: &[JobResult]) -> Result<()> {
        let mut guard = self
            .stored
            .lock()
            .map_err(|e| anyhow::anyhow!("ロック取得エラー: {e}"))?;
        *guard = Some(results.to_vec());
        Ok(())
    }
}

/// JSON配列として結果一覧を書き出す永続化実装
///
/// 整形済みJSON、UTF-8のまま（非ASCIIをエスケープしない）。
#[derive(Debug, Clone)]
pub struct JsonResultPersistence {
    file_path: PathBuf,
}

impl JsonResultPersistence {
    pub fn new<P: AsRef<Path>>(file_path: P) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}

#[async_trait]
impl ResultPersistence for JsonResultPersistence {
    async fn store_results(&self, results: &[JobResult]) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| anyhow::anyhow!("ディレクトリ作成エラー: {e}"))?;
        }

        let json = serde_json::to_string_pretty(results)
            .map_err(|e| anyhow::anyhow!("JSON変換エラー: {e}"))?;

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.file_path)
            .await
            .with_context(|| format!("ファイル作成エラー: {}", self.file_path.display()))?;

        let mut writer = BufWriter::new(file);
        writer
            .write_all(json.as_bytes())
            .await
            .map_err(|e| anyhow::anyhow!("書き込みエラー: {e}"))?;
        writer
            .write_all(b"\n")
            .await
            .map_err(|e| anyhow::anyhow!("書き込みエラー: {e}"))?;
        writer
            .flush()
            .await
            .map_err(|e| anyhow::anyhow!("フラッシュエラー: {e}"))?;

        info!(
            path = %self.file_path.display(),
            entries = results.len(),
            "results saved"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{JobStatus, ValidationOutcome};
    use tempfile::TempDir;

    fn sample_results() -> Vec<JobResult> {
        vec![
            JobResult::converted("東風戦.xml", Some(ValidationOutcome::Passed)),
            JobResult::failed("sanma.xml", "Unsupported format"),
            JobResult::skipped("bye.xml", "Contains BYE event (player disconnection)"),
        ]
    }

    #[tokio::test]
    async fn test_memory_persistence() {
        let persistence = MemoryResultPersistence::new();
        assert!(!persistence.is_stored());

        persistence.store_results(&sample_results()).await.unwrap();

        let stored = persistence.stored_results().unwrap();
        assert_eq!(stored.len(), 3);
        assert_eq!(stored[1].status, JobStatus::Failed);
    }

    #[tokio::test]
    async fn test_json_persistence_writes_pretty_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let path = results_path_in(temp_dir.path());
        let persistence = JsonResultPersistence::new(&path);

        persistence.store_results(&sample_results()).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("東風戦.xml"));
        assert!(content.contains("\n  {"));

        let parsed: Vec<JobResult> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, sample_results());
    }

    #[tokio::test]
    async fn test_json_persistence_empty_list() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join(RESULTS_FILE_NAME);
        let persistence = JsonResultPersistence::new(&path);

        persistence.store_results(&[]).await.unwrap();

        let parsed: Vec<JobResult> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(parsed.is_empty());
        assert_eq!(persistence.file_path(), path.as_path());
    }

    #[tokio::test]
    async fn test_json_persistence_unwritable_target() {
        let temp_dir = TempDir::new().unwrap();
        // ディレクトリそのものには書き込めない
        let persistence = JsonResultPersistence::new(temp_dir.path());

        assert!(persistence.store_results(&sample_results()).await.is_err());
    }
}
