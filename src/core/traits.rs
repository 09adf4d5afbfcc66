// バッチ変換システムのトレイト定義
// 全ての抽象化インターフェースを定義

use super::error::RunError;
use super::types::{CommandOutput, CommandSpec, JobResult, ProgressSnapshot};
use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use std::path::Path;

/// バッチ処理の設定を抽象化するトレイト
#[automock]
pub trait BatchConfig: Send + Sync {
    /// ワーカープールのサイズ
    fn worker_count(&self) -> usize;

    /// 変換後に検証ツールを実行するかどうか
    fn validate_output(&self) -> bool;

    /// 処理ファイル数の上限
    fn file_limit(&self) -> Option<usize>;

    /// 入力ファイルの拡張子（ドットなし）
    fn source_extension(&self) -> String;

    /// 進捗報告を有効にするかどうか
    fn enable_progress_reporting(&self) -> bool;
}

/// 外部プロセス実行の抽象化
///
/// 変換・検証ツールはこのトレイト越しにのみ起動される。
#[automock]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// コマンドを実行し、終了コードと出力を返す
    ///
    /// 起動失敗とタイムアウトのみがErrになる。非ゼロ終了はOk。
    async fn run(&self, spec: &CommandSpec) -> std::result::Result<CommandOutput, RunError>;
}

/// 変換前のスキップ判定フック
#[automock]
pub trait PreFilter: Send + Sync {
    /// スキップすべき場合は理由を返す
    fn skip_reason(&self, input: &Path) -> Option<String>;
}

/// 進捗報告の抽象化トレイト
#[automock]
#[async_trait]
pub trait ProgressReporter: Send + Sync {
    /// 処理開始時の報告
    async fn report_started(&self, total_files: usize, worker_count: usize);

    /// ジョブ完了ごとの進捗報告
    async fn report_progress(&self, snapshot: &ProgressSnapshot);

    /// 失敗したファイルの報告
    async fn report_error(&self, file: &str, error: &str);

    /// 全ジョブ完了時の報告
    async fn report_completed(&self, snapshot: &ProgressSnapshot);
}

// ProgressReporter for Box<dyn ProgressReporter>
#[async_trait]
impl ProgressReporter for Box<dyn ProgressReporter> {
    async fn report_started(&self, total_files: usize, worker_count: usize) {
        self.as_ref().report_started(total_files, worker_count).await
    }

    async fn report_progress(&self, snapshot: &ProgressSnapshot) {
        self.as_ref().report_progress(snapshot).await
    }

    async fn report_error(&self, file: &str, error: &str) {
        self.as_ref().report_error(file, error).await
    }

    async fn report_completed(&self, snapshot: &ProgressSnapshot) {
        self.as_ref().report_completed(snapshot).await
    }
}

/// 処理結果一覧の永続化抽象化トレイト
#[automock]
#[async_trait]
pub trait ResultPersistence: Send + Sync {
    /// 完了順の結果一覧を保存
    async fn store_results(&self, results: &[JobResult]) -> Result<()>;
}
