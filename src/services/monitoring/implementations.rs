// 進捗監視の具象実装

use crate::core::{ProgressReporter, ProgressSnapshot};
use async_trait::async_trait;
use chrono::Local;
use std::io::Write;
use std::time::Duration;
use tracing::debug;

/// 開始・完了時刻の表示形式
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 進捗バーの幅（文字数）
pub const PROGRESS_BAR_WIDTH: usize = 40;

/// ETA表示: 60秒未満は "Ns"、1時間未満は "Mm Ss"、それ以上は "Hh Mm"
pub fn format_eta(eta: Duration) -> String {
    let secs = eta.as_secs();
    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}

/// 合計時間表示: "N.N seconds" / "Mm Ss" / "Hh Mm Ss"
pub fn format_total_time(elapsed: Duration) -> String {
    let seconds = elapsed.as_secs_f64();
    if seconds < 60.0 {
        return format!("{seconds:.1} seconds");
    }
    let secs = elapsed.as_secs();
    if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

/// `\r` 上書きで短くなった行の残り文字を消すための末尾空白
const LINE_PADDING: &str = "    ";

/// 1行分の進捗表示を組み立てる
pub fn render_progress_line(snapshot: &ProgressSnapshot) -> String {
    let fraction = snapshot.fraction().clamp(0.0, 1.0);
    let filled = ((fraction * PROGRESS_BAR_WIDTH as f64) as usize).min(PROGRESS_BAR_WIDTH);
    let bar = format!(
        "{}{}",
        "=".repeat(filled),
        "-".repeat(PROGRESS_BAR_WIDTH - filled)
    );

    format!(
        "[{bar}] {}/{} ({:.1}%) | OK: {} ERR: {} SKIP: {} | Speed: {:.1} files/s | ETA: {}{LINE_PADDING}",
        snapshot.completed,
        snapshot.total,
        fraction * 100.0,
        snapshot.converted,
        snapshot.failed,
        snapshot.skipped,
        snapshot.rate(),
        format_eta(snapshot.eta()),
    )
}

/// コンソール出力による進捗報告実装
///
/// 完了のたびに同じ行を `\r` で上書きする。
#[derive(Debug, Default, Clone)]
pub struct ConsoleProgressReporter {
    quiet: bool,
}

impl ConsoleProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quiet() -> Self {
        Self { quiet: true }
    }
}

#[async_trait]
impl ProgressReporter for ConsoleProgressReporter {
    async fn report_started(&self, total_files: usize, worker_count: usize) {
        if !self.quiet {
            println!(
                "\nStarting conversion of {total_files} files at {}",
                Local::now().format(TIMESTAMP_FORMAT)
            );
            println!("Using {worker_count} parallel workers");
            println!("{}", "-".repeat(60));
        }
    }

    async fn report_progress(&self, snapshot: &ProgressSnapshot) {
        if self.quiet {
            return;
        }
        let mut stdout = std::io::stdout().lock();
        // 表示の失敗で処理は止めない
        let _ = write!(stdout, "\r{}", render_progress_line(snapshot));
        let _ = stdout.flush();
    }

    async fn report_error(&self, file: &str, error: &str) {
        // 進捗行を崩さないようにログにだけ残す
        debug!(file = %file, error = %error, "job failed");
    }

    async fn report_completed(&self, snapshot: &ProgressSnapshot) {
        if !self.quiet && snapshot.total > 0 {
            println!();
        }
    }
}

/// 何もしない進捗報告実装（テスト・--quiet用）
#[derive(Debug, Default, Clone)]
pub struct NoOpProgressReporter;

impl NoOpProgressReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProgressReporter for NoOpProgressReporter {
    async fn report_started(&self, _total_files: usize, _worker_count: usize) {}

    async fn report_progress(&self, _snapshot: &ProgressSnapshot) {}

    async fn report_error(&self, _file: &str, _error: &str) {}

    async fn report_completed(&self, _snapshot: &ProgressSnapshot) {}
}
