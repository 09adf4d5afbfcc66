// 終了レポート
// サマリー件数、時間、エラー一覧（10件以下のときのみ）

use crate::core::{truncate_chars, BatchSummary, JobResult};
use crate::services::monitoring::{format_total_time, TIMESTAMP_FORMAT};
use chrono::{DateTime, Local};
use std::path::Path;

/// 詳細一覧を表示する失敗件数の上限
pub const MAX_LISTED_FAILURES: usize = 10;

/// 一覧表示時のエラーメッセージ最大文字数
pub const MAX_LISTED_ERROR_CHARS: usize = 100;

/// 終了レポートの各行を組み立てる
pub fn render_report(
    summary: &BatchSummary,
    results: &[JobResult],
    results_path: &Path,
    finished_at: DateTime<Local>,
) -> Vec<String> {
    let total = summary.total_files;
    let mut lines = vec![
        String::new(),
        "=".repeat(60),
        format!("Conversion Complete at {}", finished_at.format(TIMESTAMP_FORMAT)),
        format!("Total Time: {}", format_total_time(summary.elapsed)),
        format!("Average Speed: {:.2} files/second", summary.throughput()),
        format!(
            "Successful: {}/{total} ({:.1}%)",
            summary.converted,
            summary.percent_of_total(summary.converted)
        ),
    ];

    let failures = summary.failure_count();
    if failures > 0 {
        lines.push(format!(
            "Failed: {failures}/{total} ({:.1}%)",
            summary.percent_of_total(failures)
        ));
    }
    if summary.skipped > 0 {
        lines.push(format!(
            "Skipped: {}/{total} ({:.1}%)",
            summary.skipped,
            summary.percent_of_total(summary.skipped)
        ));
    }
    if let Some((passed, attempted)) = summary.validation {
        lines.push(format!("Validation: {passed}/{attempted} passed"));
    }

    let failed: Vec<&JobResult> = results.iter().filter(|r| r.status.is_failure()).collect();
    if !failed.is_empty() {
        if failed.len() <= MAX_LISTED_FAILURES {
            lines.push(String::new());
            lines.push("Errors:".to_string());
            for result in failed {
                let message = result.error.as_deref().unwrap_or_default();
                lines.push(format!(
                    "  {}: {}",
                    result.file,
                    truncate_chars(message, MAX_LISTED_ERROR_CHARS)
                ));
            }
        } else {
            lines.push(format!(
                "{} failures; see results file for details",
                failed.len()
            ));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Detailed results saved to: {}",
        results_path.display()
    ));
    lines
}

/// 終了レポートを標準出力へ表示
pub fn print_report(
    summary: &BatchSummary,
    results: &[JobResult],
    results_path: &Path,
    finished_at: DateTime<Local>,
) {
    for line in render_report(summary, results, results_path, finished_at) {
        println!("{line}");
    }
}
