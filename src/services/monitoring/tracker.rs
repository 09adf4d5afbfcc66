// 進捗集計
// オーケストレーター側だけが更新する単一書き込みのカウンタ

use crate::core::{JobResult, JobStatus, ProgressSnapshot};
use std::time::Instant;

/// 完了したJobResultから進捗を集計する
#[derive(Debug)]
pub struct ProgressTracker {
    total: usize,
    completed: usize,
    converted: usize,
    failed: usize,
    skipped: usize,
    started_at: Instant,
}

impl ProgressTracker {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            completed: 0,
            converted: 0,
            failed: 0,
            skipped: 0,
            started_at: Instant::now(),
        }
    }

    /// 完了を記録して最新のスナップショットを返す
    pub fn record(&mut self, result: &JobResult) -> ProgressSnapshot {
        self.completed += 1;
        match result.status {
            JobStatus::Converted => self.converted += 1,
            JobStatus::Failed | JobStatus::Error => self.failed += 1,
            JobStatus::Skipped => self.skipped += 1,
        }
        self.snapshot()
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            completed: self.completed,
            total: self.total,
            converted: self.converted,
            failed: self.failed,
            skipped: self.skipped,
            elapsed: self.started_at.elapsed(),
        }
    }
}
