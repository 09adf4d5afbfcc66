// 進捗監視機能
// 進捗バー表示、ETA計算、完了件数の集計

pub mod implementations;
pub mod tracker;

// 公開API
pub use implementations::{
    format_eta, format_total_time, render_progress_line, ConsoleProgressReporter,
    NoOpProgressReporter, PROGRESS_BAR_WIDTH, TIMESTAMP_FORMAT,
};
pub use tracker::ProgressTracker;
