// サービス層 - 機能別のビジネスロジック
// 各サービスは特定の責任を持ち、疎結合で設計されている

pub mod compression;
pub mod config;
pub mod conversion;
pub mod discovery;
pub mod monitoring;
pub mod persistence;
pub mod prefilter;
pub mod processing;
pub mod reporting;
pub mod runner;
pub mod validation;

// 公開API - 各サービスの主要機能を明示的にエクスポート
pub use compression::{compress_to_scratch, ScratchArtifact};
pub use config::{DefaultBatchConfig, Toolchain};
pub use conversion::{ConversionOutcome, ConverterInvoker};
pub use discovery::InputScanner;
pub use monitoring::{ConsoleProgressReporter, NoOpProgressReporter, ProgressTracker};
pub use persistence::{JsonResultPersistence, MemoryResultPersistence};
pub use prefilter::ByeEventFilter;
pub use processing::FileJob;
pub use reporting::{print_report, render_report};
pub use runner::TokioCommandRunner;
pub use validation::{ValidationVerdict, ValidatorInvoker};
