// エンジン層 - 並列処理とオーケストレーション
// サービス層を組み合わせてバッチ変換を提供

pub mod batch_engine;
pub mod consumer;
mod pipeline;
pub mod producer; // BatchPipeline内部でのみ使用

// 公開API - 主要エンジンクラス
pub use batch_engine::{BatchEngine, BatchRun};
pub use pipeline::BatchPipeline;
