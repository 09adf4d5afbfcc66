// mjlog → MJAI バッチ変換
//
// レイヤー構成:
// - core: トレイト・型・エラー
// - services: 圧縮、外部ツール呼び出し、進捗、永続化、レポート
// - engine: ワーカープールとオーケストレーション
// - cli: 引数定義とコマンド実行

pub mod cli;
pub mod core;
pub mod engine;
pub mod services;

pub use crate::core::{BatchSummary, ConversionError, ConversionResult, JobResult, JobStatus};
pub use crate::engine::{BatchEngine, BatchRun};
