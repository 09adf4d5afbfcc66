// 単一ファイル処理機能
// 圧縮、変換、検証を1ジョブとして実行

pub mod worker;

// 公開API
pub use worker::FileJob;
