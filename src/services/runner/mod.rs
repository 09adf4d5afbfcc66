// 外部コマンド実行機能
// 変換ツール・検証ツールの起動を一箇所に集約

pub mod process;

// 公開API
pub use process::TokioCommandRunner;
