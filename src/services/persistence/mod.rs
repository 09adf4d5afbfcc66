// 結果永続化機能
// 完了順の結果一覧をJSONとして保存

pub mod implementations;

// 公開API
pub use implementations::{
    results_path_in, JsonResultPersistence, MemoryResultPersistence, RESULTS_FILE_NAME,
};
