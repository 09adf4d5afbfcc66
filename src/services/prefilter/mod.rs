// 変換前スキップ判定
// BYE（プレイヤー切断）を含む牌譜を変換対象から外す

use crate::core::PreFilter;
use std::path::Path;
use tracing::debug;

/// 切断イベントのタグ名
pub const BYE_MARKER: &[u8] = b"BYE";

pub const BYE_SKIP_REASON: &str = "Contains BYE event (player disconnection)";

/// BYEイベントを含む入力をスキップする
#[derive(Debug, Default, Clone)]
pub struct ByeEventFilter;

impl ByeEventFilter {
    pub fn new() -> Self {
        Self
    }
}

impl PreFilter for ByeEventFilter {
    fn skip_reason(&self, input: &Path) -> Option<String> {
        // 読めないファイルはスキップせず、後段のエラーとして扱う
        let content = match std::fs::read(input) {
            Ok(content) => content,
            Err(e) => {
                debug!(file = %input.display(), error = %e, "pre-filter could not read input");
                return None;
            }
        };

        content
            .windows(BYE_MARKER.len())
            .any(|window| window == BYE_MARKER)
            .then(|| BYE_SKIP_REASON.to_string())
    }
}
