// 変換ツール呼び出し機能
// `<converter> convert <mjlog> <mjson>` を実行し、結果を分類する

use crate::core::{truncate_chars, CommandRunner, CommandSpec};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// 変換結果ファイルの拡張子
pub const OUTPUT_EXTENSION: &str = "mjson";

/// 変換ツールが非対応入力を示すときに標準エラーへ出す文字列
pub const UNSUPPORTED_MARKER: &str = "Skipping unsupported file";

pub const UNSUPPORTED_MESSAGE: &str = "Unsupported format";
pub const EMPTY_OUTPUT_MESSAGE: &str = "Conversion produced empty or no file";

/// 標準エラーを診断メッセージとして残す最大文字数
const MAX_DIAGNOSTIC_CHARS: usize = 200;

/// 変換結果の分類
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    Converted { output: PathBuf },
    /// 変換ツールが入力形式を明示的に拒否した
    Unsupported,
    Failed { message: String },
}

impl ConversionOutcome {
    pub fn is_converted(&self) -> bool {
        matches!(self, Self::Converted { .. })
    }

    /// 失敗時にJobResultへ記録するメッセージ
    pub fn failure_message(&self) -> Option<String> {
        match self {
            Self::Converted { .. } => None,
            Self::Unsupported => Some(UNSUPPORTED_MESSAGE.to_string()),
            Self::Failed { message } => Some(message.clone()),
        }
    }
}

/// 変換ツールの呼び出し
pub struct ConverterInvoker<R> {
    runner: Arc<R>,
    program: PathBuf,
}

impl<R: CommandRunner> ConverterInvoker<R> {
    pub fn new(runner: Arc<R>, program: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            program: program.into(),
        }
    }

    /// output_dir/<stem>.mjson
    pub fn output_path_for(scratch: &Path, output_dir: &Path) -> PathBuf {
        let stem = scratch
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string());
        output_dir.join(format!("{stem}.{OUTPUT_EXTENSION}"))
    }

    /// 圧縮済みファイルを変換する
    ///
    /// 失敗時は出力先に部分ファイルを残さない。
    pub async fn convert(&self, scratch: &Path, output_dir: &Path) -> ConversionOutcome {
        let output = Self::output_path_for(scratch, output_dir);
        let spec = CommandSpec::new(&self.program)
            .arg("convert")
            .arg(scratch.to_string_lossy())
            .arg(output.to_string_lossy());

        let result = match self.runner.run(&spec).await {
            Ok(result) => result,
            Err(error) => {
                remove_if_exists(&output);
                return ConversionOutcome::Failed {
                    message: error.to_string(),
                };
            }
        };

        if !result.success() {
            remove_if_exists(&output);
            if result.stderr.contains(UNSUPPORTED_MARKER) {
                debug!(output = %output.display(), "converter rejected unsupported input");
                return ConversionOutcome::Unsupported;
            }
            return ConversionOutcome::Failed {
                message: truncate_chars(&result.stderr, MAX_DIAGNOSTIC_CHARS),
            };
        }

        // 終了コード0でも出力が空なら失敗扱い
        let produced = std::fs::metadata(&output)
            .map(|meta| meta.len() > 0)
            .unwrap_or(false);
        if !produced {
            remove_if_exists(&output);
            return ConversionOutcome::Failed {
                message: EMPTY_OUTPUT_MESSAGE.to_string(),
            };
        }

        ConversionOutcome::Converted { output }
    }
}

fn remove_if_exists(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => debug!(path = %path.display(), "removed partial output"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), error = %e, "failed to remove partial output"),
    }
}
