// 入力ファイル探索
// 入力ディレクトリ直下から拡張子の一致するファイルを列挙する

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub struct InputScanner;

impl InputScanner {
    /// ディレクトリ直下を走査し、辞書順に並べて返す
    ///
    /// 拡張子は大文字小文字を区別して比較する。サブディレクトリは辿らない。
    pub fn scan_directory(directory: &Path, extension: &str) -> Result<Vec<PathBuf>> {
        let mut file_paths = Vec::new();

        for entry in WalkDir::new(directory).min_depth(1).max_depth(1) {
            let entry = entry
                .with_context(|| format!("ディレクトリ読み込みエラー: {}", directory.display()))?;

            if entry.file_type().is_file() && Self::has_extension(entry.path(), extension) {
                file_paths.push(entry.into_path());
            }
        }

        file_paths.sort();
        Ok(file_paths)
    }

    fn has_extension(path: &Path, extension: &str) -> bool {
        path.extension()
            .is_some_and(|ext| ext == extension)
    }
}
