// 圧縮機能
// 入力XMLをgzip化した.mjlogスクラッチファイルを作成する

use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// スクラッチファイルの拡張子
pub const SCRATCH_EXTENSION: &str = "mjlog";

/// ジョブが所有する一時圧縮ファイル
///
/// Dropで必ず削除される（パニック時の巻き戻しを含む）。
#[derive(Debug)]
pub struct ScratchArtifact {
    path: PathBuf,
}

impl ScratchArtifact {
    fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchArtifact {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "scratch artifact removed"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), error = %e, "failed to remove scratch artifact"),
        }
    }
}

/// scratch_dir/<stem>.mjlog を作成する
pub fn scratch_path_for(source: &Path, scratch_dir: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input".to_string());
    scratch_dir.join(format!("{stem}.{SCRATCH_EXTENSION}"))
}

/// 入力ファイルをgzip圧縮してスクラッチディレクトリに書き出す
///
/// 書き込み途中で失敗した場合、作成済みのファイルはガードのDropで削除される。
pub fn compress_to_scratch(source: &Path, scratch_dir: &Path) -> io::Result<ScratchArtifact> {
    let mut reader = BufReader::new(File::open(source)?);

    let target = scratch_path_for(source, scratch_dir);
    let file = File::create(&target)?;
    let artifact = ScratchArtifact::new(target);

    let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
    io::copy(&mut reader, &mut encoder)?;
    encoder.finish()?.flush()?;

    debug!(source = %source.display(), scratch = %artifact.path().display(), "compressed input");
    Ok(artifact)
}
