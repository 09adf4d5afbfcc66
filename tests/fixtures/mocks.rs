// テスト用のランナー実装
// 実プロセスを起動せず、入力ファイル名で振る舞いを切り替える

use async_trait::async_trait;
use mjlog_convert::core::{CommandOutput, CommandRunner, CommandSpec, RunError};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// 呼び出し回数と同時実行数の記録（クローン間で共有）
#[derive(Debug, Default)]
pub struct RunnerStats {
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    conversions: AtomicUsize,
    validations: AtomicUsize,
}

impl RunnerStats {
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn conversions(&self) -> usize {
        self.conversions.load(Ordering::SeqCst)
    }

    pub fn validations(&self) -> usize {
        self.validations.load(Ordering::SeqCst)
    }
}

/// ファイル名に含まれるキーワードで結果を決めるランナー
///
/// 変換（`convert <in> <out>`）:
/// - "unsupported": 非対応として終了コード1
/// - "empty": 終了コード0だが出力なし
/// - "broken": 部分出力を残して終了コード2
/// - "panic": パニック
/// - それ以外: 出力ファイルを書いて成功
///
/// 検証（`<file>`）: "invalid" を含むと失敗行を出して終了コード1
#[derive(Debug, Default, Clone)]
pub struct ScriptedRunner {
    delay: Duration,
    stats: Arc<RunnerStats>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// 同時実行を観測しやすくするための待ち時間
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn stats(&self) -> Arc<RunnerStats> {
        Arc::clone(&self.stats)
    }

    fn exited(code: i32, stderr: &str) -> CommandOutput {
        CommandOutput {
            exit_code: Some(code),
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }

    fn convert(&self, input: &str, output: &str) -> CommandOutput {
        self.stats.conversions.fetch_add(1, Ordering::SeqCst);
        let name = file_name(input);

        if name.contains("unsupported") {
            return Self::exited(1, "Skipping unsupported file: three-player game\n");
        }
        if name.contains("empty") {
            return Self::exited(0, "");
        }
        if name.contains("broken") {
            let _ = std::fs::write(output, b"{\"type\":");
            return Self::exited(2, "RuntimeError: unexpected tag <XYZ>\n");
        }
        if name.contains("panic") {
            panic!("scripted converter crash for {name}");
        }

        match std::fs::write(output, b"{\"type\":\"start_game\"}\n{\"type\":\"end_game\"}\n") {
            Ok(()) => Self::exited(0, ""),
            Err(e) => Self::exited(1, &e.to_string()),
        }
    }

    fn validate(&self, file: &str) -> CommandOutput {
        self.stats.validations.fetch_add(1, Ordering::SeqCst);
        if file_name(file).contains("invalid") {
            Self::exited(1, "loading log\nkyoku 3 fails: tsumo after riichi\n")
        } else {
            Self::exited(0, "")
        }
    }
}

fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// in_flightを確実に戻す（パニック時を含む）
struct InFlightGuard<'a>(&'a AtomicUsize);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, RunError> {
        let now = self.stats.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.stats.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlightGuard(&self.stats.in_flight);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match spec.args.as_slice() {
            [command, input, output] if command == "convert" => Ok(self.convert(input, output)),
            [file] => Ok(self.validate(file)),
            _ => Err(RunError::launch(
                spec.program_name(),
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "unexpected arguments"),
            )),
        }
    }
}
