// tokio::processによる外部コマンド実行

use crate::core::{CommandOutput, CommandRunner, CommandSpec, RunError};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// 実プロセスを起動するCommandRunner実装
#[derive(Debug, Default, Clone)]
pub struct TokioCommandRunner;

impl TokioCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for TokioCommandRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, RunError> {
        let program = spec.program_name();
        debug!(program = %program, args = ?spec.args, "spawning command");

        // 標準入力は不要。タイムアウトで破棄された子プロセスはkill_on_dropで終了させる
        let child = Command::new(&spec.program)
            .args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| RunError::launch(&program, e))?;

        let output = match spec.timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| RunError::timeout(&program, limit))?,
            None => child.wait_with_output().await,
        }
        .map_err(|e| RunError::io(&program, e))?;

        let result = CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(program = %program, exit_code = ?result.exit_code, "command finished");

        Ok(result)
    }
}
