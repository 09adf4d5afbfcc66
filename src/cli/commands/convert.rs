use crate::cli::Cli;
use crate::core::{BatchConfig, ProgressReporter};
use crate::engine::BatchEngine;
use crate::services::{
    persistence::results_path_in, print_report, ByeEventFilter, ConsoleProgressReporter,
    DefaultBatchConfig, JsonResultPersistence, NoOpProgressReporter, TokioCommandRunner,
    Toolchain,
};
use anyhow::Result;
use chrono::Local;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// CLI引数からバッチ設定を組み立てる
pub fn batch_config_from(cli: &Cli) -> DefaultBatchConfig {
    DefaultBatchConfig::new(cli.workers as usize)
        .with_validation(cli.validate)
        .with_limit(cli.limit.map(|limit| limit as usize))
        .with_extension(cli.extension.as_str())
        .with_progress_reporting(!cli.quiet)
}

/// CLI引数から外部ツール構成を組み立てる
pub fn toolchain_from(cli: &Cli) -> Toolchain {
    Toolchain::new(&cli.converter)
        .with_validator(cli.validator.clone())
        .with_validation_timeout(Duration::from_secs(cli.validation_timeout))
}

/// 入力が1件もなかったときの表示（拡張子は大文字で示す）
pub fn no_input_message(extension: &str, input_dir: &Path) -> String {
    format!(
        "No {} files found in {}",
        extension.to_uppercase(),
        input_dir.display()
    )
}

/// Execute batch conversion
pub async fn execute_convert(cli: &Cli) -> Result<()> {
    // 入力ディレクトリの事前確認
    if !cli.input_dir.is_dir() {
        anyhow::bail!("Input directory not found: {}", cli.input_dir.display());
    }

    let results_path = results_path_in(&cli.output_dir);
    let reporter: Box<dyn ProgressReporter> = if cli.quiet {
        Box::new(NoOpProgressReporter::new())
    } else {
        Box::new(ConsoleProgressReporter::new())
    };

    let toolchain = toolchain_from(cli);
    info!(
        converter = %toolchain.converter().display(),
        validator = ?toolchain.validator,
        "toolchain configured"
    );

    let config = batch_config_from(cli);
    let extension = config.source_extension();

    let mut engine = BatchEngine::new(
        TokioCommandRunner::new(),
        config,
        reporter,
        JsonResultPersistence::new(&results_path),
        toolchain,
    );
    if cli.skip_bye {
        engine = engine.with_prefilter(Arc::new(ByeEventFilter::new()));
    }

    match engine
        .convert_directory(&cli.input_dir, &cli.output_dir)
        .await
    {
        Ok(Some(run)) => {
            print_report(&run.summary, &run.results, &results_path, Local::now());
        }
        Ok(None) => {
            println!("{}", no_input_message(&extension, &cli.input_dir));
        }
        Err(error) => {
            anyhow::bail!("変換処理エラー: {error}");
        }
    }

    Ok(())
}
