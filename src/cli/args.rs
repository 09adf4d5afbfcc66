use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mjlog_convert")]
#[command(about = "Batch convert mjlog XML files to MJAI format")]
#[command(version)]
pub struct Cli {
    /// Directory containing XML files
    pub input_dir: PathBuf,

    /// Output directory for MJAI files
    pub output_dir: PathBuf,

    /// Validate converted output with the validator tool
    #[arg(short = 'v', long)]
    pub validate: bool,

    /// Number of parallel workers
    #[arg(short, long, default_value_t = 4, value_parser = clap::value_parser!(u64).range(1..))]
    pub workers: u64,

    /// Limit number of files to process
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub limit: Option<u64>,

    /// Converter executable, invoked as `<converter> convert <in> <out>`
    #[arg(long, env = "MJAI_CONVERTER", default_value = "mjai")]
    pub converter: PathBuf,

    /// Validator executable, invoked as `<validator> <file>`
    #[arg(long, env = "MJAI_VALIDATOR")]
    pub validator: Option<PathBuf>,

    /// Per-file validation timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub validation_timeout: u64,

    /// Skip logs containing a BYE (player disconnection) event
    #[arg(long)]
    pub skip_bye: bool,

    /// Input file extension
    #[arg(long, default_value = "xml")]
    pub extension: String,

    /// Suppress the progress line
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (repeatable)
    #[arg(long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
