use clap::Parser;
use mjlog_convert::cli::{execute_convert, init_tracing, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(error) = execute_convert(&cli).await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}
