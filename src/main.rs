use clap::Parser;
use tracing_subscriber::EnvFilter;

use mhsig::cli;

fn main() -> anyhow::Result<()> {
    // Recorded in the output header
    let command = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("mhsig=debug,info")
    } else {
        EnvFilter::new("mhsig=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Call(args) => {
            cli::call::run(args, cli.format, command)?;
        }
    }

    Ok(())
}
