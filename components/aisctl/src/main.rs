mod cli;
mod dispatch;
mod helpers;
mod instrumentation;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    // Parse first: the verbosity flag decides the log level. Parse errors exit here
    // with clap's usage message, before anything is resolved.
    let cli = cli::commands::Cli::parse();

    instrumentation::tracing::init_tracing(cli.verbose)?;
    instrumentation::tracing::init_panic_handler();

    cli::commands::run(cli)
}
