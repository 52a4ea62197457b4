//! tlog-monitor binary

use std::process;

use clap::Parser;
use tlog_monitor::{logging, Cli};

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too and are not failures
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };

    logging::init(cli.debug);
    tracing::debug!("enabled debug mode");

    if let Err(e) = cli.run().await {
        eprintln!("Operation failed:\n{:#}", e);
        process::exit(1);
    }
}
