//! encfacter - Print host facts from the external node classifier
//!
//! Fetches the facts document, derives the production flag, caches it, and
//! prints it as tab-indented JSON. Falls back to the cached copy when the
//! classifier is unreachable.

use std::io;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use tracing::{debug, error};

use encfacter::app;
use encfacter::cli::{init_logging, Cli};
use encfacter::output::print_facts;

/// Exit code when the facts cannot be written to stdout
const EXIT_OUTPUT_FAILED: u8 = 4;

/// Exit code for invalid arguments (EX_USAGE), distinct from the pipeline codes
const EXIT_USAGE: u8 = 64;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let _ = e.print();
                return ExitCode::from(EXIT_USAGE);
            }
        },
    };
    init_logging(cli.verbose);

    let outcome = match app::run(&cli.run_options()).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(e.exit_code());
        }
    };

    debug!(source = ?outcome.source, "printing facts");
    if let Err(e) = print_facts(&mut io::stdout().lock(), &outcome.facts) {
        error!("could not print facts: {}", e);
        return ExitCode::from(EXIT_OUTPUT_FAILED);
    }

    ExitCode::SUCCESS
}
