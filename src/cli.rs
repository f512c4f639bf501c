//! Command-line interface parsing for encfacter
//!
//! With no arguments the tool reads the configuration and cache from their
//! fixed system locations. The flags exist for testing and for hosts with a
//! non-standard layout.

use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::app::RunOptions;

/// Default configuration file location
pub const DEFAULT_CONFIG_PATH: &str = "/etc/encfacter/config.json";

/// Default cache file location
pub const DEFAULT_CACHE_PATH: &str = "/var/cache/encfacter/facts.txt";

/// encfacter - Print host facts from the external node classifier
#[derive(Parser, Debug)]
#[command(name = "encfacter")]
#[command(about = "Fetch host facts from the node classifier, cache them, and print them as JSON")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Path to the cache file
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CACHE_PATH)]
    pub cache: PathBuf,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Builds the run options from parsed arguments
    pub fn run_options(&self) -> RunOptions {
        RunOptions::new(&self.config, &self.cache)
    }
}

/// Installs the stderr log subscriber
///
/// `RUST_LOG` takes precedence; otherwise warnings and errors are shown, or
/// everything down to debug with `--verbose`.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}
