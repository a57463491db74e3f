//! SuperPi CLI
//!
//! Computes pi to a requested number of digits and saves the result, or
//! keeps computing in continuous mode until interrupted.

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use std::io;
use std::process;
use superpi::continuous::CancelToken;
use superpi::{App, Cli, CliError, signal};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "superpi", &mut io::stdout());
        return;
    }

    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = cli.load_config()?;
    info!(?config, "configuration loaded");

    let stdout = io::stdout().lock();
    let mut app = App::new(config, cli.quiet, stdout);

    if cli.continuous {
        let token = CancelToken::new();
        if let Err(e) = signal::install_interrupt_handler(&token) {
            warn!("interrupt handler unavailable, Ctrl-C will terminate immediately: {}", e);
        }
        app.run_continuous(&token)?;
    } else {
        let digits = cli.digits_or_default(app.config());
        app.run_single(digits)?;
    }
    Ok(())
}

/// Default filter when `RUST_LOG` is unset or invalid
const DEFAULT_LOG_FILTER: &str = "superpi=warn,superpi_engine=warn";

/// Logs go to stderr. `RUST_LOG` replaces the default filter; `-v` adds
/// debug output for both crates on top of either.
fn init_logging(verbose: bool) {
    let mut filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    if verbose {
        for target in ["superpi", "superpi_engine"] {
            if let Ok(directive) = format!("{}=debug", target).parse() {
                filter = filter.add_directive(directive);
            }
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
