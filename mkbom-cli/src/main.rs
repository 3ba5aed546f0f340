//! mkbom -- Maven BOM generator
//!
//! Scans repository directories for `*.pom` descriptors and writes a BOM
//! that manages every discovered artifact.

mod cli;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;
use mkbom_builder::{BomBuilder, BomConfig, EmitOutcome};

use cli::Cli;
use error::CliError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_tracing(&cli.log_level, cli.log_format) {
        report_failure(e);
    }

    if let Err(e) = run(cli) {
        report_failure(e);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    // file + env first, then explicit flags on top
    let mut config = match &cli.config {
        Some(path) => BomConfig::load(path)?,
        None => {
            let mut config = BomConfig::default();
            config.apply_env_overrides();
            config
        }
    };
    cli.apply_to(&mut config);

    tracing::debug!(?config, "effective configuration");

    let report = BomBuilder::new(config)?.run()?;
    if let EmitOutcome::File { .. } = report.outcome {
        println!("{report}");
    }

    Ok(())
}

fn report_failure(err: CliError) -> ! {
    let code = err.exit_code();
    tracing::error!(exit_code = code, error = %err, "mkbom failed");
    eprintln!("{} {:?}", "error:".red().bold(), anyhow::Error::from(err));
    std::process::exit(code);
}
