//! tether CLI entry point.

use std::error::Error;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tether_runtime::{Repl, ReplConfig};
use tracing_subscriber::EnvFilter;

/// Typed command-pipeline interpreter.
#[derive(Parser, Debug)]
#[command(name = "tether", version, about)]
struct Cli {
    /// Pipeline scripts to run before starting the REPL (one pipeline per line)
    #[arg(value_name = "FILES")]
    files: Vec<PathBuf>,

    /// Run a pipeline (may be given more than once)
    #[arg(short, long = "eval", value_name = "PIPELINE")]
    eval: Vec<String>,

    /// Run files and pipelines, then exit without starting the REPL
    #[arg(short, long)]
    batch: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Disable ANSI colors
    #[arg(long)]
    no_color: bool,

    /// Log filter, e.g. `debug` or `tether_language=trace` (default: $TETHER_LOG, then `warn`)
    #[arg(long, value_name = "FILTER")]
    log: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(filter: Option<&str>) -> Result<(), Box<dyn Error>> {
    let filter = match filter {
        Some(directives) => EnvFilter::try_new(directives)?,
        None => EnvFilter::try_from_env("TETHER_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    Ok(())
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn Error>> {
    init_logging(cli.log.as_deref())?;

    let color = !cli.no_color && std::io::stdout().is_terminal();
    let config = ReplConfig::default()
        .with_color(color)
        .with_json_output(cli.json);

    let mut repl = Repl::new(config)?;
    let mut failed = false;

    for file in &cli.files {
        let report = repl.eval_file(file)?;
        if !report.succeeded() {
            eprintln!("{}: {report}", file.display());
            failed = true;
        }
    }

    for pipeline in &cli.eval {
        let before = repl.session().failures();
        repl.execute(pipeline)?;
        failed |= repl.session().failures() > before;
    }

    if cli.batch {
        return Ok(if failed {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        });
    }

    // Files or pipelines already ran, so skip the banner.
    if !cli.files.is_empty() || !cli.eval.is_empty() {
        repl = repl.without_banner();
    }

    repl.run()?;
    Ok(ExitCode::SUCCESS)
}
