#[path = "ecd/opts.rs"]
mod opts;

use crate::opts::Opts;

use etk_4byte::Database;

use etk_calldata::{DecodedCall, Interpreter, Outcome};

use etk_cli::errors::Report;

use snafu::{Backtrace, Snafu};

use std::io::Write;

use tracing_subscriber::EnvFilter;

#[derive(Debug, Snafu)]
enum Error {
    #[snafu(context(false), display("couldn't read input"))]
    Input {
        source: etk_cli::io::Error,
        backtrace: Backtrace,
    },

    #[snafu(context(false), display("couldn't load the signature database"))]
    Database {
        source: etk_4byte::Error,
        backtrace: Backtrace,
    },

    #[snafu(context(false), display("couldn't interpret call data"))]
    Interpret {
        source: etk_calldata::Error,
        backtrace: Backtrace,
    },

    #[snafu(context(false), display("couldn't write output"))]
    Io {
        source: std::io::Error,
        backtrace: Backtrace,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let err = match run() {
        Ok(_) => return,
        Err(e) => e,
    };

    Report(err).exit();
}

fn print_verbose<W: Write>(out: &mut W, call: &DecodedCall) -> Result<(), std::io::Error> {
    writeln!(out, "selector:  {}", call.selector())?;
    writeln!(out, "signature: {}", call.signature())?;

    for (idx, argument) in call.arguments().iter().enumerate() {
        writeln!(out, "  [{}] {}", idx, argument)?;
    }

    Ok(())
}

fn run() -> Result<(), Error> {
    let opts: Opts = clap::Parser::parse();

    let data = opts.src.read()?;

    let database = match opts.overlay {
        Some(ref path) => Database::with_overlay(path)?,
        None => Database::new()?,
    };

    let outcome = Interpreter::new(&database).interpret(&data)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match outcome {
        Outcome::NoCallData => writeln!(out, "no call data (plain value transfer)")?,
        Outcome::Call(call) if opts.verbose => print_verbose(&mut out, &call)?,
        Outcome::Call(call) => writeln!(out, "{}", call)?,
    }

    Ok(())
}
