//! Utilities for printing errors.

use snafu::{Backtrace, ErrorCompat};

use std::fmt;

/// A wrapper which prints an error, followed by each of its causes and its
/// backtrace (when snafu's backtraces are enabled).
#[derive(Debug)]
pub struct Report<E>(pub E);

impl<E> Report<E>
where
    E: ErrorCompat + std::error::Error,
{
    /// Print the report to standard error, and exit with status `1`.
    pub fn exit(self) -> ! {
        eprint!("{}", self);
        std::process::exit(1);
    }
}

impl<E> fmt::Display for Report<E>
where
    E: ErrorCompat + std::error::Error,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "error: {}", self.0)?;

        let mut current = self.0.source();

        while let Some(e) = current.take() {
            writeln!(f, "caused by: {e}")?;
            current = e.source();
        }

        if let Some(backtrace) = ErrorCompat::backtrace(&self.0) {
            // XXX: hack to determine if snafu's backtraces are enabled.
            if std::mem::size_of::<Backtrace>() > 0 {
                writeln!(f, "backtrace:\n{backtrace}")?;
            }
        }

        Ok(())
    }
}
