//! Common utilities for ETK command-line tools.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(unreachable_pub)]
#![deny(missing_debug_implementations)]

pub mod errors;
pub mod io;
pub mod parse;
