//! Reading input data for command-line tools.

mod error {
    use crate::parse::ParseHexError;

    use snafu::{Backtrace, Snafu};

    use std::path::PathBuf;

    /// Errors that can occur while reading an [`InputSource`](super::InputSource).
    #[derive(Snafu, Debug)]
    #[snafu(context(suffix(false)), visibility(pub(super)))]
    #[non_exhaustive]
    pub enum Error {
        /// An input file couldn't be read.
        #[snafu(display("couldn't read `{}`", path.to_string_lossy()))]
        #[non_exhaustive]
        Io {
            /// Path to the input file.
            path: PathBuf,

            /// The underlying source of this error.
            source: std::io::Error,

            /// The location of the error.
            backtrace: Backtrace,
        },

        /// A hexadecimal input file didn't contain hexadecimal.
        #[snafu(display("`{}` is not a hexadecimal file", path.to_string_lossy()))]
        #[non_exhaustive]
        HexFile {
            /// Path to the input file.
            path: PathBuf,

            /// The underlying source of this error.
            source: ParseHexError,

            /// The location of the error.
            backtrace: Backtrace,
        },
    }
}

pub use self::error::Error;

use crate::parse::{decode_hex, Hex};

use clap::Parser;

use snafu::ResultExt;

use std::path::PathBuf;

/// Command-line arguments selecting where input data comes from. Exactly one
/// source must be given.
#[derive(Debug, Parser)]
pub struct InputSource {
    #[clap(
        long = "bin-file",
        short = 'b',
        name = "bin-file",
        help = "path to input data, as raw binary data",
        conflicts_with_all(&["hex-file", "code", "data"]),
        required_unless_present_any(&["hex-file", "code", "data"]),
    )]
    bin_file: Option<PathBuf>,

    #[clap(
        long = "hex-file",
        short = 'x',
        name = "hex-file",
        help = "path to input data, encoded in hexadecimal format",
        conflicts_with_all(&["code", "data"])
    )]
    hex_file: Option<PathBuf>,

    #[clap(
        long = "code",
        short = 'c',
        name = "code",
        help = "input data, encoded in hexadecimal format (0x prefix optional)",
        conflicts_with = "data"
    )]
    code: Option<Hex>,

    #[clap(
        name = "data",
        value_name = "HEX",
        help = "input data, encoded in hexadecimal format (0x prefix optional)"
    )]
    data: Option<Hex>,
}

impl InputSource {
    /// Read all of the input data.
    pub fn read(self) -> Result<Vec<u8>, Error> {
        if let Some(path) = self.bin_file {
            return std::fs::read(&path).context(error::Io { path });
        }

        if let Some(path) = self.hex_file {
            let text = std::fs::read_to_string(&path).context(error::Io { path: &path })?;
            return decode_hex(&text).context(error::HexFile { path });
        }

        let Hex(bytes) = self.code.or(self.data).unwrap_or(Hex(Vec::new()));
        Ok(bytes)
    }
}
