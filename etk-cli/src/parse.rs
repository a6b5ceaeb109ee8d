//! Utilities for parsing strings.

use snafu::Snafu;

use std::fmt;
use std::str::FromStr;

/// Error returned when text isn't valid hexadecimal.
#[derive(Debug, Snafu)]
#[snafu(display("invalid hexadecimal: {}", source))]
pub struct ParseHexError {
    source: hex::FromHexError,
}

/// Decode hexadecimal `text`, ignoring surrounding whitespace and an optional
/// `0x` prefix.
///
/// ```
/// use etk_cli::parse::decode_hex;
///
/// assert_eq!(decode_hex(" 0xa9059cbb\n").unwrap(), vec![0xa9, 0x05, 0x9c, 0xbb]);
/// assert_eq!(decode_hex("").unwrap(), Vec::<u8>::new());
/// ```
pub fn decode_hex(text: &str) -> Result<Vec<u8>, ParseHexError> {
    let trimmed = text.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);

    hex::decode(digits).map_err(|source| ParseHexError { source })
}

/// Bytes that use hexadecimal for `Display` and `FromStr`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hex(pub Vec<u8>);

impl FromStr for Hex {
    type Err = ParseHexError;

    fn from_str(txt: &str) -> Result<Self, Self::Err> {
        decode_hex(txt).map(Self)
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}
