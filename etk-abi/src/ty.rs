mod error {
    use snafu::{Backtrace, Snafu};

    /// Errors that can occur while resolving a type name into a
    /// [`ParamType`](super::ParamType).
    #[derive(Snafu, Debug)]
    #[snafu(context(suffix(false)), visibility(pub(super)))]
    #[non_exhaustive]
    pub enum TypeError {
        /// The name isn't an elementary type, or an array of one.
        #[snafu(display("unknown type `{}`", token))]
        #[non_exhaustive]
        Unknown {
            /// The unrecognized type name.
            token: String,

            /// The location of the error.
            backtrace: Backtrace,
        },

        /// An integer or fixed bytes type has an unsupported width.
        #[snafu(display("width {} is out of range for `{}`", width, token))]
        #[non_exhaustive]
        WidthOutOfRange {
            /// The offending type name.
            token: String,

            /// The declared width (bits for integers, bytes for fixed bytes).
            width: usize,

            /// The location of the error.
            backtrace: Backtrace,
        },

        /// A fixed array dimension is empty, zero, or not a number.
        #[snafu(display("invalid array dimension in `{}`", token))]
        #[non_exhaustive]
        ArrayLength {
            /// The offending type name.
            token: String,

            /// The location of the error.
            backtrace: Backtrace,
        },
    }
}

pub use self::error::TypeError;

use snafu::{ensure, OptionExt};

use std::fmt;
use std::str::FromStr;

use crate::WORD;

/// The types that can appear as arguments of a function call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// `address`: a 20 byte account address.
    Address,

    /// `bool`
    Bool,

    /// `uintN`, where `N` is the width in bits (8 to 256, multiple of 8).
    Uint(usize),

    /// `intN`, where `N` is the width in bits (8 to 256, multiple of 8).
    Int(usize),

    /// `bytesN`, where `N` is the length in bytes (1 to 32).
    FixedBytes(usize),

    /// `bytes`: a length-prefixed byte sequence.
    Bytes,

    /// `string`: length-prefixed UTF-8 text.
    String,

    /// `T[N]`: exactly `N` elements of `T`.
    FixedArray(Box<ParamType>, usize),

    /// `T[]`: a length-prefixed sequence of `T`.
    Array(Box<ParamType>),
}

impl ParamType {
    /// Returns `true` if values of this type are encoded in the tail, and
    /// referenced from the head by an offset.
    pub fn is_dynamic(&self) -> bool {
        match self {
            Self::Bytes | Self::String | Self::Array(_) => true,
            Self::FixedArray(elem, _) => elem.is_dynamic(),
            Self::Address | Self::Bool | Self::Uint(_) | Self::Int(_) | Self::FixedBytes(_) => {
                false
            }
        }
    }

    /// Number of bytes this type occupies in the head of an encoded block.
    ///
    /// Dynamic types occupy a single offset word. Saturates instead of
    /// overflowing for absurdly large fixed arrays.
    pub fn head_size(&self) -> usize {
        match self {
            Self::FixedArray(elem, len) if !elem.is_dynamic() => {
                elem.head_size().saturating_mul(*len)
            }
            _ => WORD,
        }
    }

    /// Returns `true` if some type name resolves to this type: integer and
    /// fixed bytes widths are in range, and fixed arrays aren't empty.
    pub(crate) fn is_valid(&self) -> bool {
        match self {
            Self::Uint(bits) | Self::Int(bits) => (8..=256).contains(bits) && bits % 8 == 0,
            Self::FixedBytes(len) => (1..=32).contains(len),
            Self::FixedArray(elem, len) => *len > 0 && elem.is_valid(),
            Self::Array(elem) => elem.is_valid(),
            Self::Address | Self::Bool | Self::Bytes | Self::String => true,
        }
    }
}

/// Digit strings with a leading zero, like the `08` of `uint08`, aren't
/// canonical.
fn is_canonical_number(digits: &str) -> bool {
    !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && (digits == "0" || !digits.starts_with('0'))
}

fn width(token: &str, digits: &str) -> Result<usize, TypeError> {
    ensure!(is_canonical_number(digits), error::Unknown { token });

    // Digits that overflow `usize` are definitely out of range.
    let width = digits.parse().unwrap_or(usize::MAX);
    Ok(width)
}

fn integer_width(token: &str, digits: &str) -> Result<usize, TypeError> {
    let bits = width(token, digits)?;
    ensure!(
        (8..=256).contains(&bits) && bits % 8 == 0,
        error::WidthOutOfRange { token, width: bits }
    );
    Ok(bits)
}

fn elementary(token: &str) -> Result<ParamType, TypeError> {
    let ty = match token {
        "address" => ParamType::Address,
        "bool" => ParamType::Bool,
        "bytes" => ParamType::Bytes,
        "string" => ParamType::String,
        _ => {
            if let Some(digits) = token.strip_prefix("uint") {
                ParamType::Uint(integer_width(token, digits)?)
            } else if let Some(digits) = token.strip_prefix("int") {
                ParamType::Int(integer_width(token, digits)?)
            } else if let Some(digits) = token.strip_prefix("bytes") {
                let len = width(token, digits)?;
                ensure!(
                    (1..=32).contains(&len),
                    error::WidthOutOfRange { token, width: len }
                );
                ParamType::FixedBytes(len)
            } else {
                return error::Unknown { token }.fail();
            }
        }
    };

    Ok(ty)
}

impl FromStr for ParamType {
    type Err = TypeError;

    /// Resolve a canonical type name, like `uint256` or `address[2][]`.
    ///
    /// Array suffixes apply left to right, so `uint8[2][]` is a dynamic array
    /// of `uint8[2]`.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let inner = match token.strip_suffix(']') {
            Some(inner) => inner,
            None => return elementary(token),
        };

        let open = inner.rfind('[').context(error::Unknown { token })?;
        let elem: ParamType = inner[..open].parse()?;
        let dimension = &inner[open + 1..];

        if dimension.is_empty() {
            return Ok(Self::Array(Box::new(elem)));
        }

        ensure!(is_canonical_number(dimension), error::ArrayLength { token });

        let len: usize = match dimension.parse() {
            Ok(len) if len > 0 => len,
            _ => return error::ArrayLength { token }.fail(),
        };

        Ok(Self::FixedArray(Box::new(elem), len))
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Address => write!(f, "address"),
            Self::Bool => write!(f, "bool"),
            Self::Uint(bits) => write!(f, "uint{}", bits),
            Self::Int(bits) => write!(f, "int{}", bits),
            Self::FixedBytes(len) => write!(f, "bytes{}", len),
            Self::Bytes => write!(f, "bytes"),
            Self::String => write!(f, "string"),
            Self::FixedArray(elem, len) => write!(f, "{}[{}]", elem, len),
            Self::Array(elem) => write!(f, "{}[]", elem),
        }
    }
}
