//! EVM Toolkit Call Data Interpreter.
//!
//! Turns the raw input of a contract call into a [`DecodedCall`]: the first
//! four bytes are resolved to a signature through an
//! [`etk_4byte::Database`], the remainder is decoded according to that
//! signature, and the decoded values are encoded again and compared against
//! the original bytes.
//!
//! The last step rejects "data stuffing": payloads that decode under a
//! signature, but carry bytes (dirty padding, unreferenced words, out of range
//! booleans) that a faithful encoding wouldn't produce.
//!
//! ## Example
//!
//! ```
//! use etk_4byte::Database;
//! use etk_calldata::{Interpreter, Outcome};
//!
//! use hex_literal::hex;
//!
//! let database = Database::new().unwrap();
//! let interpreter = Interpreter::new(&database);
//!
//! let data = hex!(
//!     "
//!     a9059cbb
//!     0000000000000000000000009a1989946ae4249aac19ac7a038d24aab03c3d8c
//!     000000000000000000000000000000000000000000002c5b68601cc92ad60000
//!     "
//! );
//!
//! let call = match interpreter.interpret(&data).unwrap() {
//!     Outcome::Call(call) => call,
//!     Outcome::NoCallData => unreachable!(),
//! };
//!
//! assert_eq!(call.name(), "transfer");
//! assert_eq!(call.arguments()[1].value().to_string(), "209470300000000000000000");
//! ```
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(unreachable_pub)]
#![deny(missing_debug_implementations)]

mod error {
    use etk_abi::{CodecError, Selector, SignatureError};

    use snafu::{Backtrace, Snafu};

    use super::Shape;

    /// Errors that can occur while interpreting call data.
    #[derive(Snafu, Debug)]
    #[snafu(context(suffix(false)), visibility(pub(super)))]
    #[non_exhaustive]
    pub enum Error {
        /// The call data isn't shaped like a selector followed by words.
        #[snafu(display("malformed call data of {} bytes: {}", len, shape))]
        #[non_exhaustive]
        MalformedCallData {
            /// Length of the call data.
            len: usize,

            /// What is wrong with it.
            shape: Shape,

            /// The location of the error.
            backtrace: Backtrace,
        },

        /// The database has no signature for the selector.
        #[snafu(display("unknown selector {}", selector))]
        #[non_exhaustive]
        UnknownSelector {
            /// The selector from the call data.
            selector: Selector,

            /// The location of the error.
            backtrace: Backtrace,
        },

        /// The database's signature for the selector couldn't be parsed.
        #[snafu(display("database entry for {} is invalid: `{}`", selector, signature))]
        #[non_exhaustive]
        InvalidSignature {
            /// The selector from the call data.
            selector: Selector,

            /// The signature text from the database.
            signature: String,

            /// The underlying source of this error.
            source: SignatureError,

            /// The location of the error.
            backtrace: Backtrace,
        },

        /// The database's signature for the selector hashes to another
        /// selector.
        #[snafu(display(
            "database entry for {} is `{}`, which has selector {}",
            selector,
            signature,
            computed
        ))]
        #[non_exhaustive]
        SelectorMismatch {
            /// The selector from the call data.
            selector: Selector,

            /// The signature text from the database.
            signature: String,

            /// The selector computed from the signature.
            computed: Selector,

            /// The location of the error.
            backtrace: Backtrace,
        },

        /// The arguments couldn't be decoded under the signature.
        #[snafu(display("couldn't decode arguments of `{}` ({})", signature, selector))]
        #[non_exhaustive]
        ArgumentDecode {
            /// The selector from the call data.
            selector: Selector,

            /// The canonical signature.
            signature: String,

            /// The underlying source of this error.
            source: CodecError,

            /// The location of the error.
            backtrace: Backtrace,
        },

        /// The decoded arguments couldn't be encoded again.
        #[snafu(display("couldn't re-encode arguments of `{}`", signature))]
        #[non_exhaustive]
        Reencode {
            /// The canonical signature.
            signature: String,

            /// The underlying source of this error.
            source: CodecError,

            /// The location of the error.
            backtrace: Backtrace,
        },

        /// The arguments decoded, but encoding them again gives different
        /// bytes.
        #[snafu(display(
            "data stuffing in arguments of `{}` at byte {}: got 0x{}, canonical encoding is 0x{}",
            signature,
            offset,
            expected,
            actual
        ))]
        #[non_exhaustive]
        DataStuffing {
            /// The canonical signature.
            signature: String,

            /// The argument data from the call, in hexadecimal.
            expected: String,

            /// The re-encoded argument data, in hexadecimal.
            actual: String,

            /// Position, within the argument data, of the first differing
            /// byte.
            offset: usize,

            /// The location of the error.
            backtrace: Backtrace,
        },
    }
}

pub use self::error::Error;

use etk_4byte::Database;

use etk_abi::{ParamType, Selector, Value, WORD};

use snafu::{ensure, ResultExt};

use std::fmt;

use tracing::{debug, trace, warn};

/// The ways call data can be malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Shorter than a selector.
    MissingSelector,

    /// The bytes after the selector aren't a whole number of words.
    UnalignedArguments,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::MissingSelector => write!(f, "too short to hold a selector"),
            Self::UnalignedArguments => write!(f, "arguments are not a whole number of words"),
        }
    }
}

/// One decoded argument and its type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    ty: ParamType,
    value: Value,
}

impl Argument {
    /// The declared type of the argument.
    pub fn ty(&self) -> &ParamType {
        &self.ty
    }

    /// The decoded value.
    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.ty, self.value)
    }
}

/// A successfully interpreted call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedCall {
    selector: Selector,
    name: String,
    signature: String,
    arguments: Vec<Argument>,
}

impl DecodedCall {
    /// The selector from the call data.
    pub fn selector(&self) -> Selector {
        self.selector
    }

    /// The function's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The function's canonical signature.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// The decoded arguments, in order.
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }
}

impl fmt::Display for DecodedCall {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (idx, argument) in self.arguments.iter().enumerate() {
            if idx > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", argument)?;
        }
        write!(f, ")")
    }
}

/// Result of interpreting call data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The call data was empty, as in a plain value transfer.
    NoCallData,

    /// The call data decoded cleanly.
    Call(DecodedCall),
}

impl Outcome {
    /// The decoded call, if there is one.
    pub fn call(&self) -> Option<&DecodedCall> {
        match self {
            Self::NoCallData => None,
            Self::Call(call) => Some(call),
        }
    }
}

/// Interprets call data against a [`Database`].
#[derive(Debug, Clone, Copy)]
pub struct Interpreter<'a> {
    database: &'a Database,
}

impl<'a> Interpreter<'a> {
    /// Create an interpreter that resolves selectors with `database`.
    pub fn new(database: &'a Database) -> Self {
        Self { database }
    }

    /// Resolve, decode, and verify `data`.
    pub fn interpret(&self, data: &[u8]) -> Result<Outcome, Error> {
        if data.is_empty() {
            return Ok(Outcome::NoCallData);
        }

        ensure!(
            data.len() >= 4,
            error::MalformedCallData {
                len: data.len(),
                shape: Shape::MissingSelector,
            }
        );

        let (prefix, body) = data.split_at(4);

        ensure!(
            body.len() % WORD == 0,
            error::MalformedCallData {
                len: data.len(),
                shape: Shape::UnalignedArguments,
            }
        );

        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(prefix);
        let selector = Selector::new(bytes);

        let text = match self.database.lookup(bytes) {
            Some(text) => text,
            None => {
                debug!(%selector, "no signature for selector");
                return error::UnknownSelector { selector }.fail();
            }
        };

        let function = etk_abi::parse(text).context(error::InvalidSignature {
            selector,
            signature: text,
        })?;

        let computed = function.selector();
        ensure!(
            computed == selector,
            error::SelectorMismatch {
                selector,
                signature: text,
                computed,
            }
        );

        let signature = function.signature();

        let values = function
            .decode_input(body)
            .context(error::ArgumentDecode {
                selector,
                signature: &signature,
            })?;

        let reencoded = etk_abi::encode(function.inputs(), &values).context(error::Reencode {
            signature: &signature,
        })?;

        if reencoded != body {
            let offset = body
                .iter()
                .zip(&reencoded)
                .position(|(a, b)| a != b)
                .unwrap_or_else(|| body.len().min(reencoded.len()));

            warn!(%selector, %signature, offset, "re-encoded arguments differ from call data");

            return error::DataStuffing {
                signature,
                expected: hex::encode(body),
                actual: hex::encode(&reencoded),
                offset,
            }
            .fail();
        }

        trace!(%selector, %signature, arguments = values.len(), "decoded call");

        let arguments = function
            .inputs()
            .iter()
            .cloned()
            .zip(values)
            .map(|(ty, value)| Argument { ty, value })
            .collect();

        Ok(Outcome::Call(DecodedCall {
            selector,
            name: function.name().to_owned(),
            signature,
            arguments,
        }))
    }
}
