//! Parsing of textual function signatures, like `transfer(address,uint256)`.

mod error {
    use crate::TypeError;

    use snafu::{Backtrace, Snafu};

    /// Errors that can occur while parsing a function signature.
    #[derive(Snafu, Debug)]
    #[snafu(context(suffix(false)), visibility(pub(super)))]
    #[non_exhaustive]
    pub enum SignatureError {
        /// The text isn't shaped like `name(type,type,...)`.
        #[snafu(display("`{}` is not a valid function signature", signature))]
        #[non_exhaustive]
        Syntax {
            /// The offending signature.
            signature: String,

            /// The underlying source of this error.
            source: Box<dyn std::error::Error + Send + Sync>,

            /// The location of the error.
            backtrace: Backtrace,
        },

        /// An argument of the signature doesn't name a supported type.
        #[snafu(display("cannot resolve argument `{}` of `{}`", token, signature))]
        #[non_exhaustive]
        UnknownType {
            /// The offending signature.
            signature: String,

            /// The argument that failed to resolve.
            token: String,

            /// The underlying source of this error.
            source: TypeError,

            /// The location of the error.
            backtrace: Backtrace,
        },
    }
}

pub use self::error::SignatureError;

use crate::{codec, CodecError, ParamType, Selector, Value};

use pest::Parser;
use pest_derive::Parser;

use snafu::{IntoError, ResultExt};

use std::fmt;
use std::str::FromStr;

#[derive(Parser)]
#[grammar = "signature/signature.pest"]
struct SignatureParser;

/// A function's name and the ordered types of its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionDescriptor {
    name: String,
    inputs: Vec<ParamType>,
}

impl FunctionDescriptor {
    /// The function's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The function's argument types, in order.
    pub fn inputs(&self) -> &[ParamType] {
        &self.inputs
    }

    /// The canonical signature, `name(type,type,...)`, with no whitespace.
    pub fn signature(&self) -> String {
        self.to_string()
    }

    /// The selector computed from [`FunctionDescriptor::signature`].
    pub fn selector(&self) -> Selector {
        Selector::of(&self.signature())
    }

    /// Decode the argument data that follows a selector.
    pub fn decode_input(&self, body: &[u8]) -> Result<Vec<Value>, CodecError> {
        codec::decode(&self.inputs, body)
    }

    /// Build complete call data: the selector followed by the encoded `values`.
    pub fn encode_call(&self, values: &[Value]) -> Result<Vec<u8>, CodecError> {
        let body = codec::encode(&self.inputs, values)?;

        let mut data = Vec::with_capacity(4 + body.len());
        data.extend_from_slice(self.selector().as_bytes());
        data.extend(body);
        Ok(data)
    }
}

impl fmt::Display for FunctionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (idx, input) in self.inputs.iter().enumerate() {
            if idx > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", input)?;
        }
        write!(f, ")")
    }
}

impl FromStr for FunctionDescriptor {
    type Err = SignatureError;

    fn from_str(signature: &str) -> Result<Self, Self::Err> {
        parse(signature)
    }
}

/// Parse `signature` into a [`FunctionDescriptor`].
///
/// The name may contain anything but parentheses. Arguments are separated by
/// commas without whitespace, and each must resolve to a [`ParamType`].
///
/// ```
/// use etk_abi::{parse, ParamType};
///
/// let function = parse("balanceOf(address)").unwrap();
///
/// assert_eq!(function.name(), "balanceOf");
/// assert_eq!(function.inputs(), &[ParamType::Address]);
/// assert_eq!(function.selector().to_hex(), "70a08231");
/// ```
pub fn parse(signature: &str) -> Result<FunctionDescriptor, SignatureError> {
    let pairs = SignatureParser::parse(Rule::signature, signature)
        .map_err(|e| error::Syntax { signature }.into_error(Box::new(e)))?;

    let mut name = String::new();
    let mut inputs = Vec::new();

    for pair in pairs.flatten() {
        match pair.as_rule() {
            Rule::name => name = pair.as_str().to_owned(),
            Rule::argument => {
                let token = pair.as_str();
                let ty = token
                    .parse()
                    .context(error::UnknownType { signature, token })?;
                inputs.push(ty);
            }
            _ => continue,
        }
    }

    Ok(FunctionDescriptor { name, inputs })
}
