//! EVM Toolkit Contract ABI.
//!
//! Encoding and decoding of function arguments in the
//! [Contract ABI](https://docs.soliditylang.org/en/latest/abi-spec.html) word
//! format, plus a parser for textual function signatures like
//! `transfer(address,uint256)`.
//!
//! The [`mod@codec`] module works on lists of [`ParamType`] and [`Value`], while
//! [`parse`] turns signature text into a [`FunctionDescriptor`].
//!
//! ## Example
//!
//! ```
//! use etk_abi::{parse, Value};
//!
//! let function = parse("setApprovalForAll(address,bool)").unwrap();
//!
//! let values = vec![Value::Address([0x11; 20]), Value::Bool(true)];
//! let data = function.encode_call(&values).unwrap();
//!
//! assert_eq!(&data[..4], function.selector().as_bytes());
//! assert_eq!(etk_abi::decode(function.inputs(), &data[4..]).unwrap(), values);
//! ```
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(unreachable_pub)]
#![deny(missing_debug_implementations)]

pub mod codec;
mod selector;
mod signature;
mod ty;
mod value;

pub use self::codec::{decode, encode, CodecError};
pub use self::selector::{ParseSelectorError, Selector};
pub use self::signature::{parse, FunctionDescriptor, SignatureError};
pub use self::ty::{ParamType, TypeError};
pub use self::value::Value;

/// Size, in bytes, of one ABI word.
pub const WORD: usize = 32;
