use num_bigint::{BigInt, BigUint};

use std::fmt;

/// A decoded argument, mirroring the variants of [`ParamType`](crate::ParamType).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// An `address`.
    Address([u8; 20]),

    /// A `bool`.
    Bool(bool),

    /// Any `uintN`.
    Uint(BigUint),

    /// Any `intN`.
    Int(BigInt),

    /// Any `bytesN`. Holds exactly `N` bytes.
    FixedBytes(Vec<u8>),

    /// A `bytes`.
    Bytes(Vec<u8>),

    /// A `string`.
    String(String),

    /// The elements of a `T[N]`.
    FixedArray(Vec<Value>),

    /// The elements of a `T[]`.
    Array(Vec<Value>),
}

impl Value {
    /// A short description of the kind of value, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Address(_) => "address",
            Self::Bool(_) => "bool",
            Self::Uint(_) => "unsigned integer",
            Self::Int(_) => "signed integer",
            Self::FixedBytes(_) => "fixed bytes",
            Self::Bytes(_) => "bytes",
            Self::String(_) => "string",
            Self::FixedArray(_) => "fixed array",
            Self::Array(_) => "array",
        }
    }

    /// The integer, if this is a [`Value::Uint`].
    pub fn as_uint(&self) -> Option<&BigUint> {
        match self {
            Self::Uint(value) => Some(value),
            _ => None,
        }
    }

    /// The elements, if this is a [`Value::FixedArray`] or [`Value::Array`].
    pub fn as_slice(&self) -> Option<&[Value]> {
        match self {
            Self::FixedArray(items) | Self::Array(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Address(addr) => write!(f, "0x{}", hex::encode(addr)),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Uint(value) => write!(f, "{}", value),
            Self::Int(value) => write!(f, "{}", value),
            Self::FixedBytes(bytes) | Self::Bytes(bytes) => write!(f, "0x{}", hex::encode(bytes)),
            Self::String(text) => write!(f, "{}", text),
            Self::FixedArray(items) | Self::Array(items) => {
                write!(f, "[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}
