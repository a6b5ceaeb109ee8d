use sha3::{Digest, Keccak256};

use snafu::Snafu;

use std::fmt;
use std::str::FromStr;

/// Error returned when text can't be parsed into a [`Selector`].
#[derive(Debug, Snafu)]
#[snafu(display("`{}` is not a four byte selector", text))]
pub struct ParseSelectorError {
    text: String,
}

/// The first four bytes of the Keccak-256 hash of a function signature, which
/// prefix the call data of every contract call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Selector([u8; 4]);

impl Selector {
    /// Create a selector from its raw bytes.
    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Compute the selector of a canonical signature, like
    /// `transfer(address,uint256)`.
    ///
    /// ```
    /// use etk_abi::Selector;
    ///
    /// let selector = Selector::of("transfer(address,uint256)");
    /// assert_eq!(selector.to_string(), "0xa9059cbb");
    /// ```
    pub fn of(signature: &str) -> Self {
        let mut hasher = Keccak256::new();
        hasher.update(signature.as_bytes());

        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&hasher.finalize()[..4]);
        Self(bytes)
    }

    /// The raw bytes of this selector.
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// The selector as lowercase hexadecimal, without a `0x` prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<[u8; 4]> for Selector {
    fn from(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }
}

impl From<Selector> for [u8; 4] {
    fn from(selector: Selector) -> Self {
        selector.0
    }
}

impl From<Selector> for u32 {
    fn from(selector: Selector) -> Self {
        u32::from_be_bytes(selector.0)
    }
}

impl FromStr for Selector {
    type Err = ParseSelectorError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let digits = text.strip_prefix("0x").unwrap_or(text);

        let mut bytes = [0u8; 4];
        match hex::decode_to_slice(digits, &mut bytes) {
            Ok(()) => Ok(Self(bytes)),
            Err(_) => Err(ParseSelectorError { text: text.into() }),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}
