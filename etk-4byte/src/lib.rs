//! EVM Toolkit Function Selector Database.
//!
//! To roughly quote [4byte.directory](https://www.4byte.directory):
//!
//! > Function calls in the Ethereum Virtual Machine are specified by the first
//! > four bytes of data sent with a transaction. These function selectors are
//! > defined as the first four bytes of the Keccak-256 hash of the canonical
//! > representation of the function signature. Since this is a one-way
//! > operation, it is not possible to derive the human-readable representation
//! > of the function (signature) from the four byte selector. This database is
//! > meant to allow mapping those bytes signatures back to their
//! > human-readable versions.
//!
//! A [`Database`] combines a built-in table, shipped with this crate, with an
//! optional overlay table read from disk. Both are JSON objects mapping
//! lowercase hexadecimal selectors to signatures:
//!
//! ```json
//! { "a9059cbb": "transfer(address,uint256)" }
//! ```
//!
//! When both tables know a selector, the built-in signature wins. The overlay
//! only fills gaps.
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(unreachable_pub)]
#![deny(missing_debug_implementations)]

mod error {
    use snafu::{Backtrace, Snafu};

    use std::path::PathBuf;

    fn origin(path: &Option<PathBuf>) -> String {
        match path {
            Some(path) => format!("`{}`", path.to_string_lossy()),
            None => "the built-in table".into(),
        }
    }

    /// Errors that can occur while building a [`Database`](super::Database).
    #[derive(Snafu, Debug)]
    #[snafu(context(suffix(false)), visibility(pub(super)))]
    #[non_exhaustive]
    pub enum Error {
        /// The overlay exists but couldn't be read.
        #[snafu(display("couldn't read `{}`", path.to_string_lossy()))]
        #[non_exhaustive]
        Io {
            /// Path to the overlay.
            path: PathBuf,

            /// The underlying source of this error.
            source: std::io::Error,

            /// The location of the error.
            backtrace: Backtrace,
        },

        /// A table isn't a JSON object of strings.
        #[snafu(display("{} is not a valid signature table", origin(path)))]
        #[non_exhaustive]
        Json {
            /// Path to the table, or `None` for the built-in table.
            path: Option<PathBuf>,

            /// The underlying source of this error.
            source: serde_json::Error,

            /// The location of the error.
            backtrace: Backtrace,
        },

        /// A table key isn't eight lowercase hexadecimal digits.
        #[snafu(display("`{}` in {} is not a selector", key, origin(path)))]
        #[non_exhaustive]
        InvalidSelector {
            /// The offending key.
            key: String,

            /// Path to the table, or `None` for the built-in table.
            path: Option<PathBuf>,

            /// The location of the error.
            backtrace: Backtrace,
        },
    }
}

pub use self::error::Error;

use serde::Deserialize;

use snafu::{IntoError, ResultExt};

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use tracing::debug;

/// The built-in table, as JSON.
pub const BUILTIN: &[u8] = include_bytes!("4byte.json");

/// The table a signature was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// The table shipped with the database.
    Builtin,

    /// The table read from disk.
    Overlay,
}

#[derive(Deserialize)]
#[serde(transparent)]
struct RawTable(BTreeMap<String, String>);

type Table = HashMap<[u8; 4], String>;

fn parse_key(key: &str, path: Option<&Path>) -> Result<[u8; 4], Error> {
    let lowercase = !key.bytes().any(|b| b.is_ascii_uppercase());

    let mut selector = [0u8; 4];
    match hex::decode_to_slice(key, &mut selector) {
        Ok(()) if lowercase => Ok(selector),
        _ => error::InvalidSelector {
            key,
            path: path.map(Path::to_path_buf),
        }
        .fail(),
    }
}

fn load(bytes: &[u8], path: Option<&Path>) -> Result<Table, Error> {
    let RawTable(raw) = serde_json::from_slice(bytes).context(error::Json {
        path: path.map(Path::to_path_buf),
    })?;

    raw.into_iter()
        .map(|(key, signature)| -> Result<_, Error> { Ok((parse_key(&key, path)?, signature)) })
        .collect()
}

/// Mapping from four byte selectors to human-readable function signatures.
///
/// ## Example
///
/// ```
/// use etk_4byte::Database;
///
/// let database = Database::new().unwrap();
///
/// assert_eq!(
///     database.lookup([0xa9, 0x05, 0x9c, 0xbb]),
///     Some("transfer(address,uint256)"),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    builtin: Table,
    overlay: Table,
}

impl Database {
    /// Build a database from the built-in table alone.
    pub fn new() -> Result<Self, Error> {
        Self::build(BUILTIN, None)
    }

    /// Build a database from the built-in table, and the overlay at `path`.
    pub fn with_overlay<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::build(BUILTIN, Some(path.as_ref()))
    }

    /// Build a database from `builtin` (a JSON table) and, if present, the
    /// overlay table at `overlay`.
    ///
    /// An overlay path that doesn't exist gives an empty overlay.
    pub fn build(builtin: &[u8], overlay: Option<&Path>) -> Result<Self, Error> {
        let builtin = load(builtin, None)?;

        let overlay = match overlay {
            Some(path) => match std::fs::read(path) {
                Ok(bytes) => load(&bytes, Some(path))?,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    debug!(path = %path.display(), "overlay not found, using an empty one");
                    Table::new()
                }
                Err(e) => return Err(error::Io { path }.into_error(e)),
            },
            None => Table::new(),
        };

        debug!(
            builtin = builtin.len(),
            overlay = overlay.len(),
            "loaded signature database"
        );

        Ok(Self { builtin, overlay })
    }

    /// Retrieve the human-readable signature for `selector`.
    ///
    /// The built-in table is consulted first, so an overlay can add
    /// signatures but never replace a built-in one.
    pub fn lookup(&self, selector: [u8; 4]) -> Option<&str> {
        self.lookup_with_source(selector).map(|(text, _)| text)
    }

    /// Like [`Database::lookup`], but also reports which table answered.
    pub fn lookup_with_source(&self, selector: [u8; 4]) -> Option<(&str, Source)> {
        if let Some(text) = self.builtin.get(&selector) {
            return Some((text, Source::Builtin));
        }

        self.overlay
            .get(&selector)
            .map(|text| (text.as_str(), Source::Overlay))
    }

    /// Number of distinct selectors known to either table.
    pub fn len(&self) -> usize {
        let extra = self
            .overlay
            .keys()
            .filter(|k| !self.builtin.contains_key(*k))
            .count();

        self.builtin.len() + extra
    }

    /// Returns `true` if neither table has any entries.
    pub fn is_empty(&self) -> bool {
        self.builtin.is_empty() && self.overlay.is_empty()
    }

    /// Number of entries in the built-in table.
    pub fn builtin_len(&self) -> usize {
        self.builtin.len()
    }

    /// Number of entries in the overlay table.
    pub fn overlay_len(&self) -> usize {
        self.overlay.len()
    }
}
