//! Encoding and decoding of argument lists in the ABI word format.
//!
//! An argument list is encoded as a block: a head holding every static value
//! inline and an offset word for every dynamic value, followed by a tail
//! holding the dynamic values. Offsets are relative to the start of the block
//! they appear in.
//!
//! Decoding is deliberately lenient about bits the layout doesn't use (the
//! upper bytes of an address word, the padding after a byte string, and so
//! on). Callers that need to reject such payloads compare the original bytes
//! against [`encode`] of the decoded values.

mod error {
    use crate::ParamType;

    use num_bigint::BigUint;

    use snafu::{Backtrace, Snafu};

    /// Errors that can occur while encoding or decoding argument lists.
    #[derive(Snafu, Debug)]
    #[snafu(context(suffix(false)), visibility(pub(super)))]
    #[non_exhaustive]
    pub enum CodecError {
        /// The encoded arguments weren't a whole, non-zero number of words.
        #[snafu(display("argument data of {} bytes is not a positive multiple of 32", len))]
        #[non_exhaustive]
        BodyLength {
            /// Length of the argument data.
            len: usize,

            /// The location of the error.
            backtrace: Backtrace,
        },

        /// A word was read past the end of the argument data.
        #[snafu(display("word at {} is past the end of {} bytes", at, len))]
        #[non_exhaustive]
        OutOfBounds {
            /// Position of the word.
            at: usize,

            /// Length of the argument data.
            len: usize,

            /// The location of the error.
            backtrace: Backtrace,
        },

        /// A dynamic value's offset pointed outside of the argument data.
        #[snafu(display("offset {} (at {}) points outside of {} bytes", offset, at, len))]
        #[non_exhaustive]
        OffsetOutOfRange {
            /// Position of the offset word.
            at: usize,

            /// The offset, relative to the start of its block.
            offset: BigUint,

            /// Length of the argument data.
            len: usize,

            /// The location of the error.
            backtrace: Backtrace,
        },

        /// A dynamic value declared more content than the remaining data holds.
        #[snafu(display(
            "length {} (at {}) exceeds the {} remaining bytes",
            length,
            at,
            available
        ))]
        #[non_exhaustive]
        LengthOutOfRange {
            /// Position of the length word.
            at: usize,

            /// The declared length (bytes, or elements for arrays).
            length: BigUint,

            /// Bytes remaining after the length word.
            available: usize,

            /// The location of the error.
            backtrace: Backtrace,
        },

        /// A `string` payload was not valid UTF-8.
        #[snafu(display("string at {} is not valid utf-8", at))]
        #[non_exhaustive]
        InvalidUtf8 {
            /// Position of the string's length word.
            at: usize,

            /// The underlying source of this error.
            source: std::string::FromUtf8Error,

            /// The location of the error.
            backtrace: Backtrace,
        },

        /// The argument data continues past every byte the layout refers to.
        #[snafu(display("only {} of {} bytes belong to the arguments", consumed, len))]
        #[non_exhaustive]
        TrailingBytes {
            /// Bytes covered by the decoded layout.
            consumed: usize,

            /// Length of the argument data.
            len: usize,

            /// The location of the error.
            backtrace: Backtrace,
        },

        /// The number of values didn't match the number of types.
        #[snafu(display("expected {} value(s) but got {}", expected, found))]
        #[non_exhaustive]
        ArgumentCount {
            /// Number of types.
            expected: usize,

            /// Number of values.
            found: usize,

            /// The location of the error.
            backtrace: Backtrace,
        },

        /// A value's variant didn't correspond to its type.
        #[snafu(display("expected a value of type `{}` but got {}", expected, found))]
        #[non_exhaustive]
        TypeMismatch {
            /// The declared type.
            expected: ParamType,

            /// The kind of value provided.
            found: &'static str,

            /// The location of the error.
            backtrace: Backtrace,
        },

        /// An integer doesn't fit in its declared width.
        #[snafu(display("{} is out of range for `{}`", value, ty))]
        #[non_exhaustive]
        ValueOutOfRange {
            /// The declared type.
            ty: ParamType,

            /// The offending value, in decimal.
            value: String,

            /// The location of the error.
            backtrace: Backtrace,
        },

        /// A fixed array value had the wrong number of elements.
        #[snafu(display("`{}` needs {} element(s) but got {}", ty, expected, found))]
        #[non_exhaustive]
        ArrayLength {
            /// The declared type.
            ty: ParamType,

            /// Number of elements in the type.
            expected: usize,

            /// Number of elements in the value.
            found: usize,

            /// The location of the error.
            backtrace: Backtrace,
        },

        /// A fixed bytes value had the wrong length.
        #[snafu(display("`bytes{}` needs {} byte(s) but got {}", expected, expected, found))]
        #[non_exhaustive]
        FixedBytesLength {
            /// Length of the type.
            expected: usize,

            /// Length of the value.
            found: usize,

            /// The location of the error.
            backtrace: Backtrace,
        },

        /// A type has a width or dimension no type name can spell.
        #[snafu(display("`{}` is not a valid argument type", ty))]
        #[non_exhaustive]
        InvalidType {
            /// The offending type.
            ty: ParamType,

            /// The location of the error.
            backtrace: Backtrace,
        },

        /// Offsets point at the same data more than once, so decoding would
        /// read more bytes than the argument data holds.
        #[snafu(display("decoding reads more than the {} bytes of argument data", len))]
        #[non_exhaustive]
        OverlappingData {
            /// Length of the argument data.
            len: usize,

            /// The location of the error.
            backtrace: Backtrace,
        },
    }
}

pub use self::error::CodecError;

use crate::{ParamType, Value, WORD};

use num_bigint::{BigInt, BigUint, Sign};

use snafu::{ensure, OptionExt, ResultExt};

use std::iter;

/// Decode `body` as a list of arguments of the given `types`.
///
/// An empty `types` accepts only an empty `body`. Every byte of `body` must be
/// reachable from the layout; trailing words fail with
/// [`CodecError::TrailingBytes`]. No byte may be decoded twice, so offsets
/// that alias each other fail with [`CodecError::OverlappingData`].
pub fn decode(types: &[ParamType], body: &[u8]) -> Result<Vec<Value>, CodecError> {
    validate(types)?;

    if !types.is_empty() {
        ensure!(
            !body.is_empty() && body.len() % WORD == 0,
            error::BodyLength { len: body.len() }
        );
    }

    let mut decoder = Decoder {
        body,
        extent: 0,
        consumed: 0,
    };
    let values = decoder.block(types, 0)?;

    ensure!(
        decoder.extent == body.len(),
        error::TrailingBytes {
            consumed: decoder.extent,
            len: body.len(),
        }
    );

    Ok(values)
}

/// Encode `values` as a list of arguments of the given `types`.
pub fn encode(types: &[ParamType], values: &[Value]) -> Result<Vec<u8>, CodecError> {
    validate(types)?;

    ensure!(
        types.len() == values.len(),
        error::ArgumentCount {
            expected: types.len(),
            found: values.len(),
        }
    );

    let mut out = Vec::new();
    encode_block(types.iter().zip(values), &mut out)?;
    Ok(out)
}

fn validate(types: &[ParamType]) -> Result<(), CodecError> {
    match types.iter().find(|ty| !ty.is_valid()) {
        Some(ty) => error::InvalidType { ty: ty.clone() }.fail(),
        None => Ok(()),
    }
}

fn to_usize(word: &[u8]) -> Option<usize> {
    let (high, low) = word.split_at(WORD - 8);
    if high.iter().any(|b| *b != 0) {
        return None;
    }

    let mut be_bytes = [0u8; 8];
    be_bytes.copy_from_slice(low);
    usize::try_from(u64::from_be_bytes(be_bytes)).ok()
}

fn padded(len: usize) -> usize {
    match len % WORD {
        0 => len,
        rem => len + (WORD - rem),
    }
}

#[derive(Debug)]
struct Decoder<'a> {
    body: &'a [u8],

    /// One past the last byte any read has touched.
    extent: usize,

    /// Total bytes read so far, counting repeated reads of the same bytes.
    consumed: usize,
}

impl<'a> Decoder<'a> {
    fn touch(&mut self, end: usize) {
        self.extent = self.extent.max(end.min(self.body.len()));
    }

    /// Account for reading `len` more bytes, failing once the total exceeds
    /// the length of the argument data.
    fn charge(&mut self, len: usize) -> Result<(), CodecError> {
        let body_len = self.body.len();

        self.consumed = self
            .consumed
            .checked_add(len)
            .filter(|consumed| *consumed <= body_len)
            .context(error::OverlappingData { len: body_len })?;

        Ok(())
    }

    fn word(&mut self, at: usize) -> Result<&'a [u8], CodecError> {
        let body = self.body;

        let end = at
            .checked_add(WORD)
            .filter(|end| *end <= body.len())
            .context(error::OutOfBounds { at, len: body.len() })?;

        self.charge(WORD)?;
        self.touch(end);
        Ok(&body[at..end])
    }

    /// Read the offset word at `at`, and return the absolute position it
    /// points to within the block starting at `base`.
    fn offset(&mut self, at: usize, base: usize) -> Result<usize, CodecError> {
        let word = self.word(at)?;
        let len = self.body.len();

        to_usize(word)
            .and_then(|offset| base.checked_add(offset))
            .filter(|start| start.checked_add(WORD).map_or(false, |end| end <= len))
            .context(error::OffsetOutOfRange {
                at,
                offset: BigUint::from_bytes_be(word),
                len,
            })
    }

    /// Read the length word at `at`, checking that `length * unit` bytes
    /// follow it.
    fn length(&mut self, at: usize, unit: usize) -> Result<usize, CodecError> {
        let word = self.word(at)?;
        let available = self.body.len() - (at + WORD);

        to_usize(word)
            .filter(|length| length.checked_mul(unit).map_or(false, |sz| sz <= available))
            .context(error::LengthOutOfRange {
                at,
                length: BigUint::from_bytes_be(word),
                available,
            })
    }

    fn payload(&mut self, at: usize) -> Result<&'a [u8], CodecError> {
        let len = self.length(at, 1)?;
        let start = at + WORD;

        self.charge(len)?;
        self.touch(start + padded(len));
        Ok(&self.body[start..start + len])
    }

    fn block<'t, I>(&mut self, types: I, base: usize) -> Result<Vec<Value>, CodecError>
    where
        I: IntoIterator<Item = &'t ParamType>,
    {
        let mut head = base;
        let mut values = Vec::new();

        for ty in types {
            values.push(self.value(ty, head, base)?);
            head = head.saturating_add(ty.head_size());
        }

        Ok(values)
    }

    /// Decode the value whose head starts at `at`, in the block starting at
    /// `base`.
    fn value(&mut self, ty: &ParamType, at: usize, base: usize) -> Result<Value, CodecError> {
        let value = match ty {
            ParamType::Address => {
                let mut addr = [0u8; 20];
                addr.copy_from_slice(&self.word(at)?[WORD - 20..]);
                Value::Address(addr)
            }
            ParamType::Bool => Value::Bool(self.word(at)?.iter().any(|b| *b != 0)),
            ParamType::Uint(bits) => {
                let word = self.word(at)?;
                Value::Uint(BigUint::from_bytes_be(&word[WORD - bits / 8..]))
            }
            ParamType::Int(bits) => {
                let word = self.word(at)?;
                Value::Int(BigInt::from_signed_bytes_be(&word[WORD - bits / 8..]))
            }
            ParamType::FixedBytes(len) => Value::FixedBytes(self.word(at)?[..*len].to_vec()),
            ParamType::FixedArray(elem, len) if !elem.is_dynamic() => {
                Value::FixedArray(self.block(iter::repeat(&**elem).take(*len), at)?)
            }
            ParamType::Bytes | ParamType::String | ParamType::Array(_) | ParamType::FixedArray(..) => {
                let start = self.offset(at, base)?;
                self.tail(ty, start)?
            }
        };

        Ok(value)
    }

    fn tail(&mut self, ty: &ParamType, start: usize) -> Result<Value, CodecError> {
        let value = match ty {
            ParamType::Bytes => Value::Bytes(self.payload(start)?.to_vec()),
            ParamType::String => {
                let bytes = self.payload(start)?.to_vec();
                Value::String(String::from_utf8(bytes).context(error::InvalidUtf8 { at: start })?)
            }
            ParamType::Array(elem) => {
                let len = self.length(start, elem.head_size())?;
                let items = self.block(iter::repeat(&**elem).take(len), start + WORD)?;
                Value::Array(items)
            }
            ParamType::FixedArray(elem, len) => {
                Value::FixedArray(self.block(iter::repeat(&**elem).take(*len), start)?)
            }
            _ => self.value(ty, start, start)?,
        };

        Ok(value)
    }
}

fn usize_word(value: usize) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[WORD - 8..].copy_from_slice(&(value as u64).to_be_bytes());
    word
}

fn encode_payload(bytes: &[u8], out: &mut Vec<u8>) {
    out.extend_from_slice(&usize_word(bytes.len()));
    out.extend_from_slice(bytes);
    out.resize(out.len() + padded(bytes.len()) - bytes.len(), 0);
}

fn encode_block<'a, I>(items: I, out: &mut Vec<u8>) -> Result<(), CodecError>
where
    I: IntoIterator<Item = (&'a ParamType, &'a Value)>,
{
    let items: Vec<_> = items.into_iter().collect();
    let head_size = items
        .iter()
        .fold(0usize, |sz, (ty, _)| sz.saturating_add(ty.head_size()));

    let mut head = Vec::new();
    let mut tail = Vec::new();

    for (ty, value) in items {
        if ty.is_dynamic() {
            head.extend_from_slice(&usize_word(head_size.saturating_add(tail.len())));
            encode_value(ty, value, &mut tail)?;
        } else {
            encode_value(ty, value, &mut head)?;
        }
    }

    out.append(&mut head);
    out.append(&mut tail);
    Ok(())
}

fn encode_value(ty: &ParamType, value: &Value, out: &mut Vec<u8>) -> Result<(), CodecError> {
    let mut word = [0u8; WORD];

    match (ty, value) {
        (ParamType::Address, Value::Address(addr)) => {
            word[WORD - 20..].copy_from_slice(addr);
        }
        (ParamType::Bool, Value::Bool(b)) => {
            word[WORD - 1] = u8::from(*b);
        }
        (ParamType::Uint(bits), Value::Uint(v)) => {
            ensure!(
                v.bits() <= *bits as u64,
                error::ValueOutOfRange {
                    ty: ty.clone(),
                    value: v.to_string(),
                }
            );

            let bytes = v.to_bytes_be();
            word[WORD - bytes.len()..].copy_from_slice(&bytes);
        }
        (ParamType::Int(bits), Value::Int(v)) => {
            let bytes = v.to_signed_bytes_be();
            ensure!(
                bytes.len() <= bits / 8,
                error::ValueOutOfRange {
                    ty: ty.clone(),
                    value: v.to_string(),
                }
            );

            if v.sign() == Sign::Minus {
                word = [0xff; WORD];
            }
            word[WORD - bytes.len()..].copy_from_slice(&bytes);
        }
        (ParamType::FixedBytes(len), Value::FixedBytes(bytes)) => {
            ensure!(
                bytes.len() == *len,
                error::FixedBytesLength {
                    expected: *len,
                    found: bytes.len(),
                }
            );
            word[..*len].copy_from_slice(bytes);
        }
        (ParamType::Bytes, Value::Bytes(bytes)) => {
            encode_payload(bytes, out);
            return Ok(());
        }
        (ParamType::String, Value::String(text)) => {
            encode_payload(text.as_bytes(), out);
            return Ok(());
        }
        (ParamType::FixedArray(elem, len), Value::FixedArray(items)) => {
            ensure!(
                items.len() == *len,
                error::ArrayLength {
                    ty: ty.clone(),
                    expected: *len,
                    found: items.len(),
                }
            );
            return encode_block(iter::repeat(&**elem).zip(items), out);
        }
        (ParamType::Array(elem), Value::Array(items)) => {
            out.extend_from_slice(&usize_word(items.len()));
            return encode_block(iter::repeat(&**elem).zip(items), out);
        }
        _ => {
            return error::TypeMismatch {
                expected: ty.clone(),
                found: value.kind(),
            }
            .fail();
        }
    }

    out.extend_from_slice(&word);
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use hex_literal::hex;

    use super::*;

    fn types(names: &[&str]) -> Vec<ParamType> {
        names.iter().map(|n| n.parse().unwrap()).collect()
    }

    fn uint(v: u64) -> Value {
        Value::Uint(BigUint::from(v))
    }

    #[test]
    fn decode_transfer() {
        let body = hex!(
            "
            0000000000000000000000009a1989946ae4249aac19ac7a038d24aab03c3d8c
            000000000000000000000000000000000000000000002c5b68601cc92ad60000
            "
        );

        let values = decode(&types(&["address", "uint256"]), &body).unwrap();

        assert_eq!(
            values[0],
            Value::Address(hex!("9a1989946ae4249aac19ac7a038d24aab03c3d8c"))
        );
        assert_eq!(values[1].to_string(), "209470300000000000000000");
    }

    #[test]
    fn decode_static_and_dynamic() {
        // f(uint256,uint32[],bytes10,bytes) from the Solidity ABI docs.
        let body = hex!(
            "
            0000000000000000000000000000000000000000000000000000000000000123
            0000000000000000000000000000000000000000000000000000000000000080
            3132333435363738393000000000000000000000000000000000000000000000
            00000000000000000000000000000000000000000000000000000000000000e0
            0000000000000000000000000000000000000000000000000000000000000002
            0000000000000000000000000000000000000000000000000000000000000456
            0000000000000000000000000000000000000000000000000000000000000789
            000000000000000000000000000000000000000000000000000000000000000d
            48656c6c6f2c20776f726c642100000000000000000000000000000000000000
            "
        );
        let tys = types(&["uint256", "uint32[]", "bytes10", "bytes"]);

        let values = decode(&tys, &body).unwrap();

        assert_eq!(
            values,
            vec![
                uint(0x123),
                Value::Array(vec![uint(0x456), uint(0x789)]),
                Value::FixedBytes(b"1234567890".to_vec()),
                Value::Bytes(b"Hello, world!".to_vec()),
            ]
        );

        assert_eq!(encode(&tys, &values).unwrap(), body.to_vec());
    }

    #[test]
    fn decode_nested_dynamic() {
        // g(uint256[][],string[]) from the Solidity ABI docs.
        let body = hex!(
            "
            0000000000000000000000000000000000000000000000000000000000000040
            0000000000000000000000000000000000000000000000000000000000000140
            0000000000000000000000000000000000000000000000000000000000000002
            0000000000000000000000000000000000000000000000000000000000000040
            00000000000000000000000000000000000000000000000000000000000000a0
            0000000000000000000000000000000000000000000000000000000000000002
            0000000000000000000000000000000000000000000000000000000000000001
            0000000000000000000000000000000000000000000000000000000000000002
            0000000000000000000000000000000000000000000000000000000000000001
            0000000000000000000000000000000000000000000000000000000000000003
            0000000000000000000000000000000000000000000000000000000000000003
            0000000000000000000000000000000000000000000000000000000000000060
            00000000000000000000000000000000000000000000000000000000000000a0
            00000000000000000000000000000000000000000000000000000000000000e0
            0000000000000000000000000000000000000000000000000000000000000003
            6f6e650000000000000000000000000000000000000000000000000000000000
            0000000000000000000000000000000000000000000000000000000000000003
            74776f0000000000000000000000000000000000000000000000000000000000
            0000000000000000000000000000000000000000000000000000000000000005
            7468726565000000000000000000000000000000000000000000000000000000
            "
        );
        let tys = types(&["uint256[][]", "string[]"]);

        let values = decode(&tys, &body).unwrap();

        assert_eq!(values[0].to_string(), "[[1, 2], [3]]");
        assert_eq!(
            values[1],
            Value::Array(vec![
                Value::String("one".into()),
                Value::String("two".into()),
                Value::String("three".into()),
            ])
        );

        assert_eq!(encode(&tys, &values).unwrap(), body.to_vec());
    }

    #[test]
    fn decode_static_fixed_array() {
        let body = hex!(
            "
            0000000000000000000000000000000000000000000000000000000000000001
            0000000000000000000000000000000000000000000000000000000000000002
            0000000000000000000000000000000000000000000000000000000000000003
            "
        );

        let values = decode(&types(&["uint256[3]"]), &body).unwrap();
        assert_eq!(values, vec![Value::FixedArray(vec![uint(1), uint(2), uint(3)])]);
    }

    #[test]
    fn decode_dynamic_fixed_array() {
        let tys = types(&["string[2]", "bool"]);
        let values = vec![
            Value::FixedArray(vec![Value::String("a".into()), Value::String("".into())]),
            Value::Bool(true),
        ];

        let body = encode(&tys, &values).unwrap();
        assert_eq!(
            body,
            hex!(
                "
                0000000000000000000000000000000000000000000000000000000000000040
                0000000000000000000000000000000000000000000000000000000000000001
                0000000000000000000000000000000000000000000000000000000000000040
                0000000000000000000000000000000000000000000000000000000000000080
                0000000000000000000000000000000000000000000000000000000000000001
                6100000000000000000000000000000000000000000000000000000000000000
                0000000000000000000000000000000000000000000000000000000000000000
                "
            )
            .to_vec()
        );

        assert_eq!(decode(&tys, &body).unwrap(), values);
    }

    #[test]
    fn decode_signed() {
        let body = hex!(
            "
            fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffe
            00000000000000000000000000000000000000000000000000000000000000ff
            "
        );

        let values = decode(&types(&["int256", "int8"]), &body).unwrap();
        assert_eq!(values[0], Value::Int(BigInt::from(-2)));
        assert_eq!(values[1], Value::Int(BigInt::from(-1)));

        // The second word isn't sign extended, so it doesn't survive encoding.
        let encoded = encode(&types(&["int256", "int8"]), &values).unwrap();
        assert_ne!(encoded, body.to_vec());
    }

    #[test]
    fn decode_ignores_unused_bits() {
        let body = hex!(
            "
            0000000000000000000000000000000000000000000000000000000000000002
            ffffffffffffffffffffffff9a1989946ae4249aac19ac7a038d24aab03c3d8c
            0000000000000000000000000000000000000000000000000000000000000101
            6162636465666768000000000000000000000000000000000000000000000001
            "
        );
        let tys = types(&["bool", "address", "uint8", "bytes8"]);

        let values = decode(&tys, &body).unwrap();

        assert_eq!(
            values,
            vec![
                Value::Bool(true),
                Value::Address(hex!("9a1989946ae4249aac19ac7a038d24aab03c3d8c")),
                uint(1),
                Value::FixedBytes(b"abcdefgh".to_vec()),
            ]
        );

        assert_eq!(
            encode(&tys, &values).unwrap(),
            hex!(
                "
                0000000000000000000000000000000000000000000000000000000000000001
                0000000000000000000000009a1989946ae4249aac19ac7a038d24aab03c3d8c
                0000000000000000000000000000000000000000000000000000000000000001
                6162636465666768000000000000000000000000000000000000000000000000
                "
            )
            .to_vec()
        );
    }

    #[test]
    fn decode_no_arguments() {
        assert_eq!(decode(&[], &[]).unwrap(), Vec::<Value>::new());

        let err = decode(&[], &[0u8; 32]).unwrap_err();
        assert_matches!(err, CodecError::TrailingBytes { consumed: 0, len: 32, .. });
    }

    #[test]
    fn decode_body_length() {
        let err = decode(&types(&["uint256"]), &[]).unwrap_err();
        assert_matches!(err, CodecError::BodyLength { len: 0, .. });

        let err = decode(&types(&["uint256"]), &[0u8; 33]).unwrap_err();
        assert_matches!(err, CodecError::BodyLength { len: 33, .. });
    }

    #[test]
    fn decode_fixed_array_too_short() {
        let err = decode(&types(&["uint256[3]"]), &[0u8; 64]).unwrap_err();
        assert_matches!(err, CodecError::OutOfBounds { at: 64, len: 64, .. });
    }

    #[test]
    fn decode_fixed_array_too_long() {
        let err = decode(&types(&["uint256[3]"]), &[0u8; 128]).unwrap_err();
        assert_matches!(err, CodecError::TrailingBytes { consumed: 96, len: 128, .. });
    }

    #[test]
    fn decode_offset_out_of_range() {
        let body = hex!("0000000000000000000000000000000000000000000000000000000000000020");
        let err = decode(&types(&["bytes"]), &body).unwrap_err();
        assert_matches!(err, CodecError::OffsetOutOfRange { at: 0, len: 32, .. });

        let mut body = [0xffu8; 64];
        body[32..].copy_from_slice(&[0u8; 32]);
        let err = decode(&types(&["string"]), &body).unwrap_err();
        assert_matches!(err, CodecError::OffsetOutOfRange { .. });
    }

    #[test]
    fn decode_length_out_of_range() {
        let body = hex!(
            "
            0000000000000000000000000000000000000000000000000000000000000020
            0000000000000000000000000000000000000000000000000000000000000021
            0000000000000000000000000000000000000000000000000000000000000000
            "
        );

        let err = decode(&types(&["bytes"]), &body).unwrap_err();
        assert_matches!(err, CodecError::LengthOutOfRange { at: 32, available: 32, .. });
    }

    #[test]
    fn decode_array_length_out_of_range() {
        let body = hex!(
            "
            0000000000000000000000000000000000000000000000000000000000000020
            ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff
            "
        );

        let err = decode(&types(&["uint256[]"]), &body).unwrap_err();
        assert_matches!(err, CodecError::LengthOutOfRange { .. });
    }

    #[test]
    fn decode_invalid_utf8() {
        let body = hex!(
            "
            0000000000000000000000000000000000000000000000000000000000000020
            0000000000000000000000000000000000000000000000000000000000000001
            ff00000000000000000000000000000000000000000000000000000000000000
            "
        );

        let err = decode(&types(&["string"]), &body).unwrap_err();
        assert_matches!(err, CodecError::InvalidUtf8 { at: 32, .. });
    }

    #[test]
    fn encode_argument_count() {
        let err = encode(&types(&["bool", "bool"]), &[Value::Bool(true)]).unwrap_err();
        assert_matches!(err, CodecError::ArgumentCount { expected: 2, found: 1, .. });
    }

    #[test]
    fn encode_type_mismatch() {
        let err = encode(&types(&["address"]), &[Value::Bool(true)]).unwrap_err();
        assert_matches!(err, CodecError::TypeMismatch { found: "bool", .. });
    }

    #[test]
    fn encode_uint_out_of_range() {
        let err = encode(&types(&["uint8"]), &[uint(256)]).unwrap_err();
        assert_matches!(err, CodecError::ValueOutOfRange { .. });

        assert!(encode(&types(&["uint8"]), &[uint(255)]).is_ok());
    }

    #[test]
    fn encode_int_bounds() {
        let tys = types(&["int8"]);

        assert!(encode(&tys, &[Value::Int(BigInt::from(127))]).is_ok());
        assert!(encode(&tys, &[Value::Int(BigInt::from(-128))]).is_ok());

        let err = encode(&tys, &[Value::Int(BigInt::from(128))]).unwrap_err();
        assert_matches!(err, CodecError::ValueOutOfRange { .. });

        let err = encode(&tys, &[Value::Int(BigInt::from(-129))]).unwrap_err();
        assert_matches!(err, CodecError::ValueOutOfRange { .. });
    }

    #[test]
    fn encode_negative_sign_extends() {
        let encoded = encode(&types(&["int16"]), &[Value::Int(BigInt::from(-256))]).unwrap();
        assert_eq!(
            encoded,
            hex!("ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff00").to_vec()
        );
    }

    #[test]
    fn encode_fixed_array_length() {
        let err = encode(
            &types(&["uint256[3]"]),
            &[Value::FixedArray(vec![uint(1), uint(2)])],
        )
        .unwrap_err();
        assert_matches!(err, CodecError::ArrayLength { expected: 3, found: 2, .. });
    }

    #[test]
    fn encode_fixed_bytes_length() {
        let err = encode(&types(&["bytes4"]), &[Value::FixedBytes(vec![1, 2, 3])]).unwrap_err();
        assert_matches!(err, CodecError::FixedBytesLength { expected: 4, found: 3, .. });
    }

    #[test]
    fn encode_empty_bytes() {
        let encoded = encode(&types(&["bytes"]), &[Value::Bytes(vec![])]).unwrap();
        assert_eq!(
            encoded,
            hex!(
                "
                0000000000000000000000000000000000000000000000000000000000000020
                0000000000000000000000000000000000000000000000000000000000000000
                "
            )
            .to_vec()
        );
        assert_eq!(decode(&types(&["bytes"]), &encoded).unwrap(), vec![Value::Bytes(vec![])]);
    }

    #[test]
    fn decode_aliased_offsets() {
        // bytes[] of two elements whose offsets both point at one payload.
        let body = hex!(
            "
            0000000000000000000000000000000000000000000000000000000000000020
            0000000000000000000000000000000000000000000000000000000000000002
            0000000000000000000000000000000000000000000000000000000000000040
            0000000000000000000000000000000000000000000000000000000000000040
            0000000000000000000000000000000000000000000000000000000000000040
            aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa
            bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb
            "
        );

        let err = decode(&types(&["bytes[]"]), &body).unwrap_err();
        assert_matches!(err, CodecError::OverlappingData { len: 224, .. });
    }

    #[test]
    fn decode_aliased_nested_arrays() {
        // uint256[][] of three elements sharing one inner array.
        let body = hex!(
            "
            0000000000000000000000000000000000000000000000000000000000000020
            0000000000000000000000000000000000000000000000000000000000000003
            0000000000000000000000000000000000000000000000000000000000000060
            0000000000000000000000000000000000000000000000000000000000000060
            0000000000000000000000000000000000000000000000000000000000000060
            0000000000000000000000000000000000000000000000000000000000000001
            0000000000000000000000000000000000000000000000000000000000000007
            "
        );

        let err = decode(&types(&["uint256[][]"]), &body).unwrap_err();
        assert_matches!(err, CodecError::OverlappingData { .. });
    }

    #[test]
    fn decode_invalid_types() {
        let err = decode(&[ParamType::Uint(300)], &[0u8; 32]).unwrap_err();
        assert_matches!(err, CodecError::InvalidType { ty: ParamType::Uint(300), .. });

        let err = decode(&[ParamType::Int(7)], &[0u8; 32]).unwrap_err();
        assert_matches!(err, CodecError::InvalidType { .. });

        let err = decode(&[ParamType::FixedBytes(33)], &[0u8; 32]).unwrap_err();
        assert_matches!(err, CodecError::InvalidType { .. });

        let empty = ParamType::Array(Box::new(ParamType::FixedArray(
            Box::new(ParamType::Uint(256)),
            0,
        )));
        let body = hex!(
            "
            0000000000000000000000000000000000000000000000000000000000000020
            ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff
            "
        );
        let err = decode(&[empty], &body).unwrap_err();
        assert_matches!(err, CodecError::InvalidType { .. });
    }

    #[test]
    fn encode_invalid_types() {
        let err = encode(&[ParamType::FixedBytes(33)], &[Value::FixedBytes(vec![0; 33])]).unwrap_err();
        assert_matches!(err, CodecError::InvalidType { .. });

        let err = encode(&[ParamType::Int(300)], &[Value::Int(BigInt::from(1))]).unwrap_err();
        assert_matches!(err, CodecError::InvalidType { .. });

        let empty = ParamType::FixedArray(Box::new(ParamType::Bool), 0);
        let err = encode(&[empty], &[Value::FixedArray(vec![])]).unwrap_err();
        assert_matches!(err, CodecError::InvalidType { .. });
    }
}
