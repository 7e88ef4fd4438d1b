//! Dictionary decoder: binary blob back to a value tree.
//!
//! Decoding happens in two passes over the same buffer:
//!
//! 1. Header and trailer: validate the signature and major version, follow the
//!    table offset to the Offset Index, and materialize the whole String Table.
//! 2. Payload: parse the root Value Record at byte 12, resolving every String
//!    Reference by index and checking that each composite closes with its own
//!    tag. The record must end exactly where the Offset Index begins.
//!
//! The index width is not stored in the blob; callers pass it in, or use
//! [`decode_detect`] to try both.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{DictError, Result};
use crate::format::{IndexWidth, TypeTag, HEADER_LEN, MAX_DEPTH, SIGNATURE, VERSION_MAJOR};
use crate::number::{parse_float, parse_integer};
use crate::string_table::read_table;
use crate::types::Value;

/// Decode a dictionary blob written with the given index width.
pub fn decode(bytes: &[u8], width: IndexWidth) -> Result<Value> {
    let table_offset = read_header(bytes)?;
    let strings = read_table(bytes, table_offset)?;

    let mut decoder = Decoder {
        reader: ByteReader::at(bytes, HEADER_LEN),
        strings: &strings,
        width,
        depth: 0,
    };
    let root = decoder.read_value()?;

    let end = decoder.reader.pos();
    if end != table_offset {
        return Err(DictError::PayloadLength {
            expected: table_offset,
            found: end,
        });
    }

    debug!(
        root = %root.kind(),
        %width,
        entries = strings.len(),
        bytes = bytes.len(),
        "decoded dictionary blob"
    );
    Ok(root)
}

/// Decode a blob of unknown index width, returning the width that worked.
///
/// `Wide` is tried first. A blob without any String Reference decodes under
/// both widths and reports `Wide`. When neither width fits, the `Wide`
/// error is returned.
pub fn decode_detect(bytes: &[u8]) -> Result<(Value, IndexWidth)> {
    match decode(bytes, IndexWidth::Wide) {
        Ok(value) => Ok((value, IndexWidth::Wide)),
        Err(wide_err) => match decode(bytes, IndexWidth::Narrow) {
            Ok(value) => Ok((value, IndexWidth::Narrow)),
            Err(_) => Err(wide_err),
        },
    }
}

impl IndexWidth {
    /// Infer which index width a blob was written with.
    pub fn detect(bytes: &[u8]) -> Result<IndexWidth> {
        decode_detect(bytes).map(|(_, width)| width)
    }
}

/// Read just the String Table of a blob, in index order.
pub fn read_string_table(bytes: &[u8]) -> Result<Vec<String>> {
    let table_offset = read_header(bytes)?;
    read_table(bytes, table_offset)
}

/// Validate the header and return the string-table offset it carries.
fn read_header(bytes: &[u8]) -> Result<usize> {
    let mut reader = ByteReader::new(bytes);

    let signature = reader.read_u32()?;
    if signature != SIGNATURE {
        return Err(DictError::MalformedHeader {
            offset: 0,
            field: "signature",
            expected: SIGNATURE,
            found: signature,
        });
    }

    let major = reader.read_u32()?;
    if major != VERSION_MAJOR {
        return Err(DictError::MalformedHeader {
            offset: 4,
            field: "major version",
            expected: VERSION_MAJOR,
            found: major,
        });
    }

    Ok(reader.read_u32()? as usize)
}

/// Per-call decoding state.
struct Decoder<'a> {
    reader: ByteReader<'a>,
    strings: &'a [String],
    width: IndexWidth,
    depth: usize,
}

impl<'a> Decoder<'a> {
    fn read_value(&mut self) -> Result<Value> {
        let offset = self.reader.pos();
        let byte = self.reader.read_u8()?;
        match TypeTag::from_byte(byte) {
            Some(TypeTag::Null) => Ok(Value::Null),
            Some(TypeTag::Dictionary) => self.nested(offset, Self::read_dictionary),
            Some(TypeTag::Array) => self.nested(offset, Self::read_array),
            Some(TypeTag::String) => {
                let (_, text) = self.read_reference()?;
                Ok(Value::String(text.to_string()))
            }
            Some(TypeTag::Integer) => {
                let (at, text) = self.read_reference()?;
                parse_integer(text)
                    .map(Value::Integer)
                    .ok_or_else(|| numeric_failure(at, "integer", text))
            }
            Some(TypeTag::Float) => {
                let (at, text) = self.read_reference()?;
                parse_float(text)
                    .map(Value::Float)
                    .ok_or_else(|| numeric_failure(at, "float", text))
            }
            Some(TypeTag::OffsetsIndex) | None => {
                Err(DictError::UnknownTypeTag { offset, tag: byte })
            }
        }
    }

    /// Run a composite reader one level deeper, bounded by [`MAX_DEPTH`].
    fn nested(
        &mut self,
        offset: usize,
        read: fn(&mut Self) -> Result<Value>,
    ) -> Result<Value> {
        if self.depth >= MAX_DEPTH {
            return Err(DictError::NestingTooDeep {
                offset,
                limit: MAX_DEPTH,
            });
        }
        self.depth += 1;
        let value = read(self);
        self.depth -= 1;
        value
    }

    fn read_dictionary(&mut self) -> Result<Value> {
        let count = self.reader.read_u32()?;
        let mut map = BTreeMap::new();
        for _ in 0..count {
            let (at, key) = self.read_reference()?;
            let value = self.read_value()?;
            if map.insert(key.to_string(), value).is_some() {
                return Err(DictError::DuplicateKey {
                    offset: at,
                    key: key.to_string(),
                });
            }
        }
        self.expect_close(TypeTag::Dictionary)?;
        Ok(Value::Dictionary(map))
    }

    fn read_array(&mut self) -> Result<Value> {
        let count = self.reader.read_u32()? as usize;
        // A corrupt count must not drive a huge allocation.
        let mut items = Vec::with_capacity(count.min(self.reader.remaining()));
        for _ in 0..count {
            items.push(self.read_value()?);
        }
        self.expect_close(TypeTag::Array)?;
        Ok(Value::Array(items))
    }

    fn expect_close(&mut self, opening: TypeTag) -> Result<()> {
        let offset = self.reader.pos();
        let closing = self.reader.read_u8()?;
        if closing != opening as u8 {
            return Err(DictError::UnbalancedComposite {
                offset,
                opening: opening as u8,
                closing,
            });
        }
        Ok(())
    }

    /// Read one String Reference; returns its position and resolved text.
    fn read_reference(&mut self) -> Result<(usize, &'a str)> {
        let offset = self.reader.pos();
        let index = match self.width {
            IndexWidth::Narrow => u32::from(self.reader.read_u16()?),
            IndexWidth::Wide => self.reader.read_u32()?,
        };
        let strings = self.strings;
        strings
            .get(index as usize)
            .map(|text| (offset, text.as_str()))
            .ok_or(DictError::DanglingReference {
                offset,
                index,
                table_len: strings.len(),
            })
    }
}

fn numeric_failure(offset: usize, kind: &'static str, text: &str) -> DictError {
    DictError::NumericParseFailure {
        offset,
        kind,
        text: text.to_string(),
    }
}

/// Bounds-checked little-endian cursor over a borrowed buffer.
pub(crate) struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self::at(bytes, 0)
    }

    pub(crate) fn at(bytes: &'a [u8], pos: usize) -> Self {
        Self { bytes, pos }
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.pos)
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N]> {
        let slice = self
            .pos
            .checked_add(N)
            .and_then(|end| self.bytes.get(self.pos..end))
            .ok_or(DictError::TruncatedInput {
                offset: self.pos,
                needed: N,
                available: self.remaining(),
            })?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        self.pos += N;
        Ok(out)
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8> {
        self.take::<1>().map(|[b]| b)
    }

    pub(crate) fn read_u16(&mut self) -> Result<u16> {
        self.take::<2>().map(u16::from_le_bytes)
    }

    pub(crate) fn read_u32(&mut self) -> Result<u32> {
        self.take::<4>().map(u32::from_le_bytes)
    }
}
