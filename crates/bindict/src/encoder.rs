//! Dictionary encoder: value tree to binary blob.
//!
//! The encoder writes the 12-byte header, walks the value tree emitting one
//! Value Record per node, then patches the string-table offset into the header
//! and appends the Offset Index and string blob.
//!
//! - **Scalars**: a tag byte, then (for strings and numbers) a String Reference.
//! - **Composites**: tag, u32 count, children, and the same tag again.
//! - **Keys**: always written in byte-wise ascending order, so logically equal
//!   dictionaries produce identical bytes.
//!
//! # Example
//! ```
//! use bindict::{encode, IndexWidth, Value};
//! let value: Value = [("a", Value::from(1)), ("b", Value::from(2.5))]
//!     .into_iter()
//!     .collect();
//! let bytes = encode(&value, IndexWidth::Wide).unwrap();
//! assert_eq!(&bytes[..4], &[1, 2, 3, 4]);
//! ```

use tracing::debug;

use crate::error::Result;
use crate::format::{
    IndexWidth, TypeTag, HEADER_LEN, SIGNATURE, TABLE_OFFSET_POS, VERSION_MAJOR, VERSION_MINOR,
};
use crate::number::{format_float, format_integer};
use crate::string_table::{to_u32, StringTable};
use crate::types::Value;

/// Encode a value tree into a dictionary blob.
///
/// Fails only when the blob cannot represent the input: the String Table
/// outgrows `width`, a string holds a NUL byte, or a size exceeds 32 bits.
pub fn encode(root: &Value, width: IndexWidth) -> Result<Vec<u8>> {
    let mut encoder = Encoder::new(width);
    encoder.write_header();
    encoder.write_value(root)?;
    let bytes = encoder.finish()?;
    debug!(
        root = %root.kind(),
        %width,
        bytes = bytes.len(),
        "encoded dictionary blob"
    );
    Ok(bytes)
}

/// Per-call encoding state: the output buffer and the String Table.
struct Encoder {
    buf: Vec<u8>,
    strings: StringTable,
    width: IndexWidth,
}

impl Encoder {
    fn new(width: IndexWidth) -> Self {
        Self {
            buf: Vec::new(),
            strings: StringTable::new(width),
            width,
        }
    }

    /// The third word starts as the minor version; `finish` overwrites it.
    fn write_header(&mut self) {
        self.write_u32(SIGNATURE);
        self.write_u32(VERSION_MAJOR);
        self.write_u32(VERSION_MINOR);
        debug_assert_eq!(self.buf.len(), HEADER_LEN);
    }

    fn write_value(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Null => self.write_tag(TypeTag::Null),
            Value::Dictionary(map) => {
                self.write_tag(TypeTag::Dictionary);
                self.write_count(map.len())?;
                // BTreeMap<String, _> iterates in byte-wise key order.
                for (key, child) in map {
                    self.write_reference(key)?;
                    self.write_value(child)?;
                }
                self.write_tag(TypeTag::Dictionary);
            }
            Value::Array(items) => {
                self.write_tag(TypeTag::Array);
                self.write_count(items.len())?;
                for item in items {
                    self.write_value(item)?;
                }
                self.write_tag(TypeTag::Array);
            }
            Value::String(s) => {
                self.write_tag(TypeTag::String);
                self.write_reference(s)?;
            }
            Value::Integer(n) => {
                self.write_tag(TypeTag::Integer);
                self.write_reference(&format_integer(*n))?;
            }
            Value::Float(f) => {
                self.write_tag(TypeTag::Float);
                self.write_reference(&format_float(*f))?;
            }
        }
        Ok(())
    }

    /// Intern `text` and write its index at the configured width.
    fn write_reference(&mut self, text: &str) -> Result<()> {
        let idx = self.strings.intern(text)?;
        match self.width {
            // `intern` keeps narrow indices below 2^16.
            IndexWidth::Narrow => self.buf.extend_from_slice(&(idx as u16).to_le_bytes()),
            IndexWidth::Wide => self.write_u32(idx),
        }
        Ok(())
    }

    fn write_count(&mut self, count: usize) -> Result<()> {
        let count = to_u32("element count", count)?;
        self.write_u32(count);
        Ok(())
    }

    fn write_tag(&mut self, tag: TypeTag) {
        self.buf.push(tag as u8);
    }

    fn write_u32(&mut self, n: u32) {
        self.buf.extend_from_slice(&n.to_le_bytes());
    }

    /// Patch the header's table offset, then append the String Table.
    fn finish(mut self) -> Result<Vec<u8>> {
        let table_offset = to_u32("string table offset", self.buf.len())?;
        self.buf[TABLE_OFFSET_POS..TABLE_OFFSET_POS + 4].copy_from_slice(&table_offset.to_le_bytes());
        self.strings.write_trailer(&mut self.buf)?;
        debug!(
            entries = self.strings.len(),
            table_offset, "appended string table"
        );
        Ok(self.buf)
    }
}
