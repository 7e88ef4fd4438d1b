//! The deduplicated String Table and its trailing Offset Index.
//!
//! While encoding, every string and every numeric text is interned here and
//! replaced in the payload by its 0-based first-occurrence index. Once the
//! payload is complete the table is appended as an Offset Index (one absolute
//! offset per entry, then the sentinel) followed by the NUL-terminated texts.

use std::collections::HashMap;

use tracing::trace;

use crate::decoder::ByteReader;
use crate::error::{DictError, Result};
use crate::format::{IndexWidth, TypeTag, BLOB_MARKER, SENTINEL};

/// Write-side String Table, built fresh for every encode call.
#[derive(Debug)]
pub(crate) struct StringTable {
    width: IndexWidth,
    entries: Vec<String>,
    index: HashMap<String, u32>,
}

impl StringTable {
    pub(crate) fn new(width: IndexWidth) -> Self {
        Self {
            width,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Index of `text`, appending it as a new entry on first sight.
    ///
    /// Fails instead of wrapping once the table outgrows the index width.
    pub(crate) fn intern(&mut self, text: &str) -> Result<u32> {
        if let Some(&idx) = self.index.get(text) {
            return Ok(idx);
        }
        if text.as_bytes().contains(&0) {
            return Err(DictError::EmbeddedNul {
                text: text.to_string(),
            });
        }

        let next = self.entries.len();
        let max = self.width.max_entries();
        if next as u64 >= max {
            return Err(DictError::IndexOverflow {
                width: self.width,
                entries: next + 1,
                max,
            });
        }

        // Bounded by `max_entries`, which never exceeds 2^32.
        let idx = next as u32;
        self.entries.push(text.to_string());
        self.index.insert(text.to_string(), idx);
        Ok(idx)
    }

    /// Append the Offset Index and the string blob to `out`.
    ///
    /// `out` must already hold the header and the full payload; entry
    /// offsets are absolute positions in the finished buffer.
    pub(crate) fn write_trailer(&self, out: &mut Vec<u8>) -> Result<()> {
        let blob_len: usize = self.entries.iter().map(|s| s.len() + 1).sum();
        out.reserve(1 + 4 * self.entries.len() + 4 + 1 + blob_len);

        out.push(TypeTag::OffsetsIndex as u8);
        let mut pointer = out.len() + 4 * self.entries.len() + 4 + 1;
        for text in &self.entries {
            out.extend_from_slice(&to_u32("string offset", pointer)?.to_le_bytes());
            pointer += text.len() + 1;
        }
        out.extend_from_slice(&SENTINEL.to_le_bytes());

        out.push(BLOB_MARKER);
        for text in &self.entries {
            out.extend_from_slice(text.as_bytes());
            out.push(0);
        }
        Ok(())
    }
}

/// Narrow a length or offset to the 32-bit field that stores it.
pub(crate) fn to_u32(what: &'static str, value: usize) -> Result<u32> {
    u32::try_from(value).map_err(|_| DictError::SizeOverflow { what, value })
}

/// Rebuild the String Table from the trailing section at `table_offset`.
///
/// Returns the entries in index order. Every entry offset must land inside the
/// string blob and every text must be NUL-terminated UTF-8.
pub(crate) fn read_table(bytes: &[u8], table_offset: usize) -> Result<Vec<String>> {
    let mut reader = ByteReader::at(bytes, table_offset);

    let tag = reader.read_u8()?;
    if tag != TypeTag::OffsetsIndex as u8 {
        return Err(DictError::MalformedStringTable {
            offset: table_offset,
            message: format!(
                "expected offsets index tag {}, found {}",
                TypeTag::OffsetsIndex as u8,
                tag
            ),
        });
    }

    let mut offsets = Vec::new();
    loop {
        let offset = reader.read_u32()?;
        if offset == SENTINEL {
            break;
        }
        offsets.push(offset as usize);
    }

    let marker_pos = reader.pos();
    let marker = reader.read_u8()?;
    if marker != BLOB_MARKER {
        return Err(DictError::MalformedStringTable {
            offset: marker_pos,
            message: format!("expected string blob marker {}, found {}", BLOB_MARKER, marker),
        });
    }
    let blob_start = reader.pos();

    let entries = offsets
        .into_iter()
        .map(|offset| read_text(bytes, offset, blob_start))
        .collect::<Result<Vec<_>>>()?;
    trace!(entries = entries.len(), table_offset, "materialized string table");
    Ok(entries)
}

fn read_text(bytes: &[u8], offset: usize, blob_start: usize) -> Result<String> {
    if offset < blob_start || offset >= bytes.len() {
        return Err(DictError::MalformedStringTable {
            offset,
            message: format!(
                "entry offset {} outside string blob {}..{}",
                offset,
                blob_start,
                bytes.len()
            ),
        });
    }

    let rest = &bytes[offset..];
    let len = rest
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| DictError::MalformedStringTable {
            offset,
            message: "entry text has no NUL terminator".to_string(),
        })?;
    std::str::from_utf8(&rest[..len])
        .map(str::to_owned)
        .map_err(|e| DictError::MalformedStringTable {
            offset: offset + e.valid_up_to(),
            message: "entry text is not valid UTF-8".to_string(),
        })
}
