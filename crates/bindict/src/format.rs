//! Wire-format constants shared by the encoder and decoder.
//!
//! Every multi-byte integer is little-endian. A blob is laid out as:
//!
//! ```text
//! [signature:4][version_major:4][table_offset:4]   header, 12 bytes
//! <root Value Record>
//! [07][entry_offset:4]* [FF FF FF FF]               Offset Index
//! [08][text 00]*                                    string blob
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DictError, Result};

/// File signature, stored as the first little-endian word (`01 02 03 04`).
pub const SIGNATURE: u32 = 0x0403_0201;

/// The only major version this codec reads and writes.
pub const VERSION_MAJOR: u32 = 1;

/// Minor version written before the table offset is patched over it.
pub const VERSION_MINOR: u32 = 0;

/// Byte position of the patched string-table offset inside the header.
pub const TABLE_OFFSET_POS: usize = 8;

/// Header length; the root Value Record starts here.
pub const HEADER_LEN: usize = 12;

/// Terminates the list of entry offsets in the Offset Index.
pub const SENTINEL: u32 = 0xFFFF_FFFF;

/// Marks the start of the string blob, right after the sentinel.
pub const BLOB_MARKER: u8 = 8;

/// Deepest composite nesting the decoder follows before giving up.
pub const MAX_DEPTH: usize = 512;

/// One-byte type tags. Dictionary and Array tags also close their record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TypeTag {
    Null = 1,
    Dictionary = 2,
    Array = 3,
    String = 4,
    Integer = 5,
    Float = 6,
    OffsetsIndex = 7,
}

impl TypeTag {
    /// Map a raw byte back to its tag, if it is one.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            1 => Some(TypeTag::Null),
            2 => Some(TypeTag::Dictionary),
            3 => Some(TypeTag::Array),
            4 => Some(TypeTag::String),
            5 => Some(TypeTag::Integer),
            6 => Some(TypeTag::Float),
            7 => Some(TypeTag::OffsetsIndex),
            _ => None,
        }
    }
}

/// Width of every String Reference in the payload.
///
/// The choice is not recorded in the blob, so the same width must be handed
/// to both [`encode`](crate::encode) and [`decode`](crate::decode). Use
/// [`IndexWidth::detect`] when reading a blob of unknown provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexWidth {
    /// 16-bit references: smaller blobs, at most 65536 distinct strings.
    Narrow,
    /// 32-bit references.
    #[default]
    Wide,
}

impl IndexWidth {
    /// Bytes occupied by one String Reference.
    pub fn bytes(self) -> usize {
        match self {
            IndexWidth::Narrow => 2,
            IndexWidth::Wide => 4,
        }
    }

    /// Number of distinct String Table entries this width can address.
    pub fn max_entries(self) -> u64 {
        match self {
            IndexWidth::Narrow => 1 << 16,
            IndexWidth::Wide => 1 << 32,
        }
    }
}

impl fmt::Display for IndexWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexWidth::Narrow => f.write_str("narrow"),
            IndexWidth::Wide => f.write_str("wide"),
        }
    }
}

/// Parses a width name, case-insensitively.
///
/// Besides `narrow` and `wide`, the aliases `short`/`16` and `long`/`32` are
/// accepted, matching the integer names hosts use for the reference size.
impl FromStr for IndexWidth {
    type Err = DictError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "narrow" | "short" | "16" => Ok(IndexWidth::Narrow),
            "wide" | "long" | "32" => Ok(IndexWidth::Wide),
            _ => Err(DictError::UnknownIndexWidth(s.to_string())),
        }
    }
}
