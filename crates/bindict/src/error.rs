//! Error types for dictionary encoding and decoding operations.

use thiserror::Error;

use crate::format::IndexWidth;

/// Errors that can occur while encoding or decoding a dictionary blob.
///
/// Decode errors carry the byte offset where the problem was detected. A
/// single misread offset invalidates every later read, so none of them are
/// recoverable.
#[derive(Error, Debug)]
pub enum DictError {
    /// The String Table grew past what the configured index width can address.
    #[error("string table has {entries} entries, more than {width} indices can address ({max})")]
    IndexOverflow {
        width: IndexWidth,
        entries: usize,
        max: u64,
    },

    /// A string contains a NUL byte, which would terminate it early in the blob.
    #[error("string {text:?} contains an embedded NUL byte")]
    EmbeddedNul { text: String },

    /// A count or absolute offset does not fit in a 32-bit field.
    #[error("{what} of {value} does not fit in 32 bits")]
    SizeOverflow { what: &'static str, value: usize },

    /// Signature or version field mismatch.
    #[error("malformed header at byte {offset}: expected {field} {expected:#010x}, found {found:#010x}")]
    MalformedHeader {
        offset: usize,
        field: &'static str,
        expected: u32,
        found: u32,
    },

    /// The buffer ends before a fixed-size field completes.
    #[error("truncated input at byte {offset}: needed {needed} bytes, {available} available")]
    TruncatedInput {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// A composite's closing bookend differs from its opening tag.
    #[error("unbalanced composite at byte {offset}: opened with tag {opening}, closed with {closing}")]
    UnbalancedComposite {
        offset: usize,
        opening: u8,
        closing: u8,
    },

    /// A String Reference points past the end of the String Table.
    #[error("dangling reference at byte {offset}: index {index} but string table has {table_len} entries")]
    DanglingReference {
        offset: usize,
        index: u32,
        table_len: usize,
    },

    /// Text behind an Integer or Float tag does not parse as that type.
    #[error("cannot parse {text:?} as {kind} (reference at byte {offset})")]
    NumericParseFailure {
        offset: usize,
        kind: &'static str,
        text: String,
    },

    /// A byte where a Value Record tag was expected is not a value tag.
    #[error("unknown type tag {tag} at byte {offset}")]
    UnknownTypeTag { offset: usize, tag: u8 },

    /// A dictionary record names the same key twice.
    #[error("duplicate dictionary key {key:?} (reference at byte {offset})")]
    DuplicateKey { offset: usize, key: String },

    /// Composites nest deeper than the decoder will follow.
    #[error("composite at byte {offset} nests deeper than {limit} levels")]
    NestingTooDeep { offset: usize, limit: usize },

    /// The trailing Offset Index or string blob is inconsistent.
    #[error("malformed string table at byte {offset}: {message}")]
    MalformedStringTable { offset: usize, message: String },

    /// The root record does not end where the header says the Offset Index starts.
    #[error("payload ends at byte {found}, but header places the string table at {expected}")]
    PayloadLength { expected: usize, found: usize },

    /// A configuration string names no known index width.
    #[error("unknown index width {0:?}, expected \"narrow\" or \"wide\"")]
    UnknownIndexWidth(String),

    /// The input string was not valid JSON.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A JSON value has no counterpart among the five dictionary value kinds.
    #[error("unsupported JSON value: {0}")]
    UnsupportedJson(String),
}

/// Convenience alias used throughout bindict.
pub type Result<T> = std::result::Result<T, DictError>;
