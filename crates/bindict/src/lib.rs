//! # bindict
//!
//! Pure-Rust encoder and decoder for a compact **binary dictionary** format, the
//! metadata blob found inside game asset archives.
//!
//! A blob holds one value tree of nulls, dictionaries, arrays, strings, integers
//! and floats. Every string, dictionary key and number (numbers are stored as
//! canonical decimal text) goes through a deduplicated String Table appended
//! after the payload and reached through an absolute-offset index. Composites
//! are bracketed by their own type tag at both ends.
//!
//! ## Quick start
//!
//! ```rust
//! use bindict::{decode, encode, IndexWidth, Value};
//!
//! let value: Value = [("name", Value::from("Ransome")), ("score", Value::from(42))]
//!     .into_iter()
//!     .collect();
//!
//! let bytes = encode(&value, IndexWidth::Wide).unwrap();
//! let back = decode(&bytes, IndexWidth::Wide).unwrap();
//! assert_eq!(back, value);
//! ```
//!
//! ## Modules
//!
//! - [`encoder`]: value tree → blob
//! - [`decoder`]: blob → value tree, width detection, String Table inspection
//! - [`format`]: tags, header constants, [`IndexWidth`]
//! - [`number`]: canonical numeric text
//! - [`json`]: JSON conversion helpers
//! - [`error`]: error types for encode/decode failures
//! - [`types`]: the [`Value`] tree

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod format;
pub mod json;
pub mod number;
mod string_table;
pub mod types;

pub use decoder::{decode, decode_detect, read_string_table};
pub use encoder::encode;
pub use error::{DictError, Result};
pub use format::{IndexWidth, TypeTag};
pub use json::{decode_to_json, encode_json};
pub use types::{Value, ValueKind};
