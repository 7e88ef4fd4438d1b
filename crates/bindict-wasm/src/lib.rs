//! WASM bindings for bindict.
//!
//! Exposes JSON-in/JSON-out wrappers around the dictionary codec as
//! `#[wasm_bindgen]` functions callable from JavaScript/TypeScript. Blobs cross
//! the boundary as `Uint8Array`.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p bindict-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/bindict-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/bindict_wasm.wasm
//! ```
//!
//! The `*_with` functions hold the logic and return plain `String` errors so
//! they can be exercised on native targets, where `JsValue` is unavailable.

use bindict::IndexWidth;
use wasm_bindgen::prelude::*;

fn width_for(narrow: bool) -> IndexWidth {
    if narrow {
        IndexWidth::Narrow
    } else {
        IndexWidth::Wide
    }
}

/// Encode a JSON document into a dictionary blob.
pub fn encode_json_with(json: &str, narrow: bool) -> Result<Vec<u8>, String> {
    bindict::encode_json(json, width_for(narrow)).map_err(|e| e.to_string())
}

/// Decode a dictionary blob into compact JSON.
pub fn decode_to_json_with(bytes: &[u8], narrow: bool) -> Result<String, String> {
    bindict::decode_to_json(bytes, width_for(narrow)).map_err(|e| e.to_string())
}

/// Report `"narrow"` or `"wide"` for a blob of unknown index width.
pub fn detect_index_width_with(bytes: &[u8]) -> Result<String, String> {
    IndexWidth::detect(bytes)
        .map(|width| width.to_string())
        .map_err(|e| e.to_string())
}

/// Encode a JSON string into a dictionary blob.
///
/// Throws a JS error if the input is not valid JSON or holds a boolean.
#[wasm_bindgen(js_name = encodeJson)]
pub fn encode_json(json: &str, narrow: bool) -> std::result::Result<Vec<u8>, JsValue> {
    encode_json_with(json, narrow).map_err(|e| JsValue::from_str(&e))
}

/// Decode a dictionary blob back into compact JSON.
///
/// Throws a JS error if the blob is malformed for the given width.
#[wasm_bindgen(js_name = decodeToJson)]
pub fn decode_to_json(bytes: &[u8], narrow: bool) -> std::result::Result<String, JsValue> {
    decode_to_json_with(bytes, narrow).map_err(|e| JsValue::from_str(&e))
}

#[wasm_bindgen(js_name = detectIndexWidth)]
pub fn detect_index_width(bytes: &[u8]) -> std::result::Result<String, JsValue> {
    detect_index_width_with(bytes).map_err(|e| JsValue::from_str(&e))
}
