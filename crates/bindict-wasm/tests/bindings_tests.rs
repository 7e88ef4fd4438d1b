//! Native tests for the logic behind the WASM exports.

use bindict_wasm::{decode_to_json_with, detect_index_width_with, encode_json_with};

#[test]
fn json_roundtrip_wide() {
    let bytes = encode_json_with(r#"{"name":"Delores","coins":7}"#, false).unwrap();
    let json = decode_to_json_with(&bytes, false).unwrap();
    assert_eq!(json, r#"{"coins":7,"name":"Delores"}"#);
}

#[test]
fn json_roundtrip_narrow() {
    let bytes = encode_json_with(r#"[1.5,"x",null]"#, true).unwrap();
    let json = decode_to_json_with(&bytes, true).unwrap();
    assert_eq!(json, r#"[1.5,"x",null]"#);
}

#[test]
fn detects_narrow_blob() {
    let bytes = encode_json_with(r#"{"room":"Main Street","x":120,"y":45}"#, true).unwrap();
    assert_eq!(detect_index_width_with(&bytes).unwrap(), "narrow");
}

#[test]
fn boolean_input_is_an_error_message() {
    let err = encode_json_with(r#"{"flag":true}"#, false).unwrap_err();
    assert!(err.contains("boolean"), "unexpected error: {err}");
}

#[test]
fn garbage_blob_is_an_error_message() {
    let err = decode_to_json_with(b"not a blob at all", false).unwrap_err();
    assert!(err.contains("malformed header"), "unexpected error: {err}");
}
