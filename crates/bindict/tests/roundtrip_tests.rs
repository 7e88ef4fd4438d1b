use bindict::{decode, encode, IndexWidth, Value};

/// Assert that encode → decode reproduces the value under both widths.
fn assert_roundtrip(value: Value) {
    for width in [IndexWidth::Narrow, IndexWidth::Wide] {
        let bytes = encode(&value, width).expect("encode failed");
        let decoded = decode(&bytes, width).expect("decode failed");
        assert_eq!(
            value, decoded,
            "Roundtrip failed with {width} width:\n  input:  {value:?}\n  output: {decoded:?}\n  bytes:  {bytes:02x?}"
        );
    }
}

fn dict(pairs: Vec<(&str, Value)>) -> Value {
    pairs.into_iter().collect()
}

// ============================================================================
// Scalar roots
// ============================================================================

#[test]
fn roundtrip_null() {
    assert_roundtrip(Value::Null);
}

#[test]
fn roundtrip_string() {
    assert_roundtrip(Value::from("hello"));
}

#[test]
fn roundtrip_empty_string() {
    assert_roundtrip(Value::from(""));
}

#[test]
fn roundtrip_unicode_string() {
    assert_roundtrip(Value::from("caf\u{e9} \u{4f60}\u{597d} \u{1f3a9}"));
}

#[test]
fn roundtrip_string_with_control_chars() {
    assert_roundtrip(Value::from("line1\nline2\ttab\r"));
}

#[test]
fn roundtrip_integer() {
    assert_roundtrip(Value::from(42));
}

#[test]
fn roundtrip_negative_integer() {
    assert_roundtrip(Value::from(-7));
}

#[test]
fn roundtrip_integer_extremes() {
    assert_roundtrip(Value::Integer(i64::MIN));
    assert_roundtrip(Value::Integer(i64::MAX));
    assert_roundtrip(Value::Integer(0));
}

#[test]
fn roundtrip_float() {
    assert_roundtrip(Value::from(3.75));
}

#[test]
fn roundtrip_whole_float_stays_float() {
    assert_roundtrip(Value::Float(100.0));
    assert_roundtrip(Value::Float(1e6));
}

#[test]
fn roundtrip_negative_zero_keeps_sign() {
    let bytes = encode(&Value::Float(-0.0), IndexWidth::Wide).unwrap();
    let back = decode(&bytes, IndexWidth::Wide).unwrap();
    assert!(back.as_f64().unwrap().is_sign_negative());
}

#[test]
fn roundtrip_float_extremes() {
    assert_roundtrip(Value::Float(f64::MAX));
    assert_roundtrip(Value::Float(f64::MIN));
    assert_roundtrip(Value::Float(f64::MIN_POSITIVE));
    assert_roundtrip(Value::Float(5e-324));
    assert_roundtrip(Value::Float(f64::EPSILON));
}

#[test]
fn roundtrip_infinities() {
    assert_roundtrip(Value::Float(f64::INFINITY));
    assert_roundtrip(Value::Float(f64::NEG_INFINITY));
}

// ============================================================================
// Composites
// ============================================================================

#[test]
fn roundtrip_empty_dictionary() {
    assert_roundtrip(Value::dictionary());
}

#[test]
fn roundtrip_empty_array() {
    assert_roundtrip(Value::Array(vec![]));
}

#[test]
fn roundtrip_flat_dictionary() {
    assert_roundtrip(dict(vec![
        ("name", Value::from("Guybrush")),
        ("age", Value::from(19)),
        ("height", Value::from(1.72)),
        ("nickname", Value::Null),
    ]));
}

#[test]
fn roundtrip_mixed_array() {
    assert_roundtrip(Value::Array(vec![
        Value::Null,
        Value::from("x"),
        Value::from("x"),
        Value::from(1),
        Value::from(1.5),
        Value::dictionary(),
        Value::Array(vec![]),
    ]));
}

#[test]
fn roundtrip_nested() {
    assert_roundtrip(dict(vec![
        (
            "rooms",
            Value::Array(vec![
                dict(vec![
                    ("name", Value::from("Mansion")),
                    ("objects", Value::Array(vec![Value::from("door"), Value::from("lamp")])),
                    ("pos", dict(vec![("x", Value::from(120)), ("y", Value::from(45.5))])),
                ]),
                dict(vec![
                    ("name", Value::from("Bank")),
                    ("objects", Value::Array(vec![Value::from("door")])),
                    ("pos", dict(vec![("x", Value::from(-3)), ("y", Value::from(0))])),
                ]),
            ]),
        ),
        ("version", Value::from("1.0.958")),
    ]));
}

#[test]
fn roundtrip_deep_nesting() {
    let mut value = Value::from("bottom");
    for depth in 0..64 {
        value = if depth % 2 == 0 {
            Value::Array(vec![value])
        } else {
            dict(vec![("inner", value)])
        };
    }
    assert_roundtrip(value);
}

#[test]
fn roundtrip_numeric_looking_strings_stay_strings() {
    assert_roundtrip(dict(vec![
        ("a", Value::from("42")),
        ("b", Value::from(42)),
        ("c", Value::from("2.5")),
        ("d", Value::from(2.5)),
    ]));
}

#[test]
fn roundtrip_key_matching_value() {
    assert_roundtrip(dict(vec![("same", Value::from("same"))]));
}

#[test]
fn roundtrip_many_distinct_strings() {
    let items: Vec<Value> = (0..5_000).map(|i| Value::from(format!("entry-{i}"))).collect();
    assert_roundtrip(Value::Array(items));
}
