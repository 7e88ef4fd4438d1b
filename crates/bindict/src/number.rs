//! Canonical decimal text for Integer and Float values.
//!
//! Numbers never appear as raw binary in a blob. They are written as text
//! through the String Table, so two blobs holding the same number must agree
//! on one spelling:
//!
//! - Integers: plain decimal, leading `-` for negatives, no `+`, no leading zeros.
//! - Floats: the shortest digit string that parses back to the same `f64`, laid
//!   out `%g`-style. Decimal exponents in `[-4, 6)` print positionally
//!   (`0.0001`, `2.5`, `123456`); anything else prints as `d.ddde+XX` with an
//!   explicit exponent sign and at least two exponent digits (`1e+06`,
//!   `1.5e-07`). Non-finite values print as `NaN`, `+Inf` and `-Inf`.

/// Decimal exponent range (inclusive start, exclusive end) printed positionally.
const POSITIONAL_EXPONENTS: std::ops::Range<i32> = -4..6;

/// Canonical text of an integer.
pub fn format_integer(n: i64) -> String {
    n.to_string()
}

/// Canonical text of a float.
///
/// ```
/// use bindict::number::format_float;
/// assert_eq!(format_float(2.5), "2.5");
/// assert_eq!(format_float(1e6), "1e+06");
/// assert_eq!(format_float(-0.0), "-0");
/// ```
pub fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "NaN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }

    // `{:e}` yields the shortest round-trip digits as `d.ddde<exp>`.
    let sci = format!("{:e}", f.abs());
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let digits: Vec<u8> = mantissa.bytes().filter(|b| *b != b'.').collect();
    let exp: i32 = exp.parse().unwrap_or(0);

    let mut out = String::with_capacity(digits.len() + 8);
    if f.is_sign_negative() {
        out.push('-');
    }
    if POSITIONAL_EXPONENTS.contains(&exp) {
        push_positional(&mut out, &digits, exp + 1);
    } else {
        push_scientific(&mut out, &digits, exp);
    }
    out
}

/// `ddd.ddd` with the decimal point after `point` digits (may be <= 0).
fn push_positional(out: &mut String, digits: &[u8], point: i32) {
    let nd = digits.len() as i32;
    if point > 0 {
        let whole = point.min(nd) as usize;
        out.extend(digits[..whole].iter().map(|&b| b as char));
        for _ in nd..point {
            out.push('0');
        }
    } else {
        out.push('0');
    }

    let frac = nd - point;
    if frac > 0 {
        out.push('.');
        for i in 0..frac {
            let j = point + i;
            if j >= 0 && j < nd {
                out.push(digits[j as usize] as char);
            } else {
                out.push('0');
            }
        }
    }
}

fn push_scientific(out: &mut String, digits: &[u8], exp: i32) {
    out.push(digits[0] as char);
    if digits.len() > 1 {
        out.push('.');
        out.extend(digits[1..].iter().map(|&b| b as char));
    }
    out.push('e');
    out.push(if exp < 0 { '-' } else { '+' });
    out.push_str(&format!("{:02}", exp.unsigned_abs()));
}

/// Parse integer text written by [`format_integer`] (or a compatible writer).
pub fn parse_integer(text: &str) -> Option<i64> {
    text.parse().ok()
}

/// Parse float text written by [`format_float`] (or a compatible writer).
///
/// Accepts both positional and scientific spellings and the `NaN`/`±Inf`
/// forms, case-insensitively.
pub fn parse_float(text: &str) -> Option<f64> {
    text.parse().ok()
}
