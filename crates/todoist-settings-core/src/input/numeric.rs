//! Positive-integer validation for numeric text fields.
//!
//! The accepted language is exactly `^[1-9][0-9]*$`: ASCII digits only, no
//! sign, no decimal point, no surrounding whitespace, no leading zero.
//! Callers trim the text before calling in.

/// Returns `true` iff `text` is a decimal integer `>= 1` with no other characters.
pub fn is_positive_integer(text: &str) -> bool {
    let bytes = text.as_bytes();
    match bytes.first() {
        Some(b'1'..=b'9') => bytes[1..].iter().all(u8::is_ascii_digit),
        _ => false,
    }
}

/// Parses text already accepted by [`is_positive_integer`].
///
/// Input that was not validated first, or that overflows `u32`, yields `0`,
/// which no constrained field accepts.  Prefer [`parse_positive_integer`].
pub fn to_int(text: &str) -> u32 {
    text.parse().unwrap_or(0)
}

/// Validates and parses in one step.  `None` for invalid or out-of-range input.
pub fn parse_positive_integer(text: &str) -> Option<u32> {
    if !is_positive_integer(text) {
        return None;
    }
    text.parse().ok()
}
