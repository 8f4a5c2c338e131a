//! `application/x-www-form-urlencoded` decoding into bounded strings

use heapless::{String, Vec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    /// Decoded value exceeds the field capacity
    TooLong,
    /// Malformed percent escape or invalid UTF-8
    Encoding,
}

/// Iterate over raw `key=value` pairs of a form body
pub fn form_fields(body: &[u8]) -> impl Iterator<Item = (&[u8], &[u8])> {
    body.split(|b| *b == b'&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.iter().position(|b| *b == b'=') {
            Some(eq) => (&pair[..eq], &pair[eq + 1..]),
            None => (pair, &pair[pair.len()..]),
        })
}

/// Decode a single form component, expanding `+` and `%XX` escapes
pub fn decode_component<const N: usize>(raw: &[u8]) -> Result<String<N>, FormError> {
    let mut bytes: Vec<u8, N> = Vec::new();
    let mut i = 0;
    while i < raw.len() {
        let byte = match raw[i] {
            b'+' => b' ',
            b'%' => {
                let hi = raw.get(i + 1).copied().and_then(hex_value);
                let lo = raw.get(i + 2).copied().and_then(hex_value);
                let (Some(hi), Some(lo)) = (hi, lo) else {
                    return Err(FormError::Encoding);
                };
                i += 2;
                (hi << 4) | lo
            }
            other => other,
        };
        bytes.push(byte).map_err(|_| FormError::TooLong)?;
        i += 1;
    }
    String::from_utf8(bytes).map_err(|_| FormError::Encoding)
}

const fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}
