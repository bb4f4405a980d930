use percent_encoding::percent_decode_str;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("malformed percent escape at byte {offset}")]
    MalformedEscape { offset: usize },
    #[error("decoded bytes are not valid UTF-8")]
    InvalidUtf8,
}

fn check_escapes(input: &str) -> Result<(), DecodeError> {
    let bytes = input.as_bytes();
    for (offset, _) in input.match_indices('%') {
        let well_formed = bytes
            .get(offset + 1..offset + 3)
            .is_some_and(|pair| pair.iter().all(u8::is_ascii_hexdigit));
        if !well_formed {
            return Err(DecodeError::MalformedEscape { offset });
        }
    }
    Ok(())
}

/// Decode a query-escaped token exactly once.
///
/// `+` becomes a space and `%XY` becomes the byte `0xXY`. A `%` that is not
/// followed by two hex digits is an error, not a literal.
pub fn percent_decode(input: &str) -> Result<String, DecodeError> {
    check_escapes(input)?;
    percent_decode_str(&input.replace('+', " "))
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| DecodeError::InvalidUtf8)
}
