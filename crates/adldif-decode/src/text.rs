//! Base64 handling and the "is this base64 text or binary" classifier

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use tracing::debug;

use crate::error::DecodeResult;

/// Standard alphabet, padding optional, non-canonical trailing bits accepted
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Decode a base64 value, ignoring embedded ASCII whitespace
pub fn decode_base64(value: &str) -> DecodeResult<Vec<u8>> {
    let compact: String = value.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    Ok(LENIENT.decode(compact)?)
}

/// Outcome of [`classify`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinaryText {
    /// Decoded UTF-8 text, newlines already turned into LDIF continuations
    Text(String),
    /// Not text; carries the original base64 string
    Binary(String),
}

impl BinaryText {
    pub fn is_text(&self) -> bool {
        matches!(self, BinaryText::Text(_))
    }

    /// The text when decoded, otherwise the original base64
    pub fn into_value(self) -> String {
        match self {
            BinaryText::Text(v) | BinaryText::Binary(v) => v,
        }
    }
}

/// Base64 then strict UTF-8, with newlines rewritten to `"\n "`
pub fn decode_text(value: &str) -> DecodeResult<String> {
    let bytes = decode_base64(value)?;
    let text = String::from_utf8(bytes)?;
    Ok(continuation_lines(&text))
}

/// Decide whether a base64 value is really text.
///
/// Anything that does not decode to UTF-8 is reported as binary with the
/// input returned untouched.
pub fn classify(value: &str) -> BinaryText {
    match decode_text(value) {
        Ok(text) => BinaryText::Text(text),
        Err(e) => {
            debug!("Keeping base64 value: {}", e);
            BinaryText::Binary(value.to_string())
        }
    }
}

/// Rewrite embedded newlines so each following line is an LDIF continuation
pub fn continuation_lines(text: &str) -> String {
    text.replace('\n', "\n ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(bytes: &[u8]) -> String {
        base64::prelude::BASE64_STANDARD.encode(bytes)
    }

    #[test]
    fn test_text_is_decoded() {
        let result = classify(&encode("CN=Users".as_bytes()));
        assert_eq!(result, BinaryText::Text("CN=Users".to_string()));
        assert!(result.is_text());
    }

    #[test]
    fn test_multibyte_utf8_is_text() {
        assert_eq!(
            classify("TcO8bGxlcg=="),
            BinaryText::Text("Müller".to_string())
        );
    }

    #[test]
    fn test_newlines_become_continuations() {
        let result = classify(&encode(b"line one\nline two"));
        assert_eq!(result.into_value(), "line one\n line two");
    }

    #[test]
    fn test_non_utf8_keeps_original() {
        let original = encode(&[0xff, 0xfe, 0x00, 0x81]);
        let result = classify(&original);
        assert!(!result.is_text());
        assert_eq!(result.into_value(), original);
    }

    #[test]
    fn test_invalid_base64_is_binary() {
        let result = classify("not*base64");
        assert_eq!(result, BinaryText::Binary("not*base64".to_string()));
    }

    #[test]
    fn test_missing_padding_and_whitespace_are_tolerated() {
        assert_eq!(decode_base64("Q049VXNlcnM").unwrap(), b"CN=Users");
        assert_eq!(decode_base64(" Q049 VXNlcnM=\n").unwrap(), b"CN=Users");
    }
}
