//! Error types for adldif-decode crate

use thiserror::Error;

/// Why a value could not be decoded
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Value is not valid base64
    #[error("Invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Binary SID has the wrong size
    #[error("SID must be {expected} bytes, got {actual}")]
    SidLength { expected: usize, actual: usize },

    /// Decoded bytes are not UTF-8
    #[error("Value is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Binary GUID has the wrong size
    #[error("Invalid GUID: {0}")]
    Guid(#[from] uuid::Error),

    /// Value is not an integer
    #[error("Invalid integer: {0}")]
    Integer(#[from] std::num::ParseIntError),

    /// Tick count lands outside the representable calendar
    #[error("Timestamp out of range: {0} ticks")]
    OutOfRange(i64),
}

/// Result type for decode operations
pub type DecodeResult<T> = Result<T, DecodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sid_length_message() {
        let err = DecodeError::SidLength {
            expected: 28,
            actual: 12,
        };
        assert_eq!(err.to_string(), "SID must be 28 bytes, got 12");
    }

    #[test]
    fn test_from_parse_int_error() {
        let err: DecodeError = "abc".parse::<i64>().unwrap_err().into();
        assert!(matches!(err, DecodeError::Integer(_)));
    }
}
