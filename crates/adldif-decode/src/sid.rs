//! Binary SID decoding
//!
//! Layout handled here (28 bytes):
//!
//! | bytes  | field                               |
//! |--------|-------------------------------------|
//! | 0      | revision                            |
//! | 1..4   | sub-authority count, unused         |
//! | 4..8   | authority, big-endian u32           |
//! | 8..28  | four domain values + RID, LE u32    |
//!
//! Only the five sub-authority form used by domain accounts is accepted.

use std::fmt;

use crate::error::{DecodeError, DecodeResult};
use crate::text::decode_base64;

/// Exact size of a binary SID accepted by [`Sid::from_bytes`]
pub const SID_LEN: usize = 28;

/// A decoded security identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sid {
    pub revision: u8,
    pub authority: u32,
    /// Four domain components followed by the RID
    pub sub_authorities: [u32; 5],
}

impl Sid {
    pub fn from_bytes(data: &[u8]) -> DecodeResult<Self> {
        if data.len() != SID_LEN {
            return Err(DecodeError::SidLength {
                expected: SID_LEN,
                actual: data.len(),
            });
        }

        let authority = u32::from_be_bytes([data[4], data[5], data[6], data[7]]);

        let mut sub_authorities = [0u32; 5];
        for (slot, chunk) in sub_authorities.iter_mut().zip(data[8..].chunks_exact(4)) {
            *slot = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }

        Ok(Self {
            revision: data[0],
            authority,
            sub_authorities,
        })
    }

    /// Relative identifier, the last sub-authority
    pub fn rid(&self) -> u32 {
        self.sub_authorities[4]
    }
}

impl fmt::Display for Sid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S-{}-{}", self.revision, self.authority)?;
        for value in &self.sub_authorities {
            write!(f, "-{}", value)?;
        }
        Ok(())
    }
}

/// Base64 binary SID to its `S-R-A-...` string form
pub fn decode_sid(value: &str) -> DecodeResult<String> {
    let bytes = decode_base64(value)?;
    Ok(Sid::from_bytes(&bytes)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOMAIN_ADMINS: &str = "AQUAAAAAAAUVAAAA3PTcO4M9K0aCi6YoAAIAAA==";

    #[test]
    fn test_decode_domain_sid() {
        assert_eq!(
            decode_sid(DOMAIN_ADMINS).unwrap(),
            "S-1-5-21-1004336348-1177238915-682003330-512"
        );
    }

    #[test]
    fn test_fields() {
        let bytes = decode_base64(DOMAIN_ADMINS).unwrap();
        let sid = Sid::from_bytes(&bytes).unwrap();
        assert_eq!(sid.revision, 1);
        assert_eq!(sid.authority, 5);
        assert_eq!(sid.sub_authorities[0], 21);
        assert_eq!(sid.rid(), 512);
    }

    #[test]
    fn test_short_sid_is_an_error() {
        // S-1-5-18 (LocalSystem) has a single sub-authority
        let err = decode_sid("AQEAAAAAAAUSAAAA").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::SidLength {
                expected: 28,
                actual: 12
            }
        ));
    }

    #[test]
    fn test_invalid_base64_is_an_error() {
        assert!(matches!(
            decode_sid("%%%").unwrap_err(),
            DecodeError::Base64(_)
        ));
    }
}
