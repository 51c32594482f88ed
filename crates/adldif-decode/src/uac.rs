//! userAccountControl bitmask decoding

use adldif_core::UAC_FLAGS;
use tracing::debug;

use crate::error::DecodeResult;

/// Parse a decimal or `0x`-prefixed hexadecimal mask
pub fn parse_mask(value: &str) -> DecodeResult<i64> {
    let value = value.trim();
    let mask = match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => i64::from_str_radix(hex, 16)?,
        None => value.parse()?,
    };
    Ok(mask)
}

/// Names of the flags set in `mask`, in table order. Unknown bits are dropped.
pub fn flag_names(mask: i64) -> Vec<&'static str> {
    UAC_FLAGS
        .iter()
        .filter(|(_, bit)| mask & i64::from(*bit) != 0)
        .map(|(name, _)| *name)
        .collect()
}

/// Render a userAccountControl value as `FLAG|FLAG|...`.
///
/// Values that are not integers are returned unchanged.
pub fn decode_flags(value: &str) -> String {
    match parse_mask(value) {
        Ok(mask) => flag_names(mask).join("|"),
        Err(e) => {
            debug!("Keeping userAccountControl {:?}: {}", value, e);
            value.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_follows_table() {
        assert_eq!(decode_flags("0x0202"), "ACCOUNTDISABLE|NORMAL_ACCOUNT");
        assert_eq!(decode_flags("514"), "ACCOUNTDISABLE|NORMAL_ACCOUNT");
    }

    #[test]
    fn test_common_values() {
        assert_eq!(decode_flags("512"), "NORMAL_ACCOUNT");
        assert_eq!(
            decode_flags("66048"),
            "NORMAL_ACCOUNT|DONT_EXPIRE_PASSWORD"
        );
        assert_eq!(
            decode_flags("532480"),
            "SERVER_TRUST_ACCOUNT|TRUSTED_FOR_DELEGATION"
        );
    }

    #[test]
    fn test_unknown_bits_are_dropped() {
        // 0x0004 and 0x0400 are unassigned
        assert_eq!(decode_flags("0x0604"), "NORMAL_ACCOUNT");
        assert_eq!(decode_flags("0"), "");
    }

    #[test]
    fn test_non_numeric_is_unchanged() {
        assert_eq!(decode_flags("enabled"), "enabled");
    }

    #[test]
    fn test_parse_mask() {
        assert_eq!(parse_mask(" 4096 ").unwrap(), 4096);
        assert_eq!(parse_mask("0X1000").unwrap(), 4096);
        assert!(parse_mask("0xZZ").is_err());
    }
}
