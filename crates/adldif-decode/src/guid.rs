//! Little-endian GUID decoding

use tracing::debug;
use uuid::Uuid;

use crate::error::DecodeResult;
use crate::text::decode_base64;

/// 16 mixed-endian bytes to `{xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx}`
pub fn format_guid_le(bytes: &[u8]) -> DecodeResult<String> {
    let uuid = Uuid::from_slice_le(bytes)?;
    Ok(format!("{{{}}}", uuid.hyphenated()))
}

/// Render a base64 GUID attribute.
///
/// Falls back to the bytes as UTF-8 when they are not a GUID, and to the
/// original base64 when they are not text either.
pub fn decode_guid(value: &str) -> String {
    let bytes = match decode_base64(value) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!("GUID value is not base64: {}", e);
            return value.to_string();
        }
    };

    match format_guid_le(&bytes) {
        Ok(guid) => guid,
        Err(e) => {
            debug!("Not a GUID ({}), trying UTF-8", e);
            String::from_utf8(bytes).unwrap_or_else(|_| value.to_string())
        }
    }
}
