//! Value decoders for Active Directory LDIF exports
//!
//! Every decoder is a stateless function over one attribute value:
//!
//! - **text**: base64 text-or-binary classification
//! - **sid**: binary SID to `S-1-5-21-...`
//! - **guid**: little-endian binary GUID to `{...}`
//! - **timestamp**: 100ns ticks since 1601 to ISO-8601
//! - **uac**: userAccountControl bitmask to flag names
//!
//! Decoders with a fallback return a `String` directly; the fallible
//! building blocks underneath return [`DecodeResult`].

pub mod error;
pub mod guid;
pub mod sid;
pub mod text;
pub mod timestamp;
pub mod uac;

pub use error::{DecodeError, DecodeResult};
pub use guid::decode_guid;
pub use sid::{decode_sid, Sid};
pub use text::{classify, decode_base64, BinaryText};
pub use timestamp::decode_timestamp;
pub use uac::decode_flags;
