//! Clean transformer: decode values in place and keep LDIF layout
//!
//! Routing for an `attribute:value` line, first match wins:
//!
//! 1. base64 value, attribute not in skip-clean -> text if it is text
//! 2. base64 value, SID attribute -> `S-1-...`
//! 3. date attribute -> ISO-8601
//! 4. userAccountControl -> flag names
//! 5. anything else -> unchanged

use std::sync::Arc;

use adldif_core::{AttributeName, AttributeTables, AttributeValue, Line};
use adldif_decode::{classify, decode_flags, decode_sid, decode_timestamp, BinaryText};
use tracing::{debug, warn};

use crate::error::{TransformError, TransformResult};
use crate::transformer::{Emit, LineTransformer, TransformOptions};

pub struct CleanTransformer {
    tables: Arc<AttributeTables>,
    options: TransformOptions,
}

impl CleanTransformer {
    pub fn new(tables: Arc<AttributeTables>, options: TransformOptions) -> Self {
        Self { tables, options }
    }

    fn clean_pair(&self, pair: &AttributeValue<'_>) -> TransformResult<String> {
        let name = AttributeName::new(pair.attribute);
        let attr = name.as_str();

        if pair.is_base64() && !self.tables.is_skip_clean(&name) {
            return Ok(match classify(pair.value) {
                BinaryText::Text(text) => format!("{}: {}", attr, text),
                BinaryText::Binary(original) => format!("{}:: {}", attr, original),
            });
        }

        if pair.is_base64() && self.tables.is_sid(&name) {
            return match decode_sid(pair.value) {
                Ok(sid) => Ok(format!("{}: {}", attr, sid)),
                Err(e) if self.options.sid_fallback => {
                    warn!("Keeping {} as base64: {}", attr, e);
                    Ok(format!("{}:{}", attr, pair.raw))
                }
                Err(e) => Err(TransformError::decode(attr, e)),
            };
        }

        if self.tables.is_date(&name) {
            return Ok(format!("{}: {}", attr, decode_timestamp(pair.value)));
        }

        if self.tables.is_uac(&name) {
            return Ok(format!("{}: {}", attr, decode_flags(pair.value)));
        }

        Ok(format!("{}:{}", attr, pair.raw))
    }
}

impl LineTransformer for CleanTransformer {
    fn name(&self) -> &'static str {
        "clean"
    }

    fn transform(&mut self, line: &str) -> TransformResult<Emit> {
        let line = line.trim();
        match Line::parse(line) {
            Line::Blank | Line::Comment(_) => Ok(Emit::Line(line.to_string())),
            Line::Bare(text) => {
                debug!("Line without attribute separator: {:?}", text);
                Ok(Emit::Line(text.to_string()))
            }
            Line::Pair(pair) => Ok(Emit::Line(self.clean_pair(&pair)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adldif_core::config::AttributeSettings;

    fn clean(line: &str) -> TransformResult<Emit> {
        CleanTransformer::new(Arc::new(AttributeTables::default()), TransformOptions::default())
            .transform(line)
    }

    fn out(line: &str) -> String {
        match clean(line).unwrap() {
            Emit::Line(s) => s,
            other => panic!("unexpected emission {:?}", other),
        }
    }

    #[test]
    fn test_comments_and_blanks_pass_through() {
        assert_eq!(out("# extended LDIF\n"), "# extended LDIF");
        assert_eq!(out("\n"), "");
        assert_eq!(out("\r\n"), "");
    }

    #[test]
    fn test_unclassified_attribute_is_unchanged() {
        assert_eq!(out("cn: John Smith\n"), "cn: John Smith");
        assert_eq!(out("cn:John\n"), "cn:John");
        assert_eq!(
            out("objectGUID:: /xmWb4aLEdC0LQDAT8lk/w==\n"),
            "objectGUID:: /xmWb4aLEdC0LQDAT8lk/w=="
        );
    }

    #[test]
    fn test_base64_text_is_decoded() {
        assert_eq!(out("description:: Q049VXNlcnM=\n"), "description: CN=Users");
        assert_eq!(
            out("info:: bGluZSBvbmUKbGluZSB0d28=\n"),
            "info: line one\n line two"
        );
    }

    #[test]
    fn test_base64_binary_keeps_double_colon() {
        assert_eq!(out("mSMQDigests:: //4AgQ==\n"), "mSMQDigests:: //4AgQ==");
    }

    #[test]
    fn test_sid_is_decoded() {
        assert_eq!(
            out("objectSid:: AQUAAAAAAAUVAAAA3PTcO4M9K0aCi6YoAAIAAA==\n"),
            "objectSid: S-1-5-21-1004336348-1177238915-682003330-512"
        );
    }

    #[test]
    fn test_malformed_sid_is_fatal() {
        let err = clean("objectSid:: AQEAAAAAAAUSAAAA\n").unwrap_err();
        assert!(matches!(err, TransformError::Decode { ref attribute, .. } if attribute == "objectSid"));
    }

    #[test]
    fn test_malformed_sid_fallback() {
        let mut transformer = CleanTransformer::new(
            Arc::new(AttributeTables::default()),
            TransformOptions { sid_fallback: true },
        );
        assert_eq!(
            transformer.transform("objectSid:: AQEAAAAAAAUSAAAA\n").unwrap(),
            Emit::Line("objectSid:: AQEAAAAAAAUSAAAA".to_string())
        );
    }

    #[test]
    fn test_dates_are_converted() {
        assert_eq!(
            out("pwdLastSet: 132539328000000000\n"),
            "pwdLastSet: 2021-01-01T00:00:00"
        );
        assert_eq!(out("lastLogon: 0\n"), "lastLogon: 0");
        assert_eq!(
            out("accountExpires: 9223372036854775807\n"),
            "accountExpires: 9223372036854775807"
        );
    }

    #[test]
    fn test_user_account_control() {
        assert_eq!(
            out("userAccountControl: 514\n"),
            "userAccountControl: ACCOUNTDISABLE|NORMAL_ACCOUNT"
        );
    }

    #[test]
    fn test_configured_date_attribute() {
        let settings = AttributeSettings {
            date: vec!["msDS-LastSuccessfulInteractiveLogonTime".to_string()],
            ..Default::default()
        };
        let mut transformer = CleanTransformer::new(
            Arc::new(AttributeTables::with_settings(&settings)),
            TransformOptions::default(),
        );
        assert_eq!(
            transformer
                .transform("msDS-LastSuccessfulInteractiveLogonTime: 132539328000000000")
                .unwrap(),
            Emit::Line("msDS-LastSuccessfulInteractiveLogonTime: 2021-01-01T00:00:00".to_string())
        );
    }

    #[test]
    fn test_configured_sid_attribute() {
        let settings = AttributeSettings {
            sid: vec!["sIDHistory".to_string()],
            ..Default::default()
        };
        let mut transformer = CleanTransformer::new(
            Arc::new(AttributeTables::with_settings(&settings)),
            TransformOptions::default(),
        );
        assert_eq!(
            transformer
                .transform("sIDHistory:: AQUAAAAAAAUVAAAA3PTcO4M9K0aCi6YoAAIAAA==")
                .unwrap(),
            Emit::Line("sIDHistory: S-1-5-21-1004336348-1177238915-682003330-512".to_string())
        );
    }

    #[test]
    fn test_line_without_colon_passes_through() {
        assert_eq!(out(" folded continuation\n"), "folded continuation");
    }
}
