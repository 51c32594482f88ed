//! bof transformer: one `attr: value` line per attribute, records split by a
//! fixed separator, as consumed by BOFHound-style ingestion tools

use std::sync::Arc;

use adldif_core::line::strip_terminator;
use adldif_core::{AttributeName, AttributeTables, AttributeValue, BOF_SEPARATOR};
use adldif_decode::{classify, decode_guid};
use tracing::debug;

use crate::error::TransformResult;
use crate::transformer::{Emit, LineTransformer};

pub struct BofTransformer {
    tables: Arc<AttributeTables>,
}

impl BofTransformer {
    pub fn new(tables: Arc<AttributeTables>) -> Self {
        Self { tables }
    }
}

impl LineTransformer for BofTransformer {
    fn name(&self) -> &'static str {
        "bof"
    }

    fn preamble(&self) -> Option<&'static str> {
        Some(BOF_SEPARATOR)
    }

    fn transform(&mut self, line: &str) -> TransformResult<Emit> {
        let content = strip_terminator(line);
        if content.is_empty() {
            return Ok(Emit::Line(BOF_SEPARATOR.to_string()));
        }

        let Some(pair) = AttributeValue::split_spaced(content) else {
            debug!("Dropping line without \": \": {:?}", content);
            return Ok(Emit::Drop);
        };

        let name = AttributeName::new(pair.attribute);
        if self.tables.is_bof_ignored(&name) {
            return Ok(Emit::Drop);
        }

        let value = if self.tables.is_bof_bracketed(&name) {
            decode_guid(pair.value)
        } else if pair.is_base64() && !self.tables.is_bof_base64(&name) {
            classify(pair.value).into_value()
        } else {
            pair.value.to_string()
        };

        Ok(Emit::Line(format!("{}: {}", name.as_str(), value.trim())))
    }
}
