//! Identity transformer

use crate::error::TransformResult;
use crate::transformer::{Emit, LineTransformer};

/// Writes every line back unchanged
#[derive(Debug, Default)]
pub struct RawTransformer;

impl RawTransformer {
    pub fn new() -> Self {
        Self
    }
}

impl LineTransformer for RawTransformer {
    fn name(&self) -> &'static str {
        "raw"
    }

    fn transform(&mut self, line: &str) -> TransformResult<Emit> {
        Ok(Emit::Verbatim(line.to_string()))
    }
}
