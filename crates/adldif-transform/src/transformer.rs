//! Line transformer trait and the mode dispatcher

use std::sync::Arc;

use adldif_core::{AttributeTables, Mode};

use crate::bof::BofTransformer;
use crate::clean::CleanTransformer;
use crate::error::TransformResult;
use crate::raw::RawTransformer;

/// What a transformer produces for one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emit {
    /// Nothing is written
    Drop,
    /// Written exactly as given, terminator included
    Verbatim(String),
    /// Written followed by `\n`
    Line(String),
}

/// Per-line rewriting stage
pub trait LineTransformer {
    /// Transformer name
    fn name(&self) -> &'static str;

    /// Line written once before any input is read
    fn preamble(&self) -> Option<&'static str> {
        None
    }

    /// Process one input line, terminator included
    fn transform(&mut self, line: &str) -> TransformResult<Emit>;
}

/// Behaviour switches shared by the transformers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformOptions {
    /// Keep malformed SIDs as base64 instead of failing
    pub sid_fallback: bool,
}

/// The transformer selected for a run, one variant per [`Mode`]
pub enum Transformer {
    Raw(RawTransformer),
    Clean(CleanTransformer),
    Bof(BofTransformer),
}

impl Transformer {
    pub fn new(mode: Mode, tables: Arc<AttributeTables>, options: TransformOptions) -> Self {
        match mode {
            Mode::Raw => Transformer::Raw(RawTransformer::new()),
            Mode::Clean => Transformer::Clean(CleanTransformer::new(tables, options)),
            Mode::Bof => Transformer::Bof(BofTransformer::new(tables)),
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Transformer::Raw(_) => Mode::Raw,
            Transformer::Clean(_) => Mode::Clean,
            Transformer::Bof(_) => Mode::Bof,
        }
    }
}

impl LineTransformer for Transformer {
    fn name(&self) -> &'static str {
        match self {
            Transformer::Raw(t) => t.name(),
            Transformer::Clean(t) => t.name(),
            Transformer::Bof(t) => t.name(),
        }
    }

    fn preamble(&self) -> Option<&'static str> {
        match self {
            Transformer::Raw(t) => t.preamble(),
            Transformer::Clean(t) => t.preamble(),
            Transformer::Bof(t) => t.preamble(),
        }
    }

    fn transform(&mut self, line: &str) -> TransformResult<Emit> {
        match self {
            Transformer::Raw(t) => t.transform(line),
            Transformer::Clean(t) => t.transform(line),
            Transformer::Bof(t) => t.transform(line),
        }
    }
}
