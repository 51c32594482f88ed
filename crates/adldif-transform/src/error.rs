//! Error types for adldif-transform crate

use adldif_decode::DecodeError;
use thiserror::Error;

/// Fatal conditions that stop the stream
#[derive(Debug, Error)]
pub enum TransformError {
    /// Reading input or writing output failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A value with no fallback could not be decoded
    #[error("Failed to decode {attribute}: {source}")]
    Decode {
        attribute: String,
        #[source]
        source: DecodeError,
    },

    /// Error raised while processing a specific input line
    #[error("Line {line}: {source}")]
    Line {
        line: u64,
        #[source]
        source: Box<TransformError>,
    },
}

impl TransformError {
    pub fn decode(attribute: impl Into<String>, source: DecodeError) -> Self {
        TransformError::Decode {
            attribute: attribute.into(),
            source,
        }
    }

    /// Attach the 1-based input line number
    pub fn at_line(self, line: u64) -> Self {
        TransformError::Line {
            line,
            source: Box::new(self),
        }
    }

    /// The downstream reader went away (e.g. `| head`)
    pub fn is_broken_pipe(&self) -> bool {
        match self {
            TransformError::Io(e) => e.kind() == std::io::ErrorKind::BrokenPipe,
            TransformError::Line { source, .. } => source.is_broken_pipe(),
            TransformError::Decode { .. } => false,
        }
    }
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;
