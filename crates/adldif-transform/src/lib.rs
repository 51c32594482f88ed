//! Line transformers for adldif
//!
//! Each [`Mode`](adldif_core::Mode) has one transformer:
//!
//! - **raw**: identity
//! - **clean**: decode values in place, keep LDIF layout
//! - **bof**: one `attr: value` per line, records split by a separator
//!
//! [`Transformer`] selects one of them once per run and [`Pipeline`]
//! streams input lines through it.

pub mod bof;
pub mod clean;
pub mod error;
pub mod pipeline;
pub mod raw;
pub mod transformer;

pub use bof::BofTransformer;
pub use clean::CleanTransformer;
pub use error::{TransformError, TransformResult};
pub use pipeline::{Pipeline, PipelineStats};
pub use raw::RawTransformer;
pub use transformer::{Emit, LineTransformer, TransformOptions, Transformer};
