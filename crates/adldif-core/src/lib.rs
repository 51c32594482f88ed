//! adldif core - attribute tables, line model and configuration
//!
//! This crate provides the shared vocabulary of the adldif workspace:
//!
//! - **Attributes**: case-folded attribute names and the classification tables
//! - **Line**: splitting one LDIF line into attribute, separator and value
//! - **Mode**: the raw / clean / bof selector
//! - **Config**: TOML configuration discovery and validation

pub mod attributes;
pub mod config;
pub mod line;
pub mod mode;

pub use attributes::{AttributeName, AttributeTables, UAC_FLAGS};
pub use config::{AdldifConfig, ConfigError, ConfigLoader};
pub use line::{AttributeValue, Encoding, Line};
pub use mode::Mode;

/// Record separator emitted by the bof transformer
pub const BOF_SEPARATOR: &str = "--------------------";
