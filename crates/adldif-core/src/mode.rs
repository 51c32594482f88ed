//! Output mode selection

use std::fmt;
use std::str::FromStr;

/// Which line transformer processes the stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Copy every line unchanged
    Raw,
    /// Decode values in place, keep LDIF layout
    #[default]
    Clean,
    /// Record layout expected by BOFHound-style ingestion
    Bof,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Raw, Mode::Clean, Mode::Bof];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Raw => "raw",
            Mode::Clean => "clean",
            Mode::Bof => "bof",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognized mode name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown mode: {0}. Must be one of: raw, clean, bof")]
pub struct UnknownMode(pub String);

impl FromStr for Mode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "raw" => Ok(Mode::Raw),
            "clean" => Ok(Mode::Clean),
            "bof" => Ok(Mode::Bof),
            _ => Err(UnknownMode(s.to_string())),
        }
    }
}
