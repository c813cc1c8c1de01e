use std::fmt;

use crate::model::SourceKind;

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (empty path, empty placeholder, bad tag, etc.).
    ConfigValidation(String),
    /// A required source was not supplied. Raised before any merge.
    SourceUnavailable(SourceKind),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::SourceUnavailable(kind) => {
                write!(f, "required {kind} source is unavailable; nothing to reconcile")
            }
        }
    }
}

impl std::error::Error for ReconError {}
