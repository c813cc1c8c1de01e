//! `samhita-recon` — verse corpus reconciliation engine.
//!
//! Pure engine crate: receives fully loaded source texts, returns one merged
//! record per verse of the transliteration. No CLI, network or file IO.
//!
//! Pipeline: [`numerals`] + [`key`] → [`fragments`] (per keyed source) →
//! [`engine`] (keyed join, with [`align`] pairing the unkeyed translation).

pub mod align;
pub mod config;
pub mod engine;
pub mod error;
pub mod fragments;
pub mod key;
pub mod model;
pub mod native;
pub mod numerals;
pub mod summary;
pub mod translation;

pub use config::{ReconConfig, DEFAULT_PLACEHOLDER};
pub use engine::run;
pub use error::ReconError;
pub use key::VerseKey;
pub use model::{ReconInput, ReconResult, ReconSummary, SourceKind, StructuralMismatch, VerseRecord};
