//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success                                  |
//! | 1       | Universal        | General error (unspecified)              |
//! | 2       | Universal        | CLI usage error (bad args, missing file) |
//! | 3       | Universal        | Local file read/write failure            |
//! | 50-59   | fetch            | Remote source documents                  |
//! | 60-69   | recon            | Corpus reconciliation                    |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

// =============================================================================
// Universal (0-3)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Cannot read an input file or write an output file.
pub const EXIT_IO: u8 = 3;

// =============================================================================
// Fetch (50-59) — remote source documents
// =============================================================================

/// Markup fetched fine but the expected text region is missing or unusable.
pub const EXIT_FETCH_EXTRACT: u8 = 50;

/// Access rejected by upstream (401/403).
pub const EXIT_FETCH_AUTH: u8 = 51;

/// Page not found or request rejected (other 4xx).
pub const EXIT_FETCH_NOT_FOUND: u8 = 52;

/// Rate limited after retries (429).
pub const EXIT_FETCH_RATE_LIMIT: u8 = 53;

/// Upstream error (5xx) or network failure after retries.
pub const EXIT_FETCH_UPSTREAM: u8 = 54;

// =============================================================================
// Recon (60-69)
// =============================================================================

/// Config failed to parse or validate.
pub const EXIT_RECON_INVALID_CONFIG: u8 = 60;

/// Config unreadable or output unwritable during a run.
pub const EXIT_RECON_RUNTIME: u8 = 61;

/// A configured source file is missing or unreadable. Nothing was merged.
pub const EXIT_RECON_SOURCE: u8 = 62;

/// Translation and transliteration counts differ and
/// `[alignment] fail_on_mismatch = true`. Output is still written.
pub const EXIT_RECON_MISMATCH: u8 = 63;
