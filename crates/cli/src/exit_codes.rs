//! CLI Exit Code Registry
//!
//! Single source of truth for `rollcall` exit codes. Scripts wrapping the
//! CLI rely on these values.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain    | Description                              |
//! |---------|-----------|------------------------------------------|
//! | 0       | Universal | Success                                  |
//! | 1       | Universal | General error (unspecified)              |
//! | 2       | Universal | CLI usage error (bad args)               |
//! | 3-9     | input     | Reading and decoding session input       |
//! | 20-29   | recon     | Config, roster and session selection     |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Map it in [`recon_exit_code`] if it comes from the engine

use rollcall_recon::ReconError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Input (3-9)
// =============================================================================

/// Cannot read or write a file (or stdin).
pub const EXIT_IO: u8 = 3;

/// Session input is not valid JSON or has the wrong shape.
pub const EXIT_INVALID_JSON: u8 = 4;

// =============================================================================
// Recon (20-29)
// =============================================================================

/// Config failed to parse or validate.
pub const EXIT_RECON_INVALID_CONFIG: u8 = 20;

/// Roster CSV unreadable or missing a required column.
pub const EXIT_RECON_ROSTER: u8 = 21;

/// `--session` named an id not present in the input.
pub const EXIT_RECON_UNKNOWN_SESSION: u8 = 22;

/// Map an engine error to its exit code.
pub fn recon_exit_code(err: &ReconError) -> u8 {
    match err {
        ReconError::ConfigParse(_) | ReconError::ConfigValidation(_) => EXIT_RECON_INVALID_CONFIG,
        ReconError::SessionParse(_) => EXIT_INVALID_JSON,
        ReconError::MissingColumn { .. } | ReconError::Roster { .. } => EXIT_RECON_ROSTER,
        ReconError::Io(_) => EXIT_IO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let codes = [
            EXIT_SUCCESS,
            EXIT_ERROR,
            EXIT_USAGE,
            EXIT_IO,
            EXIT_INVALID_JSON,
            EXIT_RECON_INVALID_CONFIG,
            EXIT_RECON_ROSTER,
            EXIT_RECON_UNKNOWN_SESSION,
        ];
        let mut sorted = codes.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), codes.len());
    }

    #[test]
    fn engine_errors_map_to_ranges() {
        assert_eq!(recon_exit_code(&ReconError::ConfigValidation("x".into())), 20);
        assert_eq!(recon_exit_code(&ReconError::SessionParse("x".into())), 4);
        assert_eq!(
            recon_exit_code(&ReconError::MissingColumn { file: "a.csv".into(), column: "email".into() }),
            21
        );
        assert_eq!(recon_exit_code(&ReconError::Io("x".into())), 3);
    }
}
