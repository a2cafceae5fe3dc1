//! CLI Exit Code Registry
//!
//! Single source of truth for `predcheck` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                         |
//! |------|-------------------------------------------------|
//! | 0    | Success (repaired file written)                 |
//! | 2    | Usage error (bad arguments, reported by clap)   |
//! | 3    | Input has the wrong file extension              |
//! | 4    | Input file not found                            |
//! | 5    | Required column missing                         |
//! | 6    | Input could not be parsed as delimited text     |
//! | 7    | Repaired file or report could not be written    |
//! | 8    | Config file unreadable or invalid               |
//!
//! Rows that fail prediction parsing are repaired, not errors, and never
//! change the exit code.

use predcheck_engine::SanityError;

/// Success - repaired file written.
pub const EXIT_SUCCESS: u8 = 0;

/// Usage error - clap exits with this for bad arguments.
#[allow(dead_code)]
pub const EXIT_USAGE: u8 = 2;

/// Wrong file extension on an input path.
pub const EXIT_INVALID_FORMAT: u8 = 3;

/// Input path does not exist or is not a file.
pub const EXIT_NOT_FOUND: u8 = 4;

/// Required column absent from the test or output table.
pub const EXIT_SCHEMA: u8 = 5;

/// Malformed delimited text.
pub const EXIT_LOAD: u8 = 6;

/// Destination cannot be written.
pub const EXIT_WRITE: u8 = 7;

/// Config file cannot be read or fails validation.
pub const EXIT_CONFIG: u8 = 8;

/// Map a SanityError to its exit code.
pub fn sanity_exit_code(err: &SanityError) -> u8 {
    match err {
        SanityError::InvalidFormat { .. } => EXIT_INVALID_FORMAT,
        SanityError::NotFound { .. } => EXIT_NOT_FOUND,
        SanityError::Schema { .. } => EXIT_SCHEMA,
        SanityError::Load { .. } => EXIT_LOAD,
        SanityError::Write { .. } => EXIT_WRITE,
        SanityError::Config(_) => EXIT_CONFIG,
    }
}
