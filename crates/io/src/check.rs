// Input path checks, run before any table is parsed.

use std::path::Path;

use predcheck_engine::SanityError;

/// Confirm `path` carries the expected extension and names an existing file.
///
/// The extension is compared case-insensitively and checked first, so a
/// wrong-format path is reported as such even when it also does not exist.
pub fn check_file(path: &Path, expected_extension: &str) -> Result<(), SanityError> {
    let expected = expected_extension.trim_start_matches('.');
    let ext_ok = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(expected));
    if !ext_ok {
        return Err(SanityError::InvalidFormat {
            path: path.to_path_buf(),
            expected: expected.to_ascii_lowercase(),
        });
    }

    if !path.is_file() {
        return Err(SanityError::NotFound { path: path.to_path_buf() });
    }

    Ok(())
}
