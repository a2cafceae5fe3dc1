use crate::error::SanityError;
use crate::model::TableRole;

/// Resolve each required column to its header position.
///
/// Every absent column is collected before failing, so one error names all
/// of them. When a header repeats, the first occurrence wins.
pub fn require_columns(
    table: TableRole,
    headers: &[String],
    required: &[&str],
) -> Result<Vec<usize>, SanityError> {
    let mut positions = Vec::with_capacity(required.len());
    let mut missing = Vec::new();

    for &name in required {
        match headers.iter().position(|h| h == name) {
            Some(pos) => positions.push(pos),
            None => missing.push(name.to_string()),
        }
    }

    if !missing.is_empty() {
        return Err(SanityError::Schema { table, missing });
    }
    Ok(positions)
}
