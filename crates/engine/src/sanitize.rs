// Per-row validate-or-blank pass over the output table.
// Rows are never dropped or reordered; only `prediction` may change, and
// only to the empty string.

use serde::Serialize;

use crate::diagnostics::Diagnostics;
use crate::model::OutputTable;
use crate::units::PredictionParser;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlankedRow {
    /// Zero-based position in the output table.
    pub row: usize,
    pub index: String,
    pub reason: String,
    /// True when the prediction was already empty before sanitizing.
    pub was_empty: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SanitizeSummary {
    pub rows: usize,
    pub kept: usize,
    pub blanked: Vec<BlankedRow>,
}

impl SanitizeSummary {
    /// Rows whose prediction was rewritten from non-empty text to empty.
    pub fn rewritten(&self) -> usize {
        self.blanked.iter().filter(|b| !b.was_empty).count()
    }
}

/// Run the prediction parser on every row, blanking predictions it rejects.
pub fn sanitize<P>(
    table: &mut OutputTable,
    parser: &P,
    diag: &mut dyn Diagnostics,
) -> SanitizeSummary
where
    P: PredictionParser + ?Sized,
{
    let mut summary = SanitizeSummary {
        rows: table.rows.len(),
        ..SanitizeSummary::default()
    };

    for (pos, row) in table.rows.iter_mut().enumerate() {
        diag.emit(format!("Parsing index {}", row.index));

        match parser.parse(&row.prediction) {
            Ok(_) => summary.kept += 1,
            Err(e) => {
                diag.emit(format!("Invalid format for index {}: {e}", row.index));
                summary.blanked.push(BlankedRow {
                    row: pos,
                    index: row.index.clone(),
                    reason: e.to_string(),
                    was_empty: row.prediction.is_empty(),
                });
                row.prediction.clear();
            }
        }
    }

    summary
}
