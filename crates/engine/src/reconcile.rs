// Identifier reconciliation between the reference and output tables.
// Purely observational: reports differences, never fails, never mutates.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::diagnostics::Diagnostics;
use crate::model::normalize_id;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IdReconciliation {
    /// Expected by the reference table, absent from the output.
    pub missing: BTreeSet<String>,
    /// Present in the output, not expected by the reference table.
    pub extra: BTreeSet<String>,
    /// Output identifiers appearing more than once, with their counts.
    pub duplicates: BTreeMap<String, usize>,
}

impl IdReconciliation {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty() && self.duplicates.is_empty()
    }

    /// Emit one line per non-empty finding.
    pub fn report(&self, diag: &mut dyn Diagnostics) {
        if !self.missing.is_empty() {
            diag.emit(format!("Missing index in output file: {}", format_set(&self.missing)));
        }
        if !self.extra.is_empty() {
            diag.emit(format!("Extra index in output file: {}", format_set(&self.extra)));
        }
        if !self.duplicates.is_empty() {
            let parts: Vec<String> = self
                .duplicates
                .iter()
                .map(|(id, count)| format!("{id} (x{count})"))
                .collect();
            diag.emit(format!("Duplicate index in output file: {}", parts.join(", ")));
        }
    }
}

/// Compute `reference − output` and `output − reference` over normalized ids.
pub fn reconcile_ids<'a, R, O>(reference: R, output: O) -> IdReconciliation
where
    R: IntoIterator<Item = &'a str>,
    O: IntoIterator<Item = &'a str>,
{
    let reference_ids: BTreeSet<String> = reference.into_iter().map(normalize_id).collect();

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for id in output {
        *counts.entry(normalize_id(id)).or_insert(0) += 1;
    }

    let missing = reference_ids
        .iter()
        .filter(|id| !counts.contains_key(*id))
        .cloned()
        .collect();
    let extra = counts
        .keys()
        .filter(|id| !reference_ids.contains(*id))
        .cloned()
        .collect();
    let duplicates = counts.into_iter().filter(|(_, n)| *n > 1).collect();

    IdReconciliation { missing, extra, duplicates }
}

fn format_set(ids: &BTreeSet<String>) -> String {
    let joined: Vec<&str> = ids.iter().map(|s| s.as_str()).collect();
    format!("{{{}}}", joined.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn identical_sets_are_clean() {
        let r = reconcile_ids(["1", "2", "3"], ["3", "1", "2"]);
        assert!(r.is_clean());

        let mut lines: Vec<String> = Vec::new();
        r.report(&mut lines);
        assert!(lines.is_empty());
    }

    #[test]
    fn symmetric_differences() {
        let r = reconcile_ids(["1", "2", "3"], ["2", "3", "4", "5"]);
        assert_eq!(r.missing, set(&["1"]));
        assert_eq!(r.extra, set(&["4", "5"]));
        assert!(r.duplicates.is_empty());
    }

    #[test]
    fn integer_ids_compare_by_value() {
        let r = reconcile_ids(["7", " 8"], ["007", "8 "]);
        assert!(r.is_clean());
    }

    #[test]
    fn duplicates_counted() {
        let r = reconcile_ids(["1", "2"], ["1", "2", "2", "2"]);
        assert_eq!(r.duplicates.get("2"), Some(&3));
        assert!(r.missing.is_empty());
        assert!(r.extra.is_empty());
    }

    #[test]
    fn report_lines_only_for_non_empty_sets() {
        let r = reconcile_ids(["1", "2"], ["2", "9"]);
        let mut lines: Vec<String> = Vec::new();
        r.report(&mut lines);
        assert_eq!(
            lines,
            vec![
                "Missing index in output file: {1}".to_string(),
                "Extra index in output file: {9}".to_string(),
            ]
        );
    }

    #[test]
    fn report_line_for_duplicates() {
        let r = reconcile_ids(["1", "2"], ["1", "2", "2"]);
        let mut lines: Vec<String> = Vec::new();
        r.report(&mut lines);
        assert_eq!(lines, vec!["Duplicate index in output file: 2 (x2)".to_string()]);
    }

    #[test]
    fn empty_output_reports_everything_missing() {
        let r = reconcile_ids(["a", "b"], std::iter::empty());
        assert_eq!(r.missing, set(&["a", "b"]));
        assert!(r.extra.is_empty());
    }
}
