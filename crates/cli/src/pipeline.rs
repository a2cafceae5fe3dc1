// End-to-end sanity run: check inputs, load, reconcile, sanitize, write.
// Stages run in a fixed order; the first fatal error aborts the run before
// anything is written.

use std::fs;
use std::path::PathBuf;

use predcheck_engine::{
    reconcile_ids, sanitize, Diagnostics, IdReconciliation, OutputTable, PredictionParser,
    ReferenceTable, SanitizeSummary, SanityConfig, SanityError,
};
use predcheck_io::{check_file, load_table, write_table};

use crate::report::RunReport;

#[derive(Debug, Clone)]
pub struct RunPaths {
    /// Reference (test) table.
    pub test: PathBuf,
    /// Table under validation.
    pub output: PathBuf,
    /// Destination for the repaired table.
    pub repaired: PathBuf,
    /// Optional JSON run report.
    pub report: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub reconciliation: IdReconciliation,
    pub sanitize: SanitizeSummary,
}

pub fn run<P>(
    config: &SanityConfig,
    parser: &P,
    paths: &RunPaths,
    diag: &mut dyn Diagnostics,
) -> Result<RunOutcome, SanityError>
where
    P: PredictionParser + ?Sized,
{
    let extension = config.extension();
    check_file(&paths.test, &extension)?;
    check_file(&paths.output, &extension)?;

    let delimiter = config.delimiter_byte();

    // The test table must pass its schema check before the output is read.
    let reference = ReferenceTable::from_raw(load_table(&paths.test, delimiter)?, &config.columns)?;
    let mut output = OutputTable::from_raw(load_table(&paths.output, delimiter)?, &config.columns)?;

    let reconciliation = reconcile_ids(reference.ids.iter().map(String::as_str), output.ids());
    reconciliation.report(diag);

    let summary = sanitize(&mut output, parser, diag);
    diag.emit(format!("Parsing successful for file: {}", paths.output.display()));

    let outcome = RunOutcome {
        reconciliation,
        sanitize: summary,
    };

    // Rendered before either file is written.
    let report = match &paths.report {
        Some(path) => Some(RunReport::new(paths, &outcome).render(path)?),
        None => None,
    };

    write_table(&output, &paths.repaired, delimiter)?;
    if let Some(report) = &report {
        if let Err(err) = report.write() {
            // A failed run must not leave a repaired file on disk.
            let _ = fs::remove_file(&paths.repaired);
            return Err(err);
        }
    }

    diag.emit(format!("Successfully saved updated output to {}", paths.repaired.display()));
    if let Some(report) = &report {
        diag.emit(format!("wrote report {}", report.path().display()));
    }

    Ok(outcome)
}
