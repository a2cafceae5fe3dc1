//! Machine-readable summary of a run, written with `--report`.

use std::path::{Path, PathBuf};

use predcheck_engine::{IdReconciliation, SanitizeSummary, SanityError};
use serde::Serialize;

use crate::pipeline::{RunOutcome, RunPaths};

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub meta: ReportMeta,
    pub files: ReportFiles,
    pub reconciliation: IdReconciliation,
    pub sanitize: SanitizeSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMeta {
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportFiles {
    pub test: String,
    pub output: String,
    pub repaired: String,
}

impl RunReport {
    pub fn new(paths: &RunPaths, outcome: &RunOutcome) -> Self {
        Self {
            meta: ReportMeta {
                engine_version: env!("CARGO_PKG_VERSION").to_string(),
                run_at: chrono::Utc::now().to_rfc3339(),
            },
            files: ReportFiles {
                test: paths.test.display().to_string(),
                output: paths.output.display().to_string(),
                repaired: paths.repaired.display().to_string(),
            },
            reconciliation: outcome.reconciliation.clone(),
            sanitize: outcome.sanitize.clone(),
        }
    }

    /// Serialize for `path` without writing anything yet.
    pub fn render(&self, path: &Path) -> Result<RenderedReport, SanityError> {
        let json = serde_json::to_string_pretty(self).map_err(|e| SanityError::Write {
            path: path.to_path_buf(),
            message: format!("JSON serialization error: {e}"),
        })?;
        Ok(RenderedReport {
            path: path.to_path_buf(),
            json,
        })
    }
}

/// A serialized report waiting to be written.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    path: PathBuf,
    json: String,
}

impl RenderedReport {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self) -> Result<(), SanityError> {
        std::fs::write(&self.path, &self.json).map_err(|e| SanityError::Write {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }
}
