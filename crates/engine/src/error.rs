use std::fmt;
use std::path::PathBuf;

use crate::model::TableRole;

#[derive(Debug)]
pub enum SanityError {
    /// Input path does not carry the expected file extension.
    InvalidFormat { path: PathBuf, expected: String },
    /// Input path does not resolve to an existing file.
    NotFound { path: PathBuf },
    /// Required column(s) absent from a loaded table.
    Schema { table: TableRole, missing: Vec<String> },
    /// Underlying delimited-text parse failure.
    Load { path: PathBuf, message: String },
    /// Destination cannot be written.
    Write { path: PathBuf, message: String },
    /// TOML parse / deserialization / validation error.
    Config(String),
}

impl fmt::Display for SanityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat { path, expected } => {
                write!(f, "only .{expected} files are allowed: {}", path.display())
            }
            Self::NotFound { path } => {
                write!(f, "filepath: {} invalid or not found", path.display())
            }
            Self::Schema { table, missing } => {
                let quoted: Vec<String> = missing.iter().map(|c| format!("'{c}'")).collect();
                write!(f, "{table} file must contain the {} column(s)", quoted.join(", "))
            }
            Self::Load { path, message } => {
                write!(f, "error reading {}: {message}", path.display())
            }
            Self::Write { path, message } => {
                write!(f, "cannot write {}: {message}", path.display())
            }
            Self::Config(msg) => write!(f, "config error: {msg}"),
        }
    }
}

impl std::error::Error for SanityError {}
