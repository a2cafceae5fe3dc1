//! `predcheck-engine`: prediction file sanity engine.
//!
//! Pure engine crate: receives pre-loaded tables, returns reconciliation and
//! sanitize results. No CLI or IO dependencies.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod model;
pub mod reconcile;
pub mod sanitize;
pub mod schema;
pub mod units;

pub use config::SanityConfig;
pub use diagnostics::Diagnostics;
pub use error::SanityError;
pub use model::{OutputRow, OutputTable, RawTable, ReferenceTable, TableRole};
pub use reconcile::{reconcile_ids, IdReconciliation};
pub use sanitize::{sanitize, SanitizeSummary};
pub use units::{PredictionParser, Quantity, UnitParseError, UnitParser};
