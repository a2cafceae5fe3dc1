//! Library half of `predcheck`: the end-to-end pipeline and run report,
//! shared by the binary and integration tests.

pub mod pipeline;
pub mod report;
