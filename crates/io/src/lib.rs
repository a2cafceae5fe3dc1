// File I/O operations

pub mod check;
pub mod csv;

pub use self::check::check_file;
pub use self::csv::{load_table, write_table};
