//! Column-by-column profiling of delimited text.

mod profile;
mod reader;

pub use profile::{ColumnProfile, TableConfig, TableProfile, TableProfiler};
pub use reader::ReaderConfig;
