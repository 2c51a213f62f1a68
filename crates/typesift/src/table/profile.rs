//! Per-column profiles of delimited data.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::reader::{ReaderConfig, read_columns};
use crate::error::{Result, TypesiftError};
use crate::inference::{Profiler, ProfilerConfig, TypeDistribution};
use crate::schema::DataType;

/// Table profiling configuration.
#[derive(Debug, Clone, Default)]
pub struct TableConfig {
    /// How the input is read.
    pub reader: ReaderConfig,
    /// How each column is folded.
    pub profiler: ProfilerConfig,
}

/// Profile of one column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnProfile {
    /// Column name (from the header or `column_N`).
    pub name: String,
    /// Dominant type of the column.
    pub data_type: DataType,
    /// Count of each type among the cells.
    pub distribution: TypeDistribution,
}

/// Profile of a whole table. Columns are profiled independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableProfile {
    pub columns: Vec<ColumnProfile>,
    /// Data rows read (excluding header).
    pub row_count: usize,
    /// Delimiter that was used.
    pub delimiter: char,
}

impl TableProfile {
    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnProfile> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Profiles every column of delimited text.
pub struct TableProfiler {
    config: TableConfig,
    profiler: Profiler,
}

impl TableProfiler {
    /// Create a table profiler with default configuration.
    pub fn new() -> Self {
        Self::with_config(TableConfig::default())
    }

    /// Create a table profiler with custom configuration.
    pub fn with_config(config: TableConfig) -> Self {
        let profiler = Profiler::with_config(config.profiler.clone());
        Self { config, profiler }
    }

    /// Profile a file.
    pub fn profile_path(&self, path: impl AsRef<Path>) -> Result<TableProfile> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|e| TypesiftError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).map_err(|e| TypesiftError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::debug!(path = %path.display(), bytes = bytes.len(), "profiling file");
        self.profile_bytes(&bytes)
    }

    /// Profile anything readable.
    pub fn profile_reader(&self, mut reader: impl Read) -> Result<TableProfile> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).map_err(TypesiftError::Read)?;
        self.profile_bytes(&bytes)
    }

    /// Profile in-memory delimited text.
    pub fn profile_bytes(&self, bytes: &[u8]) -> Result<TableProfile> {
        let table = read_columns(bytes, &self.config.reader)?;

        let columns = table
            .names
            .into_iter()
            .zip(&table.cells)
            .map(|(name, cells)| {
                let distribution = self.profiler.distribution(cells);
                ColumnProfile {
                    name,
                    data_type: distribution.dominant(),
                    distribution,
                }
            })
            .collect();

        Ok(TableProfile {
            columns,
            row_count: table.row_count,
            delimiter: table.delimiter as char,
        })
    }
}

impl Default for TableProfiler {
    fn default() -> Self {
        Self::new()
    }
}
