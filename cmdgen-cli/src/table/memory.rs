//! In-memory tabular source

use super::{CellValue, Row, TabularSource, zip_row};

/// A tabular source held entirely in memory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySource {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl MemorySource {
    /// Create an empty source with the given header
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row given as cells in header order
    pub fn push_cells<V: Into<CellValue>>(&mut self, cells: impl IntoIterator<Item = V>) {
        let row = zip_row(&self.columns, cells.into_iter().map(Into::into));
        self.rows.push(row);
    }

    /// Append a row given as a ready-made mapping
    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Builder-style variant of [`push_cells`](Self::push_cells)
    pub fn with_cells<V: Into<CellValue>>(mut self, cells: impl IntoIterator<Item = V>) -> Self {
        self.push_cells(cells);
        self
    }
}

impl TabularSource for MemorySource {
    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn rows(&self) -> &[Row] {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_source() {
        let source = MemorySource::new(["x", "y"])
            .with_cells([Some(1001_i64), Some(5)])
            .with_cells([None, Some(6_i64)]);

        assert_eq!(source.columns(), ["x".to_string(), "y".to_string()]);
        assert_eq!(source.rows().len(), 2);
        assert_eq!(source.rows()[1].get("x"), Some(&CellValue::Blank));
        assert!(source.has_column("y"));
        assert!(!source.has_column("Y"));
        assert!(!source.has_column(""));
    }
}
