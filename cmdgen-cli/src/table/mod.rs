//! Tabular sources: a header row plus data rows keyed by column name
//!
//! Every spreadsheet format is read into the same shape, so the engine never
//! needs to know where the rows came from.

mod excel;
mod memory;
mod value;

use std::collections::HashMap;

pub use excel::{ExcelFormat, ExcelSource};
pub use memory::MemorySource;
pub use value::{CellValue, format_number};

/// One data row, mapping column name to cell value
pub type Row = HashMap<String, CellValue>;

/// Read contract shared by every input adapter
pub trait TabularSource {
    /// Column names in sheet order. Blank header cells appear as empty strings.
    fn columns(&self) -> &[String];

    /// Data rows in sheet order, excluding the header
    fn rows(&self) -> &[Row];

    /// Check whether a column with this exact (case-sensitive) name exists
    fn has_column(&self, name: &str) -> bool {
        !name.is_empty() && self.columns().iter().any(|c| c == name)
    }
}

/// Zip a header with one row of cells, the way every adapter builds rows.
///
/// Blank header cells map nothing. When a name repeats, the rightmost column wins.
/// Rows shorter than the header leave the remaining columns unset.
pub(crate) fn zip_row<I>(columns: &[String], cells: I) -> Row
where
    I: IntoIterator<Item = CellValue>,
{
    let mut row = Row::with_capacity(columns.len());
    for (name, cell) in columns.iter().zip(cells) {
        if name.is_empty() {
            continue;
        }
        row.insert(name.clone(), cell);
    }
    row
}
