//! Excel adapter for `.xlsx` and legacy `.xls` workbooks
//!
//! Both formats go through calamine; the only per-format difference is which
//! reader opens the file. The first row of the chosen sheet is the header.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{Data, Reader, Xls, Xlsx, open_workbook};

use super::{CellValue, Row, TabularSource, zip_row};
use crate::generate::GenerateError;

/// Spreadsheet formats the adapter can read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExcelFormat {
    /// Office Open XML workbook
    Xlsx,
    /// Legacy BIFF workbook
    Xls,
}

impl ExcelFormat {
    /// Detect the format from the file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self, GenerateError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "xlsx" => Ok(ExcelFormat::Xlsx),
            "xls" => Ok(ExcelFormat::Xls),
            _ => Err(GenerateError::UnsupportedFormat(
                path.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string()),
            )),
        }
    }
}

impl std::fmt::Display for ExcelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExcelFormat::Xlsx => write!(f, "xlsx"),
            ExcelFormat::Xls => write!(f, "xls"),
        }
    }
}

/// One worksheet read into memory
#[derive(Debug, Clone)]
pub struct ExcelSource {
    sheet_name: String,
    format: ExcelFormat,
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl ExcelSource {
    /// Read a worksheet from an Excel file.
    ///
    /// Reads `sheet` when given, otherwise the first sheet in the workbook.
    pub fn open<P: AsRef<Path>>(path: P, sheet: Option<&str>) -> Result<Self, GenerateError> {
        let path = path.as_ref();
        let format = ExcelFormat::from_path(path)?;

        log::debug!("Opening {} workbook: {}", format, path.display());

        match format {
            ExcelFormat::Xlsx => {
                let workbook: Xlsx<_> = open_workbook(path).map_err(|e| {
                    GenerateError::read_failure(format!(
                        "failed to open Excel file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                read_sheet(workbook, format, sheet)
            }
            ExcelFormat::Xls => {
                let workbook: Xls<_> = open_workbook(path).map_err(|e| {
                    GenerateError::read_failure(format!(
                        "failed to open Excel file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                read_sheet(workbook, format, sheet)
            }
        }
    }

    /// List the sheet names of an Excel file in workbook order
    pub fn sheet_names<P: AsRef<Path>>(path: P) -> Result<Vec<String>, GenerateError> {
        let path = path.as_ref();
        let open_err = |e: &dyn std::fmt::Display| {
            GenerateError::read_failure(format!(
                "failed to open Excel file {}: {}",
                path.display(),
                e
            ))
        };

        match ExcelFormat::from_path(path)? {
            ExcelFormat::Xlsx => {
                let workbook: Xlsx<_> = open_workbook(path).map_err(|e| open_err(&e))?;
                Ok(workbook.sheet_names())
            }
            ExcelFormat::Xls => {
                let workbook: Xls<_> = open_workbook(path).map_err(|e| open_err(&e))?;
                Ok(workbook.sheet_names())
            }
        }
    }

    /// Name of the sheet that was read
    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    /// Format of the file the sheet came from
    pub fn format(&self) -> ExcelFormat {
        self.format
    }
}

impl TabularSource for ExcelSource {
    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn rows(&self) -> &[Row] {
        &self.rows
    }
}

/// Read the chosen sheet of an open workbook into an [`ExcelSource`]
fn read_sheet<R>(
    mut workbook: R,
    format: ExcelFormat,
    sheet: Option<&str>,
) -> Result<ExcelSource, GenerateError>
where
    R: Reader<BufReader<File>>,
    R::Error: std::fmt::Display,
{
    let sheet_names = workbook.sheet_names();

    let sheet_name = match sheet {
        Some(name) => {
            if !sheet_names.iter().any(|s| s == name) {
                return Err(GenerateError::read_failure(format!(
                    "sheet '{}' not found (available: {})",
                    name,
                    sheet_names.join(", ")
                )));
            }
            name.to_string()
        }
        None => sheet_names
            .first()
            .cloned()
            .ok_or_else(|| GenerateError::read_failure("Excel file has no sheets"))?,
    };

    let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
        GenerateError::read_failure(format!("failed to read sheet {}: {}", sheet_name, e))
    })?;

    // calamine trims leading empty rows and columns from the range; put them
    // back so the header is always sheet row 1 and column indexes match letters
    let (first_row, first_col) = range
        .start()
        .map_or((0, 0), |(row, col)| (row as usize, col as usize));
    let mut rows_iter = range.rows();

    let columns: Vec<String> = if first_row > 0 {
        log::warn!("Sheet '{}' has an empty header row", sheet_name);
        Vec::new()
    } else {
        match rows_iter.next() {
            Some(header) => std::iter::repeat_n(String::new(), first_col)
                .chain(header.iter().map(header_name))
                .collect(),
            None => Vec::new(),
        }
    };

    let blank_headers = columns.iter().filter(|c| c.is_empty()).count();
    if blank_headers > 0 {
        log::warn!(
            "Sheet '{}' has {} blank header cell(s); those columns are ignored",
            sheet_name,
            blank_headers
        );
    }

    // Sheet rows 2..=first_row are empty when the range starts below the header
    let rows: Vec<Row> = std::iter::repeat_n(Row::new(), first_row.saturating_sub(1))
        .chain(rows_iter.map(|cells| zip_row(&columns, padded(cells, first_col, columns.len()))))
        .collect();

    log::info!(
        "Read sheet '{}': {} column(s), {} data row(s)",
        sheet_name,
        columns.len(),
        rows.len()
    );

    Ok(ExcelSource {
        sheet_name,
        format,
        columns,
        rows,
    })
}

/// Stringify a header cell. Numeric headers keep their whole-number form.
fn header_name(cell: &Data) -> String {
    match CellValue::from_cell(cell) {
        CellValue::Text(s) => s.trim().to_string(),
        other => other.to_text(),
    }
}

/// Cells of one sheet row, shifted right by `offset` blank columns and padded
/// with blanks up to the header width
fn padded(cells: &[Data], offset: usize, width: usize) -> impl Iterator<Item = CellValue> + '_ {
    std::iter::repeat_n(CellValue::Blank, offset)
        .chain(cells.iter().map(CellValue::from_cell))
        .chain(std::iter::repeat(CellValue::Blank))
        .take(width.max(offset + cells.len()))
}
