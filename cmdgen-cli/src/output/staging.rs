//! Temporary copies of uploaded spreadsheets

use std::io::{Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::generate::GenerateError;
use crate::table::{ExcelFormat, ExcelSource};

/// An uploaded spreadsheet written to a temporary file.
///
/// The file is deleted when the value is dropped, whether or not the
/// generation that used it succeeded.
#[derive(Debug)]
pub struct StagedInput {
    file: NamedTempFile,
    format: ExcelFormat,
    original_name: String,
}

impl StagedInput {
    /// Stage an upload from a reader, rejecting it past `max_bytes`.
    ///
    /// The format is decided from `original_name` before anything is written.
    pub fn from_reader<R: Read>(
        original_name: &str,
        reader: R,
        max_bytes: u64,
    ) -> Result<Self, GenerateError> {
        let format = ExcelFormat::from_path(Path::new(original_name))?;

        let mut file = tempfile::Builder::new()
            .prefix("cmdgen-upload-")
            .suffix(&format!(".{}", format))
            .tempfile()?;

        // Read one byte past the cap so oversize uploads are detected without buffering them
        let copied = std::io::copy(&mut reader.take(max_bytes.saturating_add(1)), file.as_file_mut())?;
        if copied > max_bytes {
            return Err(GenerateError::read_failure(format!(
                "upload '{}' exceeds the {} byte limit",
                original_name, max_bytes
            )));
        }
        file.as_file_mut().flush()?;

        log::debug!(
            "Staged upload '{}' ({} bytes) at {}",
            original_name,
            copied,
            file.path().display()
        );

        Ok(Self {
            file,
            format,
            original_name: original_name.to_string(),
        })
    }

    /// Stage an upload held in memory
    pub fn from_bytes(
        original_name: &str,
        bytes: &[u8],
        max_bytes: u64,
    ) -> Result<Self, GenerateError> {
        Self::from_reader(original_name, bytes, max_bytes)
    }

    /// Path of the staged copy
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Spreadsheet format of the upload
    pub fn format(&self) -> ExcelFormat {
        self.format
    }

    /// File name the upload arrived with
    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    /// Read a sheet of the staged workbook
    pub fn open(&self, sheet: Option<&str>) -> Result<ExcelSource, GenerateError> {
        ExcelSource::open(self.path(), sheet)
    }
}
