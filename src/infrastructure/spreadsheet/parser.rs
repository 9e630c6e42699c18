//! Spreadsheet parser with format detection

use std::sync::Arc;

use tracing::debug;

use super::csv_reader::CsvSheetReader;
use super::xlsx_reader::XlsxSheetReader;
use crate::domain::spreadsheet::{rows_to_requests, ParseError, SheetReader, UploadedFile};
use crate::domain::TeamRequest;

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Turns uploaded spreadsheets into team requests
#[derive(Debug, Clone)]
pub struct SpreadsheetParser {
    csv: Arc<dyn SheetReader>,
    readers: Vec<Arc<dyn SheetReader>>,
    zip: Arc<dyn SheetReader>,
}

impl SpreadsheetParser {
    pub fn new() -> Self {
        let csv: Arc<dyn SheetReader> = Arc::new(CsvSheetReader::new());
        let xlsx: Arc<dyn SheetReader> = Arc::new(XlsxSheetReader::new());

        Self {
            readers: vec![csv.clone(), xlsx.clone()],
            csv,
            zip: xlsx,
        }
    }

    /// Parse the whole file; any bad row rejects it
    pub fn parse(&self, file: &UploadedFile) -> Result<Vec<TeamRequest>, ParseError> {
        if file.bytes.is_empty() {
            return Err(ParseError::Empty);
        }

        let reader = self.reader_for(file);
        let rows = reader.read_rows(&file.bytes)?;
        let requests = rows_to_requests(rows)?;

        debug!(
            file = file.name.as_deref().unwrap_or("<unnamed>"),
            teams = requests.len(),
            "Parsed spreadsheet"
        );

        Ok(requests)
    }

    /// Reader chosen by extension, then by content
    pub fn reader_for(&self, file: &UploadedFile) -> Arc<dyn SheetReader> {
        if let Some(extension) = file.extension() {
            if let Some(reader) = self
                .readers
                .iter()
                .find(|reader| reader.supports_extension(&extension))
            {
                return reader.clone();
            }
        }

        if file.bytes.starts_with(ZIP_MAGIC) {
            self.zip.clone()
        } else {
            self.csv.clone()
        }
    }
}

impl Default for SpreadsheetParser {
    fn default() -> Self {
        Self::new()
    }
}
