//! Comma-separated sheet reader

use crate::domain::spreadsheet::{ParseError, SheetReader};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Reader for CSV uploads
#[derive(Debug, Clone, Default)]
pub struct CsvSheetReader;

impl CsvSheetReader {
    pub fn new() -> Self {
        Self
    }
}

fn strip_bom(data: &[u8]) -> &[u8] {
    data.strip_prefix(UTF8_BOM).unwrap_or(data)
}

impl SheetReader for CsvSheetReader {
    fn supported_extensions(&self) -> &[&str] {
        &["csv", "txt"]
    }

    fn read_rows(&self, bytes: &[u8]) -> Result<Vec<Vec<String>>, ParseError> {
        let data = strip_bom(bytes);
        if data.iter().all(u8::is_ascii_whitespace) {
            return Err(ParseError::Empty);
        }

        // Short rows are reported by row conversion, not by the reader
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(data);

        reader
            .records()
            .map(|record| {
                record
                    .map(|r| r.iter().map(str::to_string).collect::<Vec<_>>())
                    .map_err(|e| ParseError::Unreadable(e.to_string()))
            })
            .collect()
    }
}
