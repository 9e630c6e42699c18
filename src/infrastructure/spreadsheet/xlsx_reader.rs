//! Excel workbook reader

use std::io::Cursor;

use calamine::{Reader, Xlsx};

use crate::domain::spreadsheet::{ParseError, SheetReader};

/// Reader for `.xlsx` workbooks; only the first worksheet is read
#[derive(Debug, Clone, Default)]
pub struct XlsxSheetReader;

impl XlsxSheetReader {
    pub fn new() -> Self {
        Self
    }
}

impl SheetReader for XlsxSheetReader {
    fn supported_extensions(&self) -> &[&str] {
        &["xlsx", "xlsm"]
    }

    fn read_rows(&self, bytes: &[u8]) -> Result<Vec<Vec<String>>, ParseError> {
        if bytes.is_empty() {
            return Err(ParseError::Empty);
        }

        let mut workbook = Xlsx::new(Cursor::new(bytes))
            .map_err(|e| ParseError::Unreadable(e.to_string()))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or(ParseError::NoWorksheet)?
            .map_err(|e| ParseError::Unreadable(e.to_string()))?;

        // The range begins at the first used cell; pad back to A1 so row
        // numbers in errors match the sheet.
        let Some((first_row, first_column)) = range.start() else {
            return Err(ParseError::Empty);
        };

        let mut rows = vec![Vec::new(); first_row as usize];
        rows.extend(range.rows().map(|row| {
            std::iter::repeat_n(String::new(), first_column as usize)
                .chain(row.iter().map(|cell| cell.to_string()))
                .collect::<Vec<String>>()
        }));

        Ok(rows)
    }
}
