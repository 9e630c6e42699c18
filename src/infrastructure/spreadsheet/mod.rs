//! Spreadsheet readers
//!
//! CSV and XLSX readers behind [`SheetReader`](crate::domain::SheetReader),
//! plus the parser that picks one per upload.

mod csv_reader;
mod parser;
mod xlsx_reader;

pub use csv_reader::CsvSheetReader;
pub use parser::SpreadsheetParser;
pub use xlsx_reader::XlsxSheetReader;
