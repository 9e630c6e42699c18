//! Spreadsheet upload domain
//!
//! Uploads carry a header row followed by one team per row:
//! team name, channels, members and an optional guests column, the list
//! columns being comma-separated.

mod parser;

pub use parser::{
    rows_to_requests, split_list, ParseError, SheetReader, UploadedFile, REQUIRED_COLUMNS,
};
