//! Sheet reader trait and row-to-request conversion

use std::fmt::Debug;

use thiserror::Error;

use crate::domain::provisioning::{TeamRequest, TeamRequestError};

/// Columns every data row must carry: team name, channels, members
pub const REQUIRED_COLUMNS: usize = 3;

const TEAM_NAME_COLUMN: usize = 0;
const CHANNELS_COLUMN: usize = 1;
const MEMBERS_COLUMN: usize = 2;
const GUESTS_COLUMN: usize = 3;

/// Reasons an upload cannot be turned into team requests.
///
/// Any of these rejects the whole file.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("The spreadsheet is empty")]
    Empty,

    #[error("The spreadsheet has no header row")]
    MissingHeader,

    #[error("The workbook contains no worksheet")]
    NoWorksheet,

    #[error("Unable to read spreadsheet: {0}")]
    Unreadable(String),

    #[error("Row {row} has {found} column(s); expected at least 3")]
    MissingColumns { row: usize, found: usize },

    #[error("Row {row} has an empty team name")]
    EmptyTeamName { row: usize },

    #[error("Row {row}: {source}")]
    InvalidTeam {
        row: usize,
        #[source]
        source: TeamRequestError,
    },
}

/// An uploaded file as received from the host
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Original file name, used for format detection
    pub name: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Lowercased extension of the file name, if any
    pub fn extension(&self) -> Option<String> {
        self.name
            .as_deref()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_lowercase())
    }
}

/// Reads a tabular format into raw rows of cell text, header included
pub trait SheetReader: Send + Sync + Debug {
    /// File extensions handled by this reader (lowercase, without dot)
    fn supported_extensions(&self) -> &[&str];

    fn read_rows(&self, bytes: &[u8]) -> Result<Vec<Vec<String>>, ParseError>;

    fn supports_extension(&self, extension: &str) -> bool {
        let extension = extension.to_lowercase();
        self.supported_extensions()
            .iter()
            .any(|ext| *ext == extension)
    }
}

/// Convert raw rows (header first) into team requests.
///
/// Fully blank rows are ignored. A short row or an empty team name fails the
/// whole file; nothing is returned for the rows that did parse.
pub fn rows_to_requests(rows: Vec<Vec<String>>) -> Result<Vec<TeamRequest>, ParseError> {
    let mut rows = rows
        .into_iter()
        .enumerate()
        .filter(|(_, cells)| !is_blank(cells));

    if rows.next().is_none() {
        return Err(ParseError::MissingHeader);
    }

    rows.map(|(index, cells)| row_to_request(index + 1, &cells))
        .collect()
}

fn row_to_request(row: usize, cells: &[String]) -> Result<TeamRequest, ParseError> {
    if cells.len() < REQUIRED_COLUMNS {
        return Err(ParseError::MissingColumns {
            row,
            found: cells.len(),
        });
    }

    let team_name = cells[TEAM_NAME_COLUMN].trim();
    if team_name.is_empty() {
        return Err(ParseError::EmptyTeamName { row });
    }

    let request = TeamRequest::new(team_name)
        .map_err(|source| ParseError::InvalidTeam { row, source })?
        .with_channels(split_list(&cells[CHANNELS_COLUMN]))
        .with_members(split_list(&cells[MEMBERS_COLUMN]))
        .with_guests(
            cells
                .get(GUESTS_COLUMN)
                .map(|cell| split_list(cell))
                .unwrap_or_default(),
        );

    Ok(request)
}

/// Split a comma-separated cell, trimming entries and dropping empty ones
pub fn split_list(cell: &str) -> Vec<String> {
    cell.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_blank(cells: &[String]) -> bool {
    cells.iter().all(|cell| cell.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn header() -> Vec<String> {
        row(&["Team Name", "Channels", "Members"])
    }

    #[test]
    fn test_rows_become_requests_in_order() {
        let rows = vec![
            header(),
            row(&["IT Helpline", "my channel 1, my channel 2", "user1@org.com, user2@org.com"]),
            row(&["Sales", "", "owner@org.com"]),
            row(&["IT Helpline", "Ops", ""]),
        ];

        let requests = rows_to_requests(rows).unwrap();

        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].team_name(), "IT Helpline");
        assert_eq!(requests[0].channel_names(), ["my channel 1", "my channel 2"]);
        assert_eq!(requests[0].member_emails(), ["user1@org.com", "user2@org.com"]);
        assert_eq!(requests[1].team_name(), "Sales");
        assert!(requests[1].channel_names().is_empty());
        // no deduplication of team names
        assert_eq!(requests[2].team_name(), "IT Helpline");
        assert!(requests[2].member_emails().is_empty());
    }

    #[test]
    fn test_empty_tokens_dropped() {
        assert_eq!(split_list(" a , ,b,, "), vec!["a", "b"]);
        assert!(split_list("").is_empty());
        assert!(split_list(" , ,").is_empty());
    }

    #[test]
    fn test_optional_guest_column() {
        let rows = vec![
            row(&["Team Name", "Channels", "Members", "Guests"]),
            row(&["Partners", "General", "owner@org.com", "guest@fabrikam.com, other@tailspin.com"]),
        ];

        let requests = rows_to_requests(rows).unwrap();

        assert_eq!(
            requests[0].guest_emails(),
            ["guest@fabrikam.com", "other@tailspin.com"]
        );
    }

    #[test]
    fn test_header_only_yields_no_requests() {
        assert!(rows_to_requests(vec![header()]).unwrap().is_empty());
    }

    #[test]
    fn test_no_rows_is_missing_header() {
        assert_eq!(rows_to_requests(vec![]), Err(ParseError::MissingHeader));
        assert_eq!(
            rows_to_requests(vec![row(&["", " "])]),
            Err(ParseError::MissingHeader)
        );
    }

    #[test]
    fn test_short_row_fails_whole_file() {
        let rows = vec![
            header(),
            row(&["Good", "General", "owner@org.com"]),
            row(&["Bad", "General"]),
        ];

        assert_eq!(
            rows_to_requests(rows),
            Err(ParseError::MissingColumns { row: 3, found: 2 })
        );
    }

    #[test]
    fn test_empty_team_name_fails_whole_file() {
        let rows = vec![
            header(),
            row(&["  ", "General", "owner@org.com"]),
            row(&["Good", "General", "owner@org.com"]),
        ];

        assert_eq!(rows_to_requests(rows), Err(ParseError::EmptyTeamName { row: 2 }));
    }

    #[test]
    fn test_long_team_name_parses() {
        let long_name = "A".repeat(300);
        let rows = vec![
            header(),
            row(&[long_name.as_str(), "General", "owner@org.com"]),
            row(&["Sales", "", "owner@org.com"]),
        ];

        let requests = rows_to_requests(rows).unwrap();

        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].team_name(), long_name);
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        let rows = vec![
            header(),
            row(&["Sales", "General", "owner@org.com"]),
            row(&["", "", ""]),
        ];

        assert_eq!(rows_to_requests(rows).unwrap().len(), 1);
    }

    #[test]
    fn test_uploaded_file_extension() {
        let file = UploadedFile::from_bytes(b"x".to_vec()).with_name("Teams.XLSX");
        assert_eq!(file.extension(), Some("xlsx".to_string()));
        assert_eq!(UploadedFile::from_bytes(b"x".to_vec()).extension(), None);
        assert_eq!(
            UploadedFile::from_bytes(b"x".to_vec())
                .with_name("noext")
                .extension(),
            None
        );
    }
}
