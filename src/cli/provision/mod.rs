//! Create, update and parse commands

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use clap::Args;
use tracing::info;

use super::{bootstrap, TokenArgs};
use crate::domain::{ProvisioningIntent, ProvisioningOutcome, StatusReporter, UploadedFile};
use crate::infrastructure::spreadsheet::SpreadsheetParser;

/// Arguments for the create and update commands
#[derive(Args, Clone)]
pub struct ProvisionArgs {
    /// Spreadsheet with Team Name, Channels, Members and optional Guests columns
    #[arg(long, short)]
    pub file: PathBuf,

    /// Print the outcomes as JSON once done
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub auth: TokenArgs,
}

/// Arguments for the parse command
#[derive(Args, Clone)]
pub struct ParseArgs {
    #[arg(long, short)]
    pub file: PathBuf,
}

/// Prints status lines to stdout as they arrive
#[derive(Debug, Default)]
pub struct StdoutReporter;

#[async_trait]
impl StatusReporter for StdoutReporter {
    async fn report(&self, line: &str) {
        println!("{}", line);
    }
}

/// Run a create or update
pub async fn run(args: ProvisionArgs, intent: ProvisioningIntent) -> anyhow::Result<()> {
    let config = bootstrap();
    let token = args.auth.access_token(&config)?;

    let file = read_upload(&args.file).await?;
    let handler = crate::create_upload_handler(&config)?;

    info!(file = %args.file.display(), intent = %intent, "Starting provisioning");
    let outcomes = handler
        .on_file_uploaded(&token, file, intent, &StdoutReporter)
        .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
    }

    let (succeeded, failed) = tally(&outcomes);
    info!(succeeded, failed, "Provisioning complete");

    Ok(())
}

/// Parse a spreadsheet and print its requests, one JSON object per line
pub async fn parse(args: ParseArgs) -> anyhow::Result<()> {
    bootstrap();

    let file = read_upload(&args.file).await?;
    let requests = SpreadsheetParser::new().parse(&file)?;

    for request in &requests {
        println!("{}", serde_json::to_string(request)?);
    }

    info!(teams = requests.len(), "Spreadsheet is valid");
    Ok(())
}

async fn read_upload(path: &Path) -> anyhow::Result<UploadedFile> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;

    let file = UploadedFile::from_bytes(bytes);
    Ok(match path.file_name() {
        Some(name) => file.with_name(name.to_string_lossy()),
        None => file,
    })
}

/// Outcomes without any failure, and the rest
fn tally(outcomes: &[ProvisioningOutcome]) -> (usize, usize) {
    let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
    (succeeded, outcomes.len() - succeeded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HardFailure;

    #[tokio::test]
    async fn test_read_upload_keeps_file_name() {
        let path = std::env::temp_dir().join(format!("teams-{}.csv", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, b"Team Name,Channels,Members\n")
            .await
            .unwrap();

        let file = read_upload(&path).await.unwrap();

        assert_eq!(file.extension().as_deref(), Some("csv"));
        assert_eq!(file.bytes.len(), 27);
        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_read_missing_upload() {
        let err = read_upload(Path::new("/nonexistent/teams.csv"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_tally() {
        let outcomes = vec![
            ProvisioningOutcome::from_failures("Sales", vec![]),
            ProvisioningOutcome::hard_failure("Ops", HardFailure::TeamNotFound),
        ];

        assert_eq!(tally(&outcomes), (1, 1));
    }
}
