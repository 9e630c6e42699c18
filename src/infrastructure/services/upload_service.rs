//! Upload boundary: spreadsheet in, provisioned teams out

use tracing::{info, instrument, warn};

use crate::domain::{
    AccessToken, DirectoryClient, ParseError, ProvisioningIntent, ProvisioningOutcome,
    StatusReporter, UploadedFile,
};
use crate::infrastructure::spreadsheet::SpreadsheetParser;

use super::provisioning_service::WorkspaceProvisioner;

pub const UNREADABLE_UPLOAD_MESSAGE: &str = "Attachment received but unfortunately we are not able to read your spreadsheet. Please make sure that all the columns are correct.";

/// Entry point a conversation host calls when a user uploads a spreadsheet
#[derive(Debug)]
pub struct UploadHandler<D: DirectoryClient> {
    parser: SpreadsheetParser,
    provisioner: WorkspaceProvisioner<D>,
}

impl<D: DirectoryClient> UploadHandler<D> {
    pub fn new(parser: SpreadsheetParser, provisioner: WorkspaceProvisioner<D>) -> Self {
        Self {
            parser,
            provisioner,
        }
    }

    /// Parse the upload, announce the batch, then provision it.
    ///
    /// A file that cannot be parsed is reported once and nothing is
    /// provisioned.
    #[instrument(skip(self, token, file, reporter), fields(file = file.name.as_deref().unwrap_or("<unnamed>"), intent = %intent))]
    pub async fn on_file_uploaded(
        &self,
        token: &AccessToken,
        file: UploadedFile,
        intent: ProvisioningIntent,
        reporter: &dyn StatusReporter,
    ) -> Result<Vec<ProvisioningOutcome>, ParseError> {
        let requests = match self.parser.parse(&file) {
            Ok(requests) => requests,
            Err(e) => {
                warn!(error = %e, "Rejected upload");
                reporter.report(UNREADABLE_UPLOAD_MESSAGE).await;
                return Err(e);
            }
        };

        info!(teams = requests.len(), "Upload accepted");
        reporter
            .report(&format!(
                "Attachment received. Working on getting your {} teams ready.",
                requests.len()
            ))
            .await;

        Ok(self
            .provisioner
            .provision(token, &requests, intent, reporter)
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::provisioning::mock::{DirectoryCall, MockDirectoryClient};
    use crate::domain::provisioning::MockStatusReporter;
    use crate::domain::CollectingReporter;
    use std::sync::Arc;

    const OWNER_ID: &str = "6e7b768e-07e2-4810-8459-485f84f8f204";

    fn handler(directory: &Arc<MockDirectoryClient>) -> UploadHandler<MockDirectoryClient> {
        UploadHandler::new(
            SpreadsheetParser::new(),
            WorkspaceProvisioner::new(directory.clone()),
        )
    }

    fn token() -> AccessToken {
        AccessToken::new("test-token").unwrap()
    }

    #[tokio::test]
    async fn test_unreadable_upload_reports_once() {
        let directory = Arc::new(MockDirectoryClient::new());
        let mut reporter = MockStatusReporter::new();
        reporter
            .expect_report()
            .withf(|line| line.contains("not able to read your spreadsheet"))
            .times(1)
            .return_const(());

        let file = UploadedFile::from_bytes(b"Team Name,Channels\nSales,General\n".to_vec())
            .with_name("teams.csv");

        let result = handler(&directory)
            .on_file_uploaded(&token(), file, ProvisioningIntent::Create, &reporter)
            .await;

        assert_eq!(
            result.unwrap_err(),
            ParseError::MissingColumns { row: 2, found: 2 }
        );
        assert!(directory.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_upload_is_rejected() {
        let directory = Arc::new(MockDirectoryClient::new());
        let reporter = CollectingReporter::new();

        let result = handler(&directory)
            .on_file_uploaded(
                &token(),
                UploadedFile::from_bytes(Vec::new()),
                ProvisioningIntent::Update,
                &reporter,
            )
            .await;

        assert_eq!(result.unwrap_err(), ParseError::Empty);
        assert_eq!(reporter.lines(), vec![UNREADABLE_UPLOAD_MESSAGE]);
    }

    #[tokio::test]
    async fn test_upload_announces_then_provisions() {
        let directory = Arc::new(MockDirectoryClient::new().with_user("owner@org.com", OWNER_ID));
        let reporter = CollectingReporter::new();
        let file = UploadedFile::from_bytes(
            b"Team Name,Channels,Members\nSales,General,owner@org.com\nOps,,\n".to_vec(),
        )
        .with_name("teams.csv");

        let outcomes = handler(&directory)
            .on_file_uploaded(&token(), file, ProvisioningIntent::Create, &reporter)
            .await
            .unwrap();

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[0].is_success());
        assert!(outcomes[1].is_hard_failure());
        assert_eq!(
            reporter.lines()[0],
            "Attachment received. Working on getting your 2 teams ready."
        );
        assert!(directory
            .calls()
            .contains(&DirectoryCall::CreateChannel("General".to_string())));
    }

    #[tokio::test]
    async fn test_header_only_upload_provisions_nothing() {
        let directory = Arc::new(MockDirectoryClient::new());
        let mut reporter = MockStatusReporter::new();
        reporter
            .expect_report()
            .withf(|line| line.contains("getting your 0 teams ready"))
            .times(1)
            .return_const(());

        let file = UploadedFile::from_bytes(b"Team Name,Channels,Members\n".to_vec());

        let outcomes = handler(&directory)
            .on_file_uploaded(&token(), file, ProvisioningIntent::Create, &reporter)
            .await
            .unwrap();

        assert!(outcomes.is_empty());
        assert!(directory.calls().is_empty());
    }
}
