//! Directory API client

use async_trait::async_trait;
use chrono::Timelike;
use reqwest::Url;
use serde::Serialize;
use tracing::{debug, instrument};

use super::http_client::HttpClientTrait;
use super::models::{
    ArchiveRequest, GroupEntry, IdOnly, Invitation, InvitationResponse, InvitedUserMessageInfo,
    MemberReference, NewChannel, NewGroup, ODataResponse, TeamArchiveState, TeamSettings,
};
use crate::domain::{
    AccessToken, DirectoryClient, DomainError, GroupHandle, PrincipalId, TeamHandle, TeamSummary,
};

pub const DEFAULT_ROOT_URI: &str = "https://graph.microsoft.com/v1.0/";

/// How guest invitations are sent
#[derive(Debug, Clone)]
pub struct GuestInvitationSettings {
    pub redirect_url: String,
    pub message: String,
    pub send_invitation_message: bool,
}

impl Default for GuestInvitationSettings {
    fn default() -> Self {
        Self {
            redirect_url: "https://teams.microsoft.com".to_string(),
            message: "Welcome to Teams".to_string(),
            send_invitation_message: true,
        }
    }
}

/// Directory client speaking the Graph REST dialect
#[derive(Debug)]
pub struct GraphDirectoryClient<C: HttpClientTrait> {
    client: C,
    root: Url,
    guests: GuestInvitationSettings,
}

impl<C: HttpClientTrait> GraphDirectoryClient<C> {
    pub fn new(client: C, root_uri: &str) -> Result<Self, DomainError> {
        Self::with_guest_settings(client, root_uri, GuestInvitationSettings::default())
    }

    pub fn with_guest_settings(
        client: C,
        root_uri: &str,
        guests: GuestInvitationSettings,
    ) -> Result<Self, DomainError> {
        let root = Url::parse(root_uri).map_err(|e| {
            DomainError::configuration(format!("Invalid directory root URI '{}': {}", root_uri, e))
        })?;

        if root.cannot_be_a_base() {
            return Err(DomainError::configuration(format!(
                "Directory root URI '{}' cannot be used as a base",
                root_uri
            )));
        }

        Ok(Self {
            client,
            root,
            guests,
        })
    }

    pub fn root(&self) -> &Url {
        &self.root
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, DomainError> {
        let mut url = self.root.clone();
        url.path_segments_mut()
            .map_err(|_| DomainError::configuration("Directory root URI cannot be a base"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn endpoint_with_query(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<Url, DomainError> {
        let mut url = self.endpoint(segments)?;
        url.query_pairs_mut().extend_pairs(query);
        Ok(url)
    }

    fn user_reference(&self, id: &PrincipalId) -> Result<String, DomainError> {
        Ok(self.endpoint(&["users", id.to_string().as_str()])?.to_string())
    }

    fn directory_object_reference(&self, id: &PrincipalId) -> Result<String, DomainError> {
        Ok(self
            .endpoint(&["directoryObjects", id.to_string().as_str()])?
            .to_string())
    }
}

fn to_body<T: Serialize>(value: &T) -> Result<serde_json::Value, DomainError> {
    serde_json::to_value(value)
        .map_err(|e| DomainError::internal(format!("Failed to serialize request: {}", e)))
}

fn from_body<T: serde::de::DeserializeOwned>(
    value: serde_json::Value,
) -> Result<T, DomainError> {
    serde_json::from_value(value)
        .map_err(|e| DomainError::transport(format!("Unexpected response shape: {}", e)))
}

/// `id` of a created resource
fn created_id(value: serde_json::Value) -> Result<String, DomainError> {
    let created: IdOnly = from_body(value)?;
    created
        .id
        .map(|id| id.trim().to_string())
        .ok_or_else(|| DomainError::invalid_id("Response carries no resource id"))
}

/// Quote a literal for an OData `$filter` expression
pub fn odata_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Mail nickname for a new group: the display name without spaces, hyphens or
/// other characters the directory refuses, suffixed with `second` to avoid
/// collisions between runs.
pub fn mail_nickname(display_name: &str, second: u32) -> String {
    let base: String = display_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '.')
        .collect();

    let base = if base.is_empty() { "team".to_string() } else { base };
    format!("{}{}", base, second)
}

#[async_trait]
impl<C: HttpClientTrait> DirectoryClient for GraphDirectoryClient<C> {
    #[instrument(skip(self, token))]
    async fn resolve_user_id(
        &self,
        token: &AccessToken,
        email: &str,
    ) -> Result<Option<String>, DomainError> {
        let url = self.endpoint_with_query(&["users", email.trim()], &[("$select", "id")])?;

        match self.client.get_json(&url, token).await {
            Ok(value) => {
                let user: IdOnly = from_body(value)?;
                Ok(user
                    .id
                    .map(|id| id.trim().to_string())
                    .filter(|id| !id.is_empty()))
            }
            Err(e) if e.is_remote_not_found() => {
                debug!("No directory principal matches");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self, token))]
    async fn invite_guest(&self, token: &AccessToken, email: &str) -> Result<String, DomainError> {
        let url = self.endpoint(&["invitations"])?;
        let body = to_body(&Invitation {
            invited_user_email_address: email.trim(),
            send_invitation_message: self.guests.send_invitation_message,
            invite_redirect_url: &self.guests.redirect_url,
            invited_user_message_info: InvitedUserMessageInfo {
                customized_message_body: &self.guests.message,
            },
        })?;

        let response: InvitationResponse =
            from_body(self.client.post_json(&url, token, &body).await?)?;

        response
            .invited_user
            .and_then(|user| user.id)
            .map(|id| id.trim().to_string())
            .ok_or_else(|| DomainError::invalid_id("Invitation response has no invited user id"))
    }

    #[instrument(skip(self, token, owner))]
    async fn create_group(
        &self,
        token: &AccessToken,
        display_name: &str,
        owner: &PrincipalId,
    ) -> Result<String, DomainError> {
        let url = self.endpoint(&["groups"])?;
        let body = to_body(&NewGroup {
            description: format!("Team for {}", display_name),
            display_name,
            group_types: ["Unified"],
            mail_enabled: true,
            mail_nickname: mail_nickname(display_name, chrono::Utc::now().second()),
            security_enabled: true,
            owners: vec![self.user_reference(owner)?],
        })?;

        created_id(self.client.post_json(&url, token, &body).await?)
    }

    #[instrument(skip(self, token))]
    async fn create_team(
        &self,
        token: &AccessToken,
        group: &GroupHandle,
    ) -> Result<String, DomainError> {
        let url = self.endpoint(&["groups", group.to_string().as_str(), "team"])?;
        let body = to_body(&TeamSettings::default())?;

        created_id(self.client.put_json(&url, token, &body).await?)
    }

    #[instrument(skip(self, token))]
    async fn create_channel(
        &self,
        token: &AccessToken,
        team: &TeamHandle,
        name: &str,
    ) -> Result<String, DomainError> {
        let url = self.endpoint(&["groups", team.to_string().as_str(), "team", "channels"])?;
        let body = to_body(&NewChannel {
            display_name: name,
            description: name,
        })?;

        created_id(self.client.post_json(&url, token, &body).await?)
    }

    #[instrument(skip(self, token))]
    async fn add_member(
        &self,
        token: &AccessToken,
        team: &TeamHandle,
        principal: &PrincipalId,
    ) -> Result<(), DomainError> {
        let url = self.endpoint(&["groups", team.to_string().as_str(), "members", "$ref"])?;
        let body = to_body(&MemberReference {
            odata_id: self.directory_object_reference(principal)?,
        })?;

        self.client.post_json(&url, token, &body).await?;
        Ok(())
    }

    #[instrument(skip(self, token))]
    async fn find_group_by_name(
        &self,
        token: &AccessToken,
        name: &str,
    ) -> Result<Option<String>, DomainError> {
        let filter = format!("displayName eq {}", odata_literal(name.trim()));
        let url = self.endpoint_with_query(
            &["groups"],
            &[("$filter", filter.as_str()), ("$select", "id")],
        )?;

        let page: ODataResponse<IdOnly> = from_body(self.client.get_json(&url, token).await?)?;

        Ok(page
            .value
            .into_iter()
            .filter_map(|group| group.id)
            .map(|id| id.trim().to_string())
            .find(|id| !id.is_empty()))
    }

    #[instrument(skip(self, token))]
    async fn list_teams(&self, token: &AccessToken) -> Result<Vec<TeamSummary>, DomainError> {
        let mut url = self.endpoint_with_query(
            &["groups"],
            &[
                ("$filter", "resourceProvisioningOptions/Any(x:x eq 'Team')"),
                ("$select", "id,displayName"),
            ],
        )?;

        let mut teams = Vec::new();

        loop {
            let page: ODataResponse<GroupEntry> =
                from_body(self.client.get_json(&url, token).await?)?;

            teams.extend(page.value.into_iter().map(|group| TeamSummary {
                id: group.id,
                display_name: group.display_name.unwrap_or_default(),
            }));

            match page.next_link {
                Some(next) => {
                    url = Url::parse(&next).map_err(|e| {
                        DomainError::transport(format!("Invalid next page link: {}", e))
                    })?;
                }
                None => break,
            }
        }

        debug!(count = teams.len(), "Listed teams");
        Ok(teams)
    }

    #[instrument(skip(self, token))]
    async fn is_team_archived(
        &self,
        token: &AccessToken,
        team: &TeamHandle,
    ) -> Result<bool, DomainError> {
        let url = self.endpoint_with_query(
            &["teams", team.to_string().as_str()],
            &[("$select", "isArchived")],
        )?;

        let state: TeamArchiveState = from_body(self.client.get_json(&url, token).await?)?;
        Ok(state.is_archived)
    }

    #[instrument(skip(self, token))]
    async fn archive_team(
        &self,
        token: &AccessToken,
        team: &TeamHandle,
    ) -> Result<(), DomainError> {
        let url = self.endpoint(&["teams", team.to_string().as_str(), "archive"])?;
        let body = to_body(&ArchiveRequest {
            should_set_spo_site_read_only_for_members: false,
        })?;

        self.client.post_json(&url, token, &body).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::graph::http_client::mock::MockHttpClient;
    use reqwest::Method;

    const ROOT: &str = "https://graph.test/v1.0/";
    const TEAM_ID: &str = "02bd9fd6-8f93-4758-87c3-1fb73740a315";
    const USER_ID: &str = "6e7b768e-07e2-4810-8459-485f84f8f204";

    fn token() -> AccessToken {
        AccessToken::new("test-token").unwrap()
    }

    #[test]
    fn test_odata_literal_escapes_quotes() {
        assert_eq!(odata_literal("Sales"), "'Sales'");
        assert_eq!(odata_literal("O'Brien's Team"), "'O''Brien''s Team'");
    }

    #[test]
    fn test_mail_nickname() {
        assert_eq!(mail_nickname("IT Help-line", 7), "ITHelpline7");
        assert_eq!(mail_nickname("Équipe (R&D)", 42), "quipeRD42");
        assert_eq!(mail_nickname("日本", 3), "team3");
    }

    #[test]
    fn test_invalid_root_uri() {
        assert!(GraphDirectoryClient::new(MockHttpClient::new(), "not a url").is_err());
        assert!(GraphDirectoryClient::new(MockHttpClient::new(), "mailto:x@y.z").is_err());
    }

    #[tokio::test]
    async fn test_resolve_user_id() {
        let url = format!("{}users/owner@contoso.com?%24select=id", ROOT);
        let client = GraphDirectoryClient::new(
            MockHttpClient::new().with_response(url.clone(), serde_json::json!({ "id": USER_ID })),
            ROOT,
        )
        .unwrap();

        let id = client
            .resolve_user_id(&token(), "owner@contoso.com")
            .await
            .unwrap();

        assert_eq!(id.as_deref(), Some(USER_ID));
        let requests = client.client.requests();
        assert_eq!(requests[0].method, Method::GET);
        assert_eq!(requests[0].url, url);
        assert_eq!(requests[0].authorization, "Bearer test-token");
    }

    #[tokio::test]
    async fn test_resolve_user_not_found_is_none() {
        let url = format!("{}users/ghost@contoso.com?%24select=id", ROOT);
        let client =
            GraphDirectoryClient::new(MockHttpClient::new().with_status(url, 404), ROOT).unwrap();

        let id = client
            .resolve_user_id(&token(), "ghost@contoso.com")
            .await
            .unwrap();

        assert!(id.is_none());
    }

    #[tokio::test]
    async fn test_resolve_user_other_rejection_is_error() {
        let url = format!("{}users/owner@contoso.com?%24select=id", ROOT);
        let client =
            GraphDirectoryClient::new(MockHttpClient::new().with_status(url, 403), ROOT).unwrap();

        let err = client
            .resolve_user_id(&token(), "owner@contoso.com")
            .await
            .unwrap_err();

        assert_eq!(err.remote_status(), Some(403));
    }

    #[tokio::test]
    async fn test_add_member_posts_directory_object_reference() {
        let url = format!("{}groups/{}/members/$ref", ROOT, TEAM_ID);
        let client = GraphDirectoryClient::new(
            MockHttpClient::new().with_response(url, serde_json::Value::Null),
            ROOT,
        )
        .unwrap();

        client
            .add_member(
                &token(),
                &TeamHandle::parse(TEAM_ID).unwrap(),
                &PrincipalId::parse(USER_ID).unwrap(),
            )
            .await
            .unwrap();

        let body = client.client.requests()[0].body.clone().unwrap();
        assert_eq!(
            body["@odata.id"],
            format!("{}directoryObjects/{}", ROOT, USER_ID)
        );
    }

    #[tokio::test]
    async fn test_create_group_binds_owner() {
        let url = format!("{}groups", ROOT);
        let client = GraphDirectoryClient::new(
            MockHttpClient::new().with_response(url, serde_json::json!({ "id": TEAM_ID })),
            ROOT,
        )
        .unwrap();

        let id = client
            .create_group(&token(), "IT Helpline", &PrincipalId::parse(USER_ID).unwrap())
            .await
            .unwrap();

        assert_eq!(id, TEAM_ID);
        let body = client.client.requests()[0].body.clone().unwrap();
        assert_eq!(body["displayName"], "IT Helpline");
        assert_eq!(body["description"], "Team for IT Helpline");
        assert_eq!(body["groupTypes"][0], "Unified");
        assert_eq!(body["mailEnabled"], true);
        assert_eq!(body["securityEnabled"], true);
        assert!(body["mailNickname"].as_str().unwrap().starts_with("ITHelpline"));
        assert_eq!(
            body["owners@odata.bind"][0],
            format!("{}users/{}", ROOT, USER_ID)
        );
    }

    #[tokio::test]
    async fn test_create_team_without_id_is_error() {
        let url = format!("{}groups/{}/team", ROOT, TEAM_ID);
        let client = GraphDirectoryClient::new(
            MockHttpClient::new().with_response(url, serde_json::json!({})),
            ROOT,
        )
        .unwrap();

        let result = client
            .create_team(&token(), &GroupHandle::parse(TEAM_ID).unwrap())
            .await;

        assert!(matches!(result, Err(DomainError::InvalidId { .. })));
        assert_eq!(client.client.requests()[0].method, Method::PUT);
    }

    #[tokio::test]
    async fn test_invite_guest_uses_settings() {
        let url = format!("{}invitations", ROOT);
        let client = GraphDirectoryClient::with_guest_settings(
            MockHttpClient::new().with_response(
                url,
                serde_json::json!({ "invitedUser": { "id": USER_ID } }),
            ),
            ROOT,
            GuestInvitationSettings {
                redirect_url: "https://portal.test".to_string(),
                message: "Hello".to_string(),
                send_invitation_message: false,
            },
        )
        .unwrap();

        let id = client.invite_guest(&token(), "guest@fabrikam.com").await.unwrap();

        assert_eq!(id, USER_ID);
        let body = client.client.requests()[0].body.clone().unwrap();
        assert_eq!(body["invitedUserEmailAddress"], "guest@fabrikam.com");
        assert_eq!(body["inviteRedirectUrl"], "https://portal.test");
        assert_eq!(body["sendInvitationMessage"], false);
        assert_eq!(body["invitedUserMessageInfo"]["customizedMessageBody"], "Hello");
    }
}
