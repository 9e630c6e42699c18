//! Wire types of the directory REST API

use serde::{Deserialize, Serialize};

/// Collection response, possibly paginated
#[derive(Debug, Deserialize)]
pub struct ODataResponse<T> {
    pub value: Vec<T>,
    #[serde(rename = "@odata.nextLink")]
    pub next_link: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IdOnly {
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupEntry {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamArchiveState {
    #[serde(default)]
    pub is_archived: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationResponse {
    pub invited_user: Option<IdOnly>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGroup<'a> {
    pub description: String,
    pub display_name: &'a str,
    pub group_types: [&'static str; 1],
    pub mail_enabled: bool,
    pub mail_nickname: String,
    pub security_enabled: bool,
    #[serde(rename = "owners@odata.bind")]
    pub owners: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSettings {
    pub member_settings: MemberSettings,
    pub messaging_settings: MessagingSettings,
    pub fun_settings: FunSettings,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSettings {
    pub allow_create_update_channels: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagingSettings {
    pub allow_user_edit_messages: bool,
    pub allow_user_delete_messages: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunSettings {
    pub allow_giphy: bool,
    pub giphy_content_rating: &'static str,
}

impl Default for TeamSettings {
    fn default() -> Self {
        Self {
            member_settings: MemberSettings {
                allow_create_update_channels: true,
            },
            messaging_settings: MessagingSettings {
                allow_user_edit_messages: true,
                allow_user_delete_messages: true,
            },
            fun_settings: FunSettings {
                allow_giphy: true,
                giphy_content_rating: "strict",
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewChannel<'a> {
    pub display_name: &'a str,
    pub description: &'a str,
}

#[derive(Debug, Serialize)]
pub struct MemberReference {
    #[serde(rename = "@odata.id")]
    pub odata_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Invitation<'a> {
    pub invited_user_email_address: &'a str,
    pub send_invitation_message: bool,
    pub invite_redirect_url: &'a str,
    pub invited_user_message_info: InvitedUserMessageInfo<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitedUserMessageInfo<'a> {
    pub customized_message_body: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveRequest {
    pub should_set_spo_site_read_only_for_members: bool,
}
