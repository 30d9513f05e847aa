//! Chat-related models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{IdentitySet, ItemBody, KeyValuePair, TeamworkUserIdentity, BIND_BASE};

/// Chat type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChatType {
    OneOnOne,
    Group,
    Meeting,
    UnknownFutureValue,
}

/// Chat entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_type: Option<ChatType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated_date_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<ConversationMember>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installed_apps: Option<Vec<TeamsAppInstallation>>,
    /// Present when `lastMessagePreview` is expanded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_message_preview: Option<ChatMessageInfo>,
    #[serde(flatten)]
    pub additional_data: Map<String, Value>,
}

impl Chat {
    /// New 1:1 chat between two members.
    pub fn one_on_one(members: Vec<ConversationMember>) -> Self {
        Self {
            chat_type: Some(ChatType::OneOnOne),
            members: Some(members),
            ..Self::default()
        }
    }

    pub fn group(topic: impl Into<String>, members: Vec<ConversationMember>) -> Self {
        Self {
            chat_type: Some(ChatType::Group),
            topic: Some(topic.into()),
            members: Some(members),
            ..Self::default()
        }
    }
}

/// Preview of the last message in a chat
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<ItemBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_detail: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<IdentitySet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_deleted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_type: Option<String>,
    #[serde(flatten)]
    pub additional_data: Map<String, Value>,
}

/// Member of a chat (`conversationMember` and its derived types)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationMember {
    #[serde(rename = "@odata.type", skip_serializing_if = "Option::is_none")]
    pub odata_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_history_start_date_time: Option<DateTime<Utc>>,
    #[serde(rename = "user@odata.bind", skip_serializing_if = "Option::is_none")]
    pub user_bind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(flatten)]
    pub additional_data: Map<String, Value>,
}

impl ConversationMember {
    /// AAD user member bound by object id or UPN. Use `["owner"]` for owners.
    pub fn aad_user(user: &str, roles: &[&str]) -> Self {
        Self {
            odata_type: Some("#microsoft.graph.aadUserConversationMember".to_string()),
            roles: Some(roles.iter().map(|r| r.to_string()).collect()),
            user_bind: Some(format!("{}/users('{}')", BIND_BASE, user)),
            ..Self::default()
        }
    }
}

/// App installed in a chat
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamsAppInstallation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "teamsApp@odata.bind", skip_serializing_if = "Option::is_none")]
    pub teams_app_bind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consented_permission_set: Option<Value>,
    #[serde(flatten)]
    pub additional_data: Map<String, Value>,
}

impl TeamsAppInstallation {
    /// Installation of a catalog app by its id.
    pub fn for_app(teams_app_id: &str) -> Self {
        Self {
            teams_app_bind: Some(format!(
                "{}/appCatalogs/teamsApps/{}",
                BIND_BASE, teams_app_id
            )),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamsTabConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
}

/// Tab pinned in a chat
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamsTab {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration: Option<TeamsTabConfiguration>,
    #[serde(rename = "teamsApp@odata.bind", skip_serializing_if = "Option::is_none")]
    pub teams_app_bind: Option<String>,
    #[serde(flatten)]
    pub additional_data: Map<String, Value>,
}

/// Pinned message reference
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinnedChatMessageInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "message@odata.bind", skip_serializing_if = "Option::is_none")]
    pub message_bind: Option<String>,
    #[serde(flatten)]
    pub additional_data: Map<String, Value>,
}

impl PinnedChatMessageInfo {
    pub fn for_message(chat_id: &str, message_id: &str) -> Self {
        Self {
            message_bind: Some(format!(
                "{}/chats/{}/messages/{}",
                BIND_BASE, chat_id, message_id
            )),
            ..Self::default()
        }
    }
}

/// Resource-specific consent grant on a chat
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSpecificPermissionGrant {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_app_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_app_id: Option<String>,
    #[serde(flatten)]
    pub additional_data: Map<String, Value>,
}

// -- Action bodies --

/// Body of `hideForUser`, `unhideForUser`, `markChatReadForUser` and
/// `removeAllAccessForUser`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatUserRequest {
    pub user: TeamworkUserIdentity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkChatUnreadRequest {
    pub user: TeamworkUserIdentity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_message_read_date_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamworkActivityTopic {
    /// `entityUrl` or `text`
    pub source: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_url: Option<String>,
}

/// Body of `sendActivityNotification`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityNotification {
    pub topic: TeamworkActivityTopic,
    pub activity_type: String,
    /// `teamworkNotificationRecipient` with its `@odata.type`
    pub recipient: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_text: Option<ItemBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teams_app_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_parameters: Option<Vec<KeyValuePair>>,
}

/// Body of `teamsAppInstallation: upgrade`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeAppRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consented_permission_set: Option<Value>,
}

/// Body of `members/add`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddMembersRequest {
    pub values: Vec<ConversationMember>,
}

/// Body of `members/remove`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoveMembersRequest {
    pub values: Vec<ConversationMember>,
}
