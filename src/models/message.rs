//! Message-related models

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{IdentitySet, ItemBody};

/// Chat message or reply
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_date_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_date_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub importance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<ItemBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<IdentitySet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<ChatMessageAttachment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentions: Option<Vec<ChatMessageMention>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hosted_contents: Option<Vec<ChatMessageHostedContent>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reactions: Option<Vec<Value>>,
    #[serde(flatten)]
    pub additional_data: Map<String, Value>,
}

impl ChatMessage {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            body: Some(ItemBody::text(content)),
            ..Self::default()
        }
    }

    pub fn html(content: impl Into<String>) -> Self {
        Self {
            body: Some(ItemBody::html(content)),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageAttachment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teams_app_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageMention {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mention_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentioned: Option<Value>,
}

/// Inline image or code snippet attached to a message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageHostedContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Referenced from the message body as `../hostedContents/{temporaryId}/$value`
    #[serde(
        rename = "@microsoft.graph.temporaryId",
        skip_serializing_if = "Option::is_none"
    )]
    pub temporary_id: Option<String>,
    /// Base64-encoded content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_bytes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(flatten)]
    pub additional_data: Map<String, Value>,
}

impl ChatMessageHostedContent {
    /// Hosted content from raw bytes, e.g. `from_bytes(png, "image/png")`.
    pub fn from_bytes(content: &[u8], content_type: impl Into<String>) -> Self {
        Self {
            content_bytes: Some(STANDARD.encode(content)),
            content_type: Some(content_type.into()),
            ..Self::default()
        }
    }

    pub fn with_temporary_id(mut self, id: impl Into<String>) -> Self {
        self.temporary_id = Some(id.into());
        self
    }

    pub fn decode_bytes(&self) -> Result<Option<Vec<u8>>, base64::DecodeError> {
        self.content_bytes
            .as_deref()
            .map(|b| STANDARD.decode(b))
            .transpose()
    }
}

/// Body of `setReaction` and `unsetReaction`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionRequest {
    /// Unicode emoji or one of the legacy names such as `like`
    pub reaction_type: String,
}
