//! Shared Graph value types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Message body content type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BodyType {
    Text,
    Html,
}

/// Rich text body (`itemBody`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<BodyType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl ItemBody {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content_type: Some(BodyType::Text),
            content: Some(content.into()),
        }
    }

    pub fn html(content: impl Into<String>) -> Self {
        Self {
            content_type: Some(BodyType::Html),
            content: Some(content.into()),
        }
    }
}

/// A user, application or device identity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(flatten)]
    pub additional_data: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentitySet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<Identity>,
    #[serde(flatten)]
    pub additional_data: Map<String, Value>,
}

/// User reference used by chat actions such as `hideForUser`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamworkUserIdentity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_identity_type: Option<String>,
}

impl TeamworkUserIdentity {
    /// An AAD user addressed by object id.
    pub fn aad_user(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            display_name: None,
            user_identity_type: Some("aadUser".to_string()),
        }
    }
}

/// Local date and time paired with a time zone name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateTimeTimeZone {
    pub date_time: String,
    pub time_zone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValuePair {
    pub name: String,
    pub value: String,
}

/// One page of a collection response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
    #[serde(rename = "@odata.nextLink", skip_serializing_if = "Option::is_none")]
    pub next_link: Option<String>,
    #[serde(rename = "@odata.deltaLink", skip_serializing_if = "Option::is_none")]
    pub delta_link: Option<String>,
    #[serde(rename = "@odata.count", skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

impl<T> Collection<T> {
    /// Link to fetch next: the next page, or the delta link once paging is done.
    pub fn continuation(&self) -> Option<&str> {
        self.next_link.as_deref().or(self.delta_link.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_body_skips_unset_fields() {
        let body = ItemBody {
            content_type: None,
            content: Some("hi".to_string()),
        };
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({ "content": "hi" }));
        assert_eq!(
            serde_json::to_value(ItemBody::html("<b>x</b>")).unwrap(),
            json!({ "contentType": "html", "content": "<b>x</b>" })
        );
    }

    #[test]
    fn test_identity_keeps_unknown_fields() {
        let raw = json!({ "id": "u1", "displayName": "Ada", "userIdentityType": "aadUser" });
        let identity: Identity = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(identity.id.as_deref(), Some("u1"));
        assert_eq!(identity.additional_data["userIdentityType"], "aadUser");
        assert_eq!(serde_json::to_value(&identity).unwrap(), raw);
    }

    #[test]
    fn test_collection_reads_odata_annotations() {
        let raw = json!({
            "@odata.count": 3,
            "@odata.nextLink": "https://graph.microsoft.com/v1.0/chats?$skiptoken=x",
            "value": [{ "id": "a" }]
        });
        let page: Collection<Value> = serde_json::from_value(raw).unwrap();
        assert_eq!(page.value.len(), 1);
        assert_eq!(page.count, Some(3));
        assert_eq!(
            page.continuation(),
            Some("https://graph.microsoft.com/v1.0/chats?$skiptoken=x")
        );

        let last: Collection<Value> = serde_json::from_value(json!({
            "value": [],
            "@odata.deltaLink": "https://graph.microsoft.com/v1.0/d?$deltatoken=y"
        }))
        .unwrap();
        assert_eq!(
            last.continuation(),
            Some("https://graph.microsoft.com/v1.0/d?$deltatoken=y")
        );
    }
}
