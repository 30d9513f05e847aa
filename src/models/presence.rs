//! Presence and cloud communications models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{DateTimeTimeZone, ItemBody};

/// User presence availability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    Available,
    AvailableIdle,
    Away,
    BeRightBack,
    Busy,
    BusyIdle,
    DoNotDisturb,
    Offline,
    PresenceUnknown,
}

/// User presence activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activity {
    Available,
    Away,
    BeRightBack,
    Busy,
    DoNotDisturb,
    InACall,
    InAConferenceCall,
    Inactive,
    InAMeeting,
    Offline,
    OffWork,
    OutOfOffice,
    PresenceUnknown,
    Presenting,
    UrgentInterruptionsOnly,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceStatusMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<ItemBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date_time: Option<DateTimeTimeZone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_date_time: Option<DateTime<Utc>>,
}

/// User presence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presence {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<Availability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<Activity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_message: Option<PresenceStatusMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_of_office_settings: Option<Value>,
    #[serde(flatten)]
    pub additional_data: Map<String, Value>,
}

/// The `/communications` singleton
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudCommunications {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub additional_data: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetPresencesByUserIdRequest {
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearPresenceRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Body of `setPresence`. `session_id` is the calling application's id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetPresenceRequest {
    pub session_id: String,
    pub availability: Availability,
    pub activity: Activity,
    /// ISO 8601 duration, e.g. `PT1H`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_duration: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetStatusMessageRequest {
    pub status_message: PresenceStatusMessage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetUserPreferredPresenceRequest {
    pub availability: Availability,
    pub activity: Activity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_duration: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_presence_enums_use_graph_names() {
        let req = SetUserPreferredPresenceRequest {
            availability: Availability::DoNotDisturb,
            activity: Activity::Presenting,
            expiration_duration: None,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({ "availability": "DoNotDisturb", "activity": "Presenting" })
        );
    }

    #[test]
    fn test_presence_parses() {
        let presence: Presence = serde_json::from_value(json!({
            "id": "u1",
            "availability": "BusyIdle",
            "activity": "InAMeeting",
            "statusMessage": null
        }))
        .unwrap();
        assert_eq!(presence.availability, Some(Availability::BusyIdle));
        assert_eq!(presence.activity, Some(Activity::InAMeeting));
        assert!(presence.status_message.is_none());
    }
}
