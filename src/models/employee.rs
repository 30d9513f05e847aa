//! Employee experience models: Viva Engage communities and Viva Learning

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{DateTimeTimeZone, ItemBody, BIND_BASE};

/// The `/employeeExperience` singleton
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeExperience {
    #[serde(flatten)]
    pub additional_data: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CommunityPrivacy {
    Public,
    Private,
    UnknownFutureValue,
}

/// Viva Engage community
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privacy: Option<CommunityPrivacy>,
    #[serde(rename = "owners@odata.bind", skip_serializing_if = "Option::is_none")]
    pub owners_bind: Option<Vec<String>>,
    #[serde(flatten)]
    pub additional_data: Map<String, Value>,
}

impl Community {
    pub fn new(
        display_name: impl Into<String>,
        description: impl Into<String>,
        privacy: CommunityPrivacy,
    ) -> Self {
        Self {
            display_name: Some(display_name.into()),
            description: Some(description.into()),
            privacy: Some(privacy),
            ..Self::default()
        }
    }

    /// Add an owner by user object id.
    pub fn with_owner(mut self, user_id: &str) -> Self {
        self.owners_bind
            .get_or_insert_with(Vec::new)
            .push(format!("{}/users/{}", BIND_BASE, user_id));
        self
    }
}

/// Status of a long-running Viva Engage operation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementAsyncOperation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_action_date_time: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub additional_data: Map<String, Value>,
}

/// Viva Learning content provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningProvider {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_course_activity_sync_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_web_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_logo_web_url_for_dark_theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_logo_web_url_for_light_theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub square_logo_web_url_for_dark_theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub square_logo_web_url_for_light_theme: Option<String>,
    #[serde(flatten)]
    pub additional_data: Map<String, Value>,
}

/// Course or other content item of a learning provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_web_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_web_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// `beginner`, `intermediate` or `advanced`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// ISO 8601 duration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_pages: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_premium: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_searchable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill_tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_date_time: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub additional_data: Map<String, Value>,
}

/// Assignment or self-initiated course of a learner
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningCourseActivity {
    /// `#microsoft.graph.learningAssignment` or `#microsoft.graph.learningSelfInitiatedCourse`
    #[serde(rename = "@odata.type", skip_serializing_if = "Option::is_none")]
    pub odata_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(
        rename = "externalcourseActivityId",
        skip_serializing_if = "Option::is_none"
    )]
    pub external_course_activity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learner_user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_content_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_provider_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_percentage: Option<i32>,
    /// `notStarted`, `inProgress` or `completed`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_date_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_date_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_date_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignment_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigner_user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date_time: Option<DateTimeTimeZone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<ItemBody>,
    #[serde(flatten)]
    pub additional_data: Map<String, Value>,
}
