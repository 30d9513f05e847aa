//! Viva Learning providers: `/employeeExperience/learningProviders`
//!
//! Content and course activities can be addressed either by Graph id or by
//! the provider's external id (alternate key).

use serde_json::Value;

use super::client::GraphClient;
use super::query::{odata_key_literal, ODataQuery};
use super::under;
use crate::error::{require, Result};
use crate::models::{LearningContent, LearningCourseActivity, LearningProvider};

const PROVIDERS: [&str; 2] = ["employeeExperience", "learningProviders"];

pub struct LearningProvidersApi<'a> {
    client: &'a GraphClient,
}

fn provider_path(provider_id: &str) -> Result<[&str; 3]> {
    let provider_id = require("provider_id", provider_id)?;
    Ok(["employeeExperience", "learningProviders", provider_id])
}

fn content_by_external_id(external_id: &str) -> Result<String> {
    let external_id = require("external_id", external_id)?;
    Ok(format!(
        "learningContents(externalId={})",
        odata_key_literal(external_id)
    ))
}

impl<'a> LearningProvidersApi<'a> {
    pub(crate) fn new(client: &'a GraphClient) -> Self {
        Self { client }
    }

    // -- Providers --

    pub async fn list_learning_providers(&self, query: &ODataQuery) -> Result<Value> {
        self.client.get(&PROVIDERS, query).await
    }

    pub async fn count_learning_providers(&self, query: &ODataQuery) -> Result<u64> {
        self.client
            .get_count(&under(&PROVIDERS, &["$count"]), query)
            .await
    }

    pub async fn create_learning_provider(&self, provider: &LearningProvider) -> Result<Value> {
        self.client.post(&PROVIDERS, provider).await
    }

    pub async fn get_learning_provider(
        &self,
        provider_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let path = provider_path(provider_id)?;
        self.client.get(&path, query).await
    }

    pub async fn update_learning_provider(
        &self,
        provider_id: &str,
        provider: &LearningProvider,
    ) -> Result<Value> {
        let path = provider_path(provider_id)?;
        self.client.patch(&path, provider).await
    }

    pub async fn delete_learning_provider(&self, provider_id: &str) -> Result<()> {
        let path = provider_path(provider_id)?;
        self.client.delete(&path).await
    }

    // -- Learning contents --

    pub async fn list_learning_contents(
        &self,
        provider_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let path = provider_path(provider_id)?;
        self.client
            .get(&under(&path, &["learningContents"]), query)
            .await
    }

    pub async fn count_learning_contents(
        &self,
        provider_id: &str,
        query: &ODataQuery,
    ) -> Result<u64> {
        let path = provider_path(provider_id)?;
        self.client
            .get_count(&under(&path, &["learningContents", "$count"]), query)
            .await
    }

    pub async fn create_learning_content(
        &self,
        provider_id: &str,
        content: &LearningContent,
    ) -> Result<Value> {
        let path = provider_path(provider_id)?;
        self.client
            .post(&under(&path, &["learningContents"]), content)
            .await
    }

    pub async fn get_learning_content(
        &self,
        provider_id: &str,
        content_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let path = provider_path(provider_id)?;
        let content_id = require("content_id", content_id)?;
        self.client
            .get(&under(&path, &["learningContents", content_id]), query)
            .await
    }

    pub async fn update_learning_content(
        &self,
        provider_id: &str,
        content_id: &str,
        content: &LearningContent,
    ) -> Result<Value> {
        let path = provider_path(provider_id)?;
        let content_id = require("content_id", content_id)?;
        self.client
            .patch(&under(&path, &["learningContents", content_id]), content)
            .await
    }

    pub async fn delete_learning_content(&self, provider_id: &str, content_id: &str) -> Result<()> {
        let path = provider_path(provider_id)?;
        let content_id = require("content_id", content_id)?;
        self.client
            .delete(&under(&path, &["learningContents", content_id]))
            .await
    }

    pub async fn get_learning_content_by_external_id(
        &self,
        provider_id: &str,
        external_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let path = provider_path(provider_id)?;
        let key = content_by_external_id(external_id)?;
        self.client.get(&under(&path, &[key.as_str()]), query).await
    }

    /// Create or update content by external id. Providers sync their catalog
    /// this way.
    pub async fn update_learning_content_by_external_id(
        &self,
        provider_id: &str,
        external_id: &str,
        content: &LearningContent,
    ) -> Result<Value> {
        let path = provider_path(provider_id)?;
        let key = content_by_external_id(external_id)?;
        self.client
            .patch(&under(&path, &[key.as_str()]), content)
            .await
    }

    pub async fn delete_learning_content_by_external_id(
        &self,
        provider_id: &str,
        external_id: &str,
    ) -> Result<()> {
        let path = provider_path(provider_id)?;
        let key = content_by_external_id(external_id)?;
        self.client.delete(&under(&path, &[key.as_str()])).await
    }

    // -- Provider course activities --

    pub async fn list_provider_course_activities(
        &self,
        provider_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let path = provider_path(provider_id)?;
        self.client
            .get(&under(&path, &["learningCourseActivities"]), query)
            .await
    }

    pub async fn count_provider_course_activities(
        &self,
        provider_id: &str,
        query: &ODataQuery,
    ) -> Result<u64> {
        let path = provider_path(provider_id)?;
        self.client
            .get_count(
                &under(&path, &["learningCourseActivities", "$count"]),
                query,
            )
            .await
    }

    /// Assign a course. Set `odata_type` to `#microsoft.graph.learningAssignment`
    /// or `#microsoft.graph.learningSelfInitiatedCourse`.
    pub async fn create_provider_course_activity(
        &self,
        provider_id: &str,
        activity: &LearningCourseActivity,
    ) -> Result<Value> {
        let path = provider_path(provider_id)?;
        self.client
            .post(&under(&path, &["learningCourseActivities"]), activity)
            .await
    }

    pub async fn get_provider_course_activity(
        &self,
        provider_id: &str,
        activity_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let path = provider_path(provider_id)?;
        let activity_id = require("activity_id", activity_id)?;
        self.client
            .get(
                &under(&path, &["learningCourseActivities", activity_id]),
                query,
            )
            .await
    }

    pub async fn update_provider_course_activity(
        &self,
        provider_id: &str,
        activity_id: &str,
        activity: &LearningCourseActivity,
    ) -> Result<Value> {
        let path = provider_path(provider_id)?;
        let activity_id = require("activity_id", activity_id)?;
        self.client
            .patch(
                &under(&path, &["learningCourseActivities", activity_id]),
                activity,
            )
            .await
    }

    pub async fn delete_provider_course_activity(
        &self,
        provider_id: &str,
        activity_id: &str,
    ) -> Result<()> {
        let path = provider_path(provider_id)?;
        let activity_id = require("activity_id", activity_id)?;
        self.client
            .delete(&under(&path, &["learningCourseActivities", activity_id]))
            .await
    }

    pub async fn get_provider_course_activity_by_external_id(
        &self,
        provider_id: &str,
        external_course_activity_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let path = provider_path(provider_id)?;
        let external_id = require("external_course_activity_id", external_course_activity_id)?;
        let key = format!(
            "learningCourseActivities(externalcourseActivityId={})",
            odata_key_literal(external_id)
        );
        self.client.get(&under(&path, &[key.as_str()]), query).await
    }
}
