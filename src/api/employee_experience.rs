//! Employee experience: `/employeeExperience`
//!
//! Viva Engage communities, their async operations, and the tenant-wide
//! learning course activities. Learning providers live in
//! [`super::LearningProvidersApi`].

use serde_json::Value;

use super::client::GraphClient;
use super::query::{odata_key_literal, ODataQuery};
use super::under;
use crate::error::{require, Result};
use crate::models::{
    Community, EmployeeExperience, EngagementAsyncOperation, LearningCourseActivity,
};

const ROOT: [&str; 1] = ["employeeExperience"];

pub struct EmployeeExperienceApi<'a> {
    client: &'a GraphClient,
}

fn community_path(community_id: &str) -> Result<[&str; 3]> {
    let community_id = require("community_id", community_id)?;
    Ok(["employeeExperience", "communities", community_id])
}

impl<'a> EmployeeExperienceApi<'a> {
    pub(crate) fn new(client: &'a GraphClient) -> Self {
        Self { client }
    }

    pub async fn get_employee_experience(&self, query: &ODataQuery) -> Result<Value> {
        self.client.get(&ROOT, query).await
    }

    pub async fn update_employee_experience(&self, body: &EmployeeExperience) -> Result<Value> {
        self.client.patch(&ROOT, body).await
    }

    // -- Communities --

    pub async fn list_communities(&self, query: &ODataQuery) -> Result<Value> {
        self.client
            .get(&under(&ROOT, &["communities"]), query)
            .await
    }

    pub async fn count_communities(&self, query: &ODataQuery) -> Result<u64> {
        self.client
            .get_count(&under(&ROOT, &["communities", "$count"]), query)
            .await
    }

    /// Creation is asynchronous: the service answers 202 and the
    /// `Location` points at an engagement async operation.
    pub async fn create_community(&self, community: &Community) -> Result<Value> {
        self.client
            .post(&under(&ROOT, &["communities"]), community)
            .await
    }

    pub async fn get_community(&self, community_id: &str, query: &ODataQuery) -> Result<Value> {
        let path = community_path(community_id)?;
        self.client.get(&path, query).await
    }

    pub async fn update_community(
        &self,
        community_id: &str,
        community: &Community,
    ) -> Result<Value> {
        let path = community_path(community_id)?;
        self.client.patch(&path, community).await
    }

    pub async fn delete_community(&self, community_id: &str) -> Result<()> {
        let path = community_path(community_id)?;
        self.client.delete(&path).await
    }

    /// The Microsoft 365 group backing the community.
    pub async fn get_community_group(
        &self,
        community_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let path = community_path(community_id)?;
        self.client.get(&under(&path, &["group"]), query).await
    }

    pub async fn list_community_owners(
        &self,
        community_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let path = community_path(community_id)?;
        self.client.get(&under(&path, &["owners"]), query).await
    }

    pub async fn count_community_owners(
        &self,
        community_id: &str,
        query: &ODataQuery,
    ) -> Result<u64> {
        let path = community_path(community_id)?;
        self.client
            .get_count(&under(&path, &["owners", "$count"]), query)
            .await
    }

    pub async fn get_community_owner(
        &self,
        community_id: &str,
        user_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let path = community_path(community_id)?;
        let user_id = require("user_id", user_id)?;
        self.client
            .get(&under(&path, &["owners", user_id]), query)
            .await
    }

    /// Owner addressed by user principal name (`owners(userPrincipalName='...')`).
    pub async fn get_community_owner_by_upn(
        &self,
        community_id: &str,
        user_principal_name: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let path = community_path(community_id)?;
        let upn = require("user_principal_name", user_principal_name)?;
        let key = format!("owners(userPrincipalName={})", odata_key_literal(upn));
        self.client.get(&under(&path, &[key.as_str()]), query).await
    }

    // -- Engagement async operations --

    pub async fn list_engagement_async_operations(&self, query: &ODataQuery) -> Result<Value> {
        self.client
            .get(&under(&ROOT, &["engagementAsyncOperations"]), query)
            .await
    }

    pub async fn count_engagement_async_operations(&self, query: &ODataQuery) -> Result<u64> {
        self.client
            .get_count(
                &under(&ROOT, &["engagementAsyncOperations", "$count"]),
                query,
            )
            .await
    }

    pub async fn create_engagement_async_operation(
        &self,
        operation: &EngagementAsyncOperation,
    ) -> Result<Value> {
        self.client
            .post(&under(&ROOT, &["engagementAsyncOperations"]), operation)
            .await
    }

    /// Poll a community creation started by [`Self::create_community`].
    pub async fn get_engagement_async_operation(
        &self,
        operation_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let operation_id = require("operation_id", operation_id)?;
        self.client
            .get(
                &under(&ROOT, &["engagementAsyncOperations", operation_id]),
                query,
            )
            .await
    }

    pub async fn update_engagement_async_operation(
        &self,
        operation_id: &str,
        operation: &EngagementAsyncOperation,
    ) -> Result<Value> {
        let operation_id = require("operation_id", operation_id)?;
        self.client
            .patch(
                &under(&ROOT, &["engagementAsyncOperations", operation_id]),
                operation,
            )
            .await
    }

    pub async fn delete_engagement_async_operation(&self, operation_id: &str) -> Result<()> {
        let operation_id = require("operation_id", operation_id)?;
        self.client
            .delete(&under(&ROOT, &["engagementAsyncOperations", operation_id]))
            .await
    }

    // -- Learning course activities --

    pub async fn list_learning_course_activities(&self, query: &ODataQuery) -> Result<Value> {
        self.client
            .get(&under(&ROOT, &["learningCourseActivities"]), query)
            .await
    }

    pub async fn count_learning_course_activities(&self, query: &ODataQuery) -> Result<u64> {
        self.client
            .get_count(
                &under(&ROOT, &["learningCourseActivities", "$count"]),
                query,
            )
            .await
    }

    pub async fn create_learning_course_activity(
        &self,
        activity: &LearningCourseActivity,
    ) -> Result<Value> {
        self.client
            .post(&under(&ROOT, &["learningCourseActivities"]), activity)
            .await
    }

    pub async fn get_learning_course_activity(
        &self,
        activity_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let activity_id = require("activity_id", activity_id)?;
        self.client
            .get(
                &under(&ROOT, &["learningCourseActivities", activity_id]),
                query,
            )
            .await
    }

    pub async fn update_learning_course_activity(
        &self,
        activity_id: &str,
        activity: &LearningCourseActivity,
    ) -> Result<Value> {
        let activity_id = require("activity_id", activity_id)?;
        self.client
            .patch(
                &under(&ROOT, &["learningCourseActivities", activity_id]),
                activity,
            )
            .await
    }

    pub async fn delete_learning_course_activity(&self, activity_id: &str) -> Result<()> {
        let activity_id = require("activity_id", activity_id)?;
        self.client
            .delete(&under(&ROOT, &["learningCourseActivities", activity_id]))
            .await
    }

    /// Activity addressed by the provider's own id. Note the lowercase `c`
    /// in `externalcourseActivityId`, which is how Graph spells the key.
    pub async fn get_learning_course_activity_by_external_id(
        &self,
        external_course_activity_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let external_id = require("external_course_activity_id", external_course_activity_id)?;
        let key = format!(
            "learningCourseActivities(externalcourseActivityId={})",
            odata_key_literal(external_id)
        );
        self.client.get(&under(&ROOT, &[key.as_str()]), query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{assert_missing, client_for, expect_no_requests, expect_routes};
    use crate::error::Error;
    use crate::models::CommunityPrivacy;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_create_community_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1.0/employeeExperience/communities"))
            .and(body_json(json!({
                "displayName": "Rustaceans",
                "description": "Rust at work",
                "privacy": "private",
                "owners@odata.bind": ["https://graph.microsoft.com/v1.0/users/u1"]
            })))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let community = Community::new("Rustaceans", "Rust at work", CommunityPrivacy::Private)
            .with_owner("u1");
        let value = client
            .employee_experience()
            .create_community(&community)
            .await
            .unwrap();
        assert_eq!(value, Value::Null);
    }

    #[tokio::test]
    async fn test_owner_by_upn_alternate_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(
                "/v1.0/employeeExperience/communities/c1/owners(userPrincipalName='ada@contoso.com')",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "u1" })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let owner = client
            .employee_experience()
            .get_community_owner_by_upn("c1", "ada@contoso.com", &ODataQuery::new())
            .await
            .unwrap();
        assert_eq!(owner["id"], "u1");
    }

    #[tokio::test]
    async fn test_course_activity_by_external_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(
                "/v1.0/employeeExperience/learningCourseActivities(externalcourseActivityId='o''brien-1')",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "@odata.type": "#microsoft.graph.learningAssignment",
                "externalcourseActivityId": "o'brien-1",
                "completionPercentage": 20
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let value = client
            .employee_experience()
            .get_learning_course_activity_by_external_id("o'brien-1", &ODataQuery::new())
            .await
            .unwrap();
        let activity: LearningCourseActivity = serde_json::from_value(value).unwrap();
        assert_eq!(activity.completion_percentage, Some(20));
        assert_eq!(
            activity.external_course_activity_id.as_deref(),
            Some("o'brien-1")
        );
    }

    #[tokio::test]
    async fn test_list_course_activities_filter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1.0/employeeExperience/learningCourseActivities"))
            .and(query_param("$filter", "learnerUserId eq 'u1'"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client
            .employee_experience()
            .list_learning_course_activities(&ODataQuery::new().filter("learnerUserId eq 'u1'"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_missing_ids() {
        let server = MockServer::start().await;
        expect_no_requests(&server).await;
        let client = client_for(&server);
        let api = client.employee_experience();

        let err = api
            .get_community_owner_by_upn("c1", "", &ODataQuery::new())
            .await
            .unwrap_err();
        assert!(
            matches!(err, Error::MissingParameter("user_principal_name"))
        );

        let err = api
            .get_community_group("", &ODataQuery::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingParameter("community_id")));

        let err = api
            .delete_engagement_async_operation(" ")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingParameter("operation_id")));
    }

    #[tokio::test]
    async fn test_every_employee_experience_route() {
        let server = MockServer::start().await;
        let root = "/v1.0/employeeExperience";
        let c = format!("{root}/communities/c1");
        let e = format!("{root}/engagementAsyncOperations");
        let l = format!("{root}/learningCourseActivities");
        let routes: Vec<(&str, String)> = vec![
            ("GET", root.to_string()),
            ("PATCH", root.to_string()),
            ("GET", format!("{root}/communities")),
            ("GET", format!("{root}/communities/$count")),
            ("POST", format!("{root}/communities")),
            ("GET", c.clone()),
            ("PATCH", c.clone()),
            ("DELETE", c.clone()),
            ("GET", format!("{c}/group")),
            ("GET", format!("{c}/owners")),
            ("GET", format!("{c}/owners/$count")),
            ("GET", format!("{c}/owners/u1")),
            ("GET", format!("{c}/owners(userPrincipalName='ada@contoso.com')")),
            ("GET", e.clone()),
            ("GET", format!("{e}/$count")),
            ("POST", e.clone()),
            ("GET", format!("{e}/o1")),
            ("PATCH", format!("{e}/o1")),
            ("DELETE", format!("{e}/o1")),
            ("GET", l.clone()),
            ("GET", format!("{l}/$count")),
            ("POST", l.clone()),
            ("GET", format!("{l}/a1")),
            ("PATCH", format!("{l}/a1")),
            ("DELETE", format!("{l}/a1")),
            ("GET", format!("{l}(externalcourseActivityId='x1')")),
        ];
        expect_routes(&server, &routes).await;

        let client = client_for(&server);
        let ee = client.employee_experience();
        let q = ODataQuery::new();
        let community = Community::default();
        let operation = EngagementAsyncOperation::default();
        let activity = LearningCourseActivity::default();

        ee.get_employee_experience(&q).await.unwrap();
        ee.update_employee_experience(&EmployeeExperience::default())
            .await
            .unwrap();

        ee.list_communities(&q).await.unwrap();
        assert_eq!(ee.count_communities(&q).await.unwrap(), 2);
        ee.create_community(&community).await.unwrap();
        ee.get_community("c1", &q).await.unwrap();
        ee.update_community("c1", &community).await.unwrap();
        ee.delete_community("c1").await.unwrap();
        ee.get_community_group("c1", &q).await.unwrap();
        ee.list_community_owners("c1", &q).await.unwrap();
        assert_eq!(ee.count_community_owners("c1", &q).await.unwrap(), 2);
        ee.get_community_owner("c1", "u1", &q).await.unwrap();
        ee.get_community_owner_by_upn("c1", "ada@contoso.com", &q)
            .await
            .unwrap();

        ee.list_engagement_async_operations(&q).await.unwrap();
        assert_eq!(ee.count_engagement_async_operations(&q).await.unwrap(), 2);
        ee.create_engagement_async_operation(&operation)
            .await
            .unwrap();
        ee.get_engagement_async_operation("o1", &q).await.unwrap();
        ee.update_engagement_async_operation("o1", &operation)
            .await
            .unwrap();
        ee.delete_engagement_async_operation("o1").await.unwrap();

        ee.list_learning_course_activities(&q).await.unwrap();
        assert_eq!(ee.count_learning_course_activities(&q).await.unwrap(), 2);
        ee.create_learning_course_activity(&activity).await.unwrap();
        ee.get_learning_course_activity("a1", &q).await.unwrap();
        ee.update_learning_course_activity("a1", &activity)
            .await
            .unwrap();
        ee.delete_learning_course_activity("a1").await.unwrap();
        ee.get_learning_course_activity_by_external_id("x1", &q)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_blank_employee_experience_ids_never_reach_the_server() {
        let server = MockServer::start().await;
        expect_no_requests(&server).await;
        let client = client_for(&server);
        let ee = client.employee_experience();
        let q = ODataQuery::new();
        let community = Community::default();
        let operation = EngagementAsyncOperation::default();
        let activity = LearningCourseActivity::default();

        assert_missing(ee.get_community("", &q).await, "community_id");
        assert_missing(ee.update_community(" ", &community).await, "community_id");
        assert_missing(ee.delete_community("").await, "community_id");
        assert_missing(ee.get_community_group("", &q).await, "community_id");
        assert_missing(ee.list_community_owners("", &q).await, "community_id");
        assert_missing(ee.count_community_owners("", &q).await, "community_id");
        assert_missing(ee.get_community_owner("c1", "", &q).await, "user_id");
        assert_missing(
            ee.get_community_owner_by_upn("c1", " ", &q).await,
            "user_principal_name",
        );

        assert_missing(
            ee.get_engagement_async_operation("", &q).await,
            "operation_id",
        );
        assert_missing(
            ee.update_engagement_async_operation("", &operation).await,
            "operation_id",
        );
        assert_missing(
            ee.delete_engagement_async_operation("\n").await,
            "operation_id",
        );

        assert_missing(ee.get_learning_course_activity("", &q).await, "activity_id");
        assert_missing(
            ee.update_learning_course_activity(" ", &activity).await,
            "activity_id",
        );
        assert_missing(ee.delete_learning_course_activity("").await, "activity_id");
        assert_missing(
            ee.get_learning_course_activity_by_external_id("", &q).await,
            "external_course_activity_id",
        );
    }
}
