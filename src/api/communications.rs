//! `/communications` singleton and presence
//!
//! Presence writes (`setPresence`, `setUserPreferredPresence`, ...) address a
//! presence by the user's object id.

use serde_json::Value;

use super::client::GraphClient;
use super::query::ODataQuery;
use crate::error::{require, Result};
use crate::models::{
    ClearPresenceRequest, CloudCommunications, GetPresencesByUserIdRequest, Presence,
    SetPresenceRequest, SetStatusMessageRequest, SetUserPreferredPresenceRequest,
};

pub struct CommunicationsApi<'a> {
    client: &'a GraphClient,
}

impl<'a> CommunicationsApi<'a> {
    pub(crate) fn new(client: &'a GraphClient) -> Self {
        Self { client }
    }

    pub async fn get_communications(&self, query: &ODataQuery) -> Result<Value> {
        self.client.get(&["communications"], query).await
    }

    pub async fn update_communications(&self, body: &CloudCommunications) -> Result<Value> {
        self.client.patch(&["communications"], body).await
    }

    /// Presence of several users in one call.
    pub async fn get_presences_by_user_id(
        &self,
        body: &GetPresencesByUserIdRequest,
    ) -> Result<Value> {
        self.client
            .post(&["communications", "getPresencesByUserId"], body)
            .await
    }

    // -- Presences --

    pub async fn list_presences(&self, query: &ODataQuery) -> Result<Value> {
        self.client
            .get(&["communications", "presences"], query)
            .await
    }

    pub async fn count_presences(&self, query: &ODataQuery) -> Result<u64> {
        self.client
            .get_count(&["communications", "presences", "$count"], query)
            .await
    }

    pub async fn create_presence(&self, presence: &Presence) -> Result<Value> {
        self.client
            .post(&["communications", "presences"], presence)
            .await
    }

    pub async fn get_presence(&self, presence_id: &str, query: &ODataQuery) -> Result<Value> {
        let presence_id = require("presence_id", presence_id)?;
        self.client
            .get(&["communications", "presences", presence_id], query)
            .await
    }

    pub async fn update_presence(&self, presence_id: &str, presence: &Presence) -> Result<Value> {
        let presence_id = require("presence_id", presence_id)?;
        self.client
            .patch(&["communications", "presences", presence_id], presence)
            .await
    }

    pub async fn delete_presence(&self, presence_id: &str) -> Result<()> {
        let presence_id = require("presence_id", presence_id)?;
        self.client
            .delete(&["communications", "presences", presence_id])
            .await
    }

    /// Clear the presence session set by an application.
    pub async fn clear_presence(
        &self,
        presence_id: &str,
        body: &ClearPresenceRequest,
    ) -> Result<Value> {
        let presence_id = require("presence_id", presence_id)?;
        self.client
            .post(
                &["communications", "presences", presence_id, "clearPresence"],
                body,
            )
            .await
    }

    pub async fn clear_user_preferred_presence(&self, presence_id: &str) -> Result<Value> {
        let presence_id = require("presence_id", presence_id)?;
        self.client
            .post_empty(&[
                "communications",
                "presences",
                presence_id,
                "clearUserPreferredPresence",
            ])
            .await
    }

    pub async fn set_presence(
        &self,
        presence_id: &str,
        body: &SetPresenceRequest,
    ) -> Result<Value> {
        let presence_id = require("presence_id", presence_id)?;
        self.client
            .post(
                &["communications", "presences", presence_id, "setPresence"],
                body,
            )
            .await
    }

    pub async fn set_status_message(
        &self,
        presence_id: &str,
        body: &SetStatusMessageRequest,
    ) -> Result<Value> {
        let presence_id = require("presence_id", presence_id)?;
        self.client
            .post(
                &["communications", "presences", presence_id, "setStatusMessage"],
                body,
            )
            .await
    }

    /// Set the status the user picked themselves. It wins over session presence.
    pub async fn set_user_preferred_presence(
        &self,
        presence_id: &str,
        body: &SetUserPreferredPresenceRequest,
    ) -> Result<Value> {
        let presence_id = require("presence_id", presence_id)?;
        self.client
            .post(
                &[
                    "communications",
                    "presences",
                    presence_id,
                    "setUserPreferredPresence",
                ],
                body,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{assert_missing, client_for, expect_no_requests, expect_routes};
    use crate::error::Error;
    use crate::models::{Activity, Availability, PresenceStatusMessage};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_presences_by_user_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1.0/communications/getPresencesByUserId"))
            .and(body_json(json!({ "ids": ["u1", "u2"] })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "value": [
                    { "id": "u1", "availability": "Available", "activity": "Available" },
                    { "id": "u2", "availability": "Away", "activity": "Away" }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let body = GetPresencesByUserIdRequest {
            ids: vec!["u1".to_string(), "u2".to_string()],
        };
        let result = client
            .communications()
            .get_presences_by_user_id(&body)
            .await
            .unwrap();
        assert_eq!(result["value"][1]["availability"], "Away");
    }

    #[tokio::test]
    async fn test_set_user_preferred_presence_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(
                "/v1.0/communications/presences/u1/setUserPreferredPresence",
            ))
            .and(body_json(json!({
                "availability": "DoNotDisturb",
                "activity": "DoNotDisturb",
                "expirationDuration": "PT8H"
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let body = SetUserPreferredPresenceRequest {
            availability: Availability::DoNotDisturb,
            activity: Activity::DoNotDisturb,
            expiration_duration: Some("PT8H".to_string()),
        };
        let value = client
            .communications()
            .set_user_preferred_presence("u1", &body)
            .await
            .unwrap();
        assert_eq!(value, Value::Null);
    }

    #[tokio::test]
    async fn test_clear_presence_drops_unset_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1.0/communications/presences/u1/clearPresence"))
            .and(body_json(json!({})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client
            .communications()
            .clear_presence("u1", &ClearPresenceRequest::default())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_get_presence_with_select() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1.0/communications/presences/u1"))
            .and(query_param("$select", "availability,activity"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "availability": "Busy",
                "activity": "InACall"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let query = ODataQuery::new().select(["availability", "activity"]);
        let presence: Presence = serde_json::from_value(
            client
                .communications()
                .get_presence("u1", &query)
                .await
                .unwrap(),
        )
        .unwrap();
        assert_eq!(presence.availability, Some(Availability::Busy));
    }

    #[tokio::test]
    async fn test_missing_presence_id() {
        let server = MockServer::start().await;
        expect_no_requests(&server).await;
        let client = client_for(&server);

        let err = client
            .communications()
            .clear_user_preferred_presence("")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingParameter("presence_id")));
    }

    #[tokio::test]
    async fn test_every_communications_route() {
        let server = MockServer::start().await;
        let p = "/v1.0/communications/presences";
        let routes: Vec<(&str, String)> = vec![
            ("GET", "/v1.0/communications".to_string()),
            ("PATCH", "/v1.0/communications".to_string()),
            ("POST", "/v1.0/communications/getPresencesByUserId".to_string()),
            ("GET", p.to_string()),
            ("GET", format!("{p}/$count")),
            ("POST", p.to_string()),
            ("GET", format!("{p}/u1")),
            ("PATCH", format!("{p}/u1")),
            ("DELETE", format!("{p}/u1")),
            ("POST", format!("{p}/u1/clearPresence")),
            ("POST", format!("{p}/u1/clearUserPreferredPresence")),
            ("POST", format!("{p}/u1/setPresence")),
            ("POST", format!("{p}/u1/setStatusMessage")),
            ("POST", format!("{p}/u1/setUserPreferredPresence")),
        ];
        expect_routes(&server, &routes).await;

        let client = client_for(&server);
        let comms = client.communications();
        let q = ODataQuery::new();
        let ids = GetPresencesByUserIdRequest {
            ids: vec!["u1".to_string()],
        };
        let set = SetPresenceRequest {
            session_id: "app-1".to_string(),
            availability: Availability::Busy,
            activity: Activity::InACall,
            expiration_duration: None,
        };
        let message = SetStatusMessageRequest {
            status_message: PresenceStatusMessage::default(),
        };
        let preferred = SetUserPreferredPresenceRequest {
            availability: Availability::Away,
            activity: Activity::Away,
            expiration_duration: None,
        };

        comms.get_communications(&q).await.unwrap();
        comms
            .update_communications(&CloudCommunications::default())
            .await
            .unwrap();
        comms.get_presences_by_user_id(&ids).await.unwrap();
        comms.list_presences(&q).await.unwrap();
        assert_eq!(comms.count_presences(&q).await.unwrap(), 2);
        comms.create_presence(&Presence::default()).await.unwrap();
        comms.get_presence("u1", &q).await.unwrap();
        comms
            .update_presence("u1", &Presence::default())
            .await
            .unwrap();
        comms.delete_presence("u1").await.unwrap();
        comms
            .clear_presence("u1", &ClearPresenceRequest::default())
            .await
            .unwrap();
        comms.clear_user_preferred_presence("u1").await.unwrap();
        comms.set_presence("u1", &set).await.unwrap();
        comms.set_status_message("u1", &message).await.unwrap();
        comms
            .set_user_preferred_presence("u1", &preferred)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_blank_presence_ids_never_reach_the_server() {
        let server = MockServer::start().await;
        expect_no_requests(&server).await;
        let client = client_for(&server);
        let comms = client.communications();
        let q = ODataQuery::new();
        let set = SetPresenceRequest {
            session_id: "app-1".to_string(),
            availability: Availability::Available,
            activity: Activity::Available,
            expiration_duration: None,
        };
        let message = SetStatusMessageRequest {
            status_message: PresenceStatusMessage::default(),
        };
        let preferred = SetUserPreferredPresenceRequest {
            availability: Availability::Available,
            activity: Activity::Available,
            expiration_duration: None,
        };

        assert_missing(comms.get_presence("", &q).await, "presence_id");
        assert_missing(
            comms.update_presence(" ", &Presence::default()).await,
            "presence_id",
        );
        assert_missing(comms.delete_presence("").await, "presence_id");
        let clear = ClearPresenceRequest::default();
        assert_missing(comms.clear_presence("", &clear).await, "presence_id");
        assert_missing(comms.clear_user_preferred_presence("").await, "presence_id");
        assert_missing(comms.set_presence("", &set).await, "presence_id");
        assert_missing(comms.set_status_message("", &message).await, "presence_id");
        assert_missing(
            comms.set_user_preferred_presence("\t", &preferred).await,
            "presence_id",
        );
    }
}
