//! Call records: `/communications/callRecords`
//!
//! Records become available some minutes after a call ends. The PSTN and
//! direct routing reports are OData functions bound to the collection.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use super::client::GraphClient;
use super::query::ODataQuery;
use super::under;
use crate::error::{require, Result};
use crate::models::{
    CallRecord, CallRecordOrganizer, CallRecordParticipant, CallRecordSegment, CallRecordSession,
};

const CALL_RECORDS: [&str; 2] = ["communications", "callRecords"];

pub struct CallRecordsApi<'a> {
    client: &'a GraphClient,
}

fn record_path(call_record_id: &str) -> Result<[&str; 3]> {
    let call_record_id = require("call_record_id", call_record_id)?;
    Ok(["communications", "callRecords", call_record_id])
}

fn session_path<'p>(call_record_id: &'p str, session_id: &'p str) -> Result<[&'p str; 5]> {
    let [c, r, call_record_id] = record_path(call_record_id)?;
    let session_id = require("session_id", session_id)?;
    Ok([c, r, call_record_id, "sessions", session_id])
}

/// `name(fromDateTime=...,toDateTime=...)` with second precision UTC stamps.
fn report_function(name: &str, from: DateTime<Utc>, to: DateTime<Utc>) -> String {
    format!(
        "microsoft.graph.callRecords.{}(fromDateTime={},toDateTime={})",
        name,
        from.to_rfc3339_opts(SecondsFormat::Secs, true),
        to.to_rfc3339_opts(SecondsFormat::Secs, true)
    )
}

impl<'a> CallRecordsApi<'a> {
    pub(crate) fn new(client: &'a GraphClient) -> Self {
        Self { client }
    }

    // -- Call records --

    pub async fn list_call_records(&self, query: &ODataQuery) -> Result<Value> {
        self.client.get(&CALL_RECORDS, query).await
    }

    pub async fn count_call_records(&self, query: &ODataQuery) -> Result<u64> {
        self.client
            .get_count(&under(&CALL_RECORDS, &["$count"]), query)
            .await
    }

    pub async fn create_call_record(&self, record: &CallRecord) -> Result<Value> {
        self.client.post(&CALL_RECORDS, record).await
    }

    /// Use `expand=sessions($expand=segments)` to fetch the full record.
    pub async fn get_call_record(&self, call_record_id: &str, query: &ODataQuery) -> Result<Value> {
        let path = record_path(call_record_id)?;
        self.client.get(&path, query).await
    }

    pub async fn update_call_record(
        &self,
        call_record_id: &str,
        record: &CallRecord,
    ) -> Result<Value> {
        let path = record_path(call_record_id)?;
        self.client.patch(&path, record).await
    }

    pub async fn delete_call_record(&self, call_record_id: &str) -> Result<()> {
        let path = record_path(call_record_id)?;
        self.client.delete(&path).await
    }

    /// Direct routing calls between `from` and `to`.
    pub async fn get_direct_routing_calls(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        query: &ODataQuery,
    ) -> Result<Value> {
        let function = report_function("getDirectRoutingCalls", from, to);
        self.client
            .get(&under(&CALL_RECORDS, &[function.as_str()]), query)
            .await
    }

    /// PSTN calls between `from` and `to`.
    pub async fn get_pstn_calls(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        query: &ODataQuery,
    ) -> Result<Value> {
        let function = report_function("getPstnCalls", from, to);
        self.client
            .get(&under(&CALL_RECORDS, &[function.as_str()]), query)
            .await
    }

    // -- Organizer --

    pub async fn get_organizer(&self, call_record_id: &str, query: &ODataQuery) -> Result<Value> {
        let path = record_path(call_record_id)?;
        self.client
            .get(&under(&path, &["organizer_v2"]), query)
            .await
    }

    pub async fn update_organizer(
        &self,
        call_record_id: &str,
        organizer: &CallRecordOrganizer,
    ) -> Result<Value> {
        let path = record_path(call_record_id)?;
        self.client
            .patch(&under(&path, &["organizer_v2"]), organizer)
            .await
    }

    pub async fn delete_organizer(&self, call_record_id: &str) -> Result<()> {
        let path = record_path(call_record_id)?;
        self.client.delete(&under(&path, &["organizer_v2"])).await
    }

    // -- Participants --

    pub async fn list_participants(
        &self,
        call_record_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let path = record_path(call_record_id)?;
        self.client
            .get(&under(&path, &["participants_v2"]), query)
            .await
    }

    pub async fn count_participants(
        &self,
        call_record_id: &str,
        query: &ODataQuery,
    ) -> Result<u64> {
        let path = record_path(call_record_id)?;
        self.client
            .get_count(&under(&path, &["participants_v2", "$count"]), query)
            .await
    }

    pub async fn create_participant(
        &self,
        call_record_id: &str,
        participant: &CallRecordParticipant,
    ) -> Result<Value> {
        let path = record_path(call_record_id)?;
        self.client
            .post(&under(&path, &["participants_v2"]), participant)
            .await
    }

    pub async fn get_participant(
        &self,
        call_record_id: &str,
        participant_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let path = record_path(call_record_id)?;
        let participant_id = require("participant_id", participant_id)?;
        self.client
            .get(&under(&path, &["participants_v2", participant_id]), query)
            .await
    }

    pub async fn update_participant(
        &self,
        call_record_id: &str,
        participant_id: &str,
        participant: &CallRecordParticipant,
    ) -> Result<Value> {
        let path = record_path(call_record_id)?;
        let participant_id = require("participant_id", participant_id)?;
        self.client
            .patch(
                &under(&path, &["participants_v2", participant_id]),
                participant,
            )
            .await
    }

    pub async fn delete_participant(
        &self,
        call_record_id: &str,
        participant_id: &str,
    ) -> Result<()> {
        let path = record_path(call_record_id)?;
        let participant_id = require("participant_id", participant_id)?;
        self.client
            .delete(&under(&path, &["participants_v2", participant_id]))
            .await
    }

    // -- Sessions --

    pub async fn list_sessions(&self, call_record_id: &str, query: &ODataQuery) -> Result<Value> {
        let path = record_path(call_record_id)?;
        self.client.get(&under(&path, &["sessions"]), query).await
    }

    pub async fn count_sessions(&self, call_record_id: &str, query: &ODataQuery) -> Result<u64> {
        let path = record_path(call_record_id)?;
        self.client
            .get_count(&under(&path, &["sessions", "$count"]), query)
            .await
    }

    pub async fn create_session(
        &self,
        call_record_id: &str,
        session: &CallRecordSession,
    ) -> Result<Value> {
        let path = record_path(call_record_id)?;
        self.client
            .post(&under(&path, &["sessions"]), session)
            .await
    }

    pub async fn get_session(
        &self,
        call_record_id: &str,
        session_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let path = session_path(call_record_id, session_id)?;
        self.client.get(&path, query).await
    }

    pub async fn update_session(
        &self,
        call_record_id: &str,
        session_id: &str,
        session: &CallRecordSession,
    ) -> Result<Value> {
        let path = session_path(call_record_id, session_id)?;
        self.client.patch(&path, session).await
    }

    pub async fn delete_session(&self, call_record_id: &str, session_id: &str) -> Result<()> {
        let path = session_path(call_record_id, session_id)?;
        self.client.delete(&path).await
    }

    // -- Session segments --

    pub async fn list_segments(
        &self,
        call_record_id: &str,
        session_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let path = session_path(call_record_id, session_id)?;
        self.client.get(&under(&path, &["segments"]), query).await
    }

    pub async fn count_segments(
        &self,
        call_record_id: &str,
        session_id: &str,
        query: &ODataQuery,
    ) -> Result<u64> {
        let path = session_path(call_record_id, session_id)?;
        self.client
            .get_count(&under(&path, &["segments", "$count"]), query)
            .await
    }

    pub async fn create_segment(
        &self,
        call_record_id: &str,
        session_id: &str,
        segment: &CallRecordSegment,
    ) -> Result<Value> {
        let path = session_path(call_record_id, session_id)?;
        self.client
            .post(&under(&path, &["segments"]), segment)
            .await
    }

    pub async fn get_segment(
        &self,
        call_record_id: &str,
        session_id: &str,
        segment_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let path = session_path(call_record_id, session_id)?;
        let segment_id = require("segment_id", segment_id)?;
        self.client
            .get(&under(&path, &["segments", segment_id]), query)
            .await
    }

    pub async fn update_segment(
        &self,
        call_record_id: &str,
        session_id: &str,
        segment_id: &str,
        segment: &CallRecordSegment,
    ) -> Result<Value> {
        let path = session_path(call_record_id, session_id)?;
        let segment_id = require("segment_id", segment_id)?;
        self.client
            .patch(&under(&path, &["segments", segment_id]), segment)
            .await
    }

    pub async fn delete_segment(
        &self,
        call_record_id: &str,
        session_id: &str,
        segment_id: &str,
    ) -> Result<()> {
        let path = session_path(call_record_id, session_id)?;
        let segment_id = require("segment_id", segment_id)?;
        self.client
            .delete(&under(&path, &["segments", segment_id]))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{assert_missing, client_for, expect_no_requests, expect_routes};
    use crate::error::Error;
    use chrono::TimeZone;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_report_function_segment() {
        let from = Utc.with_ymd_and_hms(2019, 11, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2019, 12, 1, 0, 0, 0).unwrap();
        assert_eq!(
            report_function("getPstnCalls", from, to),
            "microsoft.graph.callRecords.getPstnCalls(fromDateTime=2019-11-01T00:00:00Z,toDateTime=2019-12-01T00:00:00Z)"
        );
    }

    #[tokio::test]
    async fn test_get_pstn_calls_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(
                "/v1.0/communications/callRecords/microsoft.graph.callRecords.getPstnCalls(fromDateTime=2024-01-01T00:00:00Z,toDateTime=2024-01-08T00:00:00Z)",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "@odata.count": 1,
                "value": [{ "id": "p1", "callType": "ucap_in" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 1, 8, 0, 0, 0).unwrap();
        let calls = client
            .call_records()
            .get_pstn_calls(from, to, &ODataQuery::new())
            .await
            .unwrap();
        assert_eq!(calls["value"][0]["id"], "p1");
    }

    #[tokio::test]
    async fn test_get_call_record_expands_sessions() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1.0/communications/callRecords/r1"))
            .and(query_param("$expand", "sessions($expand=segments)"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "r1",
                "type": "groupCall",
                "sessions": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let query = ODataQuery::new().expand(["sessions($expand=segments)"]);
        let value = client
            .call_records()
            .get_call_record("r1", &query)
            .await
            .unwrap();
        let record: CallRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.call_type.as_deref(), Some("groupCall"));
    }

    #[tokio::test]
    async fn test_list_segments_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1.0/communications/callRecords/r1/sessions/s1/segments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client
            .call_records()
            .list_segments("r1", "s1", &ODataQuery::new())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_organizer_v2_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1.0/communications/callRecords/r1/organizer_v2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "u1" })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let organizer = client
            .call_records()
            .get_organizer("r1", &ODataQuery::new())
            .await
            .unwrap();
        assert_eq!(organizer["id"], "u1");
    }

    #[tokio::test]
    async fn test_missing_ids() {
        let server = MockServer::start().await;
        expect_no_requests(&server).await;
        let client = client_for(&server);
        let records = client.call_records();

        let err = records.delete_organizer("").await.unwrap_err();
        assert!(matches!(err, Error::MissingParameter("call_record_id")));

        let err = records
            .get_segment("r1", "", "g1", &ODataQuery::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingParameter("session_id")));

        let err = records.delete_segment("r1", "s1", "").await.unwrap_err();
        assert!(matches!(err, Error::MissingParameter("segment_id")));
    }

    #[tokio::test]
    async fn test_every_call_record_route() {
        let server = MockServer::start().await;
        let r = "/v1.0/communications/callRecords";
        let s = format!("{r}/r1/sessions/s1");
        let routes: Vec<(&str, String)> = vec![
            ("GET", r.to_string()),
            ("GET", format!("{r}/$count")),
            ("POST", r.to_string()),
            ("GET", format!("{r}/r1")),
            ("PATCH", format!("{r}/r1")),
            ("DELETE", format!("{r}/r1")),
            (
                "GET",
                format!(
                    "{r}/microsoft.graph.callRecords.getDirectRoutingCalls(\
                     fromDateTime=2024-03-01T00:00:00Z,toDateTime=2024-03-02T00:00:00Z)"
                ),
            ),
            ("GET", format!("{r}/r1/organizer_v2")),
            ("PATCH", format!("{r}/r1/organizer_v2")),
            ("DELETE", format!("{r}/r1/organizer_v2")),
            ("GET", format!("{r}/r1/participants_v2")),
            ("GET", format!("{r}/r1/participants_v2/$count")),
            ("POST", format!("{r}/r1/participants_v2")),
            ("GET", format!("{r}/r1/participants_v2/p1")),
            ("PATCH", format!("{r}/r1/participants_v2/p1")),
            ("DELETE", format!("{r}/r1/participants_v2/p1")),
            ("GET", format!("{r}/r1/sessions")),
            ("GET", format!("{r}/r1/sessions/$count")),
            ("POST", format!("{r}/r1/sessions")),
            ("GET", s.clone()),
            ("PATCH", s.clone()),
            ("DELETE", s.clone()),
            ("GET", format!("{s}/segments")),
            ("GET", format!("{s}/segments/$count")),
            ("POST", format!("{s}/segments")),
            ("GET", format!("{s}/segments/g1")),
            ("PATCH", format!("{s}/segments/g1")),
            ("DELETE", format!("{s}/segments/g1")),
        ];
        expect_routes(&server, &routes).await;

        let client = client_for(&server);
        let records = client.call_records();
        let q = ODataQuery::new();
        let from = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap();
        let participant = CallRecordParticipant::default();
        let session = CallRecordSession::default();
        let segment = CallRecordSegment::default();

        records.list_call_records(&q).await.unwrap();
        assert_eq!(records.count_call_records(&q).await.unwrap(), 2);
        records
            .create_call_record(&CallRecord::default())
            .await
            .unwrap();
        records.get_call_record("r1", &q).await.unwrap();
        records
            .update_call_record("r1", &CallRecord::default())
            .await
            .unwrap();
        records.delete_call_record("r1").await.unwrap();
        records
            .get_direct_routing_calls(from, to, &q)
            .await
            .unwrap();

        records.get_organizer("r1", &q).await.unwrap();
        records.update_organizer("r1", &participant).await.unwrap();
        records.delete_organizer("r1").await.unwrap();

        records.list_participants("r1", &q).await.unwrap();
        assert_eq!(records.count_participants("r1", &q).await.unwrap(), 2);
        records
            .create_participant("r1", &participant)
            .await
            .unwrap();
        records.get_participant("r1", "p1", &q).await.unwrap();
        records
            .update_participant("r1", "p1", &participant)
            .await
            .unwrap();
        records.delete_participant("r1", "p1").await.unwrap();

        records.list_sessions("r1", &q).await.unwrap();
        assert_eq!(records.count_sessions("r1", &q).await.unwrap(), 2);
        records.create_session("r1", &session).await.unwrap();
        records.get_session("r1", "s1", &q).await.unwrap();
        records.update_session("r1", "s1", &session).await.unwrap();
        records.delete_session("r1", "s1").await.unwrap();

        records.list_segments("r1", "s1", &q).await.unwrap();
        assert_eq!(records.count_segments("r1", "s1", &q).await.unwrap(), 2);
        records.create_segment("r1", "s1", &segment).await.unwrap();
        records.get_segment("r1", "s1", "g1", &q).await.unwrap();
        records
            .update_segment("r1", "s1", "g1", &segment)
            .await
            .unwrap();
        records.delete_segment("r1", "s1", "g1").await.unwrap();
    }

    #[tokio::test]
    async fn test_blank_call_record_ids_never_reach_the_server() {
        let server = MockServer::start().await;
        expect_no_requests(&server).await;
        let client = client_for(&server);
        let records = client.call_records();
        let q = ODataQuery::new();
        let participant = CallRecordParticipant::default();
        let session = CallRecordSession::default();
        let segment = CallRecordSegment::default();

        assert_missing(records.get_call_record("", &q).await, "call_record_id");
        let record = CallRecord::default();
        assert_missing(
            records.update_call_record(" ", &record).await,
            "call_record_id",
        );
        assert_missing(records.delete_call_record("").await, "call_record_id");

        assert_missing(records.get_organizer("", &q).await, "call_record_id");
        assert_missing(
            records.update_organizer("", &participant).await,
            "call_record_id",
        );
        assert_missing(records.delete_organizer("").await, "call_record_id");

        assert_missing(records.list_participants("", &q).await, "call_record_id");
        assert_missing(records.count_participants("", &q).await, "call_record_id");
        assert_missing(
            records.create_participant("", &participant).await,
            "call_record_id",
        );
        assert_missing(
            records.get_participant("r1", "", &q).await,
            "participant_id",
        );
        assert_missing(
            records.update_participant("r1", "", &participant).await,
            "participant_id",
        );
        assert_missing(
            records.delete_participant("r1", " ").await,
            "participant_id",
        );

        assert_missing(records.list_sessions("", &q).await, "call_record_id");
        assert_missing(records.count_sessions("", &q).await, "call_record_id");
        assert_missing(records.create_session("", &session).await, "call_record_id");
        assert_missing(records.get_session("r1", "", &q).await, "session_id");
        assert_missing(
            records.update_session("r1", "", &session).await,
            "session_id",
        );
        assert_missing(records.delete_session("", "s1").await, "call_record_id");

        assert_missing(records.list_segments("r1", "", &q).await, "session_id");
        assert_missing(records.count_segments("", "s1", &q).await, "call_record_id");
        assert_missing(
            records.create_segment("r1", " ", &segment).await,
            "session_id",
        );
        assert_missing(records.get_segment("r1", "s1", "", &q).await, "segment_id");
        assert_missing(
            records.update_segment("r1", "s1", "", &segment).await,
            "segment_id",
        );
        assert_missing(records.delete_segment("r1", "s1", "").await, "segment_id");
    }
}
