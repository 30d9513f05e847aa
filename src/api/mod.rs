//! Microsoft Graph API segments for Teams resources
//!
//! Each segment borrows a [`GraphClient`] and maps one resource area to
//! methods. Every method validates its path identifiers, then issues exactly
//! one request.

mod call_records;
mod calls;
mod chat_messages;
mod chats;
pub mod client;
mod communications;
mod employee_experience;
mod learning_providers;
mod online_meetings;
pub mod query;

pub use call_records::CallRecordsApi;
pub use calls::CallsApi;
pub use chat_messages::ChatMessagesApi;
pub use chats::ChatsApi;
pub use client::{GraphClient, GraphClientBuilder};
pub use communications::CommunicationsApi;
pub use employee_experience::EmployeeExperienceApi;
pub use learning_providers::LearningProvidersApi;
pub use online_meetings::OnlineMeetingsApi;
pub use query::{odata_key_literal, ODataQuery};

impl GraphClient {
    /// `/chats`
    pub fn chats(&self) -> ChatsApi<'_> {
        ChatsApi::new(self)
    }

    /// `/chats/{chat-id}/messages` and replies
    pub fn chat_messages(&self) -> ChatMessagesApi<'_> {
        ChatMessagesApi::new(self)
    }

    /// `/communications` and presences
    pub fn communications(&self) -> CommunicationsApi<'_> {
        CommunicationsApi::new(self)
    }

    /// `/communications/calls`
    pub fn calls(&self) -> CallsApi<'_> {
        CallsApi::new(self)
    }

    /// `/communications/callRecords`
    pub fn call_records(&self) -> CallRecordsApi<'_> {
        CallRecordsApi::new(self)
    }

    /// `/communications/onlineMeetings`
    pub fn online_meetings(&self) -> OnlineMeetingsApi<'_> {
        OnlineMeetingsApi::new(self)
    }

    /// `/employeeExperience`
    pub fn employee_experience(&self) -> EmployeeExperienceApi<'_> {
        EmployeeExperienceApi::new(self)
    }

    /// `/employeeExperience/learningProviders`
    pub fn learning_providers(&self) -> LearningProvidersApi<'_> {
        LearningProvidersApi::new(self)
    }
}

/// Parent path followed by more segments.
pub(crate) fn under<'p>(parent: &[&'p str], tail: &[&'p str]) -> Vec<&'p str> {
    let mut path = parent.to_vec();
    path.extend_from_slice(tail);
    path
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::fmt::Debug;

    use serde_json::json;
    use wiremock::matchers::{any, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::GraphClient;
    use crate::error::{Error, Result};

    /// Client pointed at `{server}/v1.0` with token `test-token`.
    pub(crate) fn client_for(server: &MockServer) -> GraphClient {
        GraphClient::builder("test-token")
            .base_url(format!("{}/v1.0", server.uri()))
            .build()
            .unwrap()
    }

    /// Fail the test on drop if any request reaches the server.
    pub(crate) async fn expect_no_requests(server: &MockServer) {
        Mock::given(any())
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(server)
            .await;
    }

    /// Mount one mock per `(method, path)` that must be hit exactly once.
    /// `$count` routes answer with a plain-text count, everything else with JSON.
    pub(crate) async fn expect_routes<S: AsRef<str>>(server: &MockServer, routes: &[(&str, S)]) {
        for (verb, route) in routes {
            let route = route.as_ref();
            let response = if route.ends_with("/$count") {
                ResponseTemplate::new(200).set_body_string("2")
            } else {
                ResponseTemplate::new(200).set_body_json(json!({ "id": "x" }))
            };
            Mock::given(method(*verb))
                .and(path(route))
                .respond_with(response)
                .expect(1)
                .named(format!("{} {}", verb, route))
                .mount(server)
                .await;
        }
    }

    pub(crate) fn assert_missing<T: Debug>(result: Result<T>, name: &str) {
        match result {
            Err(Error::MissingParameter(missing)) => assert_eq!(missing, name),
            other => panic!("expected MissingParameter({}), got {:?}", name, other),
        }
    }
}
