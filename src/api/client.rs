//! Authenticated HTTP client for Microsoft Graph
//!
//! Wraps reqwest::Client with bearer token injection, URL building and
//! uniform response handling. Every segment in `crate::api` goes through
//! the verbs defined here.

use std::fmt;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use super::query::ODataQuery;
use crate::auth::TokenStore;
use crate::config::Config;
use crate::error::{require, Error, Result};

pub const GRAPH_BASE: &str = "https://graph.microsoft.com/v1.0";

/// Client for the Graph REST API. Cloning shares the connection pool.
#[derive(Clone)]
pub struct GraphClient {
    http: reqwest::Client,
    base_url: Url,
    token: String,
}

impl fmt::Debug for GraphClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphClient")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Builder for [`GraphClient`].
pub struct GraphClientBuilder {
    token: String,
    base_url: Option<String>,
    timeout: Option<Duration>,
    http: Option<reqwest::Client>,
}

impl GraphClientBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use a preconfigured reqwest client. `timeout` is ignored in that case.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    pub fn build(self) -> Result<GraphClient> {
        require("token", &self.token)?;

        let raw = self.base_url.as_deref().unwrap_or(GRAPH_BASE).trim();
        let base_url = Url::parse(raw.trim_end_matches('/'))
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", raw, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(format!(
                "{} must be an absolute URL",
                raw
            )));
        }

        let http = match self.http {
            Some(http) => http,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                builder.build().map_err(|source| Error::Transport {
                    url: base_url.to_string(),
                    source,
                })?
            }
        };

        Ok(GraphClient {
            http,
            base_url,
            token: self.token,
        })
    }
}

impl GraphClient {
    /// Client against the public Graph v1.0 endpoint.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::builder(token).build()
    }

    pub fn builder(token: impl Into<String>) -> GraphClientBuilder {
        GraphClientBuilder {
            token: token.into(),
            base_url: None,
            timeout: None,
            http: None,
        }
    }

    /// Build a client from a loaded config. Fails if the stored token is missing or expired.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let token = config
            .get_access_token()
            .ok_or_else(|| anyhow::anyhow!("No Graph token. Run 'graph-teams login' first."))?;
        if token.is_expired() {
            anyhow::bail!("Graph token expired. Run 'graph-teams login'.");
        }

        let mut builder = Self::builder(token.token);
        if let Some(ref base_url) = config.graph_base_url {
            builder = builder.base_url(base_url.clone());
        }
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(builder.build()?)
    }

    /// Load config and build client. Attempts token refresh if the token is expired.
    /// Environment overrides apply to this client only and are never saved.
    pub async fn from_stored_credentials() -> anyhow::Result<Self> {
        let mut stored = Config::load()?;
        let mut config = stored.with_env();

        let needs_refresh = config.get_access_token().map_or(true, |t| t.is_expired());
        if needs_refresh {
            if stored.get_refresh_token().is_some() {
                tracing::info!("Token missing or expired, refreshing...");
                match crate::auth::oauth::refresh(&mut stored).await {
                    Ok(true) => {
                        stored.save()?;
                        config = stored.with_env();
                        tracing::info!("Token refreshed");
                    }
                    Ok(false) => {
                        anyhow::bail!("No refresh token available. Run 'graph-teams login'.");
                    }
                    Err(e) => {
                        anyhow::bail!("Token refresh failed: {:#}. Run 'graph-teams login'.", e);
                    }
                }
            } else {
                anyhow::bail!("Token expired and no refresh token. Run 'graph-teams login'.");
            }
        }

        Self::from_config(&config)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL with each segment appended as one percent-encoded path segment.
    pub fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| Error::InvalidUrl(format!("{} cannot be a base", self.base_url)))?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    /// Query values are form-encoded except that a space becomes `%20`, so
    /// `$filter=a eq 'b'` goes out as `%24filter=a%20eq%20%27b%27`.
    fn url_with_query(&self, segments: &[&str], query: &ODataQuery) -> Result<Url> {
        let mut url = self.url(segments)?;
        let pairs = query.pairs();
        if !pairs.is_empty() {
            let encoded: Vec<String> = pairs
                .iter()
                .map(|(key, value)| format!("{}={}", encode_query(key), encode_query(value)))
                .collect();
            url.set_query(Some(&encoded.join("&")));
        }
        Ok(url)
    }

    /// GET a JSON resource or collection.
    pub async fn get(&self, segments: &[&str], query: &ODataQuery) -> Result<Value> {
        let url = self.url_with_query(segments, query)?;
        let request = self.http.get(url.clone()).header(ACCEPT, "application/json");
        let resp = self.send(request, "GET", &url).await?;
        handle_response(resp, &url).await
    }

    /// GET a `$count` segment, which answers with a plain-text integer.
    pub async fn get_count(&self, segments: &[&str], query: &ODataQuery) -> Result<u64> {
        let url = self.url_with_query(segments, query)?;
        let request = self.http.get(url.clone()).header(ACCEPT, "text/plain");
        let resp = self.send(request, "GET", &url).await?;
        let text = resp.text().await.map_err(|source| Error::Transport {
            url: url.to_string(),
            source,
        })?;
        text.trim().parse::<u64>().map_err(|_| {
            Error::UnexpectedResponse(format!("{} is not a count (from {})", text.trim(), url))
        })
    }

    /// GET raw content from a `$value` or `/content` segment.
    pub async fn get_bytes(&self, segments: &[&str]) -> Result<Bytes> {
        let url = self.url(segments)?;
        let request = self.http.get(url.clone());
        let resp = self.send(request, "GET", &url).await?;
        resp.bytes().await.map_err(|source| Error::Transport {
            url: url.to_string(),
            source,
        })
    }

    /// Follow an `@odata.nextLink` or `@odata.deltaLink` returned by the server.
    ///
    /// The link must point at the same origin as the base URL so the bearer
    /// token is never sent elsewhere.
    pub async fn get_link(&self, link: &str) -> Result<Value> {
        require("link", link)?;
        let url = Url::parse(link).map_err(|e| Error::InvalidUrl(format!("{}: {}", link, e)))?;
        if url.origin() != self.base_url.origin() {
            return Err(Error::InvalidUrl(format!(
                "{} is outside {}",
                link,
                self.base_url.origin().ascii_serialization()
            )));
        }
        let request = self.http.get(url.clone()).header(ACCEPT, "application/json");
        let resp = self.send(request, "GET", &url).await?;
        handle_response(resp, &url).await
    }

    /// POST a JSON body.
    pub async fn post<B>(&self, segments: &[&str], body: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(segments)?;
        let request = self
            .http
            .post(url.clone())
            .header(ACCEPT, "application/json")
            .json(body);
        let resp = self.send(request, "POST", &url).await?;
        handle_response(resp, &url).await
    }

    /// POST an action that takes no body.
    pub async fn post_empty(&self, segments: &[&str]) -> Result<Value> {
        let url = self.url(segments)?;
        let request = self
            .http
            .post(url.clone())
            .header(ACCEPT, "application/json")
            .header(CONTENT_LENGTH, "0");
        let resp = self.send(request, "POST", &url).await?;
        handle_response(resp, &url).await
    }

    /// PATCH a JSON body.
    pub async fn patch<B>(&self, segments: &[&str], body: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(segments)?;
        let request = self
            .http
            .patch(url.clone())
            .header(ACCEPT, "application/json")
            .json(body);
        let resp = self.send(request, "PATCH", &url).await?;
        handle_response(resp, &url).await
    }

    /// PUT raw bytes as `application/octet-stream`.
    pub async fn put_bytes(&self, segments: &[&str], content: impl Into<Bytes>) -> Result<Value> {
        let url = self.url(segments)?;
        let request = self
            .http
            .put(url.clone())
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(content.into());
        let resp = self.send(request, "PUT", &url).await?;
        handle_response(resp, &url).await
    }

    pub async fn delete(&self, segments: &[&str]) -> Result<()> {
        let url = self.url(segments)?;
        let request = self.http.delete(url.clone());
        self.send(request, "DELETE", &url).await?;
        Ok(())
    }

    async fn send(
        &self,
        request: RequestBuilder,
        method: &str,
        url: &Url,
    ) -> Result<reqwest::Response> {
        tracing::debug!("Graph {} {}", method, url);

        let resp = request
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|source| Error::Transport {
                url: url.to_string(),
                source,
            })?;

        check_response(resp, url).await
    }
}

/// Check HTTP response status code and return a clear error on failure.
async fn check_response(resp: reqwest::Response, url: &Url) -> Result<reqwest::Response> {
    let status = resp.status();
    if !status.is_success() {
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(
                "401 Unauthorized for {}. Token may be invalid -- run 'graph-teams login'.",
                url
            );
        }
        let body = resp.text().await.unwrap_or_default();
        return Err(Error::RequestFailed {
            status: status.as_u16(),
            url: url.to_string(),
            body,
        });
    }
    Ok(resp)
}

/// Parse a successful response. 204 and empty bodies become `Value::Null`.
async fn handle_response(resp: reqwest::Response, url: &Url) -> Result<Value> {
    if resp.status() == StatusCode::NO_CONTENT {
        return Ok(Value::Null);
    }
    let bytes = resp.bytes().await.map_err(|source| Error::Transport {
        url: url.to_string(),
        source,
    })?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&bytes).map_err(|source| Error::Decode {
        url: url.to_string(),
        source,
    })
}

/// Form-encode one query key or value. A literal `+` is already `%2B` at
/// this point, so every remaining `+` stands for a space.
fn encode_query(raw: &str) -> String {
    url::form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::client_for;
    use serde_json::json;
    use wiremock::matchers::{body_bytes, body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_url_appends_encoded_segments() {
        let client = GraphClient::new("t").unwrap();
        let url = client.url(&["chats", "19:abc@thread.v2", "messages"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://graph.microsoft.com/v1.0/chats/19:abc@thread.v2/messages"
        );

        let url = client.url(&["chats", "a/b?c"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://graph.microsoft.com/v1.0/chats/a%2Fb%3Fc"
        );
    }

    #[test]
    fn test_query_spaces_are_percent_encoded() {
        let client = GraphClient::new("t").unwrap();
        let query = ODataQuery::new()
            .top(5)
            .filter("displayName eq 'a+b'")
            .select(["id", "topic"]);
        let url = client.url_with_query(&["chats"], &query).unwrap();
        assert_eq!(
            url.query(),
            Some("%24top=5&%24filter=displayName%20eq%20%27a%2Bb%27&%24select=id%2Ctopic")
        );

        let decoded: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            decoded[1],
            ("$filter".to_string(), "displayName eq 'a+b'".to_string())
        );

        let url = client.url_with_query(&["chats"], &ODataQuery::new()).unwrap();
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = GraphClient::builder("t")
            .base_url("https://graph.example.com/beta/")
            .build()
            .unwrap();
        let url = client.url(&["chats"]).unwrap();
        assert_eq!(url.as_str(), "https://graph.example.com/beta/chats");
    }

    #[test]
    fn test_builder_rejects_bad_input() {
        assert!(matches!(
            GraphClient::new("  "),
            Err(Error::MissingParameter("token"))
        ));
        assert!(matches!(
            GraphClient::builder("t").base_url("not a url").build(),
            Err(Error::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_debug_redacts_token() {
        let client = GraphClient::new("secret-token").unwrap();
        let printed = format!("{:?}", client);
        assert!(!printed.contains("secret-token"));
        assert!(printed.contains("<redacted>"));
    }

    #[tokio::test]
    async fn test_get_sends_bearer_and_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1.0/chats"))
            .and(header("authorization", "Bearer test-token"))
            .and(query_param("$top", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let value = client
            .get(&["chats"], &ODataQuery::new().top(2))
            .await
            .unwrap();
        assert_eq!(value, json!({ "value": [] }));
    }

    #[tokio::test]
    async fn test_non_success_carries_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1.0/chats/missing"))
            .respond_with(
                ResponseTemplate::new(404).set_body_string(r#"{"error":{"code":"NotFound"}}"#),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .get(&["chats", "missing"], &ODataQuery::new())
            .await
            .unwrap_err();
        match err {
            Error::RequestFailed { status, body, url } => {
                assert_eq!(status, 404);
                assert!(body.contains("NotFound"));
                assert!(url.ends_with("/v1.0/chats/missing"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_no_content_is_null() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1.0/communications/calls/c1/keepAlive"))
            .and(header("content-length", "0"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let value = client
            .post_empty(&["communications", "calls", "c1", "keepAlive"])
            .await
            .unwrap();
        assert_eq!(value, Value::Null);
    }

    #[tokio::test]
    async fn test_invalid_json_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1.0/communications"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .get(&["communications"], &ODataQuery::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[tokio::test]
    async fn test_patch_and_post_send_json() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/v1.0/chats/c1"))
            .and(body_json(json!({ "topic": "x" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "c1" })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1.0/chats"))
            .and(body_json(json!({ "chatType": "group" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "c2" })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let patched = client
            .patch(&["chats", "c1"], &json!({ "topic": "x" }))
            .await
            .unwrap();
        assert_eq!(patched["id"], "c1");
        let created = client
            .post(&["chats"], &json!({ "chatType": "group" }))
            .await
            .unwrap();
        assert_eq!(created["id"], "c2");
    }

    #[tokio::test]
    async fn test_bytes_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/v1.0/x/$value"))
            .and(header("content-type", "application/octet-stream"))
            .and(body_bytes(vec![1u8, 2, 3]))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1.0/x/$value"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![9u8, 8, 7]))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.put_bytes(&["x", "$value"], vec![1u8, 2, 3]).await.unwrap();
        let content = client.get_bytes(&["x", "$value"]).await.unwrap();
        assert_eq!(content.as_ref(), &[9u8, 8, 7]);
    }

    #[tokio::test]
    async fn test_get_count_parses_plain_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1.0/chats/$count"))
            .respond_with(ResponseTemplate::new(200).set_body_string("42"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1.0/tabs/$count"))
            .respond_with(ResponseTemplate::new(200).set_body_string("many"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let count = client
            .get_count(&["chats", "$count"], &ODataQuery::new())
            .await
            .unwrap();
        assert_eq!(count, 42);
        let err = client
            .get_count(&["tabs", "$count"], &ODataQuery::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UnexpectedResponse(_)));
    }

    #[tokio::test]
    async fn test_get_link_stays_on_base_origin() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1.0/chats"))
            .and(query_param("$skiptoken", "abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": [1] })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let next = format!("{}/v1.0/chats?$skiptoken=abc", server.uri());
        let page = client.get_link(&next).await.unwrap();
        assert_eq!(page["value"][0], 1);

        let err = client
            .get_link("https://evil.example.com/v1.0/chats")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }
}
