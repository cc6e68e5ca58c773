//! Jira REST client for posting issue comments.
//!
//! Single-attempt: there is no retry, and success is strictly HTTP 200 or
//! 201. Every other status, including other 2xx codes, is a publish
//! failure carrying the raw response body.

use serde::Deserialize;
use tracing::{debug, error};

use crate::adf;
use crate::errors::PublishError;

/// Configuration for [`JiraClient`].
#[derive(Clone, Debug)]
pub struct JiraConfig {
    /// Site base URL, e.g. `https://example.atlassian.net`.
    pub base_url: String,
    /// Account email for basic auth.
    pub email: String,
    /// API token for basic auth.
    pub api_token: String,
}

/// Acknowledgement returned by the tracker for a posted comment.
#[derive(Clone, Debug, Deserialize)]
pub struct Receipt {
    /// Tracker-assigned comment id.
    #[serde(default)]
    pub id: String,
}

/// Jira issue-comment client.
pub struct JiraClient {
    config: JiraConfig,
    client: reqwest::Client,
}

impl JiraClient {
    /// Create a client with its own HTTP connection pool.
    #[must_use]
    pub fn new(config: JiraConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    /// Create a client with a shared HTTP connection pool.
    #[must_use]
    pub fn with_client(config: JiraConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    /// Post `text` as a comment on the issue `issue_key`.
    pub async fn post_comment(
        &self,
        issue_key: &str,
        text: &str,
    ) -> Result<Receipt, PublishError> {
        let url = format!(
            "{}/rest/api/3/issue/{issue_key}/comment",
            self.config.base_url
        );
        let payload = serde_json::json!({ "body": adf::document(text) });

        debug!(issue = issue_key, "posting tracker comment");
        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.email, Some(&self.config.api_token))
            .json(&payload)
            .send()
            .await?;

        let status = response.status().as_u16();
        if status != 200 && status != 201 {
            let body = response.text().await.unwrap_or_default();
            error!(issue = issue_key, status, "tracker rejected comment");
            return Err(PublishError::Api { status, body });
        }

        let receipt: Receipt = response.json().await?;
        debug!(issue = issue_key, comment_id = %receipt.id, "comment posted");
        Ok(receipt)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(base_url: String) -> JiraClient {
        JiraClient::new(JiraConfig {
            base_url,
            email: "bot@example.com".into(),
            api_token: "jt-test".into(),
        })
    }

    #[tokio::test]
    async fn posts_comment_and_returns_receipt() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/api/3/issue/PROJ-1/comment"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(serde_json::json!({"id": "10042"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let receipt = client(server.uri())
            .post_comment("PROJ-1", "All green.")
            .await
            .unwrap();
        assert_eq!(receipt.id, "10042");
    }

    #[tokio::test]
    async fn sends_basic_auth_and_adf_body() {
        let server = MockServer::start().await;
        // base64("bot@example.com:jt-test")
        Mock::given(method("POST"))
            .and(header(
                "authorization",
                "Basic Ym90QGV4YW1wbGUuY29tOmp0LXRlc3Q=",
            ))
            .and(body_partial_json(serde_json::json!({
                "body": {"type": "doc", "version": 1}
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "1"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let _ = client(server.uri())
            .post_comment("PROJ-1", "text")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn forbidden_raises_publish_error_without_retry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(403).set_body_string(r#"{"error":"forbidden"}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let err = client(server.uri())
            .post_comment("PROJ-1", "text")
            .await
            .unwrap_err();
        match err {
            PublishError::Api { status, body } => {
                assert_eq!(status, 403);
                assert_eq!(body, r#"{"error":"forbidden"}"#);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn other_2xx_statuses_are_not_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        assert!(matches!(
            client(server.uri())
                .post_comment("PROJ-1", "text")
                .await
                .unwrap_err(),
            PublishError::Api { status: 204, .. }
        ));
    }
}
