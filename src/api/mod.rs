//! Async feed service client.
//!
//! Runs in spawned tokio tasks and reports back to the render loop over an
//! unbounded mpsc channel, so the UI never blocks on the network. All
//! failures travel as [`ApiEvent::Error`] and end up in the status bar.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::constants::HTTP_TIMEOUT_SECS;
use crate::models::FeedItem;
use crate::shell::ReplyTo;

/// Events sent from API tasks back to the main loop.
#[derive(Debug)]
pub enum ApiEvent {
    /// A fresh timeline page.
    Timeline(Vec<FeedItem>),
    /// Unread notification count.
    NotificationCount(u64),
    /// A write (post/vote/repost/delete) was acknowledged.
    ActionOk,
    /// Something failed; the string is for the status bar.
    Error(String),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },
}

#[derive(Debug, Deserialize)]
struct TimelineResponse {
    feed: Vec<FeedItem>,
}

#[derive(Debug, Deserialize)]
struct CountResponse {
    count: u64,
}

/// Thin JSON client for the feed service.
///
/// Cheap to clone; each spawned task gets its own handle.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            Ok(resp)
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(ApiError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }

    /// Fetch the viewer's home timeline.
    pub async fn get_timeline(&self) -> Result<Vec<FeedItem>, ApiError> {
        let resp = self.client.get(self.url("/timeline")).send().await?;
        let parsed: TimelineResponse = Self::check(resp).await?.json().await?;
        Ok(parsed.feed)
    }

    /// Fetch the unread notification count.
    pub async fn get_notification_count(&self) -> Result<u64, ApiError> {
        let resp = self
            .client
            .get(self.url("/notifications/count"))
            .send()
            .await?;
        let parsed: CountResponse = Self::check(resp).await?.json().await?;
        Ok(parsed.count)
    }

    /// Publish a post, optionally as a reply.
    pub async fn create_post(
        &self,
        text: &str,
        reply_to: Option<&ReplyTo>,
    ) -> Result<(), ApiError> {
        let body = serde_json::json!({
            "text": text,
            "reply": reply_to.map(|r| serde_json::json!({
                "uri": r.uri,
                "cid": r.cid,
            })),
        });
        let resp = self
            .client
            .post(self.url("/posts"))
            .json(&body)
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    /// Set or clear the viewer's upvote on a post.
    pub async fn set_upvote(&self, uri: &str, on: bool) -> Result<(), ApiError> {
        let body = serde_json::json!({ "uri": uri, "on": on });
        let resp = self
            .client
            .post(self.url("/votes"))
            .json(&body)
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    /// Set or clear the viewer's repost of a post.
    pub async fn set_repost(&self, uri: &str, on: bool) -> Result<(), ApiError> {
        let body = serde_json::json!({ "uri": uri, "on": on });
        let resp = self
            .client
            .post(self.url("/reposts"))
            .json(&body)
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    /// Delete the viewer's own post.
    pub async fn delete_post(&self, uri: &str) -> Result<(), ApiError> {
        let body = serde_json::json!({ "uri": uri });
        let resp = self
            .client
            .post(self.url("/posts/delete"))
            .json(&body)
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let api = ApiClient::new("http://localhost:2583/");
        assert_eq!(api.url("/timeline"), "http://localhost:2583/timeline");
    }

    #[test]
    fn timeline_response_parses() {
        let json = r#"{"feed": [{
            "post": {
                "uri": "at://did:plc:abc/app.bsky.feed.post/1",
                "cid": "bafy1",
                "author": {"did": "did:plc:abc", "handle": "alice.test"},
                "record": {"text": "hello"},
                "indexed_at": "2023-01-01T00:00:00Z"
            }
        }]}"#;
        let parsed: TimelineResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.feed.len(), 1);
        assert_eq!(parsed.feed[0].post.record.text, "hello");
    }

    #[test]
    fn count_response_parses() {
        let parsed: CountResponse = serde_json::from_str(r#"{"count": 7}"#).unwrap();
        assert_eq!(parsed.count, 7);
    }

    #[test]
    fn status_error_formats_for_the_status_bar() {
        let err = ApiError::Status {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "service returned 502: bad gateway");
    }
}
