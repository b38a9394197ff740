//! Feed timeline data model.
//!
//! Wire-shaped structs (the service speaks JSON) plus the derived
//! accessors the feed renderer and post actions need: thread hrefs,
//! repost/reply attribution, viewer state.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A post author as embedded in feed items.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Author {
    pub did: String,
    pub handle: String,
    #[serde(default)]
    pub display_name: Option<String>,
    /// Viewer has muted this account.
    #[serde(default)]
    pub muted: bool,
}

impl Author {
    /// Name to display: display name if set, else the handle.
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.handle)
    }
}

/// Reference to another post (reply threading).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PostRef {
    pub uri: String,
    pub cid: String,
}

/// Reply pointers carried by a post record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReplyRef {
    pub root: PostRef,
    #[serde(default)]
    pub parent: Option<PostRef>,
}

/// The authored content of a post.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PostRecord {
    pub text: String,
    #[serde(default)]
    pub reply: Option<ReplyRef>,
}

/// This viewer's relationship to a post. The strings are the URIs of the
/// viewer's own upvote/repost records, doubling as "is set" flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ViewerState {
    #[serde(default)]
    pub upvote: Option<String>,
    #[serde(default)]
    pub repost: Option<String>,
}

/// A post as it appears in a feed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Post {
    pub uri: String,
    pub cid: String,
    pub author: Author,
    pub record: PostRecord,
    #[serde(default)]
    pub reply_count: u64,
    #[serde(default)]
    pub repost_count: u64,
    #[serde(default)]
    pub upvote_count: u64,
    pub indexed_at: DateTime<Utc>,
    #[serde(default)]
    pub viewer: ViewerState,
}

/// Why a post appears in the viewer's feed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeedReason {
    /// Someone the viewer follows reposted it.
    Repost { by: Author },
}

/// One feed entry: a post plus the reason it is here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedItem {
    pub post: Post,
    #[serde(default)]
    pub reason: Option<FeedReason>,
}

impl FeedItem {
    /// In-app href for this post's thread screen.
    pub fn thread_href(&self) -> String {
        format!(
            "/profile/{}/post/{}",
            self.post.author.handle,
            at_uri_rkey(&self.post.uri)
        )
    }

    /// In-app href for the author's profile.
    pub fn author_href(&self) -> String {
        format!("/profile/{}", self.post.author.handle)
    }

    /// DID of the account this post replies to, if it is a reply.
    pub fn reply_author_did(&self) -> Option<String> {
        let reply = self.post.record.reply.as_ref()?;
        let uri = reply
            .parent
            .as_ref()
            .map(|p| p.uri.as_str())
            .unwrap_or(reply.root.uri.as_str());
        Some(at_uri_authority(uri).to_string())
    }

    pub fn is_upvoted(&self) -> bool {
        self.post.viewer.upvote.is_some()
    }

    pub fn is_reposted(&self) -> bool {
        self.post.viewer.repost.is_some()
    }
}

/// Record key (last path segment) of an `at://` URI.
pub fn at_uri_rkey(uri: &str) -> &str {
    uri.rsplit('/').next().unwrap_or(uri)
}

/// Authority (DID or handle) of an `at://` URI.
pub fn at_uri_authority(uri: &str) -> &str {
    uri.strip_prefix("at://")
        .unwrap_or(uri)
        .split('/')
        .next()
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::testutil::{make_author, make_item};

    #[test]
    fn author_name_prefers_display_name() {
        let mut a = make_author("alice.test");
        assert_eq!(a.name(), "alice.test");
        a.display_name = Some("Alice".to_string());
        assert_eq!(a.name(), "Alice");
    }

    #[test]
    fn at_uri_parts() {
        let uri = "at://did:plc:abc123/app.bsky.feed.post/3k1xyz";
        assert_eq!(at_uri_rkey(uri), "3k1xyz");
        assert_eq!(at_uri_authority(uri), "did:plc:abc123");
    }

    #[test]
    fn thread_and_author_hrefs() {
        let item = make_item("alice.test", "3k1", "hi");
        assert_eq!(item.thread_href(), "/profile/alice.test/post/3k1");
        assert_eq!(item.author_href(), "/profile/alice.test");
    }

    #[test]
    fn reply_author_did_prefers_parent() {
        let mut item = make_item("bob.test", "3k2", "a reply");
        item.post.record.reply = Some(ReplyRef {
            root: PostRef {
                uri: "at://did:plc:root/app.bsky.feed.post/1".to_string(),
                cid: "c1".to_string(),
            },
            parent: Some(PostRef {
                uri: "at://did:plc:parent/app.bsky.feed.post/2".to_string(),
                cid: "c2".to_string(),
            }),
        });
        assert_eq!(item.reply_author_did().as_deref(), Some("did:plc:parent"));
    }

    #[test]
    fn reply_author_did_falls_back_to_root() {
        let mut item = make_item("bob.test", "3k2", "a reply");
        item.post.record.reply = Some(ReplyRef {
            root: PostRef {
                uri: "at://did:plc:root/app.bsky.feed.post/1".to_string(),
                cid: "c1".to_string(),
            },
            parent: None,
        });
        assert_eq!(item.reply_author_did().as_deref(), Some("did:plc:root"));
    }

    #[test]
    fn reply_author_did_none_for_top_level() {
        let item = make_item("bob.test", "3k2", "top level");
        assert_eq!(item.reply_author_did(), None);
    }

    #[test]
    fn feed_item_deserializes_from_service_json() {
        let json = r#"{
            "post": {
                "uri": "at://did:plc:abc/app.bsky.feed.post/3k1",
                "cid": "bafy1",
                "author": {"did": "did:plc:abc", "handle": "alice.test", "display_name": "Alice"},
                "record": {"text": "hello world"},
                "reply_count": 2,
                "repost_count": 1,
                "upvote_count": 5,
                "indexed_at": "2023-01-01T00:00:00Z",
                "viewer": {"upvote": "at://did:plc:me/app.bsky.feed.like/1"}
            },
            "reason": {"kind": "repost", "by": {"did": "did:plc:xyz", "handle": "carol.test"}}
        }"#;
        let item: FeedItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.post.author.name(), "Alice");
        assert_eq!(item.post.upvote_count, 5);
        assert!(item.is_upvoted());
        assert!(!item.is_reposted());
        assert!(matches!(item.reason, Some(FeedReason::Repost { ref by }) if by.handle == "carol.test"));
    }
}
