//! In-memory feed store.
//!
//! Owns the timeline the UI renders. Post actions flip viewer state and
//! counts optimistically; the service echo arriving later through the API
//! channel replaces the whole timeline and reconciles any drift.

use crate::constants::MAX_TIMELINE_ITEMS;
use crate::models::FeedItem;

/// Marker URI for an optimistic (not yet confirmed) viewer record.
const PENDING_URI: &str = "pending";

/// The viewer's session identity plus everything the feed screens render.
#[derive(Debug, Default)]
pub struct FeedStore {
    /// The viewer's DID; gates author-only actions like delete.
    pub me_did: String,
    timeline: Vec<FeedItem>,
    pub notification_count: u64,
    pub is_loading: bool,
}

impl FeedStore {
    pub fn new(me_did: &str) -> Self {
        Self {
            me_did: me_did.to_string(),
            timeline: Vec::new(),
            notification_count: 0,
            is_loading: true,
        }
    }

    pub fn timeline(&self) -> &[FeedItem] {
        &self.timeline
    }

    /// Replace the timeline with a fresh page from the service.
    pub fn set_timeline(&mut self, mut items: Vec<FeedItem>) {
        items.truncate(MAX_TIMELINE_ITEMS);
        self.timeline = items;
        self.is_loading = false;
    }

    pub fn item(&self, uri: &str) -> Option<&FeedItem> {
        self.timeline.iter().find(|i| i.post.uri == uri)
    }

    fn item_mut(&mut self, uri: &str) -> Option<&mut FeedItem> {
        self.timeline.iter_mut().find(|i| i.post.uri == uri)
    }

    /// Optimistically flip the viewer's upvote. Returns the new state,
    /// or `None` if the post is not in the timeline.
    pub fn toggle_upvote(&mut self, uri: &str) -> Option<bool> {
        let item = self.item_mut(uri)?;
        if item.post.viewer.upvote.take().is_some() {
            item.post.upvote_count = item.post.upvote_count.saturating_sub(1);
            Some(false)
        } else {
            item.post.viewer.upvote = Some(PENDING_URI.to_string());
            item.post.upvote_count += 1;
            Some(true)
        }
    }

    /// Optimistically flip the viewer's repost. Returns the new state,
    /// or `None` if the post is not in the timeline.
    pub fn toggle_repost(&mut self, uri: &str) -> Option<bool> {
        let item = self.item_mut(uri)?;
        if item.post.viewer.repost.take().is_some() {
            item.post.repost_count = item.post.repost_count.saturating_sub(1);
            Some(false)
        } else {
            item.post.viewer.repost = Some(PENDING_URI.to_string());
            item.post.repost_count += 1;
            Some(true)
        }
    }

    /// Remove the viewer's own post from the timeline. Returns false when
    /// the post is missing or authored by someone else.
    pub fn delete_post(&mut self, uri: &str) -> bool {
        let Some(pos) = self.timeline.iter().position(|i| i.post.uri == uri) else {
            return false;
        };
        if self.timeline[pos].post.author.did != self.me_did {
            return false;
        }
        self.timeline.remove(pos);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::testutil::make_item;

    fn store_with(items: Vec<FeedItem>) -> FeedStore {
        let mut store = FeedStore::new("did:plc:me");
        store.set_timeline(items);
        store
    }

    #[test]
    fn set_timeline_clears_loading_and_caps_length() {
        let items: Vec<_> = (0..(MAX_TIMELINE_ITEMS + 50))
            .map(|i| make_item("alice.test", &format!("r{}", i), "post"))
            .collect();
        let store = store_with(items);
        assert!(!store.is_loading);
        assert_eq!(store.timeline().len(), MAX_TIMELINE_ITEMS);
    }

    #[test]
    fn toggle_upvote_flips_state_and_count() {
        let item = make_item("alice.test", "3k1", "hi");
        let uri = item.post.uri.clone();
        let mut store = store_with(vec![item]);

        assert_eq!(store.toggle_upvote(&uri), Some(true));
        let post = &store.item(&uri).unwrap().post;
        assert_eq!(post.upvote_count, 1);
        assert!(post.viewer.upvote.is_some());

        assert_eq!(store.toggle_upvote(&uri), Some(false));
        let post = &store.item(&uri).unwrap().post;
        assert_eq!(post.upvote_count, 0);
        assert!(post.viewer.upvote.is_none());
    }

    #[test]
    fn toggle_repost_flips_state_and_count() {
        let item = make_item("alice.test", "3k1", "hi");
        let uri = item.post.uri.clone();
        let mut store = store_with(vec![item]);

        assert_eq!(store.toggle_repost(&uri), Some(true));
        assert_eq!(store.item(&uri).unwrap().post.repost_count, 1);
        assert_eq!(store.toggle_repost(&uri), Some(false));
        assert_eq!(store.item(&uri).unwrap().post.repost_count, 0);
    }

    #[test]
    fn unupvote_never_underflows_the_count() {
        let mut item = make_item("alice.test", "3k1", "hi");
        // Server says upvoted but count 0 (stale page)
        item.post.viewer.upvote = Some("at://did:plc:me/like/1".to_string());
        let uri = item.post.uri.clone();
        let mut store = store_with(vec![item]);
        assert_eq!(store.toggle_upvote(&uri), Some(false));
        assert_eq!(store.item(&uri).unwrap().post.upvote_count, 0);
    }

    #[test]
    fn toggle_on_unknown_uri_returns_none() {
        let mut store = store_with(vec![]);
        assert_eq!(store.toggle_upvote("at://nope"), None);
        assert_eq!(store.toggle_repost("at://nope"), None);
    }

    #[test]
    fn delete_post_is_author_only() {
        let mut mine = make_item("me.test", "3k1", "mine");
        mine.post.author.did = "did:plc:me".to_string();
        let theirs = make_item("alice.test", "3k2", "theirs");
        let mine_uri = mine.post.uri.clone();
        let theirs_uri = theirs.post.uri.clone();
        let mut store = store_with(vec![mine, theirs]);

        assert!(!store.delete_post(&theirs_uri));
        assert_eq!(store.timeline().len(), 2);

        assert!(store.delete_post(&mine_uri));
        assert_eq!(store.timeline().len(), 1);
        assert!(store.item(&mine_uri).is_none());
    }

    #[test]
    fn delete_missing_post_returns_false() {
        let mut store = store_with(vec![]);
        assert!(!store.delete_post("at://nope"));
    }
}
