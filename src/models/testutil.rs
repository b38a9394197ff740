//! Feed fixtures shared across test modules.

use chrono::{TimeZone, Utc};

use super::{Author, FeedItem, Post, PostRecord, ViewerState};

pub fn make_author(handle: &str) -> Author {
    Author {
        did: format!("did:plc:{}", handle.replace('.', "-")),
        handle: handle.to_string(),
        display_name: None,
        muted: false,
    }
}

pub fn make_item(handle: &str, rkey: &str, text: &str) -> FeedItem {
    let author = make_author(handle);
    FeedItem {
        post: Post {
            uri: format!("at://{}/app.bsky.feed.post/{}", author.did, rkey),
            cid: format!("bafy-{}", rkey),
            author,
            record: PostRecord {
                text: text.to_string(),
                reply: None,
            },
            reply_count: 0,
            repost_count: 0,
            upvote_count: 0,
            indexed_at: Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
            viewer: ViewerState::default(),
        },
        reason: None,
    }
}
