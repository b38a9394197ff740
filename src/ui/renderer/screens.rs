//! Per-route screen content.
//!
//! The match over the route enum is exhaustive, so adding a screen kind
//! forces a rendering decision here.

use chrono::Utc;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::models::{at_uri_rkey, FeedItem};
use crate::routes::Route;
use crate::shell::ScreenDesc;
use crate::ui::state::AppState;
use crate::utils::time_ago;

use super::feed::render_feed_list;

pub fn render_screen(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    desc: &ScreenDesc,
    dimmed: bool,
) {
    let title = desc.matched.title.as_str();
    match &desc.matched.route {
        Route::Home => {
            render_feed_list(frame, area, state, state.store.timeline(), title, dimmed);
        }
        Route::Search => render_search(frame, area, state, dimmed),
        Route::Notifications => render_notifications(frame, area, state, dimmed),
        Route::Settings => render_settings(frame, area, state, dimmed),
        Route::Profile { handle } => {
            let items: Vec<FeedItem> = state
                .store
                .timeline()
                .iter()
                .filter(|i| i.post.author.handle == *handle)
                .cloned()
                .collect();
            render_feed_list(frame, area, state, &items, title, dimmed);
        }
        Route::ProfileFollowers { handle } => {
            render_placeholder(
                frame,
                area,
                state,
                title,
                &format!("Accounts following @{} load on demand.", handle),
                dimmed,
            );
        }
        Route::ProfileFollows { handle } => {
            render_placeholder(
                frame,
                area,
                state,
                title,
                &format!("Accounts @{} follows load on demand.", handle),
                dimmed,
            );
        }
        Route::PostThread { handle, rkey } => {
            render_thread(frame, area, state, handle, rkey, title, dimmed)
        }
        Route::NotFound => {
            render_placeholder(
                frame,
                area,
                state,
                title,
                "This link points nowhere. Press Backspace to go back.",
                dimmed,
            );
        }
    }
}

fn screen_block<'a>(state: &AppState, title: &str, dimmed: bool) -> Block<'a> {
    let t = &state.theme;
    let border_style = if dimmed {
        Style::default().fg(t.text_muted)
    } else {
        t.border_style()
    };
    Block::default()
        .title(Span::styled(format!(" {} ", title), t.header_style()))
        .borders(Borders::ALL)
        .border_style(border_style)
}

fn render_placeholder(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    title: &str,
    message: &str,
    dimmed: bool,
) {
    let t = &state.theme;
    let block = screen_block(state, title, dimmed);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let text = Paragraph::new(Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(t.text_dim),
    )))
    .wrap(Wrap { trim: true });
    frame.render_widget(text, inner);
}

fn render_search(frame: &mut Frame, area: Rect, state: &AppState, dimmed: bool) {
    render_placeholder(
        frame,
        area,
        state,
        "Search",
        "Type a handle and press Enter to open a profile.",
        dimmed,
    );
}

fn render_notifications(frame: &mut Frame, area: Rect, state: &AppState, dimmed: bool) {
    let t = &state.theme;
    let block = screen_block(state, "Notifications", dimmed);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let count = state.store.notification_count;
    let lines = if count == 0 {
        vec![Line::from(Span::styled(
            "No unread notifications.",
            Style::default().fg(t.text_dim),
        ))]
    } else {
        vec![
            Line::from(vec![
                Span::styled(
                    format!("{}", count),
                    Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" unread", Style::default().fg(t.text_primary)),
            ]),
            Line::raw(""),
            Line::from(Span::styled(
                "Activity on your posts shows up here.",
                Style::default().fg(t.text_dim),
            )),
        ]
    };
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_settings(frame: &mut Frame, area: Rect, state: &AppState, dimmed: bool) {
    let t = &state.theme;
    let block = screen_block(state, "Settings", dimmed);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(vec![
            Span::styled("Signed in as  ", Style::default().fg(t.text_dim)),
            Span::styled(
                format!("@{}", state.me_handle),
                Style::default().fg(t.text_primary),
            ),
        ]),
        Line::from(vec![
            Span::styled("Theme         ", Style::default().fg(t.text_dim)),
            Span::styled(state.theme.name.clone(), Style::default().fg(t.accent)),
            Span::styled("  (T cycles)", Style::default().fg(t.text_muted)),
        ]),
        Line::raw(""),
        Line::from(Span::styled(
            "Edit ~/.config/roost/config.toml for service and polling.",
            Style::default().fg(t.text_dim),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_thread(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    handle: &str,
    rkey: &str,
    title: &str,
    dimmed: bool,
) {
    let t = &state.theme;
    let block = screen_block(state, title, dimmed);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let item = state
        .store
        .timeline()
        .iter()
        .find(|i| i.post.author.handle == handle && at_uri_rkey(&i.post.uri) == rkey);

    let Some(item) = item else {
        let missing = Paragraph::new(Line::from(Span::styled(
            "Post not in the local timeline.",
            Style::default().fg(t.text_dim),
        )));
        frame.render_widget(missing, inner);
        return;
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                item.post.author.name().to_string(),
                Style::default()
                    .fg(t.text_primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" @{}", item.post.author.handle),
                Style::default().fg(t.text_dim),
            ),
            Span::styled(
                format!(" · {}", time_ago(item.post.indexed_at, Utc::now())),
                Style::default().fg(t.text_muted),
            ),
        ]),
        Line::raw(""),
    ];
    for wrapped in textwrap::wrap(
        &item.post.record.text,
        (inner.width.saturating_sub(2) as usize).max(10),
    ) {
        lines.push(Line::from(Span::styled(
            wrapped.to_string(),
            Style::default().fg(t.text_primary),
        )));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled(
            format!("✎ {} replies", item.post.reply_count),
            Style::default().fg(t.text_dim),
        ),
        Span::raw("   "),
        Span::styled(
            format!("↻ {} reposts", item.post.repost_count),
            Style::default().fg(t.text_dim),
        ),
        Span::raw("   "),
        Span::styled(
            format!("♥ {} upvotes", item.post.upvote_count),
            Style::default().fg(t.text_dim),
        ),
    ]));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
