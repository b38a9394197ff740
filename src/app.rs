//! Application struct and event loop.
//!
//! Owns the terminal, state, API client, and the channel the spawned
//! polling tasks report back on. Extracts the event loop from `main()`
//! into a testable, well-structured unit.

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use crate::api::{ApiClient, ApiEvent};
use crate::config::Config;
use crate::constants::EVENT_POLL_MS;
use crate::nav::FixedTabPurpose;
use crate::routes::Route;
use crate::shell::ReplyTo;
use crate::ui::{self, AppState};

/// Main application struct.
///
/// Owns all runtime resources: terminal handle, state, API channels.
pub struct App {
    state: AppState,
    api: ApiClient,

    api_tx: mpsc::UnboundedSender<ApiEvent>,
    api_rx: mpsc::UnboundedReceiver<ApiEvent>,
}

impl App {
    /// Create a new App and start the background polling task.
    pub fn new(config: &Config) -> Self {
        let state = AppState::new(config);
        let api = ApiClient::new(&config.service_url);
        let (api_tx, api_rx) = mpsc::unbounded_channel::<ApiEvent>();

        // Timeline + notification polling
        {
            let api = api.clone();
            let tx = api_tx.clone();
            let interval = Duration::from_secs(config.poll_interval_secs);
            tokio::spawn(async move {
                loop {
                    match api.get_timeline().await {
                        Ok(items) => {
                            if tx.send(ApiEvent::Timeline(items)).is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            if tx.send(ApiEvent::Error(e.to_string())).is_err() {
                                break;
                            }
                        }
                    }
                    if let Ok(count) = api.get_notification_count().await {
                        if tx.send(ApiEvent::NotificationCount(count)).is_err() {
                            break;
                        }
                    }
                    tokio::time::sleep(interval).await;
                }
            });
        }

        Self {
            state,
            api,
            api_tx,
            api_rx,
        }
    }

    /// Run the main event loop. Returns when the user quits.
    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        loop {
            terminal.draw(|frame| ui::renderer::render(frame, &mut self.state))?;

            self.drain_api_events();

            if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                    if self.state.should_quit {
                        break;
                    }
                }
            }

            self.tick();
        }

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }

    // ── Channel draining ─────────────────────────────────────────

    fn drain_api_events(&mut self) {
        while let Ok(event) = self.api_rx.try_recv() {
            match event {
                ApiEvent::Timeline(items) => {
                    self.state.store.set_timeline(items);
                }
                ApiEvent::NotificationCount(count) => {
                    self.state.store.notification_count = count;
                }
                ApiEvent::ActionOk => {
                    // Pull a fresh page so optimistic state reconciles
                    self.spawn_refresh();
                }
                ApiEvent::Error(err) => {
                    self.state.store.is_loading = false;
                    self.state.set_status(format!("Error: {}", err));
                }
            }
        }
    }

    // ── Background dispatch ──────────────────────────────────────

    fn spawn_refresh(&mut self) {
        let api = self.api.clone();
        let tx = self.api_tx.clone();
        tokio::spawn(async move {
            match api.get_timeline().await {
                Ok(items) => {
                    let _ = tx.send(ApiEvent::Timeline(items));
                }
                Err(e) => {
                    let _ = tx.send(ApiEvent::Error(e.to_string()));
                }
            }
            if let Ok(count) = api.get_notification_count().await {
                let _ = tx.send(ApiEvent::NotificationCount(count));
            }
        });
    }

    fn spawn_create_post(&self, text: String, reply_to: Option<ReplyTo>) {
        let api = self.api.clone();
        let tx = self.api_tx.clone();
        tokio::spawn(async move {
            let result = api.create_post(&text, reply_to.as_ref()).await;
            let _ = tx.send(match result {
                Ok(()) => ApiEvent::ActionOk,
                Err(e) => ApiEvent::Error(e.to_string()),
            });
        });
    }

    fn spawn_set_upvote(&self, uri: String, on: bool) {
        let api = self.api.clone();
        let tx = self.api_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = api.set_upvote(&uri, on).await {
                let _ = tx.send(ApiEvent::Error(e.to_string()));
            }
        });
    }

    fn spawn_set_repost(&self, uri: String, on: bool) {
        let api = self.api.clone();
        let tx = self.api_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = api.set_repost(&uri, on).await {
                let _ = tx.send(ApiEvent::Error(e.to_string()));
            }
        });
    }

    fn spawn_delete_post(&self, uri: String) {
        let api = self.api.clone();
        let tx = self.api_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(match api.delete_post(&uri).await {
                Ok(()) => ApiEvent::ActionOk,
                Err(e) => ApiEvent::Error(e.to_string()),
            });
        });
    }

    // ── Ticking ──────────────────────────────────────────────────

    fn tick(&mut self) {
        if self.state.shell.tick_new_tab_flash() {
            self.state.nav.clear_new_tab_flags();
        }
    }

    // ── Keyboard handling ────────────────────────────────────────

    fn handle_key(&mut self, key: crossterm::event::KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.state.should_quit = true;
            return;
        }

        if self.state.shell.is_composer_active {
            self.handle_key_composer(key);
            return;
        }

        if self.state.shell.is_tabs_selector_active {
            self.handle_key_tabs_selector(key);
            return;
        }

        if self.state.shell.is_menu_active {
            self.handle_key_menu(key);
            return;
        }

        if self.state.show_help {
            self.state.show_help = false;
            return;
        }

        self.handle_key_normal(key);
    }

    fn handle_key_composer(&mut self, key: crossterm::event::KeyEvent) {
        match key.code {
            KeyCode::Esc => self.state.shell.close_composer(),
            KeyCode::Enter => {
                if let Some((text, reply_to)) = self.state.shell.composer_submit() {
                    self.spawn_create_post(text, reply_to);
                    self.state.set_status("Posting...");
                }
            }
            KeyCode::Backspace => self.state.shell.composer_backspace(),
            KeyCode::Left => self.state.shell.composer_cursor_left(),
            KeyCode::Right => self.state.shell.composer_cursor_right(),
            KeyCode::Char(c) => self.state.shell.composer_input_char(c),
            _ => {}
        }
    }

    fn handle_key_tabs_selector(&mut self, key: crossterm::event::KeyEvent) {
        let count = self.state.nav.tab_count();
        match key.code {
            KeyCode::Esc | KeyCode::Tab => self.state.shell.toggle_tabs_selector(),
            KeyCode::Up | KeyCode::Char('k') => {
                if self.state.shell.tabs_selector_index > 0 {
                    self.state.shell.tabs_selector_index -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.state.shell.tabs_selector_index + 1 < count {
                    self.state.shell.tabs_selector_index += 1;
                }
            }
            KeyCode::Enter => {
                self.state.nav.switch_to(self.state.shell.tabs_selector_index);
                self.state.shell.toggle_tabs_selector();
            }
            KeyCode::Char('x') => {
                let idx = self.state.shell.tabs_selector_index.min(count - 1);
                let tab_id = self.state.nav.tabs()[idx].id;
                self.state.nav.close_tab(tab_id);
                let remaining = self.state.nav.tab_count();
                if self.state.shell.tabs_selector_index >= remaining {
                    self.state.shell.tabs_selector_index = remaining - 1;
                }
            }
            _ => {}
        }
    }

    fn handle_key_menu(&mut self, key: crossterm::event::KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('m') => self.state.shell.toggle_menu(),
            KeyCode::Char('h') => {
                self.state.shell.toggle_menu();
                self.press_home();
            }
            KeyCode::Char('b') => {
                self.state.shell.toggle_menu();
                self.press_notifications();
            }
            KeyCode::Char('s') => {
                self.state.shell.toggle_menu();
                self.state.nav.navigate_to("/search");
            }
            KeyCode::Char('p') => {
                self.state.shell.toggle_menu();
                let url = format!("/profile/{}", self.state.me_handle);
                self.state.nav.navigate_to(&url);
            }
            KeyCode::Char('S') => {
                self.state.shell.toggle_menu();
                self.state.nav.navigate_to("/settings");
            }
            _ => {}
        }
    }

    fn handle_key_normal(&mut self, key: crossterm::event::KeyEvent) {
        let len = self.current_list_len();
        match key.code {
            KeyCode::Char('q') => self.state.should_quit = true,

            // List movement
            KeyCode::Down | KeyCode::Char('j') => self.state.select_next(len),
            KeyCode::Up | KeyCode::Char('k') => self.state.select_prev(len),
            KeyCode::PageDown => self.state.page_down(len),
            KeyCode::PageUp => self.state.page_up(len),
            KeyCode::Char('g') => self.state.select_first(),

            // Opening things
            KeyCode::Enter => {
                if let Some(item) = self.state.selected_feed_item() {
                    let href = item.thread_href();
                    self.state.nav.navigate_to(&href);
                }
            }
            KeyCode::Char('o') => {
                if let Some(item) = self.state.selected_feed_item() {
                    let href = item.author_href();
                    self.state.nav.navigate_to(&href);
                }
            }

            // Post actions
            KeyCode::Char('l') => self.toggle_upvote_selected(),
            KeyCode::Char('r') => self.toggle_repost_selected(),
            KeyCode::Char('a') => self.reply_to_selected(),
            KeyCode::Char('n') => self.state.shell.open_composer(None),
            KeyCode::Char('d') => self.delete_selected(),

            // Destinations
            KeyCode::Char('h') => self.press_home(),
            KeyCode::Char('b') => self.press_notifications(),
            KeyCode::Char('s') => self.state.nav.navigate_to("/search"),
            KeyCode::Char('S') => self.state.nav.navigate_to("/settings"),

            // History
            KeyCode::Backspace => {
                if !self.state.nav.go_back() {
                    self.state.set_status("Already at the start");
                }
            }
            KeyCode::Char('f') => {
                let _ = self.state.nav.go_forward();
            }

            // Tabs
            KeyCode::Char('t') => self.open_new_tab(),
            KeyCode::Tab => {
                self.state.shell.toggle_tabs_selector();
            }
            KeyCode::Char('x') => {
                let tab_id = self.state.nav.tab().id;
                self.state.nav.close_tab(tab_id);
            }

            // Chrome
            KeyCode::Char('m') => self.state.shell.toggle_menu(),
            KeyCode::Char('T') => self.state.cycle_theme(),
            KeyCode::Char('R') => {
                self.state.store.is_loading = true;
                self.spawn_refresh();
            }
            KeyCode::Char('?') => self.state.show_help = true,

            _ => {}
        }
    }

    // ── Key helpers ──────────────────────────────────────────────

    /// Length of the list the active screen scrolls through.
    fn current_list_len(&self) -> usize {
        match self.state.active_route().route {
            Route::Home => self.state.store.timeline().len(),
            Route::Profile { handle } => self
                .state
                .store
                .timeline()
                .iter()
                .filter(|i| i.post.author.handle == handle)
                .count(),
            _ => 0,
        }
    }

    /// Home button: on the home lane at `/` jumps the list to the top,
    /// elsewhere on the lane resets it. Arriving from another tab while
    /// the lane sits at its history root re-pushes the root, which acts
    /// as a refresh.
    fn press_home(&mut self) {
        if self.state.nav.tab().fixed_tab_purpose == Some(FixedTabPurpose::Home) {
            if self.state.nav.tab().current().url == "/" {
                self.state.select_first();
            } else {
                self.state.nav.fixed_tab_reset();
            }
        } else {
            self.state.nav.switch_to(0);
            if self.state.nav.tab().index == 0 {
                self.state.nav.fixed_tab_reset();
            }
        }
    }

    /// Notifications button: already on the lane always resets it (a
    /// re-press is a refresh); otherwise switch, with the same
    /// reset-at-root behavior on arrival as the home button.
    fn press_notifications(&mut self) {
        if self.state.nav.tab().fixed_tab_purpose == Some(FixedTabPurpose::Notifications) {
            self.state.nav.fixed_tab_reset();
        } else {
            self.state.nav.switch_to(1);
            if self.state.nav.tab().index == 0 {
                self.state.nav.fixed_tab_reset();
            }
        }
    }

    fn open_new_tab(&mut self) {
        let url = self
            .state
            .selected_feed_item()
            .map(|i| i.thread_href())
            .unwrap_or_else(|| "/".to_string());
        if self.state.nav.new_tab(&url) {
            self.state.shell.start_new_tab_flash();
        } else {
            self.state.set_status("Tab limit reached");
        }
    }

    fn toggle_upvote_selected(&mut self) {
        let Some(uri) = self.state.selected_feed_item().map(|i| i.post.uri.clone()) else {
            return;
        };
        if let Some(on) = self.state.store.toggle_upvote(&uri) {
            self.spawn_set_upvote(uri, on);
        }
    }

    fn toggle_repost_selected(&mut self) {
        let Some(uri) = self.state.selected_feed_item().map(|i| i.post.uri.clone()) else {
            return;
        };
        if let Some(on) = self.state.store.toggle_repost(&uri) {
            self.spawn_set_repost(uri, on);
        }
    }

    fn reply_to_selected(&mut self) {
        let Some(item) = self.state.selected_feed_item() else {
            return;
        };
        let reply = ReplyTo {
            uri: item.post.uri.clone(),
            cid: item.post.cid.clone(),
            handle: item.post.author.handle.clone(),
            display_name: item.post.author.display_name.clone(),
            text: item.post.record.text.clone(),
        };
        self.state.shell.open_composer(Some(reply));
    }

    fn delete_selected(&mut self) {
        let Some(uri) = self.state.selected_feed_item().map(|i| i.post.uri.clone()) else {
            return;
        };
        if self.state.store.delete_post(&uri) {
            self.spawn_delete_post(uri);
            self.state.set_status("Post deleted");
        } else {
            self.state.set_status("You can only delete your own posts");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::testutil::make_item;
    use crossterm::event::KeyEvent;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        App::new(&Config::default())
    }

    #[tokio::test]
    async fn q_quits() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.state.should_quit);
    }

    #[tokio::test]
    async fn enter_opens_thread_for_selection() {
        let mut app = app();
        app.state
            .store
            .set_timeline(vec![make_item("alice.test", "3k1", "hi")]);
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(
            app.state.nav.tab().current().url,
            "/profile/alice.test/post/3k1"
        );
        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.state.nav.tab().current().url, "/");
    }

    #[tokio::test]
    async fn home_key_resets_the_home_lane() {
        let mut app = app();
        app.state.nav.navigate_to("/search");
        app.handle_key(key(KeyCode::Char('h')));
        assert_eq!(app.state.nav.tab().current().url, "/");

        // From a free tab it switches back instead
        app.state.nav.new_tab("/profile/bob.test");
        app.handle_key(key(KeyCode::Char('h')));
        assert_eq!(
            app.state.nav.tab().fixed_tab_purpose,
            Some(FixedTabPurpose::Home)
        );
    }

    #[tokio::test]
    async fn home_key_from_other_tab_refreshes_an_idle_home_lane() {
        let mut app = app();
        app.state.nav.new_tab("/profile/bob.test");
        // The home lane never moved, so arriving re-pushes its root
        app.handle_key(key(KeyCode::Char('h')));
        assert_eq!(
            app.state.nav.tab().fixed_tab_purpose,
            Some(FixedTabPurpose::Home)
        );
        assert_eq!(app.state.nav.tab().current().url, "/");
        assert_eq!(app.state.nav.tab().index, 1);
    }

    #[tokio::test]
    async fn notifications_key_repress_refreshes_the_lane() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('b')));
        assert_eq!(
            app.state.nav.tab().fixed_tab_purpose,
            Some(FixedTabPurpose::Notifications)
        );
        let index_on_arrival = app.state.nav.tab().index;

        // A second press resets even though the lane is already at root
        app.handle_key(key(KeyCode::Char('b')));
        assert_eq!(app.state.nav.tab().current().url, "/notifications");
        assert_eq!(app.state.nav.tab().index, index_on_arrival + 1);
    }

    #[tokio::test]
    async fn new_tab_key_flashes_and_opens_selection() {
        let mut app = app();
        app.state
            .store
            .set_timeline(vec![make_item("alice.test", "3k1", "hi")]);
        app.handle_key(key(KeyCode::Char('t')));
        assert_eq!(app.state.nav.tab_count(), 3);
        assert!(app.state.nav.has_new_tab());
        assert!(app.state.shell.new_tab_flash > 0);
        assert_eq!(
            app.state.nav.tab().current().url,
            "/profile/alice.test/post/3k1"
        );
    }

    #[tokio::test]
    async fn flash_expiry_clears_new_tab_flags() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('t')));
        assert!(app.state.nav.has_new_tab());
        for _ in 0..crate::constants::NEW_TAB_FLASH_TICKS {
            app.tick();
        }
        assert!(!app.state.nav.has_new_tab());
    }

    #[tokio::test]
    async fn upvote_key_flips_viewer_state() {
        let mut app = app();
        app.state
            .store
            .set_timeline(vec![make_item("alice.test", "3k1", "hi")]);
        app.handle_key(key(KeyCode::Char('l')));
        assert!(app.state.store.timeline()[0].is_upvoted());
    }

    #[tokio::test]
    async fn delete_is_refused_for_other_authors() {
        let mut app = app();
        app.state
            .store
            .set_timeline(vec![make_item("alice.test", "3k1", "hi")]);
        app.handle_key(key(KeyCode::Char('d')));
        assert_eq!(app.state.store.timeline().len(), 1);
    }

    #[tokio::test]
    async fn composer_captures_keys() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('n')));
        assert!(app.state.shell.is_composer_active);
        app.handle_key(key(KeyCode::Char('q')));
        assert!(!app.state.should_quit); // went into the draft, not quit
        assert_eq!(app.state.shell.composer_text, "q");
        app.handle_key(key(KeyCode::Esc));
        assert!(!app.state.shell.is_composer_active);
    }

    #[tokio::test]
    async fn tabs_selector_switches_on_enter() {
        let mut app = app();
        app.handle_key(key(KeyCode::Tab));
        assert!(app.state.shell.is_tabs_selector_active);
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));
        assert!(!app.state.shell.is_tabs_selector_active);
        assert_eq!(
            app.state.nav.tab().fixed_tab_purpose,
            Some(FixedTabPurpose::Notifications)
        );
    }

    #[tokio::test]
    async fn menu_demotes_then_navigates() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('m')));
        assert!(app.state.shell.is_menu_active);
        app.handle_key(key(KeyCode::Char('s')));
        assert!(!app.state.shell.is_menu_active);
        assert_eq!(app.state.nav.tab().current().url, "/search");
    }

    #[tokio::test]
    async fn timeline_event_lands_in_store() {
        let mut app = app();
        app.api_tx
            .send(ApiEvent::Timeline(vec![make_item("alice.test", "1", "hi")]))
            .unwrap();
        app.api_tx.send(ApiEvent::NotificationCount(3)).unwrap();
        app.drain_api_events();
        assert_eq!(app.state.store.timeline().len(), 1);
        assert_eq!(app.state.store.notification_count, 3);
    }

    #[tokio::test]
    async fn api_error_lands_in_the_status_bar() {
        let mut app = app();
        app.state.store.is_loading = true;
        app.api_tx
            .send(ApiEvent::Error("connection refused".to_string()))
            .unwrap();
        app.drain_api_events();
        assert_eq!(
            app.state.status_message(),
            Some("Error: connection refused")
        );
        assert!(!app.state.store.is_loading);
    }
}
