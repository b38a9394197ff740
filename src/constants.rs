//! Application-wide constants.
//!
//! Centralizes magic numbers, navigation limits, and configuration
//! defaults so they are not scattered across the codebase.

use std::path::PathBuf;

// ── Timing ────────────────────────────────────────────────────────
/// Event poll timeout (ms) -- how often the UI checks for input.
pub const EVENT_POLL_MS: u64 = 50;
/// Minimum allowed timeline poll interval (seconds).
pub const MIN_POLL_SECS: u64 = 5;
/// Default timeline poll interval (seconds).
pub const DEFAULT_POLL_SECS: u64 = 60;
/// Status message display duration (seconds).
pub const STATUS_MESSAGE_TIMEOUT_SECS: u64 = 5;
/// Ticks the new-tab highlight stays lit after a tab is opened.
pub const NEW_TAB_FLASH_TICKS: u64 = 5;

// ── Navigation ────────────────────────────────────────────────────
/// How many back-stack screens per tab stay mounted for rendering.
/// Older history remains addressable through the navigation model.
pub const BACK_RENDER_WINDOW: usize = 5;
/// Maximum number of open tabs.
pub const MAX_TABS: usize = 16;

// ── Feed ──────────────────────────────────────────────────────────
/// Maximum timeline items kept in the store.
pub const MAX_TIMELINE_ITEMS: usize = 200;
/// Page up/down step size in the feed list.
pub const PAGE_SIZE: usize = 10;
/// Maximum characters accepted by the composer.
pub const MAX_POST_LEN: usize = 300;

// ── Service ───────────────────────────────────────────────────────
/// Default feed service base URL.
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:2583";
/// HTTP request timeout (seconds).
pub const HTTP_TIMEOUT_SECS: u64 = 15;

// ── Popup Dimensions ──────────────────────────────────────────────
/// Composer overlay width.
pub const COMPOSER_POPUP_WIDTH: u16 = 64;
/// Composer overlay height.
pub const COMPOSER_POPUP_HEIGHT: u16 = 12;
/// Tabs selector overlay width.
pub const TABS_POPUP_WIDTH: u16 = 60;
/// Help overlay width.
pub const HELP_POPUP_WIDTH: u16 = 52;
/// Help overlay height.
pub const HELP_POPUP_HEIGHT: u16 = 26;

// ── Paths ─────────────────────────────────────────────────────────

/// Returns the user's home directory, falling back to /tmp.
pub fn home_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string()))
}

/// Returns `~/.config/roost/`.
pub fn config_dir() -> PathBuf {
    home_dir().join(".config").join("roost")
}

/// Returns `~/.config/roost/config.toml`.
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Returns `~/.config/roost/themes/`.
pub fn custom_theme_dir() -> PathBuf {
    config_dir().join("themes")
}

/// Returns `~/.config/roost/themes/<name>.toml`.
pub fn custom_theme_path(name: &str) -> PathBuf {
    custom_theme_dir().join(format!("{}.toml", name))
}
