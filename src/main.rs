//! # Roost - Terminal Social Feed Client
//!
//! A multi-tab terminal client for a small social feed service: browse
//! your timeline, open threads and profiles in tabs with full back/forward
//! history, and post, reply, upvote, and repost without leaving the shell.

mod api;
mod app;
mod config;
pub mod constants;
mod models;
mod nav;
mod routes;
mod shell;
mod store;
mod ui;
mod utils;

use anyhow::Result;
use clap::Parser;

use config::Config;
use constants::MIN_POLL_SECS;

/// Roost - Terminal Social Feed Client
#[derive(Parser, Debug)]
#[command(name = "roost", version, about = "A multi-tab terminal social feed client")]
struct Cli {
    /// Color theme (default, gruvbox, nord, dracula, or a custom theme name)
    #[arg(long, short = 't')]
    theme: Option<String>,

    /// Feed service base URL
    #[arg(long, value_name = "URL")]
    service: Option<String>,

    /// Timeline poll interval in seconds
    #[arg(long, short = 'p', value_name = "SECS")]
    poll_rate: Option<u64>,

    /// Handle to sign in as (overrides the config file)
    #[arg(long, value_name = "HANDLE")]
    handle: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load and apply CLI overrides to config
    let mut config = Config::load();
    if let Some(ref theme_name) = cli.theme {
        config.theme = theme_name.clone();
    }
    if let Some(ref service) = cli.service {
        config.service_url = service.clone();
    }
    if let Some(rate) = cli.poll_rate {
        config.poll_interval_secs = rate.max(MIN_POLL_SECS);
    }
    if let Some(ref handle) = cli.handle {
        config.handle = handle.clone();
    }

    let mut app = app::App::new(&config);
    app.run().await
}
