//! UI layer: state, theme, and the ratatui renderer.

pub mod renderer;
pub mod state;
pub mod theme;

pub use state::AppState;
