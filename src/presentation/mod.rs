//! Presentation layer handling terminal UI and user input.
//!
//! This module renders the notes panes and the review window using ratatui
//! and routes keyboard input to the application state.

pub mod ui;
pub mod input;

pub use ui::*;
pub use input::*;
