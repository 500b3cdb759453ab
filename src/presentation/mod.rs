//! Presentation layer handling terminal UI and user input.
//!
//! Renders one screen per order step with ratatui and maps crossterm key
//! events onto application actions.

pub mod ui;
pub mod input;

pub use ui::*;
pub use input::*;
