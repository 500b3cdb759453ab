//! Application layer coordinating the order flow with the UI.
//!
//! Holds the session's order flow alongside cursor and input state, and
//! turns flow failures into status notices.

pub mod state;

pub use state::*;
