//! Ice Cream Land - ordering kiosk library
//!
//! The ordering state machine and pricing rules behind a four-screen
//! ice cream checkout, plus the terminal front end that drives them.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
