//! Infrastructure layer providing external service integrations.
//!
//! Currently limited to writing receipts for finished orders to disk.

pub mod receipt;

pub use receipt::*;
