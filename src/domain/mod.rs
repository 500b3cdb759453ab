//! Domain layer: menu catalog, order fields, pricing and the ordering
//! state machine. Nothing here performs I/O.

pub mod errors;
pub mod flow;
pub mod models;
pub mod pricing;

pub use errors::*;
pub use flow::*;
pub use models::*;
pub use pricing::*;
