//! HTTP request handlers.

pub mod common;
pub mod health;
pub mod tickets;

pub use health::*;
pub use tickets::*;
