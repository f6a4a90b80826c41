//! HTTP API Module
//!
//! Thin JSON interface over the registry service.

mod methods;
mod server;

pub use methods::*;
pub use server::*;
