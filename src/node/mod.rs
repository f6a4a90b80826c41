//! Node module - async service over the chain

mod service;

pub use service::*;
