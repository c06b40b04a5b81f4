//! # Configuration
//!
//! Settings shared by every front end of the todo client.

pub mod client;

pub use client::{ClientConfig, ConfigError, ConfigFormat};
