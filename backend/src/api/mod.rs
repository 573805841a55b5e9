//! HTTP API module.
//!
//! The axum server, its request/response bodies, and the log broadcaster
//! shared with the file processing pipeline.

pub mod logs;
pub mod server;
pub mod types;

pub use logs::*;
pub use server::{router, start_server};
pub use types::*;
