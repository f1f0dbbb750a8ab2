//! HTTP API module.
//!
//! Serves the resolved settings bundle to web clients at startup.

pub mod server;
pub mod types;
pub mod logs;

pub use server::{router, start_server};
pub use types::*;
pub use logs::*;
