//! HTTP server startup and lifecycle.

mod server;

pub use server::{start_server, ServerError};
