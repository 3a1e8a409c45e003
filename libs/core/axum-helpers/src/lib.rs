//! Shared Axum helpers: server startup with graceful shutdown and
//! consistent JSON error fallbacks.

pub mod errors;
pub mod server;
pub mod shutdown;

pub use errors::{not_found, ErrorResponse};
pub use server::create_app;
pub use shutdown::shutdown_signal;
