//! API Lambda handler and request processing

pub mod handler;
pub mod helpers;
pub mod update_handler;
pub mod webhook;

// Re-export the main handler for convenience
pub use handler::handler;
