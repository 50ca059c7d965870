//! Worker Lambda handler and command execution

pub mod handler;

// Re-export the main handler for convenience
pub use handler::handler;
