//! All Slack-specific functionality

pub mod client;
pub mod command_parser;
pub mod renderer;
pub mod responder;
pub mod response_builder;

// Re-export main types for convenience
pub use client::SlackClient;
pub use renderer::{BlockKitRenderer, MrkdwnRenderer, RenderedMessage, ReportRenderer};
pub use responder::ResponseUrlResponder;
