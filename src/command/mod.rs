//! The channel membership command itself, independent of any transport.

pub mod fetcher;
pub mod handler;
pub mod parser;
pub mod ports;
pub mod report;
pub mod resolver;

pub use fetcher::{CHANNEL_PAGE_SIZE, ChannelFetcher};
pub use handler::CommandHandler;
pub use ports::{DirectoryClient, Responder};
pub use report::{ComparisonReport, ComparisonResult, FormattedReport, SingleUserReport};
