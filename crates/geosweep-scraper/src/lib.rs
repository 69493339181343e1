pub mod client;
pub mod error;
pub mod expand;
pub mod fetcher;

pub use client::LocationClient;
pub use error::ScraperError;
pub use expand::{ExpansionResult, ExpansionStats, FuzzyExpander};
pub use fetcher::LocationFetcher;
