//! Buylist Arb - MTG buylist arbitrage finder
//!
//! Reads a Card Kingdom buylist export, maps every card to CardShark's naming,
//! looks up CardShark's price and reports cards Card Kingdom buys for more
//! than the market sells them.

pub mod cardshark;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod ingest;
pub mod models;
pub mod pipeline;
pub mod sink;

pub use cardshark::{CardsharkClient, PriceSource};
pub use config::Config;
pub use error::{ArbError, Result};
pub use ingest::EntryReader;
pub use models::{ArbitrageResult, PriceQuote, QuoteStatus, RawEntry};
pub use pipeline::{run, RunStats};
pub use sink::ResultSink;
