//! CardShark price lookups

mod client;

pub use client::{CardsharkClient, DEFAULT_BASE_URL};

use crate::error::Result;
use crate::models::PriceQuote;
use async_trait::async_trait;
use mtg_common::CardId;

/// Anything that can quote a price for a canonical card
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// One lookup per call, no retries
    async fn quote(&self, card: &CardId) -> Result<PriceQuote>;
}
