use super::PriceSource;
use crate::config::Config;
use crate::error::{ArbError, Result};
use crate::models::{PriceQuote, QuoteStatus};
use async_trait::async_trait;
use mtg_common::CardId;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "http://www.cardshark.com";

/// Status text CardShark sends for a known card
const VALID_STATUS: &str = "valid card";

/// Get-Price response document
#[derive(Debug, Deserialize)]
struct PriceResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    price: String,
    #[serde(default)]
    foilprice: String,
    #[serde(default)]
    url: String,
}

impl From<PriceResponse> for PriceQuote {
    fn from(response: PriceResponse) -> Self {
        let status = if response.status.trim() == VALID_STATUS {
            QuoteStatus::Valid
        } else {
            QuoteStatus::Invalid(response.status.trim().to_string())
        };

        PriceQuote {
            status,
            market_price: parse_amount(&response.price),
            foil_price: parse_amount(&response.foilprice),
            url: response.url.trim().to_string(),
        }
    }
}

/// "1,234.56" -> 1234.56; unparseable or non-finite amounts count as 0
fn parse_amount(raw: &str) -> f64 {
    raw.trim()
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .unwrap_or(0.0)
}

/// HTTP client for the CardShark Get-Price API
pub struct CardsharkClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    user_name: String,
}

impl CardsharkClient {
    pub fn new(config: &Config) -> Self {
        Self::with_base_url(config, DEFAULT_BASE_URL)
    }

    /// Point the client at another host (tests, mirrors)
    pub fn with_base_url(config: &Config, base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            user_name: config.user_name.clone(),
        }
    }

    fn price_url(&self, card: &CardId) -> String {
        format!(
            "{}/API/{}/Get-Price.aspx?apiKey={}&CardName={}&CardSet={}",
            self.base_url,
            urlencoding::encode(&self.user_name),
            urlencoding::encode(&self.api_key),
            urlencoding::encode(&card.name),
            urlencoding::encode(&card.set)
        )
    }
}

#[async_trait]
impl PriceSource for CardsharkClient {
    async fn quote(&self, card: &CardId) -> Result<PriceQuote> {
        log::debug!("Fetching CardShark price for {}", card);

        let response = self.client.get(self.price_url(card)).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ArbError::HttpStatus { status, body });
        }

        let body = response.text().await?;
        let parsed: PriceResponse = quick_xml::de::from_str(&body)?;

        Ok(parsed.into())
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
