use mtg_common::CardId;

/// One row of the Card Kingdom buylist export
#[derive(Debug, Clone, PartialEq)]
pub struct RawEntry {
    pub name: String,
    pub set: String,
    pub is_foil: bool,
    pub buylist_price: f64,
}

impl RawEntry {
    pub fn new(name: impl Into<String>, set: impl Into<String>, is_foil: bool, buylist_price: f64) -> Self {
        Self {
            name: name.into(),
            set: set.into(),
            is_foil,
            buylist_price,
        }
    }
}

/// A buylist entry after canonicalization, ready for a price lookup
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalEntry {
    pub card: CardId,
    pub is_foil: bool,
    pub buylist_price: f64,
}

/// Business status carried in a price response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteStatus {
    Valid,
    /// Anything but "valid card", with the status text as sent
    Invalid(String),
}

/// Prices CardShark returned for one card
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    pub status: QuoteStatus,
    pub market_price: f64,
    pub foil_price: f64,
    pub url: String,
}

impl PriceQuote {
    pub fn is_valid(&self) -> bool {
        self.status == QuoteStatus::Valid
    }
}

/// A buylist entry that sells for more than the market price
#[derive(Debug, Clone, PartialEq)]
pub struct ArbitrageResult {
    pub url: String,
    pub name: String,
    pub set: String,
    pub is_foil: bool,
    pub buylist_price: f64,
    pub market_price: f64,
    pub difference: f64,
    pub spread_pct: f64,
}
