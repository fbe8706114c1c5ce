//! Buylist versus market price decision

use crate::config::TOLERANCE;
use crate::models::{ArbitrageResult, CanonicalEntry, PriceQuote};

/// Per-variant prices for these sets are unreliable
fn has_unreliable_variants(set: &str) -> bool {
    set.starts_with("Promotional") || set == "Prerelease Stamped"
}

/// Price to compare the buylist offer against
pub fn resolve_price(set: &str, is_foil: bool, quote: &PriceQuote) -> f64 {
    if has_unreliable_variants(set) {
        quote.foil_price.min(quote.market_price)
    } else if is_foil {
        quote.foil_price
    } else {
        quote.market_price
    }
}

/// Build a result when the buylist pays enough above the market price
pub fn evaluate(entry: &CanonicalEntry, quote: &PriceQuote) -> Option<ArbitrageResult> {
    let price = resolve_price(&entry.card.set, entry.is_foil, quote);

    if !(price > 0.0 && price <= TOLERANCE * entry.buylist_price) {
        return None;
    }

    let difference = entry.buylist_price - price;

    Some(ArbitrageResult {
        url: quote.url.clone(),
        name: entry.card.name.clone(),
        set: entry.card.set.clone(),
        is_foil: entry.is_foil,
        buylist_price: entry.buylist_price,
        market_price: price,
        difference,
        spread_pct: 100.0 * difference / price,
    })
}
