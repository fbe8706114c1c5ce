//! Tests for the buylist pipeline, against an in-memory price source.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::*;
use crate::ingest::EntryReader;
use crate::models::PriceQuote;

/// Serves canned quotes; unknown cards fail like a 404
#[derive(Default)]
struct FakePrices {
    quotes: HashMap<CardId, PriceQuote>,
    calls: AtomicUsize,
}

impl FakePrices {
    fn with(mut self, name: &str, set: &str, market_price: f64, foil_price: f64) -> Self {
        self.quotes.insert(
            CardId::new(name, set),
            PriceQuote {
                status: QuoteStatus::Valid,
                market_price,
                foil_price,
                url: format!("http://www.cardshark.com/{name}"),
            },
        );
        self
    }

    fn with_status(mut self, name: &str, set: &str, status: &str) -> Self {
        self.quotes.insert(
            CardId::new(name, set),
            PriceQuote {
                status: QuoteStatus::Invalid(status.to_string()),
                market_price: 0.0,
                foil_price: 0.0,
                url: String::new(),
            },
        );
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceSource for FakePrices {
    async fn quote(&self, card: &CardId) -> Result<PriceQuote> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.quotes.get(card).cloned().ok_or_else(|| ArbError::HttpStatus {
            status: reqwest::StatusCode::NOT_FOUND,
            body: card.to_string(),
        })
    }
}

/// Panics on one card, answers everything else from `prices`
struct PanickingPrices {
    prices: FakePrices,
    panic_on: &'static str,
}

#[async_trait]
impl PriceSource for PanickingPrices {
    async fn quote(&self, card: &CardId) -> Result<PriceQuote> {
        if card.name == self.panic_on {
            panic!("price source crashed on {}", card.name);
        }
        self.prices.quote(card).await
    }
}

fn engine() -> Arc<Canonicalizer> {
    Arc::new(Canonicalizer::embedded().unwrap())
}

fn ok_entries(entries: Vec<RawEntry>) -> Vec<Result<RawEntry>> {
    entries.into_iter().map(Ok).collect()
}

/// Run the pipeline into an in-memory sink, returning the CSV it produced
async fn run_to_csv(
    entries: Vec<RawEntry>,
    prices: Arc<FakePrices>,
    concurrency: usize,
) -> (RunStats, String) {
    let mut sink = ResultSink::new(Vec::new());
    let stats = run(ok_entries(entries), engine(), prices, &mut sink, concurrency)
        .await
        .unwrap();
    let output = String::from_utf8(sink.into_inner().unwrap()).unwrap();

    (stats, output)
}

fn sorted_rows(csv: &str) -> Vec<String> {
    let mut rows: Vec<String> = csv.lines().skip(1).map(str::to_string).collect();
    rows.sort();
    rows
}

fn mixed_buylist() -> Vec<RawEntry> {
    vec![
        RawEntry::new("Sengir Vampire", "Revised", false, 10.0),
        RawEntry::new("Serra Angel", "Revised", false, 8.0),
        RawEntry::new("Shivan Dragon", "Revised", true, 40.0),
        RawEntry::new("Island", "Ice Age", false, 1.0),
        RawEntry::new("Lightning Bolt", "Revised", false, 0.05),
        RawEntry::new("Glory (Prerelease Foil)", "Promotional", true, 12.0),
        RawEntry::new("Counterspell", "Revised", false, 3.0),
    ]
}

fn mixed_prices() -> FakePrices {
    FakePrices::default()
        .with("Sengir Vampire", "Revised Edition", 5.0, 0.0)
        .with("Serra Angel", "Revised Edition", 7.0, 0.0)
        .with("Shivan Dragon", "Revised Edition", 50.0, 20.0)
        .with("Glory (Prerelease)", "Prerelease Stamped", 3.0, 6.0)
}

// ── process_entry ────────────────────────────────────────────────────

#[tokio::test]
async fn below_threshold_is_never_canonicalized() {
    // a guild kit card missing from the tables would be an error if canonicalized
    let prices = FakePrices::default();
    let entry = RawEntry::new("Unknown Card", "Guilds of Ravnica Guild Kits", false, 0.09);

    let outcome = process_entry(entry, &engine(), &prices).await;

    assert!(matches!(outcome, Outcome::BelowThreshold));
    assert_eq!(prices.calls(), 0);
}

#[tokio::test]
async fn skip_and_error_never_reach_lookup() {
    let prices = FakePrices::default();

    let skipped = process_entry(RawEntry::new("Island", "Ice Age", false, 1.0), &engine(), &prices).await;
    let unresolved = process_entry(
        RawEntry::new("Unknown Card", "Guilds of Ravnica Guild Kits", false, 1.0),
        &engine(),
        &prices,
    )
    .await;

    assert!(matches!(skipped, Outcome::Skipped));
    assert!(matches!(unresolved, Outcome::Unresolved(_)));
    assert_eq!(prices.calls(), 0);
}

#[tokio::test]
async fn opportunity_carries_canonical_identity() {
    let prices = FakePrices::default().with("Sengir Vampire", "Revised Edition", 5.0, 0.0);

    let outcome = process_entry(
        RawEntry::new("Sengir Vampire", "3rd Edition", false, 10.0),
        &engine(),
        &prices,
    )
    .await;

    match outcome {
        Outcome::Emitted(result) => {
            assert_eq!(result.name, "Sengir Vampire");
            assert_eq!(result.set, "Revised Edition");
            assert_eq!(result.difference, 5.0);
            assert_eq!(result.url, "http://www.cardshark.com/Sengir Vampire");
        }
        other => panic!("Expected Outcome::Emitted, got: {other:?}"),
    }
}

#[tokio::test]
async fn transport_error_is_a_lookup_failure() {
    let prices = FakePrices::default();

    let outcome = process_entry(
        RawEntry::new("Sengir Vampire", "Revised", false, 10.0),
        &engine(),
        &prices,
    )
    .await;

    match outcome {
        Outcome::LookupFailed { card, error } => {
            assert_eq!(card, CardId::new("Sengir Vampire", "Revised Edition"));
            assert!(matches!(error, ArbError::HttpStatus { .. }));
        }
        other => panic!("Expected Outcome::LookupFailed, got: {other:?}"),
    }
}

#[tokio::test]
async fn nan_buylist_price_is_below_threshold() {
    let prices = FakePrices::default().with("Sengir Vampire", "Revised Edition", 5.0, 0.0);

    let outcome = process_entry(
        RawEntry::new("Sengir Vampire", "Revised", false, f64::NAN),
        &engine(),
        &prices,
    )
    .await;

    assert!(matches!(outcome, Outcome::BelowThreshold));
    assert_eq!(prices.calls(), 0);
}

#[tokio::test]
async fn foil_flag_survives_canonicalization() {
    let prices = FakePrices::default().with("Shivan Dragon", "Revised Edition", 50.0, 20.0);

    let outcome = process_entry(
        RawEntry::new("Shivan Dragon", "Revised", true, 40.0),
        &engine(),
        &prices,
    )
    .await;

    match outcome {
        Outcome::Emitted(result) => {
            assert!(result.is_foil);
            assert_eq!(result.market_price, 20.0);
        }
        other => panic!("Expected Outcome::Emitted, got: {other:?}"),
    }
}

#[test]
fn known_gaps() {
    assert!(is_known_gap(&CardId::new("Glory (Prerelease)", "Prerelease Stamped")));
    assert!(is_known_gap(&CardId::new("Subterfuge", "Conspiracy Take the Crown")));
    assert!(is_known_gap(&CardId::new("Sun Ce, Young Conquerer", "Portal Three Kingdoms")));
    assert!(!is_known_gap(&CardId::new("Sengir Vampire", "Revised Edition")));
}

// ── run ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn run_counts_every_row_once() {
    let (stats, output) = run_to_csv(mixed_buylist(), Arc::new(mixed_prices()), 4).await;

    assert_eq!(stats.rows, 7);
    assert_eq!(stats.below_threshold, 1);
    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.lookup_failures, 1);
    // Serra Angel at 7.00 is above 0.75 * 8.00, Shivan foil at 20.00 is within 0.75 * 40.00
    assert_eq!(stats.discarded, 1);
    assert_eq!(stats.emitted, 3);
    assert_eq!(sorted_rows(&output).len(), 3);
    assert_eq!(stats.reported_errors(), 1);
}

#[tokio::test]
async fn worker_count_does_not_change_results() {
    let (_, single) = run_to_csv(mixed_buylist(), Arc::new(mixed_prices()), 1).await;
    let (_, parallel) = run_to_csv(mixed_buylist(), Arc::new(mixed_prices()), 8).await;

    assert_eq!(sorted_rows(&single), sorted_rows(&parallel));
    assert_eq!(sorted_rows(&single).len(), 3);
}

#[tokio::test]
async fn exempt_invalid_status_is_silent() {
    let prices = FakePrices::default().with_status("Glory (Prerelease)", "Prerelease Stamped", "invalid card");
    let entries = vec![RawEntry::new("Glory (Prerelease Foil)", "Promotional", true, 12.0)];

    let (stats, output) = run_to_csv(entries, Arc::new(prices), 8).await;

    assert_eq!(stats.invalid_suppressed, 1);
    assert_eq!(stats.reported_errors(), 0);
    assert_eq!(stats.emitted, 0);
    assert_eq!(output, "");
}

#[tokio::test]
async fn unexempted_invalid_status_is_reported_once() {
    let prices = FakePrices::default().with_status("Sengir Vampire", "Revised Edition", "invalid card");
    let entries = vec![RawEntry::new("Sengir Vampire", "Revised", false, 10.0)];

    let (stats, output) = run_to_csv(entries, Arc::new(prices), 8).await;

    assert_eq!(stats.invalid_reported, 1);
    assert_eq!(stats.reported_errors(), 1);
    assert_eq!(stats.emitted, 0);
    assert_eq!(output, "");
}

#[tokio::test]
async fn malformed_row_aborts_the_run() {
    let entries = vec![
        Ok(RawEntry::new("Sengir Vampire", "Revised", false, 10.0)),
        Err(ArbError::MalformedInput("line 3 has 2 columns".to_string())),
    ];
    let prices: Arc<dyn PriceSource> = Arc::new(mixed_prices());
    let mut sink = ResultSink::new(Vec::new());

    match run(entries, engine(), prices, &mut sink, 2).await {
        Err(ArbError::MalformedInput(_)) => {}
        other => panic!("Expected ArbError::MalformedInput, got: {other:?}"),
    }
}

#[tokio::test]
async fn sink_receives_header_and_rows() {
    let prices = FakePrices::default().with("Sengir Vampire", "Revised Edition", 5.0, 0.0);
    let entries = vec![RawEntry::new("Sengir Vampire", "Revised", false, 10.0)];

    let (_, output) = run_to_csv(entries, Arc::new(prices), 8).await;

    assert_eq!(
        output,
        "URL,Name,Set,Foil,Buylist Price,CS Price,Arb,Spread\n\
         http://www.cardshark.com/Sengir Vampire,Sengir Vampire,Revised Edition,,10.00,5.00,5.00,100.00%\n"
    );
}

#[tokio::test]
async fn panicking_lookup_only_drops_its_own_entry() {
    let prices: Arc<dyn PriceSource> = Arc::new(PanickingPrices {
        prices: mixed_prices(),
        panic_on: "Serra Angel",
    });
    let entries = vec![
        RawEntry::new("Sengir Vampire", "Revised", false, 10.0),
        RawEntry::new("Serra Angel", "Revised", false, 8.0),
        RawEntry::new("Shivan Dragon", "Revised", true, 40.0),
    ];
    let mut sink = ResultSink::new(Vec::new());

    let stats = run(ok_entries(entries), engine(), prices, &mut sink, 1)
        .await
        .unwrap();

    assert_eq!(stats.rows, 3);
    assert_eq!(stats.worker_failures, 1);
    assert_eq!(stats.reported_errors(), 1);
    assert_eq!(stats.emitted, 2);

    let output = String::from_utf8(sink.into_inner().unwrap()).unwrap();
    assert!(output.contains(",Sengir Vampire,"));
    assert!(output.contains(",Shivan Dragon,"));
}

#[tokio::test]
async fn rows_stream_from_a_csv_reader() {
    let csv = "Id,Card Name,CK_Modif_Set,Rarity,Edition,NF/F,Qty,BL_Value\n\
               1,Sengir Vampire,Revised,U,3ED,,4,$10.00\n\
               2,Island,Ice Age,L,ICE,,9,$1.00\n\
               3,Lightning Bolt,Revised,C,3ED,,2,$0.05\n";
    let entries = EntryReader::from_reader(std::io::Cursor::new(csv.as_bytes().to_vec())).unwrap();
    let prices: Arc<dyn PriceSource> = Arc::new(mixed_prices());
    let mut sink = ResultSink::new(Vec::new());

    let stats = run(entries, engine(), prices, &mut sink, 2).await.unwrap();

    assert_eq!(stats.rows, 3);
    assert_eq!(stats.emitted, 1);
    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.below_threshold, 1);
}
