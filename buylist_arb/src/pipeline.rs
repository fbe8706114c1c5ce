//! Bounded-concurrency buylist processing
//!
//! Each entry runs canonicalize -> price lookup -> evaluate in its own task.
//! Rows are read on a blocking thread into a small bounded queue. At most
//! `concurrency` tasks are in flight; the dispatcher waits for a free permit
//! before taking the next row. Tasks report an [`Outcome`] over a channel to
//! the drain loop, which is the only writer to the sink and the only place
//! per-entry problems are logged.

use crate::cardshark::PriceSource;
use crate::config::THRESHOLD;
use crate::error::{ArbError, Result};
use crate::evaluator;
use crate::models::{ArbitrageResult, CanonicalEntry, QuoteStatus, RawEntry};
use crate::sink::ResultSink;
use mtg_common::{CardId, Canonicalizer, Resolution, Unresolved};
use std::io::Write;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;

/// Sets CardShark does not carry, so a "not found" is expected
const UNLISTED_SETS: &[&str] = &["Prerelease Stamped", "Conspiracy Take the Crown"];

/// Cards CardShark knows under a name we cannot produce
const UNLISTED_CARDS: &[&str] = &["Sun Ce, Young Conquerer"];

/// What happened to a single buylist entry
#[derive(Debug)]
pub enum Outcome {
    /// Buylist price under [`THRESHOLD`], never canonicalized
    BelowThreshold,
    Skipped,
    Unresolved(Unresolved),
    LookupFailed { card: CardId, error: ArbError },
    /// Business status other than "valid card"
    Invalid {
        card: CardId,
        status: String,
        exempt: bool,
    },
    /// Priced, but not an opportunity
    Discarded,
    Emitted(ArbitrageResult),
    /// The entry's task panicked before reporting
    WorkerFailed(ArbError),
}

/// Counters for one run, one outcome per input row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub rows: usize,
    pub below_threshold: usize,
    pub skipped: usize,
    pub unresolved: usize,
    pub lookup_failures: usize,
    pub invalid_reported: usize,
    pub invalid_suppressed: usize,
    pub discarded: usize,
    pub emitted: usize,
    pub worker_failures: usize,
}

impl RunStats {
    /// Per-entry problems that were logged as errors
    pub fn reported_errors(&self) -> usize {
        self.unresolved + self.lookup_failures + self.invalid_reported + self.worker_failures
    }

    fn record(&mut self, outcome: &Outcome) {
        self.rows += 1;
        match outcome {
            Outcome::BelowThreshold => self.below_threshold += 1,
            Outcome::Skipped => self.skipped += 1,
            Outcome::Unresolved(_) => self.unresolved += 1,
            Outcome::LookupFailed { .. } => self.lookup_failures += 1,
            Outcome::Invalid { exempt: true, .. } => self.invalid_suppressed += 1,
            Outcome::Invalid { exempt: false, .. } => self.invalid_reported += 1,
            Outcome::Discarded => self.discarded += 1,
            Outcome::Emitted(_) => self.emitted += 1,
            Outcome::WorkerFailed(_) => self.worker_failures += 1,
        }
    }

    pub fn log_summary(&self) {
        log::info!(
            "Processed {} rows: {} emitted, {} discarded, {} below threshold, {} skipped",
            self.rows,
            self.emitted,
            self.discarded,
            self.below_threshold,
            self.skipped
        );
        log::info!(
            "Errors: {} unresolved, {} lookup failures, {} invalid ({} known gaps suppressed), {} worker failures",
            self.unresolved,
            self.lookup_failures,
            self.invalid_reported,
            self.invalid_suppressed,
            self.worker_failures
        );
    }
}

/// Known CardShark gaps where an invalid status is not worth reporting
fn is_known_gap(card: &CardId) -> bool {
    UNLISTED_SETS.contains(&card.set.as_str()) || UNLISTED_CARDS.contains(&card.name.as_str())
}

/// Run one entry through canonicalization, lookup and evaluation
pub async fn process_entry(
    entry: RawEntry,
    canonicalizer: &Canonicalizer,
    prices: &dyn PriceSource,
) -> Outcome {
    if entry.buylist_price.is_nan() || entry.buylist_price < THRESHOLD {
        return Outcome::BelowThreshold;
    }

    let card = match canonicalizer.canonicalize(&entry.name, &entry.set) {
        Resolution::Canonical(card) => card,
        Resolution::Skip => return Outcome::Skipped,
        Resolution::Error(unresolved) => return Outcome::Unresolved(unresolved),
    };

    let quote = match prices.quote(&card).await {
        Ok(quote) => quote,
        Err(error) => return Outcome::LookupFailed { card, error },
    };

    if let QuoteStatus::Invalid(status) = quote.status {
        let exempt = is_known_gap(&card);
        return Outcome::Invalid {
            card,
            status,
            exempt,
        };
    }

    let canonical = CanonicalEntry {
        card,
        is_foil: entry.is_foil,
        buylist_price: entry.buylist_price,
    };

    match evaluator::evaluate(&canonical, &quote) {
        Some(result) => Outcome::Emitted(result),
        None => Outcome::Discarded,
    }
}

/// Process every entry with at most `concurrency` lookups in flight
///
/// A malformed input row or a failed sink write aborts the run; any other
/// per-entry problem, including a panicking task, is logged and counted.
pub async fn run<I, W>(
    entries: I,
    canonicalizer: Arc<Canonicalizer>,
    prices: Arc<dyn PriceSource>,
    sink: &mut ResultSink<W>,
    concurrency: usize,
) -> Result<RunStats>
where
    I: IntoIterator<Item = Result<RawEntry>> + Send + 'static,
    I::IntoIter: Send,
    W: Write,
{
    let concurrency = concurrency.max(1);
    log::info!("Processing buylist with {} workers", concurrency);

    let (entry_tx, mut entry_rx) = mpsc::channel::<Result<RawEntry>>(concurrency);
    let (tx, mut rx) = mpsc::unbounded_channel::<Outcome>();
    let permits = Arc::new(Semaphore::new(concurrency));

    let reader = tokio::task::spawn_blocking(move || {
        for entry in entries {
            // dispatcher stopped early, the run is already failing
            if entry_tx.blocking_send(entry).is_err() {
                break;
            }
        }
    });

    let dispatch = async move {
        let mut tasks = JoinSet::new();

        while let Some(entry) = entry_rx.recv().await {
            let entry = entry?;
            let Ok(permit) = Arc::clone(&permits).acquire_owned().await else {
                break;
            };

            let canonicalizer = Arc::clone(&canonicalizer);
            let prices = Arc::clone(&prices);
            let tx = tx.clone();

            tasks.spawn(async move {
                let outcome = process_entry(entry, &canonicalizer, prices.as_ref()).await;
                drop(permit);
                // receiver only goes away when the run is already failing
                let _ = tx.send(outcome);
            });
        }
        drop(entry_rx);
        reader.await?;

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                let _ = tx.send(Outcome::WorkerFailed(e.into()));
            }
        }
        drop(tx);
        Ok::<_, ArbError>(())
    };

    let drain = async {
        let mut stats = RunStats::default();
        while let Some(outcome) = rx.recv().await {
            report(&outcome);
            stats.record(&outcome);
            if let Outcome::Emitted(result) = &outcome {
                sink.write(result)?;
            }
        }
        Ok::<_, ArbError>(stats)
    };

    let ((), stats) = tokio::try_join!(dispatch, drain)?;
    Ok(stats)
}

fn report(outcome: &Outcome) {
    match outcome {
        Outcome::Unresolved(unresolved) => {
            log::error!("Could not canonicalize {}", unresolved);
        }
        Outcome::LookupFailed { card, error } => {
            log::error!("Price lookup failed for {}: {}", card, error);
        }
        Outcome::WorkerFailed(error) => {
            log::error!("Entry dropped: {}", error);
        }
        Outcome::Invalid {
            card,
            status,
            exempt: false,
        } => {
            log::error!("CardShark returned '{}' for {}", status, card);
        }
        Outcome::Invalid {
            card,
            status,
            exempt: true,
        } => {
            log::debug!("Ignoring '{}' for {}, not listed on CardShark", status, card);
        }
        Outcome::Emitted(result) => {
            log::debug!(
                "Opportunity: '{}' '{}' buylist {:.2} vs {:.2}",
                result.name,
                result.set,
                result.buylist_price,
                result.market_price
            );
        }
        Outcome::BelowThreshold | Outcome::Skipped | Outcome::Discarded => {}
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
