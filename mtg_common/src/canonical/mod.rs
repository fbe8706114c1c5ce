//! Card Kingdom -> CardShark identifier canonicalization
//!
//! The engine is an ordered list of pure rewrite stages. Each stage receives
//! the identifier produced by the previous one and either passes a (possibly
//! rewritten) identifier on, or ends the run:
//!
//! - [`Rewrite::Skip`]: a category that is known not to exist on CardShark.
//!   Expected, never reported.
//! - [`Rewrite::Error`]: a category the tables claim to cover completely, but
//!   this particular card is missing from them. Always reported.
//!
//! Later stages match on labels produced by earlier ones, so the order in
//! [`STAGES`] is part of the contract.

mod editions;
mod names;
mod promo;
mod stages;

use crate::card::CardId;
use crate::rules::RuleTables;
use thiserror::Error;

/// A card the engine should have been able to map but could not
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}: {card}")]
pub struct Unresolved {
    pub card: CardId,
    pub reason: String,
}

impl Unresolved {
    pub fn new(card: CardId, reason: impl Into<String>) -> Self {
        Self {
            card,
            reason: reason.into(),
        }
    }
}

/// Output of a single rewrite stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite {
    /// Hand the identifier to the next stage
    Continue(CardId),
    /// Known non-match, drop silently
    Skip,
    /// Expected mapping is missing from the tables
    Error(Unresolved),
}

/// Final classification of a buylist identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Skip,
    Canonical(CardId),
    Error(Unresolved),
}

type Stage = fn(&RuleTables, CardId) -> Rewrite;

/// Rewrite stages in execution order
const STAGES: &[(&str, Stage)] = &[
    ("exclude_categories", stages::exclude_categories),
    ("strip_qualifiers", stages::strip_qualifiers),
    ("exclude_sets", stages::exclude_sets),
    ("split_names", stages::split_names),
    ("normalize_punctuation", stages::normalize_punctuation),
    ("fix_duel_deck_labels", stages::fix_duel_deck_labels),
    ("rename_set", stages::rename_set),
    ("resolve_edition", editions::resolve_edition),
    ("fix_names", names::fix_names),
];

/// Maps Card Kingdom (name, set) pairs to CardShark's naming
///
/// Holds its rule tables by value and never mutates them, so one instance
/// can be shared across any number of concurrent callers.
#[derive(Debug, Clone)]
pub struct Canonicalizer {
    rules: RuleTables,
}

impl Canonicalizer {
    pub fn new(rules: RuleTables) -> Self {
        Self { rules }
    }

    /// Build a canonicalizer over the bundled rule tables
    pub fn embedded() -> crate::Result<Self> {
        Ok(Self::new(RuleTables::embedded()?))
    }

    pub fn rules(&self) -> &RuleTables {
        &self.rules
    }

    /// Run every stage over a raw buylist identifier
    pub fn canonicalize(&self, name: &str, set: &str) -> Resolution {
        let mut card = CardId::new(name, set);

        for (label, stage) in STAGES {
            match stage(&self.rules, card) {
                Rewrite::Continue(next) => card = next,
                Rewrite::Skip => {
                    log::trace!("{label}: skipping '{name}' '{set}'");
                    return Resolution::Skip;
                }
                Rewrite::Error(unresolved) => {
                    log::trace!("{label}: {unresolved}");
                    return Resolution::Error(unresolved);
                }
            }
        }

        if card.name.is_empty() || card.set.is_empty() {
            return Resolution::Skip;
        }

        Resolution::Canonical(card)
    }
}

/// Removes up to `count` trailing characters
fn drop_last(s: &str, count: usize) -> &str {
    let mut chars = s.chars();
    for _ in 0..count {
        chars.next_back();
    }
    chars.as_str()
}

/// Appends a parenthesised tag, unless the tag is empty
fn with_tag(name: &str, tag: &str) -> String {
    if tag.is_empty() {
        name.to_string()
    } else {
        format!("{name} ({tag})")
    }
}

#[cfg(test)]
#[path = "canonical_tests.rs"]
mod tests;
