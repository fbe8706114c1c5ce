//! Set-independent rewrite stages, run before the per-edition dispatch

use super::Rewrite;
use crate::card::CardId;
use crate::rules::RuleTables;

const BASIC_LAND_PREFIXES: &[&str] = &["Plains", "Island", "Swamp", "Mountain", "Forest", "Wastes"];

const EXCLUDED_NAME_MARKERS: &[&str] = &["Token", "Emblem", "Oversized", "Promo Plane"];

/// Parenthetical suffixes Card Kingdom adds to names, stripped in this order
const NAME_QUALIFIERS: &[&str] = &[
    " (Foil)",
    " (Foil - Planeswalker Deck)",
    " (Planeswalker Deck)",
    " (Planeswalker Deck Foil)",
    " (Spellslinger Starter Kit)",
    " (Welcome Deck)",
    " (Brawl Deck Card)",
];

const ELDRAINE_VARIANTS: &str = "Throne of Eldraine Variants";
const ELDRAINE_QUALIFIERS: &[&str] = &[" (Showcase)", " (Extended Art)", " (Borderless)"];

const EXCLUDED_SET_PREFIXES: &[&str] = &["Masterpiece Series", "Un"];

const EXCLUDED_SETS: &[&str] = &[
    // listed by Card Kingdom, but empty
    "Alpha",
    "Beta",
    "Collectors Ed",
    "Art Series",
    "Coldsnap Theme Decks",
    "Collectors Ed Intl",
    "Duels of the Planeswalkers",
    "Mystery Booster",
    "Promo Pack",
    "Ultimate Box Topper",
    // CardShark does not distinguish the decks
    "World Championships",
    "War of the Spark JPN Planeswalkers",
];

/// Sets where CardShark only lists the front face of split cards
const FIRST_FACE_SETS: &[&str] = &[
    "Guilds of Ravnica",
    "Ravnica Allegiance",
    "Hour of Devastation",
    "Ultimate Masters",
    "Commander 2019",
    "Commander",
    "Duel Decks: Ajani Vs. Nicol Bolas",
    "Duel Decks: Izzet Vs. Golgari",
];

/// Sets where both faces are kept, separated by a space
const SPACED_FACE_SETS: &[&str] = &["Planar Chaos", "Timeshifted"];

const PUNCTUATION_FAMILIES: &[&str] = &[
    "Duel Decks",
    "From the Vault",
    "Global Series",
    "Premium Deck Series",
    "Signature Spellbook",
];

/// Deck label corrections for duel decks, applied in order, first match each
const DECK_VARIANT_FIXES: &[(&str, &str)] = &[
    ("Elspeth Vs. Kiora", "Kiora Vs. Elspeth"),
    ("The Coalition", "the Coalition"),
    ("vs", "vs."),
    ("Vs.", "vs."),
];

/// Stage 1: basic lands, tokens, emblems, oversized cards and promo planes
pub(super) fn exclude_categories(_: &RuleTables, card: CardId) -> Rewrite {
    let is_basic = BASIC_LAND_PREFIXES
        .iter()
        .any(|prefix| card.name.starts_with(prefix));
    let is_excluded = EXCLUDED_NAME_MARKERS
        .iter()
        .any(|marker| card.name.contains(marker));

    if is_basic || is_excluded {
        return Rewrite::Skip;
    }
    Rewrite::Continue(card)
}

/// Stage 2: drop foil and deck-variant qualifiers from the name
pub(super) fn strip_qualifiers(_: &RuleTables, mut card: CardId) -> Rewrite {
    for qualifier in NAME_QUALIFIERS {
        card.name = card.name.replacen(qualifier, "", 1);
    }

    if card.set == ELDRAINE_VARIANTS {
        for qualifier in ELDRAINE_QUALIFIERS {
            card.name = card.name.replacen(qualifier, "", 1);
        }
    }

    Rewrite::Continue(card)
}

/// Stage 3: sets that are missing on CardShark or too noisy to compare
pub(super) fn exclude_sets(_: &RuleTables, card: CardId) -> Rewrite {
    let excluded = EXCLUDED_SET_PREFIXES
        .iter()
        .any(|prefix| card.set.starts_with(prefix))
        || EXCLUDED_SETS.contains(&card.set.as_str());

    if excluded {
        return Rewrite::Skip;
    }
    Rewrite::Continue(card)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SplitStyle {
    FirstFace,
    Spaced,
    Joined,
}

fn split_style(set: &str) -> SplitStyle {
    if FIRST_FACE_SETS.contains(&set) {
        SplitStyle::FirstFace
    } else if SPACED_FACE_SETS.contains(&set) {
        SplitStyle::Spaced
    } else {
        SplitStyle::Joined
    }
}

/// Stage 4: split cards ("Fire // Ice"), handled per set
pub(super) fn split_names(_: &RuleTables, mut card: CardId) -> Rewrite {
    let Some((front, back)) = card.name.split_once("//") else {
        return Rewrite::Continue(card);
    };
    let (front, back) = (front.trim_end(), back.trim_start());

    let name = match split_style(&card.set) {
        SplitStyle::FirstFace => front.to_string(),
        SplitStyle::Spaced => format!("{front} {back}"),
        SplitStyle::Joined => format!("{front}{back}"),
    };
    card.name = name;

    Rewrite::Continue(card)
}

/// Stage 5: characters CardShark does not accept in some set families
pub(super) fn normalize_punctuation(_: &RuleTables, mut card: CardId) -> Rewrite {
    if PUNCTUATION_FAMILIES
        .iter()
        .any(|family| card.set.contains(family))
    {
        card.set = card.set.replacen(':', "", 1).replacen('&', "and", 1);

        if card.set.contains("Annihilation") {
            card.set.push_str(" (2014)");
        }
    }

    Rewrite::Continue(card)
}

/// Apply the duel deck label corrections to a set or deck label
pub(super) fn fix_deck_variant(label: &str) -> String {
    DECK_VARIANT_FIXES
        .iter()
        .fold(label.to_string(), |label, (from, to)| label.replacen(from, to, 1))
}

/// Stage 6: duel deck naming differences
pub(super) fn fix_duel_deck_labels(_: &RuleTables, mut card: CardId) -> Rewrite {
    if card.set.starts_with("Duel Decks") {
        card.set = fix_deck_variant(&card.set);
    }
    Rewrite::Continue(card)
}

/// Stage 7: static set renames
pub(super) fn rename_set(rules: &RuleTables, mut card: CardId) -> Rewrite {
    if let Some(renamed) = rules.set_renames.get(&card.set) {
        card.set = renamed.clone();
    }
    Rewrite::Continue(card)
}
