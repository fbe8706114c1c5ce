//! Stage 9: the catalog-wide "Promotional" bucket
//!
//! Card Kingdom puts every promo in one set and describes the printing in a
//! trailing qualifier: "Vindicate (Judge Foil (2013))". CardShark spreads the
//! same cards over a dozen promotional sets, each with its own tag format.
//!
//! Misses are handled per category: arena and the residual category report
//! an error, the others either skip or fall back to an untagged name.

use super::{drop_last, with_tag, Rewrite, Unresolved};
use crate::card::CardId;
use crate::rules::RuleTables;

/// Judge promos CardShark tags as "DCI Judge Foil" instead of "DCI Judge"
const JUDGE_FOIL_CARDS: &[&str] = &[
    "Bribery",
    "Command Tower",
    "Crucible of Worlds",
    "Dark Confidant",
    "Doubling Season",
    "Entomb",
    "Flusterstorm",
    "Goblin Welder",
    "Imperial Recruiter",
    "Karakas",
    "Karmic Guide",
    "Mana Crypt",
    "Noble Hierarch",
    "Sneak Attack",
    "Sword of Light and Shadow",
    "Swords to Plowshares",
    "Xiahou Dun, the One-Eyed",
];

/// Junior series cards that CardShark lists as scholarship promos
const SCHOLARSHIP_CARDS: &[&str] = &[
    "Elvish Champion",
    "Glorious Anthem",
    "Soltari Priest",
    "Whirling Dervish",
];

/// WPN-era promos filed under "Promotional Other"
const GATEWAY_OTHER_CARDS: &[&str] = &[
    "Black Sun's Zenith",
    "Blood Knight",
    "Bramblewood Paragon",
    "Doran, the Siege Tower",
    "Voidslime",
    "Urza's Factory",
    "Serra Avenger",
    "Liliana's Specter",
    "Imperious Perfect",
    "Groundbreaker",
    "Niv-Mizzet, the Firemind",
    "Mutavault",
    "Electrolyze",
];

/// Residual promos that are recognized but have no CardShark counterpart
const DROPPED_PROMOS: &[&str] = &[
    "Mutavault",
    "Progenitus",
    "Stoneforge Mystic",
    // Happy Holidays 2016+
    "Bog Humbugs",
    "Thopter Pie Network",
    "Some Disassembly Required",
    "Mishra's Toy Workshop",
    "Goblin Sleigh Ride",
];

/// Planeshift alternate art foils, listed with the set itself
const PLANESHIFT_ALT_ART: &[&str] = &[
    "Skyship Weatherlight",
    "Ertai, the Corrupted",
    "Tahngarth, Talruum Hero",
];

/// Promo set names as CardShark spells them
const JUNIOR_SERIES_SET: &str = "Promotional Jr Super Series";
const JUDGE_SET: &str = "Promotional DCI Judge";
const GATEWAY_SET: &str = "Promotional Gateway";
const FNM_SET: &str = "Promotional Friday Night Magic";
const OTHER_SET: &str = "Promotional Other";
const PRERELEASE_SET: &str = "Prerelease Stamped";
const PLAYER_REWARDS_SET: &str = "Promotional Player Rewards";
const ARENA_SET: &str = "Promotional Arena League";

/// Card name split from its promo qualifier
#[derive(Debug, Clone, PartialEq, Eq)]
struct PromoName {
    name: String,
    qualifier: String,
    /// Nested detail, e.g. the year in "(Judge Foil (2013))"
    extra: String,
}

impl PromoName {
    fn parse(full: &str) -> Option<Self> {
        let mut parts = full.split(" (");
        let name = parts.next()?;
        let second = parts.next()?;

        let (qualifier, extra) = match parts.next() {
            // nested group, closes with "))"
            Some(third) => (second, drop_last(third, 2)),
            None => (drop_last(second, 1), ""),
        };

        Some(Self {
            name: name.to_string(),
            qualifier: qualifier.to_string(),
            extra: extra.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromoCategory {
    JuniorSeries,
    Judge,
    Gateway,
    Prerelease,
    BuyABox,
    GiftPack,
    PlayerRewards,
    ArenaLeague,
    FridayNightMagic,
    Other,
}

impl PromoCategory {
    fn classify(qualifier: &str) -> Self {
        match qualifier {
            "Junior Super Series Foil" | "Junior Series Europe" | "JSS Foil" => Self::JuniorSeries,
            "Judge Foil" => Self::Judge,
            "WPN Foil" | "WPN 2011 Promo" | "WPN 2011 Foil" | "WPN - #51" | "DCI Foil"
            | "Gateway Foil" | "M10 Game Day Foil" | "Extended Art Foil" | "Extended Art" => {
                Self::Gateway
            }
            "Prerelease"
            | "Prerelease Foil"
            | "Prerelease foil"
            | "Prerelease Foil - Non-English"
            | "Prerelease Foil - non-English"
            | "July 4 Prerelease"
            | "Release Foil"
            | "Release Promo Foil"
            | "Launch Foil"
            | "Launch Promo"
            | "Launch Promo Foil"
            | "Prerelease Foil - ELD"
            | "Prerelease Foil - XLN" => Self::Prerelease,
            "Buy-A-Box" | "Buy-A-Box Foil" | "Buy-A-Box Non-Foil" | "Buy-a-Box"
            | "Buy-a-Box Foil" => Self::BuyABox,
            "2018 Gift Pack" => Self::GiftPack,
            "Textless" | "Textless Foil" | "Player Reward" | "Player Reward Foil" => {
                Self::PlayerRewards
            }
            "Arena Foil" | "Arena Promo" => Self::ArenaLeague,
            "FNM Foil" => Self::FridayNightMagic,
            _ => Self::Other,
        }
    }
}

fn is_noisy(qualifier: &str) -> bool {
    qualifier.starts_with("SDCC")
        || qualifier.contains("MPS")
        || qualifier.contains("JPN Alternate Art Prerelease Foil")
}

pub(super) fn resolve_promo(rules: &RuleTables, card: CardId) -> Rewrite {
    let Some(promo) = PromoName::parse(&card.name) else {
        return Rewrite::Continue(card);
    };

    if is_noisy(&promo.qualifier) || rules.skippable_promos.contains(&promo.qualifier) {
        return Rewrite::Skip;
    }

    match PromoCategory::classify(&promo.qualifier) {
        PromoCategory::JuniorSeries => junior_series(&promo),
        PromoCategory::Judge => judge(&promo),
        PromoCategory::Gateway => gateway(rules, &promo),
        PromoCategory::Prerelease => prerelease(rules, &promo),
        PromoCategory::BuyABox => buy_a_box(rules, &promo),
        PromoCategory::GiftPack => Rewrite::Continue(CardId::new(promo.name, "Gift Pack")),
        PromoCategory::PlayerRewards => player_rewards(&promo),
        PromoCategory::ArenaLeague => arena_league(rules, &promo),
        PromoCategory::FridayNightMagic => friday_night_magic(rules, &promo),
        PromoCategory::Other => other(rules, &promo),
    }
}

/// CardShark only has the main JSS printings, plus a few scholarship cards
fn junior_series(promo: &PromoName) -> Rewrite {
    let name = promo.name.as_str();
    let tag = match name {
        n if SCHOLARSHIP_CARDS.contains(&n) && promo.qualifier == "Junior Super Series Foil" => {
            "Scholarship Series"
        }
        "Mad Auntie" => return Rewrite::Skip,
        _ => "Jr Super Series",
    };

    Rewrite::Continue(CardId::new(format!("{name} ({tag})"), JUNIOR_SERIES_SET))
}

fn judge(promo: &PromoName) -> Rewrite {
    let name = promo.name.as_str();
    let tag = match name {
        n if JUDGE_FOIL_CARDS.contains(&n) => "DCI Judge Foil",
        "Vindicate" if promo.extra == "2013" => "DCI Judge v2",
        "Vindicate" => "DCI Judge v1",
        "Wasteland" if promo.extra == "2015" => return Rewrite::Skip,
        "Wasteland" => "DCI Judge",
        _ => return Rewrite::Skip,
    };

    Rewrite::Continue(CardId::new(format!("{name} ({tag})"), JUDGE_SET))
}

/// WPN, Gateway and game day promos are spread over three CardShark sets
fn gateway(rules: &RuleTables, promo: &PromoName) -> Rewrite {
    let name = promo.name.as_str();
    let (tag, set) = match name {
        "Wilt-Leaf Cavaliers" => return Rewrite::Skip,
        "Crystalline Sliver" => ("FNM 2004", FNM_SET),
        "Underworld Dreams" => ("", OTHER_SET),
        n if GATEWAY_OTHER_CARDS.contains(&n) => (tag_for(&rules.promo_tags, n), OTHER_SET),
        // second Fling printing, not on CardShark
        _ if promo.extra == "#69" => return Rewrite::Skip,
        n => (tag_for(&rules.gateway_tags, n), GATEWAY_SET),
    };

    Rewrite::Continue(CardId::new(with_tag(name, tag), set))
}

/// Pre-M15 prerelease, release and launch promos
fn prerelease(rules: &RuleTables, promo: &PromoName) -> Rewrite {
    let name = match rules.prerelease_tags.get(&promo.name) {
        Some(tag) => format!("{} ({tag})", promo.name),
        None => promo.name.clone(),
    };

    let set = match name.as_str() {
        "Ass Whuppin'" => OTHER_SET,
        "Earl of Squirrel" | "Magister of Worth" => return Rewrite::Skip,
        _ => PRERELEASE_SET,
    };

    Rewrite::Continue(CardId::new(name, set))
}

/// A few buy-a-box promos are listed with their expansion
fn buy_a_box(rules: &RuleTables, promo: &PromoName) -> Rewrite {
    let name = promo.name.as_str();
    let set = match name {
        "Nexus of Fate" => "Core Set 2019",
        "Flusterstorm" => "Modern Horizons",
        "The Haunt of Hightower" => "Ravnica Allegiance",
        "Impervious Greatwurm" => "Guilds of Ravnica",
        "Kenrith, the Returned King" => "Throne of Eldraine",
        _ => {
            return match rules.promo_tags.get(name) {
                Some(tag) => Rewrite::Continue(CardId::new(with_tag(name, tag), OTHER_SET)),
                None => Rewrite::Skip,
            };
        }
    };

    Rewrite::Continue(CardId::new(name, set))
}

/// Textless and player reward promos; the odd spellings are CardShark's
fn player_rewards(promo: &PromoName) -> Rewrite {
    let (name, tag) = match promo.name.as_str() {
        n @ ("Blightning" | "Cancel" | "Rampant Growth" | "Terminate" | "Lightning Bolt") => {
            (n, "(Player rewards)")
        }
        "Cryptic Command" => ("Cryptic command", "(Player rewards)"),
        "Searing Blaze" => ("Searing Blaze", "(Player Rewards"),
        "Wrath of God" => return Rewrite::Skip,
        n => (n, "(Player Rewards)"),
    };

    Rewrite::Continue(CardId::new(format!("{name} {tag}"), PLAYER_REWARDS_SET))
}

/// Arena promos are tagged with the league year; the table must cover all of them
fn arena_league(rules: &RuleTables, promo: &PromoName) -> Rewrite {
    let name = promo.name.as_str();
    if name == "Circle of Protection: Art" {
        return Rewrite::Skip;
    }

    match rules.arena_years.get(name) {
        Some(year) => Rewrite::Continue(CardId::new(format!("{name} (Arena {year})"), ARENA_SET)),
        None => Rewrite::Error(Unresolved::new(
            CardId::new(name, ARENA_SET),
            "Arena promo not found",
        )),
    }
}

fn friday_night_magic(rules: &RuleTables, promo: &PromoName) -> Rewrite {
    let name = promo.name.as_str();
    match rules.fnm_tags.get(name) {
        Some(tag) if tag.is_empty() => Rewrite::Continue(CardId::new(name, FNM_SET)),
        Some(tag) => Rewrite::Continue(CardId::new(format!("{name} {tag}"), FNM_SET)),
        None => Rewrite::Skip,
    }
}

/// Everything else lands in "Promotional Other" and must be in the tag table
fn other(rules: &RuleTables, promo: &PromoName) -> Rewrite {
    let name = promo.name.as_str();
    let card = match rules.promo_tags.get(name) {
        Some(tag) => CardId::new(with_tag(name, tag), OTHER_SET),
        None if DROPPED_PROMOS.contains(&name) => return Rewrite::Skip,
        None if PLANESHIFT_ALT_ART.contains(&name) => {
            CardId::new(format!("{name} (Alt. Art)"), "Planeshift")
        }
        None => {
            return Rewrite::Error(Unresolved::new(
                CardId::new(name, OTHER_SET),
                "Promo not found",
            ))
        }
    };

    if card.name == "Flamerush Rider (alt art foil)" {
        return Rewrite::Continue(CardId::new(card.name, "Promotional other"));
    }
    Rewrite::Continue(card)
}

fn tag_for<'a>(table: &'a std::collections::HashMap<String, String>, name: &str) -> &'a str {
    table.get(name).map(String::as_str).unwrap_or("")
}
