//! Stage 8: editions that need per-card handling after the set rename

use super::stages::fix_deck_variant;
use super::{drop_last, promo, Rewrite, Unresolved};
use crate::card::CardId;
use crate::rules::RuleTables;

pub(super) fn resolve_edition(rules: &RuleTables, card: CardId) -> Rewrite {
    match card.set.as_str() {
        "Guilds of Ravnica: Guild Kits" | "Ravnica Allegiance: Guild Kits" => guild_kit(rules, card),
        "Duel Decks Anthology" => anthology(card),
        "Promotional" => promo::resolve_promo(rules, card),
        _ => Rewrite::Continue(card),
    }
}

/// CardShark files every guild kit as its own set
fn guild_kit(rules: &RuleTables, card: CardId) -> Rewrite {
    match rules.guild_kit_cards.get(&card.name) {
        Some(guild) => {
            let set = format!("Guild Kit {guild}");
            Rewrite::Continue(CardId::new(card.name, set))
        }
        None => Rewrite::Error(Unresolved::new(card, "Guild kit not found")),
    }
}

/// Card Kingdom keeps the deck in the card name: "Llanowar Elves (Elves vs Goblins - Foil)"
fn anthology(card: CardId) -> Rewrite {
    let mut parts = card.name.split(" (");
    let (Some(name), Some(deck)) = (parts.next(), parts.next()) else {
        return Rewrite::Continue(card);
    };

    let deck = drop_last(deck, 1).replacen(" - Foil", "", 1);
    let set = format!("{}, {}", card.set, fix_deck_variant(&deck));

    Rewrite::Continue(CardId::new(name, set))
}
