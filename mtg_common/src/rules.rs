//! Static naming rule tables
//!
//! The tables are compiled into the binary as a JSON document and parsed once
//! at startup. After that they are only ever read, so a single [`RuleTables`]
//! value can be shared by every worker without synchronization.

use crate::error::{Result, RulesError};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

const EMBEDDED_RULES: &str = include_str!("../data/rules.json");

/// Lookup tables consulted by the canonicalization stages
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RuleTables {
    /// Card Kingdom set label -> CardShark set label (many-to-one)
    pub set_renames: HashMap<String, String>,
    /// Guild kit card -> guild name
    pub guild_kit_cards: HashMap<String, String>,
    /// Tags for cards filed under "Promotional Other"
    pub promo_tags: HashMap<String, String>,
    /// Tags for WPN / Gateway promos
    pub gateway_tags: HashMap<String, String>,
    /// Tags for pre-M15 prerelease and launch promos
    pub prerelease_tags: HashMap<String, String>,
    /// Arena league promo -> year of the league season
    pub arena_years: HashMap<String, u16>,
    /// FNM promo -> parenthesised tag appended to the name
    pub fnm_tags: HashMap<String, String>,
    /// Last-resort name corrections; an empty value means "known, keep as is"
    pub name_variants: HashMap<String, String>,
    /// Urza land variant -> set -> CardShark name
    pub urza_lands: HashMap<String, HashMap<String, String>>,
    /// Aether spellings
    pub aether_names: HashMap<String, String>,
    /// Sets where CardShark drops dashes from card names
    pub dashing_sets: HashSet<String>,
    /// Promo qualifiers CardShark has no edition for
    pub skippable_promos: HashSet<String>,
}

impl RuleTables {
    /// Parse the rule tables bundled with the crate
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_RULES)
    }

    /// Parse rule tables from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let tables: Self = serde_json::from_str(json)?;
        tables.validate()?;

        log::debug!(
            "Loaded rule tables: {} set renames, {} promo tags, {} name variants",
            tables.set_renames.len(),
            tables.promo_tags.len(),
            tables.name_variants.len()
        );

        Ok(tables)
    }

    fn validate(&self) -> Result<()> {
        if let Some((from, _)) = self
            .set_renames
            .iter()
            .find(|(from, to)| from.is_empty() || to.is_empty())
        {
            return Err(RulesError::InvalidEntry {
                table: "set_renames",
                detail: format!("empty set label in mapping for '{from}'"),
            });
        }

        if let Some((card, _)) = self.guild_kit_cards.iter().find(|(_, guild)| guild.is_empty()) {
            return Err(RulesError::InvalidEntry {
                table: "guild_kit_cards",
                detail: format!("no guild given for '{card}'"),
            });
        }

        if let Some((card, year)) = self.arena_years.iter().find(|(_, year)| **year == 0) {
            return Err(RulesError::InvalidEntry {
                table: "arena_years",
                detail: format!("invalid year {year} for '{card}'"),
            });
        }

        Ok(())
    }
}
