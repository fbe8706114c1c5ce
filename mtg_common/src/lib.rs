//! Shared types for MTG business operations
//!
//! Card identity, the naming rule tables, and the canonicalization engine that
//! rewrites Card Kingdom buylist identifiers into the names CardShark expects.

pub mod canonical;
pub mod card;
pub mod error;
pub mod rules;

pub use canonical::{Canonicalizer, Resolution, Rewrite, Unresolved};
pub use card::CardId;
pub use error::{Result, RulesError};
pub use rules::RuleTables;
