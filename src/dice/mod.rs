//! Dice notation module
//!
//! Evaluates free-form notation such as "2d8+3" or "1d20+2d6-1":
//! - Scanning for dice groups and signed modifiers
//! - Range validation (1-100 dice, 1-1000 sides)
//! - Rolling against an injectable random source
//! - Rendering a per-group and per-modifier breakdown

mod notation;
mod roll;
mod source;

pub use notation::{extract_groups, extract_modifiers, GroupToken, ModifierToken};
pub use roll::{
    evaluate, evaluate_with, parse_groups, try_evaluate, Detail, DiceGroup, RollError,
    RollOutcome, RollSummary, MAX_COUNT, MAX_SIDES,
};
pub use source::{DieSource, DrawError, OsDieSource, SequenceSource};
