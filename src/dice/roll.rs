//! Dice notation evaluation
//!
//! Validates each dice group, rolls it against a [`DieSource`], adds the
//! standalone modifiers and renders the breakdown, e.g.
//! `"2d8+3"` -> `"2d8: [4, 7] = 11 (+3)"`.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::notation::{extract_groups, extract_modifiers, GroupToken};
use super::source::{DieSource, OsDieSource};

/// Largest number of dice in one group
pub const MAX_COUNT: u32 = 100;
/// Largest number of sides on one die
pub const MAX_SIDES: u32 = 1000;

/// Validation failures; the first one aborts the evaluation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RollError {
    #[error("Invalid dice notation. Use format like '1d6', '2d8+3', or '1d20+2d6'")]
    NoDiceFound,

    #[error("Dice count must be between 1 and {}", MAX_COUNT)]
    CountOutOfRange,

    #[error("Dice sides must be between 1 and {}", MAX_SIDES)]
    SidesOutOfRange,

    #[error("Modifier is too large")]
    ModifierOutOfRange,
}

/// A validated `<count>d<sides>` group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceGroup {
    pub count: u32,
    pub sides: u32,
}

impl DiceGroup {
    /// Validate a scanned token against the count and sides limits
    pub fn from_token(token: &GroupToken<'_>) -> Result<Self, RollError> {
        // Digit runs too long for u32 are far beyond either limit
        let count: u32 = token.count.parse().map_err(|_| RollError::CountOutOfRange)?;
        if !(1..=MAX_COUNT).contains(&count) {
            return Err(RollError::CountOutOfRange);
        }

        let sides: u32 = token.sides.parse().map_err(|_| RollError::SidesOutOfRange)?;
        if !(1..=MAX_SIDES).contains(&sides) {
            return Err(RollError::SidesOutOfRange);
        }

        Ok(Self { count, sides })
    }

    /// Smallest possible subtotal
    pub fn min(&self) -> i64 {
        i64::from(self.count)
    }

    /// Largest possible subtotal
    pub fn max(&self) -> i64 {
        i64::from(self.count) * i64::from(self.sides)
    }

    /// Roll every die in the group, in order.
    ///
    /// A failed draw counts as a 1 rather than failing the roll.
    pub fn roll(&self, source: &dyn DieSource) -> Vec<u32> {
        (0..self.count)
            .map(|_| {
                source.draw(self.sides).unwrap_or_else(|e| {
                    warn!("die draw failed for d{}, using 1: {}", self.sides, e);
                    1
                })
            })
            .collect()
    }
}

impl fmt::Display for DiceGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)
    }
}

/// One fragment of the breakdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detail {
    Group {
        group: DiceGroup,
        draws: Vec<u32>,
        subtotal: i64,
    },
    Modifier(i64),
}

impl Detail {
    /// Contribution of this fragment to the total
    pub fn value(&self) -> i64 {
        match self {
            Detail::Group { subtotal, .. } => *subtotal,
            Detail::Modifier(n) => *n,
        }
    }
}

impl fmt::Display for Detail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Detail::Group {
                group,
                draws,
                subtotal,
            } => {
                if group.count == 1 {
                    write!(f, "{}: {}", group, subtotal)
                } else {
                    let draws: Vec<String> = draws.iter().map(|d| d.to_string()).collect();
                    write!(f, "{}: [{}] = {}", group, draws.join(", "), subtotal)
                }
            }
            Detail::Modifier(n) if *n >= 0 => write!(f, "(+{})", n),
            Detail::Modifier(n) => write!(f, "({})", n),
        }
    }
}

/// A successful evaluation: group fragments first, then modifier fragments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollSummary {
    pub total: i64,
    pub details: Vec<Detail>,
}

impl RollSummary {
    /// Fragments joined by single spaces
    pub fn details_line(&self) -> String {
        self.details
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// The caller-facing result of one evaluation.
///
/// On success `error` is `None`; on failure `result` is 0 and `details` empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    pub input: String,
    pub result: i64,
    pub details: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RollOutcome {
    /// Build the outcome for `input` from an evaluation result
    pub fn new(input: impl Into<String>, evaluated: Result<RollSummary, RollError>) -> Self {
        let input = input.into();
        match evaluated {
            Ok(summary) => Self {
                input,
                result: summary.total,
                details: summary.details_line(),
                error: None,
            },
            Err(e) => Self::failed(input, e.to_string()),
        }
    }

    /// An outcome carrying only an error message
    pub fn failed(input: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            result: 0,
            details: String::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Validate all dice groups in `input` without rolling them
pub fn parse_groups(input: &str) -> Result<Vec<DiceGroup>, RollError> {
    let tokens = extract_groups(input);
    if tokens.is_empty() {
        return Err(RollError::NoDiceFound);
    }
    tokens.iter().map(DiceGroup::from_token).collect()
}

/// Evaluate `input`, stopping at the first invalid group
pub fn try_evaluate(input: &str, source: &dyn DieSource) -> Result<RollSummary, RollError> {
    let tokens = extract_groups(input);
    if tokens.is_empty() {
        return Err(RollError::NoDiceFound);
    }

    let mut total: i64 = 0;
    let mut details = Vec::with_capacity(tokens.len());

    for token in &tokens {
        let group = DiceGroup::from_token(token)?;
        let draws = group.roll(source);
        let subtotal: i64 = draws.iter().map(|&d| i64::from(d)).sum();

        total += subtotal;
        details.push(Detail::Group {
            group,
            draws,
            subtotal,
        });
    }

    for token in extract_modifiers(input) {
        if token.follows_die(input) || token.overlaps_group(&tokens) {
            continue;
        }
        let modifier: i64 = token
            .text
            .parse()
            .map_err(|_| RollError::ModifierOutOfRange)?;
        total = total
            .checked_add(modifier)
            .ok_or(RollError::ModifierOutOfRange)?;
        details.push(Detail::Modifier(modifier));
    }

    Ok(RollSummary { total, details })
}

/// Evaluate `input` with an injected random source
pub fn evaluate_with(input: &str, source: &dyn DieSource) -> RollOutcome {
    let evaluated = try_evaluate(input, source);
    match &evaluated {
        Ok(summary) => debug!(input, total = summary.total, "dice rolled"),
        Err(e) => debug!(input, error = %e, "dice notation rejected"),
    }
    RollOutcome::new(input, evaluated)
}

/// Evaluate `input` using the operating system CSPRNG
pub fn evaluate(input: &str) -> RollOutcome {
    evaluate_with(input, &OsDieSource)
}
