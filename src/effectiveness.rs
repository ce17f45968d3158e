//! Combined effectiveness of one attacking type against up to three defending types.

use std::fmt;

use serde::Serialize;

use crate::chart::names::{is_no_type_spelling, title_case};
use crate::chart::TypeChart;
use crate::error::QueryError;

pub const MAX_DEFENDING_TYPES: usize = 3;

/// A defending slot: either a type name or the "no type" placeholder for unused slots.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DefendingType {
    NoType,
    Named(String),
}

impl DefendingType {
    /// Text form used by the CLI and HTTP query strings. `""`, `-` and `none` mean no type.
    pub fn parse(raw: &str) -> Self {
        if is_no_type_spelling(raw) {
            Self::NoType
        } else {
            Self::Named(title_case(raw.trim()))
        }
    }

    fn normalized(&self) -> Self {
        match self {
            Self::NoType => Self::NoType,
            Self::Named(name) => Self::Named(title_case(name.trim())),
        }
    }
}

impl From<&str> for DefendingType {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl fmt::Display for DefendingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoType => write!(f, "none"),
            Self::Named(name) => write!(f, "{name}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Immune,
    NotVeryEffective,
    Neutral,
    SuperEffective,
}

impl Verdict {
    pub fn from_multiplier(multiplier: f64) -> Self {
        if multiplier == 0.0 {
            Self::Immune
        } else if multiplier < 1.0 {
            Self::NotVeryEffective
        } else if multiplier == 1.0 {
            Self::Neutral
        } else {
            Self::SuperEffective
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Immune => "no effect",
            Self::NotVeryEffective => "not very effective",
            Self::Neutral => "neutral",
            Self::SuperEffective => "super effective",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Multiply the matchups of `attacking` against each distinct defending type.
///
/// Unknown defending names and [`DefendingType::NoType`] count as neutral; an unknown
/// attacking type is an error. Names are matched after title-casing.
pub fn effectiveness(
    chart: &TypeChart,
    attacking: &str,
    defending: &[DefendingType],
) -> Result<f64, QueryError> {
    if defending.is_empty() || defending.len() > MAX_DEFENDING_TYPES {
        return Err(QueryError::DefenderCount {
            found: defending.len(),
            max: MAX_DEFENDING_TYPES,
        });
    }

    let attack_name = title_case(attacking.trim());
    let attack_index = chart
        .index_of(&attack_name)
        .ok_or_else(|| QueryError::UnknownAttackingType(attacking.to_string()))?;

    let mut multiplier = 1.0;
    for defender in distinct(defending) {
        let DefendingType::Named(name) = &defender else {
            continue;
        };
        let Some(defense_index) = chart.index_of(name) else {
            tracing::debug!(defender = %name, "unknown defending type treated as no type");
            continue;
        };
        multiplier *= chart.matchups()[attack_index][defense_index];
    }
    Ok(multiplier)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttackEntry {
    pub attacking: String,
    pub multiplier: f64,
    pub verdict: Verdict,
}

/// Effectiveness of every attacking type in the chart against one defending combination,
/// in chart order.
pub fn defensive_profile(
    chart: &TypeChart,
    defending: &[DefendingType],
) -> Result<Vec<AttackEntry>, QueryError> {
    chart
        .types()
        .iter()
        .map(|attacking| {
            let multiplier = effectiveness(chart, attacking, defending)?;
            Ok(AttackEntry {
                attacking: attacking.clone(),
                multiplier,
                verdict: Verdict::from_multiplier(multiplier),
            })
        })
        .collect()
}

/// First-seen order, duplicates removed after normalization.
fn distinct(defending: &[DefendingType]) -> Vec<DefendingType> {
    let mut unique: Vec<DefendingType> = Vec::with_capacity(defending.len());
    for defender in defending.iter().map(DefendingType::normalized) {
        if !unique.contains(&defender) {
            unique.push(defender);
        }
    }
    unique
}
