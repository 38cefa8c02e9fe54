use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::GameError;

/// Additive damage bonus when a move's type matches its user's own type.
pub const SAME_TYPE_BONUS: f64 = 0.33;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum ElementType {
    Normal,
    Fire,
    Water,
    Grass,
    Ground,
    Flying,
    Electric,
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl ElementType {
    /// Effectiveness multiplier for an attacking type against a defending type.
    /// Returns: 2.0 = Super Effective, 1.0 = Neutral, 0.5 = Ineffective.
    /// Pairs without an entry in the chart are neutral; Normal has no entries
    /// at all.
    pub fn effectiveness(attacking: ElementType, defending: ElementType) -> f64 {
        use ElementType::*;

        match (attacking, defending) {
            // Fire
            (Fire, Water) | (Fire, Ground) => 0.5,
            (Fire, Grass) => 2.0,

            // Water
            (Water, Grass) | (Water, Electric) => 0.5,
            (Water, Fire) => 2.0,

            // Grass
            (Grass, Fire) | (Grass, Flying) => 0.5,
            (Grass, Water) => 2.0,

            // Ground
            (Ground, Flying) => 0.5,
            (Ground, Electric) | (Ground, Fire) => 2.0,

            // Flying
            (Flying, Electric) => 0.5,
            (Flying, Ground) | (Flying, Grass) => 2.0,

            // Electric
            (Electric, Ground) => 0.5,
            (Electric, Flying) | (Electric, Water) => 2.0,

            _ => 1.0,
        }
    }
}

impl FromStr for ElementType {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Normal" => Ok(ElementType::Normal),
            "Fire" => Ok(ElementType::Fire),
            "Water" => Ok(ElementType::Water),
            "Grass" => Ok(ElementType::Grass),
            "Ground" => Ok(ElementType::Ground),
            "Flying" => Ok(ElementType::Flying),
            "Electric" => Ok(ElementType::Electric),
            other => Err(GameError::InvalidMoveType(other.to_string())),
        }
    }
}

/// Display classification of a base effectiveness multiplier. Computed from
/// the pure chart lookup, before the same-type bonus lands on the damage
/// multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effectiveness {
    SuperEffective,
    Ineffective,
    Neutral,
}

impl Effectiveness {
    pub fn classify(multiplier: f64) -> Self {
        if multiplier == 2.0 {
            Effectiveness::SuperEffective
        } else if multiplier == 0.5 {
            Effectiveness::Ineffective
        } else {
            Effectiveness::Neutral
        }
    }
}

impl fmt::Display for Effectiveness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effectiveness::SuperEffective => write!(f, "supereffective"),
            Effectiveness::Ineffective => write!(f, "ineffective"),
            Effectiveness::Neutral => write!(f, "a hit"),
        }
    }
}
