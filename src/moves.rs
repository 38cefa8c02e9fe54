use serde::{Deserialize, Serialize};

use crate::types::ElementType;

/// Every move in the game. Creatures hold `MoveInstance`s rather than these
/// ids directly, so use counters never alias between creatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveId {
    Tackle,
    Struggle,
    Splash,
    Ember,
    VineWhip,
    Earthquake,
    Gust,
    Shock,
}

/// Static data for a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveData {
    pub name: &'static str,
    pub element: ElementType,
    pub power: u16,
    pub max_uses: u16,
}

impl MoveId {
    pub fn data(self) -> MoveData {
        use ElementType::*;

        match self {
            MoveId::Tackle => MoveData { name: "Tackle", element: Normal, power: 10, max_uses: 20 },
            // The fallback move. Never learned, never runs out.
            MoveId::Struggle => {
                MoveData { name: "Struggle", element: Normal, power: 1, max_uses: u16::MAX }
            }
            MoveId::Splash => MoveData { name: "Splash", element: Water, power: 10, max_uses: 10 },
            MoveId::Ember => MoveData { name: "Ember", element: Fire, power: 10, max_uses: 10 },
            MoveId::VineWhip => {
                MoveData { name: "Vine Whip", element: Grass, power: 10, max_uses: 10 }
            }
            MoveId::Earthquake => {
                MoveData { name: "Earthquake", element: Ground, power: 15, max_uses: 5 }
            }
            MoveId::Gust => MoveData { name: "Gust", element: Flying, power: 15, max_uses: 5 },
            MoveId::Shock => MoveData { name: "Shock", element: Electric, power: 15, max_uses: 5 },
        }
    }

    pub fn name(self) -> &'static str {
        self.data().name
    }
}

/// A learned move with its own remaining-use counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveInstance {
    pub id: MoveId,
    uses: u16,
}

impl MoveInstance {
    pub fn new(id: MoveId) -> Self {
        Self { id, uses: id.data().max_uses }
    }

    pub fn uses(&self) -> u16 {
        self.uses
    }

    pub fn has_uses(&self) -> bool {
        self.uses > 0
    }

    /// Decrement by exactly one, floored at zero.
    pub fn spend_use(&mut self) {
        self.uses = self.uses.saturating_sub(1);
    }

    pub fn restore(&mut self) {
        self.uses = self.id.data().max_uses;
    }
}
