use serde::{Deserialize, Serialize};
use std::fmt;

use crate::moves::MoveId;
use crate::types::ElementType;

/// The closed species catalog. Each variant is a descriptor: a base stat
/// line, a type, and a starting movelist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Charmander,
    Squirtle,
    Bulbasaur,
    Diglett,
    Pidgey,
    Pikachu,
}

/// Base stat line a species starts from, before any level-ups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub max_hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub speed: u16,
}

impl Species {
    /// Species offered to a new trainer.
    pub const STARTERS: [Species; 3] = [Species::Charmander, Species::Squirtle, Species::Bulbasaur];

    /// Species that appear in wild encounters.
    pub const WILD_POOL: [Species; 3] = [Species::Diglett, Species::Pidgey, Species::Pikachu];

    pub fn name(self) -> &'static str {
        match self {
            Species::Charmander => "Charmander",
            Species::Squirtle => "Squirtle",
            Species::Bulbasaur => "Bulbasaur",
            Species::Diglett => "Diglett",
            Species::Pidgey => "Pidgey",
            Species::Pikachu => "Pikachu",
        }
    }

    pub fn element(self) -> ElementType {
        match self {
            Species::Charmander => ElementType::Fire,
            Species::Squirtle => ElementType::Water,
            Species::Bulbasaur => ElementType::Grass,
            Species::Diglett => ElementType::Ground,
            Species::Pidgey => ElementType::Flying,
            Species::Pikachu => ElementType::Electric,
        }
    }

    pub fn base_stats(self) -> BaseStats {
        match self {
            Species::Charmander => BaseStats { max_hp: 10, attack: 1, defense: 1, speed: 2 },
            Species::Squirtle => BaseStats { max_hp: 10, attack: 1, defense: 2, speed: 1 },
            Species::Bulbasaur => BaseStats { max_hp: 10, attack: 2, defense: 1, speed: 1 },
            Species::Diglett => BaseStats { max_hp: 15, attack: 2, defense: 2, speed: 1 },
            Species::Pidgey => BaseStats { max_hp: 15, attack: 1, defense: 2, speed: 2 },
            Species::Pikachu => BaseStats { max_hp: 15, attack: 2, defense: 1, speed: 2 },
        }
    }

    pub fn starting_moves(self) -> [MoveId; 2] {
        match self {
            Species::Charmander => [MoveId::Tackle, MoveId::Ember],
            Species::Squirtle => [MoveId::Tackle, MoveId::Splash],
            Species::Bulbasaur => [MoveId::Tackle, MoveId::VineWhip],
            Species::Diglett => [MoveId::Tackle, MoveId::Earthquake],
            Species::Pidgey => [MoveId::Tackle, MoveId::Gust],
            Species::Pikachu => [MoveId::Tackle, MoveId::Shock],
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_species_starts_with_two_known_moves() {
        for species in Species::STARTERS.iter().chain(Species::WILD_POOL.iter()) {
            assert_eq!(species.starting_moves().len(), 2);
        }
    }

    #[test]
    fn starting_movelists_include_a_same_type_move() {
        // Each species' second move matches its own type, so the same-type
        // bonus is reachable from every starting movelist.
        for species in Species::STARTERS.iter().chain(Species::WILD_POOL.iter()) {
            let [_, signature] = species.starting_moves();
            assert_eq!(signature.data().element, species.element());
        }
    }
}
