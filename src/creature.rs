use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::errors::{GameError, GameResult};
use crate::moves::{MoveId, MoveInstance};
use crate::species::Species;
use crate::types::ElementType;

/// Most moves a creature can know at once.
pub const MOVE_LIMIT: usize = 5;
/// Stat growth stops here.
pub const LEVEL_CAP: u16 = 100;
/// Max HP never grows past this.
const MAX_HP_CEILING: u16 = 200;

static NEXT_CREATURE_ID: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identity, assigned at construction. Two creatures of
/// the same species are still distinct roster entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreatureId(u64);

impl CreatureId {
    fn next() -> Self {
        CreatureId(NEXT_CREATURE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A leveled combatant. Species, type, and the stat line are only written by
/// construction and `level_up`; everything else mutates through the narrow
/// operations below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creature {
    id: CreatureId,
    species: Species,
    nickname: Option<String>,
    element: ElementType,
    level: u16,
    xp: u32,
    max_hp: u16,
    attack: u16,
    defense: u16,
    speed: u16,
    hp: u16,
    moves: Vec<MoveInstance>,
}

impl Creature {
    /// Build a creature from its species' base line, applying one round of
    /// stat growth per requested level (each bounded by the level cap), then
    /// set it to full health with its starting moves known.
    pub fn new(species: Species, level: u16) -> Self {
        let base = species.base_stats();
        let mut creature = Creature {
            id: CreatureId::next(),
            species,
            nickname: None,
            element: species.element(),
            level,
            xp: 0,
            max_hp: base.max_hp,
            attack: base.attack,
            defense: base.defense,
            speed: base.speed,
            hp: 0,
            moves: Vec::new(),
        };
        for _ in 0..level {
            creature.level_up();
        }
        creature.hp = creature.max_hp;
        for id in species.starting_moves() {
            // Two starting moves always fit under the move limit.
            creature.moves.push(MoveInstance::new(id));
        }
        creature
    }

    #[cfg(test)]
    pub(crate) fn new_for_test(
        species: Species,
        level: u16,
        max_hp: u16,
        attack: u16,
        defense: u16,
        speed: u16,
        moves: Vec<MoveId>,
    ) -> Self {
        Creature {
            id: CreatureId::next(),
            species,
            nickname: None,
            element: species.element(),
            level,
            xp: 0,
            max_hp,
            attack,
            defense,
            speed,
            hp: max_hp,
            moves: moves.into_iter().map(MoveInstance::new).collect(),
        }
    }

    pub fn id(&self) -> CreatureId {
        self.id
    }

    pub fn species(&self) -> Species {
        self.species
    }

    pub fn element(&self) -> ElementType {
        self.element
    }

    pub fn level(&self) -> u16 {
        self.level
    }

    pub fn max_hp(&self) -> u16 {
        self.max_hp
    }

    pub fn attack(&self) -> u16 {
        self.attack
    }

    pub fn defense(&self) -> u16 {
        self.defense
    }

    pub fn speed(&self) -> u16 {
        self.speed
    }

    pub fn hp(&self) -> u16 {
        self.hp
    }

    pub fn moves(&self) -> &[MoveInstance] {
        &self.moves
    }

    pub fn move_at(&self, index: usize) -> Option<&MoveInstance> {
        self.moves.get(index)
    }

    /// Display name: the nickname when one is set, the species name
    /// otherwise.
    pub fn name(&self) -> &str {
        self.nickname.as_deref().unwrap_or(self.species.name())
    }

    pub fn set_nickname(&mut self, nickname: impl Into<String>) {
        self.nickname = Some(nickname.into());
    }

    /// Clamp-assign current HP into [0, max HP].
    pub fn set_hp(&mut self, hp: u16) {
        self.hp = hp.min(self.max_hp);
    }

    pub fn take_damage(&mut self, amount: u16) {
        self.hp = self.hp.saturating_sub(amount);
    }

    pub fn is_fainted(&self) -> bool {
        self.hp == 0
    }

    /// Fully heal and restore the uses of every known move.
    pub fn heal(&mut self) {
        self.hp = self.max_hp;
        for instance in &mut self.moves {
            instance.restore();
        }
    }

    /// One round of stat growth. No-op at the level cap. Returns whether the
    /// level changed.
    pub fn level_up(&mut self) -> bool {
        if self.level >= LEVEL_CAP {
            return false;
        }
        self.level += 1;
        self.attack = grow(self.attack);
        self.speed = grow(self.speed);
        self.defense = grow(self.defense);
        self.max_hp = (self.max_hp + self.max_hp / 10).min(MAX_HP_CEILING);
        true
    }

    /// Grant experience, consuming it into level-ups while the threshold is
    /// met. Each iteration spends `level * 100` at the pre-increment level.
    /// Returns the number of levels gained.
    pub fn gain_experience(&mut self, amount: u32) -> u16 {
        self.xp += amount;
        let mut gained = 0;
        while self.xp >= u32::from(self.level) * 100 {
            self.xp -= u32::from(self.level) * 100;
            if self.level_up() {
                gained += 1;
            }
        }
        gained
    }

    /// Teach a move. The creature gets its own copy with a fresh use
    /// counter.
    pub fn learn(&mut self, id: MoveId) -> GameResult<()> {
        if self.moves.len() >= MOVE_LIMIT {
            return Err(GameError::TeachingLimitExceeded { limit: MOVE_LIMIT });
        }
        self.moves.push(MoveInstance::new(id));
        Ok(())
    }

    /// Forget a move by display name.
    pub fn forget(&mut self, move_name: &str) -> GameResult<()> {
        match self.moves.iter().position(|m| m.id.name() == move_name) {
            Some(index) => {
                self.moves.remove(index);
                Ok(())
            }
            None => Err(GameError::UnknownMove(move_name.to_string())),
        }
    }

    /// Indices of known moves that still have uses left.
    pub fn usable_moves(&self) -> Vec<usize> {
        self.moves
            .iter()
            .enumerate()
            .filter(|(_, m)| m.has_uses())
            .map(|(index, _)| index)
            .collect()
    }

    /// Spend one use of a known move. Struggle is never learned, so it has
    /// no counter to spend.
    pub fn spend_move_use(&mut self, id: MoveId) {
        if let Some(instance) = self.moves.iter_mut().find(|m| m.id == id) {
            instance.spend_use();
        }
    }
}

fn grow(stat: u16) -> u16 {
    ((f64::from(stat) + 2.0) * 0.99).ceil() as u16
}
