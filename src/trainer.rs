use serde::{Deserialize, Serialize};

use crate::creature::Creature;
use crate::errors::GameError;

/// Most creatures a trainer can carry.
pub const ROSTER_LIMIT: usize = 6;

/// A trainer and the ordered roster they own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trainer {
    name: String,
    roster: Vec<Creature>,
}

impl Trainer {
    pub fn new(name: impl Into<String>) -> Self {
        Trainer { name: name.into(), roster: Vec::new() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn roster(&self) -> &[Creature] {
        &self.roster
    }

    pub fn creature(&self, index: usize) -> Option<&Creature> {
        self.roster.get(index)
    }

    pub fn creature_mut(&mut self, index: usize) -> Option<&mut Creature> {
        self.roster.get_mut(index)
    }

    /// The most recently added roster member.
    pub fn newest_mut(&mut self) -> Option<&mut Creature> {
        self.roster.last_mut()
    }

    pub fn has_room(&self) -> bool {
        self.roster.len() < ROSTER_LIMIT
    }

    /// Add a creature to the roster. On rejection the creature is handed
    /// back alongside the error so the caller decides what happens to it.
    pub fn add_creature(&mut self, creature: Creature) -> Result<(), (GameError, Creature)> {
        if !self.has_room() {
            return Err((GameError::RosterFull, creature));
        }
        if self.roster.iter().any(|member| member.id() == creature.id()) {
            return Err((
                GameError::DuplicateRosterEntry(creature.name().to_string()),
                creature,
            ));
        }
        self.roster.push(creature);
        Ok(())
    }

    /// Index of the first roster member with HP remaining.
    pub fn first_healthy(&self) -> Option<usize> {
        self.roster.iter().position(|creature| !creature.is_fainted())
    }

    /// Indices of every roster member with HP remaining.
    pub fn healthy_members(&self) -> Vec<usize> {
        self.roster
            .iter()
            .enumerate()
            .filter(|(_, creature)| !creature.is_fainted())
            .map(|(index, _)| index)
            .collect()
    }

    /// The creature center: fully heal the whole roster, move uses included.
    pub fn heal_roster(&mut self) {
        for creature in &mut self.roster {
            creature.heal();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::Species;
    use pretty_assertions::assert_eq;

    fn creature() -> Creature {
        Creature::new(Species::Pidgey, 3)
    }

    #[test]
    fn roster_accepts_up_to_the_limit() {
        let mut trainer = Trainer::new("Sam");
        for _ in 0..ROSTER_LIMIT {
            trainer.add_creature(creature()).expect("roster has room");
        }
        assert_eq!(trainer.roster().len(), ROSTER_LIMIT);
        assert!(!trainer.has_room());

        let extra = creature();
        match trainer.add_creature(extra) {
            Err((GameError::RosterFull, returned)) => {
                // The rejected creature comes back instead of being dropped.
                assert_eq!(returned.species(), Species::Pidgey);
            }
            other => panic!("expected RosterFull, got {:?}", other.map_err(|(e, _)| e)),
        }
    }

    #[test]
    fn duplicate_entries_are_rejected() {
        let mut trainer = Trainer::new("Sam");
        let original = creature();
        let duplicate = original.clone();
        trainer.add_creature(original).expect("roster has room");
        match trainer.add_creature(duplicate) {
            Err((GameError::DuplicateRosterEntry(name), _)) => assert_eq!(name, "Pidgey"),
            other => panic!("expected DuplicateRosterEntry, got {:?}", other.map_err(|(e, _)| e)),
        }
    }

    #[test]
    fn first_healthy_skips_fainted_members() {
        let mut trainer = Trainer::new("Sam");
        let mut fainted = creature();
        fainted.take_damage(fainted.hp());
        trainer.add_creature(fainted).expect("roster has room");
        trainer.add_creature(creature()).expect("roster has room");

        assert_eq!(trainer.first_healthy(), Some(1));
        assert_eq!(trainer.healthy_members(), vec![1]);
    }

    #[test]
    fn healing_the_roster_restores_everyone() {
        let mut trainer = Trainer::new("Sam");
        let mut hurt = creature();
        hurt.take_damage(5);
        trainer.add_creature(hurt).expect("roster has room");
        trainer.heal_roster();
        let healed = &trainer.roster()[0];
        assert_eq!(healed.hp(), healed.max_hp());
    }
}
