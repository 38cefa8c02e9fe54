use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::battle::capture::roll_capture;
use crate::battle::engine::{resolve_attack, resolve_turn, TurnFaint};
use crate::battle::state::{
    ActionFailureReason, CombatantReport, EncounterEvent, EncounterRng, EncounterState,
};
use crate::creature::Creature;
use crate::moves::MoveId;
use crate::species::Species;
use crate::trainer::Trainer;

/// Chance that running from a wild encounter succeeds.
const FLEE_CHANCE: f64 = 0.75;
/// Experience granted per level of a defeated wild creature.
const XP_PER_WILD_LEVEL: u32 = 10;
/// Wild creatures spawn with a requested level in this range, inclusive.
const WILD_LEVEL_RANGE: (u16, u16) = (2, 10);

/// What the player asked the controller to do this turn. Indices refer to
/// the active creature's movelist and the trainer's roster respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerIntent {
    Run,
    /// `None` lets the controller pick a random usable move.
    Fight { move_index: Option<usize> },
    Capture,
    Switch { roster_index: usize },
    Status,
}

/// A single wild encounter. Owns the wild creature; the trainer's roster is
/// borrowed per intent, so all mutation happens inside one processing step.
///
/// The wild slot is only empty once the encounter has reached a terminal
/// state (the creature was captured into the roster).
#[derive(Debug)]
pub struct Encounter {
    wild: Option<Creature>,
    active: usize,
    state: EncounterState,
    needs_replacement: bool,
}

impl Encounter {
    /// Spawn a wild creature from the fixed pool and send out the trainer's
    /// first healthy roster member. Returns None when the whole roster has
    /// fainted.
    pub fn start(trainer: &Trainer, rng: &mut EncounterRng) -> Option<(Encounter, Vec<EncounterEvent>)> {
        let active = trainer.first_healthy()?;

        let pool = Species::WILD_POOL;
        let species = pool[rng.roll_range(0, (pool.len() - 1) as u16, "wild species") as usize];
        let level = rng.roll_range(WILD_LEVEL_RANGE.0, WILD_LEVEL_RANGE.1, "wild level");
        let wild = Creature::new(species, level);
        debug!(species = species.name(), level = u64::from(wild.level()), "wild spawn");

        let events = vec![
            EncounterEvent::WildAppeared { species, level: wild.level() },
            EncounterEvent::SentOut { name: trainer.roster()[active].name().to_string() },
        ];
        let encounter = Encounter {
            wild: Some(wild),
            active,
            state: EncounterState::Active,
            needs_replacement: false,
        };
        Some((encounter, events))
    }

    #[cfg(test)]
    pub(crate) fn new_for_test(wild: Creature, active: usize) -> Encounter {
        Encounter { wild: Some(wild), active, state: EncounterState::Active, needs_replacement: false }
    }

    pub fn state(&self) -> EncounterState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state != EncounterState::Active
    }

    /// While set, the controller accepts only `Switch` intents.
    pub fn needs_replacement(&self) -> bool {
        self.needs_replacement
    }

    /// Roster index of the creature currently out.
    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn wild(&self) -> Option<&Creature> {
        self.wild.as_ref()
    }

    /// Advance the encounter by one player intent. Returns the events the
    /// step produced; terminal encounters ignore further intents.
    pub fn process_intent(
        &mut self,
        trainer: &mut Trainer,
        intent: PlayerIntent,
        rng: &mut EncounterRng,
    ) -> Vec<EncounterEvent> {
        let mut events = Vec::new();
        if self.is_over() {
            return events;
        }
        if self.needs_replacement {
            match intent {
                PlayerIntent::Switch { roster_index } => {
                    self.replace_fainted(trainer, roster_index, &mut events)
                }
                _ => events.push(EncounterEvent::ActionFailed {
                    reason: ActionFailureReason::ReplacementRequired,
                }),
            }
            return events;
        }
        match intent {
            PlayerIntent::Run => self.handle_run(trainer, rng, &mut events),
            PlayerIntent::Fight { move_index } => {
                self.handle_fight(trainer, move_index, rng, &mut events)
            }
            PlayerIntent::Capture => self.handle_capture(trainer, rng, &mut events),
            PlayerIntent::Switch { roster_index } => {
                self.handle_switch(trainer, roster_index, rng, &mut events)
            }
            PlayerIntent::Status => self.handle_status(trainer, &mut events),
        }
        events
    }

    fn handle_run(
        &mut self,
        trainer: &mut Trainer,
        rng: &mut EncounterRng,
        events: &mut Vec<EncounterEvent>,
    ) {
        if rng.next_draw("flee roll") < FLEE_CHANCE {
            events.push(EncounterEvent::GotAway);
            self.finish(EncounterState::Fled, events);
            return;
        }
        events.push(EncounterEvent::EscapeFailed);
        self.wild_attacks(trainer, rng, events);
        self.check_active_faint(trainer, events);
    }

    fn handle_fight(
        &mut self,
        trainer: &mut Trainer,
        move_index: Option<usize>,
        rng: &mut EncounterRng,
        events: &mut Vec<EncounterEvent>,
    ) {
        let Some(wild) = self.wild.as_mut() else { return };
        let Some(active) = trainer.creature_mut(self.active) else { return };

        let player_move = match move_index {
            Some(index) => match active.move_at(index) {
                Some(instance) if instance.has_uses() => instance.id,
                Some(_) => {
                    events.push(EncounterEvent::ActionFailed {
                        reason: ActionFailureReason::MoveOutOfUses,
                    });
                    return;
                }
                None => {
                    events.push(EncounterEvent::ActionFailed {
                        reason: ActionFailureReason::InvalidMoveSelection,
                    });
                    return;
                }
            },
            None => random_usable_move(active, rng),
        };
        let wild_move = random_usable_move(wild, rng);

        match resolve_turn(active, wild, player_move, wild_move, rng, events) {
            Some(TurnFaint::First) => self.check_active_faint(trainer, events),
            Some(TurnFaint::Second) => self.reward_victory(trainer, events),
            None => {}
        }
    }

    fn handle_capture(
        &mut self,
        trainer: &mut Trainer,
        rng: &mut EncounterRng,
        events: &mut Vec<EncounterEvent>,
    ) {
        let caught = match self.wild.as_ref() {
            Some(wild) => roll_capture(wild, rng),
            None => return,
        };
        if !caught {
            let name = self.wild_name();
            events.push(EncounterEvent::CaptureFailed { name });
            self.wild_attacks(trainer, rng, events);
            self.check_active_faint(trainer, events);
            return;
        }

        let Some(mut wild) = self.wild.take() else { return };
        let name = wild.name().to_string();
        if trainer.has_room() {
            wild.heal();
            match trainer.add_creature(wild) {
                Ok(()) => {
                    events.push(EncounterEvent::CaptureSucceeded { name });
                    self.finish(EncounterState::Won, events);
                    return;
                }
                Err((error, returned)) => {
                    // A freshly spawned wild creature cannot collide with a
                    // roster entry; hand it back to the fight rather than
                    // lose it.
                    debug!(%error, "capture insert rejected");
                    self.wild = Some(returned);
                }
            }
        } else {
            self.wild = Some(wild);
        }
        events.push(EncounterEvent::CaptureBlocked { name });
        self.wild_attacks(trainer, rng, events);
        self.check_active_faint(trainer, events);
    }

    fn handle_switch(
        &mut self,
        trainer: &mut Trainer,
        roster_index: usize,
        rng: &mut EncounterRng,
        events: &mut Vec<EncounterEvent>,
    ) {
        match trainer.creature(roster_index) {
            None => {
                events.push(EncounterEvent::ActionFailed {
                    reason: ActionFailureReason::InvalidSwitchTarget,
                });
                return;
            }
            Some(target) if target.is_fainted() => {
                events.push(EncounterEvent::ActionFailed {
                    reason: ActionFailureReason::SwitchTargetFainted,
                });
                return;
            }
            Some(target) if roster_index == self.active => {
                events.push(EncounterEvent::AlreadyOut { name: target.name().to_string() });
                return;
            }
            Some(target) => {
                events.push(EncounterEvent::SentOut { name: target.name().to_string() });
                self.active = roster_index;
            }
        }
        // The incoming creature eats a free attack.
        self.wild_attacks(trainer, rng, events);
        self.check_active_faint(trainer, events);
    }

    fn handle_status(&self, trainer: &Trainer, events: &mut Vec<EncounterEvent>) {
        let (Some(active), Some(wild)) = (trainer.creature(self.active), self.wild.as_ref())
        else {
            return;
        };
        events.push(EncounterEvent::StatusReport {
            own: CombatantReport::of(active),
            wild: CombatantReport::of(wild),
        });
    }

    /// Send a replacement out after a faint. No free attack for the wild
    /// creature here.
    fn replace_fainted(
        &mut self,
        trainer: &Trainer,
        roster_index: usize,
        events: &mut Vec<EncounterEvent>,
    ) {
        match trainer.creature(roster_index) {
            None => events.push(EncounterEvent::ActionFailed {
                reason: ActionFailureReason::InvalidSwitchTarget,
            }),
            Some(target) if target.is_fainted() => events.push(EncounterEvent::ActionFailed {
                reason: ActionFailureReason::SwitchTargetFainted,
            }),
            Some(target) => {
                self.active = roster_index;
                self.needs_replacement = false;
                events.push(EncounterEvent::SentOut { name: target.name().to_string() });
            }
        }
    }

    fn wild_attacks(
        &mut self,
        trainer: &mut Trainer,
        rng: &mut EncounterRng,
        events: &mut Vec<EncounterEvent>,
    ) {
        let Some(wild) = self.wild.as_mut() else { return };
        let Some(active) = trainer.creature_mut(self.active) else { return };
        let move_id = random_usable_move(wild, rng);
        resolve_attack(wild, active, move_id, rng, events);
    }

    fn check_active_faint(&mut self, trainer: &Trainer, events: &mut Vec<EncounterEvent>) {
        let Some(active) = trainer.creature(self.active) else { return };
        if !active.is_fainted() {
            return;
        }
        if trainer.first_healthy().is_none() {
            self.finish(EncounterState::Lost, events);
        } else {
            self.needs_replacement = true;
            events.push(EncounterEvent::ReplacementRequired);
        }
    }

    fn reward_victory(&mut self, trainer: &mut Trainer, events: &mut Vec<EncounterEvent>) {
        if let Some(wild) = self.wild.as_ref() {
            let reward = XP_PER_WILD_LEVEL * u32::from(wild.level());
            if let Some(active) = trainer.creature_mut(self.active) {
                events.push(EncounterEvent::ExperienceGained {
                    name: active.name().to_string(),
                    amount: reward,
                });
                if active.gain_experience(reward) > 0 {
                    events.push(EncounterEvent::LeveledUp {
                        name: active.name().to_string(),
                        level: active.level(),
                    });
                }
            }
        }
        self.finish(EncounterState::Won, events);
    }

    fn finish(&mut self, outcome: EncounterState, events: &mut Vec<EncounterEvent>) {
        debug!(?outcome, "encounter over");
        self.state = outcome;
        events.push(EncounterEvent::EncounterEnded { outcome });
    }

    fn wild_name(&self) -> String {
        self.wild.as_ref().map(|wild| wild.name().to_string()).unwrap_or_default()
    }
}

/// Uniform choice among moves with uses remaining; Struggle when none.
fn random_usable_move(creature: &Creature, rng: &mut EncounterRng) -> MoveId {
    let usable = creature.usable_moves();
    if usable.is_empty() {
        return MoveId::Struggle;
    }
    let pick = rng.roll_range(0, (usable.len() - 1) as u16, "move choice") as usize;
    creature.moves()[usable[pick]].id
}
