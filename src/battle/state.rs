use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::creature::Creature;
use crate::species::Species;
use crate::types::Effectiveness;

/// Where an encounter stands. Everything but `Active` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterState {
    Active,
    Fled,
    Won,
    Lost,
}

/// Why the controller refused an intent without touching any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionFailureReason {
    /// The move index does not name a known move
    InvalidMoveSelection,
    /// The selected move has no uses left
    MoveOutOfUses,
    /// The roster index does not name a roster member
    InvalidSwitchTarget,
    /// The switch target has fainted
    SwitchTargetFainted,
    /// A fainted active creature must be replaced before anything else
    ReplacementRequired,
}

/// A combatant snapshot for the status report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantReport {
    pub name: String,
    pub species: Species,
    pub level: u16,
    pub hp: u16,
    pub max_hp: u16,
}

impl CombatantReport {
    pub fn of(creature: &Creature) -> Self {
        CombatantReport {
            name: creature.name().to_string(),
            species: creature.species(),
            level: creature.level(),
            hp: creature.hp(),
            max_hp: creature.max_hp(),
        }
    }
}

/// Structured output of the encounter core. The presentation layer decides
/// what, if anything, to show for each event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EncounterEvent {
    WildAppeared {
        species: Species,
        level: u16,
    },
    SentOut {
        name: String,
    },
    AlreadyOut {
        name: String,
    },
    MoveUsed {
        user: String,
        move_name: String,
    },
    MoveMissed {
        user: String,
        move_name: String,
    },
    MoveHit {
        target: String,
        effectiveness: Effectiveness,
        damage: u16,
        remaining_hp: u16,
    },
    Fainted {
        name: String,
    },
    GotAway,
    EscapeFailed,
    CaptureSucceeded {
        name: String,
    },
    CaptureFailed {
        name: String,
    },
    /// The catch roll succeeded but the roster is full; the creature stays
    /// in the fight.
    CaptureBlocked {
        name: String,
    },
    ExperienceGained {
        name: String,
        amount: u32,
    },
    LeveledUp {
        name: String,
        level: u16,
    },
    ReplacementRequired,
    ActionFailed {
        reason: ActionFailureReason,
    },
    StatusReport {
        own: CombatantReport,
        wild: CombatantReport,
    },
    EncounterEnded {
        outcome: EncounterState,
    },
}

impl EncounterEvent {
    /// Human-readable line for the event, or None for silent events.
    pub fn format(&self) -> Option<String> {
        match self {
            EncounterEvent::WildAppeared { species, level } => {
                Some(format!("A wild {} (level {}) appeared!", species, level))
            }
            EncounterEvent::SentOut { name } => Some(format!("Go, {}!", name)),
            EncounterEvent::AlreadyOut { name } => Some(format!("{} is already out!", name)),
            EncounterEvent::MoveUsed { user, move_name } => {
                Some(format!("{} used {}!", user, move_name))
            }
            EncounterEvent::MoveMissed { user, move_name } => {
                Some(format!("{}'s {} missed!", user, move_name))
            }
            EncounterEvent::MoveHit { effectiveness, damage, .. } => {
                Some(format!("It's {}! Does {} damage!", effectiveness, damage))
            }
            EncounterEvent::Fainted { name } => Some(format!("{} fainted!", name)),
            EncounterEvent::GotAway => Some("Got away safely!".to_string()),
            EncounterEvent::EscapeFailed => Some("Can't escape!".to_string()),
            EncounterEvent::CaptureSucceeded { name } => {
                Some(format!("Wild {} was caught!", name))
            }
            EncounterEvent::CaptureFailed { .. } => Some("Capture failed!".to_string()),
            EncounterEvent::CaptureBlocked { name } => Some(format!(
                "You already have a full roster! Wild {} stays in the fight.",
                name
            )),
            EncounterEvent::ExperienceGained { name, amount } => {
                Some(format!("{} gained {} XP!", name, amount))
            }
            EncounterEvent::LeveledUp { name, level } => {
                Some(format!("{} is now level {}!", name, level))
            }
            EncounterEvent::ReplacementRequired => {
                Some("Choose a creature to send out!".to_string())
            }
            EncounterEvent::ActionFailed { reason } => Some(
                match reason {
                    ActionFailureReason::InvalidMoveSelection => "Sorry, that's not a move.",
                    ActionFailureReason::MoveOutOfUses => "That move is out of uses!",
                    ActionFailureReason::InvalidSwitchTarget => {
                        "Sorry, that's not a valid choice."
                    }
                    ActionFailureReason::SwitchTargetFainted => {
                        "That creature has fainted and can't fight!"
                    }
                    ActionFailureReason::ReplacementRequired => {
                        "You must send out a new creature first!"
                    }
                }
                .to_string(),
            ),
            EncounterEvent::StatusReport { own, wild } => Some(format!(
                "Your level {} {} has {} HP remaining.\nThe wild level {} {} has {} HP remaining.",
                own.level, own.name, own.hp, wild.level, wild.name, wild.hp
            )),
            EncounterEvent::EncounterEnded { outcome } => match outcome {
                EncounterState::Lost => Some(
                    "You have no healthy creatures! Visit a creature center to heal your team."
                        .to_string(),
                ),
                _ => None,
            },
        }
    }
}

/// Every random draw the engine makes flows through this source, so a whole
/// session can be replayed from a seed and tests can script exact outcomes.
#[derive(Debug, Clone)]
pub struct EncounterRng {
    source: RngSource,
}

#[derive(Debug, Clone)]
enum RngSource {
    Entropy(StdRng),
    Scripted { draws: Vec<f64>, index: usize },
}

impl EncounterRng {
    pub fn from_entropy() -> Self {
        EncounterRng { source: RngSource::Entropy(StdRng::from_os_rng()) }
    }

    pub fn seeded(seed: u64) -> Self {
        EncounterRng { source: RngSource::Entropy(StdRng::seed_from_u64(seed)) }
    }

    /// A queue of unit-interval draws consumed in order. Panics when
    /// exhausted, naming the draw that needed more values.
    pub fn scripted(draws: Vec<f64>) -> Self {
        EncounterRng { source: RngSource::Scripted { draws, index: 0 } }
    }

    /// Next draw in [0, 1).
    pub fn next_draw(&mut self, reason: &str) -> f64 {
        let draw = match &mut self.source {
            RngSource::Entropy(rng) => rng.random::<f64>(),
            RngSource::Scripted { draws, index } => {
                let Some(&value) = draws.get(*index) else {
                    panic!("scripted rng exhausted at draw {} ('{}')", index, reason);
                };
                *index += 1;
                value
            }
        };
        trace!(reason, draw, "rng draw");
        draw
    }

    /// Uniform integer in [lo, hi], both ends inclusive.
    pub fn roll_range(&mut self, lo: u16, hi: u16, reason: &str) -> u16 {
        let span = f64::from(hi - lo + 1);
        let offset = (self.next_draw(reason) * span) as u16;
        lo + offset.min(hi - lo)
    }

    /// Sample an exponential distribution with the given rate by inverting
    /// the CDF of a unit draw.
    pub fn exponential(&mut self, rate: f64, reason: &str) -> f64 {
        let draw = self.next_draw(reason);
        -(1.0 - draw).ln() / rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scripted_draws_come_back_in_order() {
        let mut rng = EncounterRng::scripted(vec![0.25, 0.75]);
        assert_eq!(rng.next_draw("first"), 0.25);
        assert_eq!(rng.next_draw("second"), 0.75);
    }

    #[test]
    fn roll_range_covers_both_ends() {
        let mut rng = EncounterRng::scripted(vec![0.0, 0.999]);
        assert_eq!(rng.roll_range(2, 10, "low"), 2);
        assert_eq!(rng.roll_range(2, 10, "high"), 10);
    }

    #[test]
    fn exponential_inverts_the_unit_draw() {
        let mut rng = EncounterRng::scripted(vec![0.0, 0.5]);
        assert_eq!(rng.exponential(1.0, "zero"), 0.0);
        let sample = rng.exponential(2.0, "half");
        assert!((sample - 0.5f64.ln().abs() / 2.0).abs() < 1e-12);
    }

    #[test]
    fn seeded_sources_replay_identically() {
        let mut first = EncounterRng::seeded(42);
        let mut second = EncounterRng::seeded(42);
        for _ in 0..16 {
            assert_eq!(first.next_draw("replay"), second.next_draw("replay"));
        }
    }

    #[test]
    fn silent_events_format_to_none() {
        let event = EncounterEvent::EncounterEnded { outcome: EncounterState::Fled };
        assert_eq!(event.format(), None);
    }

    #[test]
    fn hit_event_reports_effectiveness_and_damage() {
        let event = EncounterEvent::MoveHit {
            target: "Diglett".to_string(),
            effectiveness: crate::types::Effectiveness::SuperEffective,
            damage: 12,
            remaining_hp: 3,
        };
        assert_eq!(event.format().as_deref(), Some("It's supereffective! Does 12 damage!"));
    }
}
