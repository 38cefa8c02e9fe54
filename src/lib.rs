//! Creature Adventure battle engine
//!
//! A turn-based wild-encounter game: a trainer's roster of leveled creatures
//! against randomly spawned wild ones, with type-effectiveness damage,
//! captures, and experience-driven growth. The library is the whole game;
//! the binary in `main.rs` is a thin prompt-and-print wrapper around it.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod cli;
pub mod creature;
pub mod errors;
pub mod moves;
pub mod species;
pub mod trainer;
pub mod types;

// --- PUBLIC API RE-EXPORTS ---
// The most important types, importable straight from the crate root.

// Core battle engine functions and state.
pub use battle::capture::{capture_chance, roll_capture};
pub use battle::encounter::{Encounter, PlayerIntent};
pub use battle::engine::{resolve_attack, resolve_turn, AttackOutcome, TurnFaint};
pub use battle::state::{
    ActionFailureReason, CombatantReport, EncounterEvent, EncounterRng, EncounterState,
};

// Core runtime types.
pub use creature::{Creature, CreatureId, LEVEL_CAP, MOVE_LIMIT};
pub use moves::{MoveData, MoveId, MoveInstance};
pub use species::{BaseStats, Species};
pub use trainer::{Trainer, ROSTER_LIMIT};
pub use types::{Effectiveness, ElementType, SAME_TYPE_BONUS};

// Crate-specific error and result types.
pub use errors::{GameError, GameResult};
