use tracing::debug;

use crate::battle::state::{EncounterEvent, EncounterRng};
use crate::creature::Creature;
use crate::moves::MoveId;
use crate::types::{Effectiveness, ElementType, SAME_TYPE_BONUS};

/// Exponential hit samples below this miss.
const MISS_THRESHOLD: f64 = 0.25;

/// What a single attack did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackOutcome {
    pub hit: bool,
    pub damage: u16,
    pub fainted: bool,
}

/// Which combatant fainted during a turn, by argument position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnFaint {
    First,
    Second,
}

/// Resolve one attack: spend the use, roll to hit, roll damage, apply it.
///
/// The use is spent whether or not the attack lands, and a forced invocation
/// of an exhausted move still resolves; only the player's voluntary
/// selection is restricted to moves with uses left.
pub fn resolve_attack(
    attacker: &mut Creature,
    defender: &mut Creature,
    move_id: MoveId,
    rng: &mut EncounterRng,
    events: &mut Vec<EncounterEvent>,
) -> AttackOutcome {
    let data = move_id.data();
    attacker.spend_move_use(move_id);

    events.push(EncounterEvent::MoveUsed {
        user: attacker.name().to_string(),
        move_name: data.name.to_string(),
    });

    // Faster attackers relative to the defender miss less often: the sample
    // concentrates below the threshold as the rate grows.
    let rate = f64::from(defender.speed()) / f64::from(attacker.speed());
    let sample = rng.exponential(rate, "hit roll");
    if sample < MISS_THRESHOLD {
        events.push(EncounterEvent::MoveMissed {
            user: attacker.name().to_string(),
            move_name: data.name.to_string(),
        });
        return AttackOutcome { hit: false, damage: 0, fainted: false };
    }

    // Classification reflects the pure chart lookup; the same-type bonus
    // lands afterwards, on the damage multiplier only.
    let base_multiplier = ElementType::effectiveness(data.element, defender.element());
    let effectiveness = Effectiveness::classify(base_multiplier);
    let mut multiplier = base_multiplier;
    if data.element == attacker.element() {
        multiplier += SAME_TYPE_BONUS;
    }

    let roll = rng.roll_range(attacker.attack() / 2, attacker.attack(), "damage roll");
    let damage =
        (f64::from(roll + data.power) * multiplier / f64::from(defender.defense())).ceil() as u16;
    defender.take_damage(damage);

    events.push(EncounterEvent::MoveHit {
        target: defender.name().to_string(),
        effectiveness,
        damage,
        remaining_hp: defender.hp(),
    });

    let fainted = defender.is_fainted();
    if fainted {
        events.push(EncounterEvent::Fainted { name: defender.name().to_string() });
    }
    AttackOutcome { hit: true, damage, fainted }
}

/// Resolve a full turn between two combatants. Initiative is a uniform
/// 0..=10 roll plus speed; an exact tie goes to the second combatant. The
/// turn ends the moment either side faints.
pub fn resolve_turn(
    first: &mut Creature,
    second: &mut Creature,
    first_move: MoveId,
    second_move: MoveId,
    rng: &mut EncounterRng,
    events: &mut Vec<EncounterEvent>,
) -> Option<TurnFaint> {
    let first_initiative = rng.roll_range(0, 10, "initiative roll") + first.speed();
    let second_initiative = rng.roll_range(0, 10, "initiative roll") + second.speed();
    debug!(
        first = u64::from(first_initiative),
        second = u64::from(second_initiative),
        "initiative"
    );

    if first_initiative > second_initiative {
        if resolve_attack(first, second, first_move, rng, events).fainted {
            return Some(TurnFaint::Second);
        }
        if resolve_attack(second, first, second_move, rng, events).fainted {
            return Some(TurnFaint::First);
        }
    } else {
        if resolve_attack(second, first, second_move, rng, events).fainted {
            return Some(TurnFaint::First);
        }
        if resolve_attack(first, second, first_move, rng, events).fainted {
            return Some(TurnFaint::Second);
        }
    }
    None
}
