use tracing::debug;

use crate::battle::state::EncounterRng;
use crate::creature::Creature;

/// Catch probability from remaining HP: an untouched creature cannot be
/// caught, a nearly fainted one almost always is.
pub fn capture_chance(wild: &Creature) -> f64 {
    1.0 - f64::from(wild.hp()) / f64::from(wild.max_hp())
}

/// Roll a capture attempt. A zero chance never succeeds, whatever the draw.
pub fn roll_capture(wild: &Creature, rng: &mut EncounterRng) -> bool {
    let chance = capture_chance(wild);
    let roll = rng.next_draw("capture roll");
    debug!(chance, roll, "capture attempt");
    chance > 0.0 && roll <= chance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::MoveId;
    use crate::species::Species;
    use rstest::rstest;

    fn wild_at(hp: u16, max_hp: u16) -> Creature {
        let mut wild =
            Creature::new_for_test(Species::Diglett, 5, max_hp, 5, 5, 5, vec![MoveId::Tackle]);
        wild.take_damage(max_hp - hp);
        wild
    }

    #[rstest]
    #[case(20, 20, 0.0)]
    #[case(15, 20, 0.25)]
    #[case(10, 20, 0.5)]
    #[case(1, 20, 0.95)]
    fn chance_tracks_missing_hp(#[case] hp: u16, #[case] max_hp: u16, #[case] expected: f64) {
        let wild = wild_at(hp, max_hp);
        assert!((capture_chance(&wild) - expected).abs() < 1e-9);
    }

    #[test]
    fn full_health_creature_is_never_caught() {
        // Even a 0.0 draw fails when the chance is zero.
        let wild = wild_at(20, 20);
        let mut rng = EncounterRng::scripted(vec![0.0]);
        assert!(!roll_capture(&wild, &mut rng));
    }

    #[test]
    fn weakened_creature_is_caught_on_a_low_draw() {
        let wild = wild_at(1, 20);
        let mut rng = EncounterRng::scripted(vec![0.5]);
        assert!(roll_capture(&wild, &mut rng));
    }

    #[test]
    fn draw_above_the_chance_fails() {
        let wild = wild_at(10, 20);
        let mut rng = EncounterRng::scripted(vec![0.9]);
        assert!(!roll_capture(&wild, &mut rng));
    }
}
