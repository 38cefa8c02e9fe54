use crate::creature::Creature;
use crate::moves::MoveId;
use crate::species::Species;
use crate::trainer::Trainer;

/// A unit draw that turns into an exponential sample of 0, a guaranteed
/// miss at any speed ratio.
pub const MISS_DRAW: f64 = 0.0;
/// A unit draw that hits at every speed ratio these tests use.
pub const HIT_DRAW: f64 = 0.9;
/// A unit draw that bottoms the damage roll out at floor(attack / 2).
pub const LOW_DAMAGE_DRAW: f64 = 0.0;
/// A unit draw that tops the damage roll out at the full attack stat.
pub const HIGH_DAMAGE_DRAW: f64 = 0.999;

/// A builder for test creatures with pinned stats, so damage math in tests
/// is exact.
///
/// # Example
/// ```
/// let creature = TestCreatureBuilder::new(Species::Pikachu)
///     .stats(20, 10, 5, 5)
///     .moves(vec![MoveId::Shock])
///     .build();
/// ```
pub struct TestCreatureBuilder {
    species: Species,
    level: u16,
    max_hp: u16,
    attack: u16,
    defense: u16,
    speed: u16,
    hp: Option<u16>,
    moves: Vec<MoveId>,
}

impl TestCreatureBuilder {
    /// Creates a builder with mid-game defaults: level 5, 20 max HP,
    /// attack 10, defense 5, speed 5, knowing Tackle.
    pub fn new(species: Species) -> Self {
        Self {
            species,
            level: 5,
            max_hp: 20,
            attack: 10,
            defense: 5,
            speed: 5,
            hp: None,
            moves: vec![MoveId::Tackle],
        }
    }

    pub fn level(mut self, level: u16) -> Self {
        self.level = level;
        self
    }

    pub fn stats(mut self, max_hp: u16, attack: u16, defense: u16, speed: u16) -> Self {
        self.max_hp = max_hp;
        self.attack = attack;
        self.defense = defense;
        self.speed = speed;
        self
    }

    /// Sets current HP. If not set, HP will be max.
    pub fn hp(mut self, hp: u16) -> Self {
        self.hp = Some(hp);
        self
    }

    pub fn moves(mut self, moves: Vec<MoveId>) -> Self {
        self.moves = moves;
        self
    }

    pub fn build(self) -> Creature {
        let mut creature = Creature::new_for_test(
            self.species,
            self.level,
            self.max_hp,
            self.attack,
            self.defense,
            self.speed,
            self.moves,
        );
        if let Some(hp) = self.hp {
            creature.set_hp(hp);
        }
        creature
    }
}

/// Creates a trainer owning the given creatures, in order.
pub fn trainer_with(creatures: Vec<Creature>) -> Trainer {
    let mut trainer = Trainer::new("Tester");
    for creature in creatures {
        trainer.add_creature(creature).expect("test roster has room");
    }
    trainer
}
