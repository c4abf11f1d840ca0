//! Organism state machines.
//!
//! One struct covers all three kinds; the per-kind numeric policy lives in
//! [`ecosim_core::SpeciesParams`] and is looked up through the kind tag, so
//! eat/breed/aging logic is written exactly once.

use ecosim_core::{Kind, OrganismId, Position};
use serde::{Deserialize, Serialize};

/// An organism in the simulation.
///
/// State transitions happen only through [`eat`](Organism::eat),
/// [`breed`](Organism::breed), [`advance_turn`](Organism::advance_turn), and
/// grid-mediated moves; all are safe to call speculatively (unmet
/// preconditions are silent no-ops).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organism {
    pub(crate) id: OrganismId,
    pub(crate) kind: Kind,
    pub(crate) position: Position,
    pub(crate) energy: i32,
    pub(crate) eating_cooldown: u32,
    pub(crate) breeding_cooldown: u32,
    pub(crate) ate_this_turn: bool,
    pub(crate) has_bred_this_turn: bool,
    pub(crate) can_breed: bool,
}

impl Organism {
    pub fn new(id: OrganismId, kind: Kind, position: Position) -> Self {
        let params = kind.params();
        Self {
            id,
            kind,
            position,
            energy: params.initial_energy,
            eating_cooldown: params.initial_eating_cooldown,
            breeding_cooldown: params.initial_breeding_cooldown,
            ate_this_turn: false,
            has_bred_this_turn: false,
            can_breed: false,
        }
    }

    pub fn id(&self) -> OrganismId {
        self.id
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn energy(&self) -> i32 {
        self.energy
    }

    pub fn eating_cooldown(&self) -> u32 {
        self.eating_cooldown
    }

    pub fn breeding_cooldown(&self) -> u32 {
        self.breeding_cooldown
    }

    pub fn ate_this_turn(&self) -> bool {
        self.ate_this_turn
    }

    pub fn has_bred_this_turn(&self) -> bool {
        self.has_bred_this_turn
    }

    pub fn can_breed(&self) -> bool {
        self.can_breed
    }

    pub fn can_move(&self) -> bool {
        self.kind.params().can_move
    }

    /// Kinds this organism may consume
    pub fn diet(&self) -> &'static [Kind] {
        self.kind.params().diet
    }

    pub fn is_alive(&self) -> bool {
        self.energy > 0
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Consume one prey's worth of food.
    ///
    /// No-op unless the eating cooldown is 0. Removing the prey itself is the
    /// turn engine's responsibility.
    pub fn eat(&mut self) {
        if self.eating_cooldown != 0 {
            return;
        }
        let params = self.kind.params();
        self.ate_this_turn = true;
        self.energy += params.eat_gain;
        self.eating_cooldown = params.eating_cooldown;
    }

    /// Commit to breeding this turn.
    ///
    /// No-op unless breed-eligible with the cooldown at 0. Spawning the
    /// offspring is the turn engine's responsibility.
    pub fn breed(&mut self) {
        if !self.can_breed || self.breeding_cooldown != 0 {
            return;
        }
        let params = self.kind.params();
        self.has_bred_this_turn = true;
        self.can_breed = false;
        self.energy -= params.breed_cost;
        self.breeding_cooldown = params.breeding_cooldown;
    }

    /// Per-turn bookkeeping: cooldown decay, flag resets, aging.
    ///
    /// When the breeding cooldown transitions to exactly 0 the organism
    /// becomes breed-eligible again. Producers clamp to dead as soon as aging
    /// exhausts their energy; mobile kinds are reaped by the engine's cleanup
    /// pass instead.
    pub fn advance_turn(&mut self) {
        if self.eating_cooldown > 0 {
            self.eating_cooldown -= 1;
        }
        if self.breeding_cooldown > 0 {
            self.breeding_cooldown -= 1;
            if self.breeding_cooldown == 0 {
                self.can_breed = true;
                self.has_bred_this_turn = false;
            }
        }
        if self.eating_cooldown == 0 {
            self.ate_this_turn = false;
        }
        self.energy -= 1;
        if self.kind == Kind::Producer && self.energy <= 0 {
            self.die();
        }
    }

    fn die(&mut self) {
        self.energy = 0;
    }
}
