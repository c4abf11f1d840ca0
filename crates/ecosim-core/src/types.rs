//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an organism instance.
///
/// Assigned monotonically by the world starting at 1; never reused for the
/// lifetime of a world instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrganismId(pub u64);

impl fmt::Display for OrganismId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 2D position in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn add(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Squared Euclidean distance to another position
    pub fn distance_squared(&self, other: Position) -> i32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// One cell toward `target`, each axis moved independently by the sign
    /// of its delta. Returns `self` when already at the target.
    pub fn step_towards(&self, target: Position) -> Self {
        Self {
            x: self.x + (target.x - self.x).signum(),
            y: self.y + (target.y - self.y).signum(),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Organism kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Producer,
    Herbivore,
    Carnivore,
}

impl Kind {
    pub const ALL: [Kind; 3] = [Kind::Producer, Kind::Herbivore, Kind::Carnivore];

    /// Numeric policy for this kind.
    pub fn params(self) -> &'static SpeciesParams {
        match self {
            Kind::Producer => &PRODUCER,
            Kind::Herbivore => &HERBIVORE,
            Kind::Carnivore => &CARNIVORE,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Producer => "producer",
            Kind::Herbivore => "herbivore",
            Kind::Carnivore => "carnivore",
        };
        write!(f, "{name}")
    }
}

/// Numeric policy for one organism kind.
///
/// All energy and cooldown accounting is integer. A kind with an empty diet
/// never eats; a kind with `can_move: false` never leaves its cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesParams {
    /// Energy at creation
    pub initial_energy: i32,
    /// Eating cooldown at creation
    pub initial_eating_cooldown: u32,
    /// Breeding cooldown at creation
    pub initial_breeding_cooldown: u32,
    /// Energy gained per successful eat
    pub eat_gain: i32,
    /// Eating cooldown after a successful eat
    pub eating_cooldown: u32,
    /// Energy subtracted per successful breed
    pub breed_cost: i32,
    /// Breeding cooldown after a successful breed
    pub breeding_cooldown: u32,
    /// Minimum energy required of each parent to breed
    pub breed_min_energy: i32,
    /// Whether this kind can move at all
    pub can_move: bool,
    /// Kinds this kind may consume
    pub diet: &'static [Kind],
}

const PRODUCER: SpeciesParams = SpeciesParams {
    initial_energy: 6,
    initial_eating_cooldown: 0,
    initial_breeding_cooldown: 2,
    eat_gain: 0,
    eating_cooldown: 0,
    breed_cost: 2,
    breeding_cooldown: 4,
    breed_min_energy: 4,
    can_move: false,
    diet: &[],
};

const HERBIVORE: SpeciesParams = SpeciesParams {
    initial_energy: 10,
    initial_eating_cooldown: 0,
    initial_breeding_cooldown: 2,
    eat_gain: 6,
    eating_cooldown: 3,
    breed_cost: 1,
    breeding_cooldown: 5,
    breed_min_energy: 3,
    can_move: true,
    diet: &[Kind::Producer],
};

const CARNIVORE: SpeciesParams = SpeciesParams {
    initial_energy: 15,
    initial_eating_cooldown: 2,
    initial_breeding_cooldown: 6,
    eat_gain: 10,
    eating_cooldown: 8,
    breed_cost: 2,
    breeding_cooldown: 7,
    breed_min_energy: 4,
    can_move: true,
    diet: &[Kind::Herbivore],
};
