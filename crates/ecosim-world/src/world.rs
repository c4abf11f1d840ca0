//! World state and the turn engine.

use crate::grid::Grid;
use crate::organism::Organism;
use ecosim_core::{Error, Kind, OrganismId, Position, Result, WorldConfig};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Radius of the square window scanned when moving toward a breeding partner.
/// The breeding decision itself only looks at the radius-1 Moore neighborhood.
const PARTNER_SCAN_RADIUS: i32 = 3;

/// Live population counts per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub producers: usize,
    pub herbivores: usize,
    pub carnivores: usize,
}

impl Statistics {
    pub fn count(&self, kind: Kind) -> usize {
        match kind {
            Kind::Producer => self.producers,
            Kind::Herbivore => self.herbivores,
            Kind::Carnivore => self.carnivores,
        }
    }

    pub fn total(&self) -> usize {
        self.producers + self.herbivores + self.carnivores
    }
}

/// The simulation world: grid, organisms, and the turn engine.
///
/// A `World` is stepped by calling [`simulate`](World::simulate), which
/// resolves exactly one discrete turn. All randomness is drawn from a single
/// seeded generator, so two worlds built from the same configuration evolve
/// identically.
pub struct World {
    grid: Grid,
    organisms: HashMap<OrganismId, Organism>,
    config: WorldConfig,
    rng: ChaCha8Rng,
    next_id: u64,
    turn: u64,
}

impl World {
    /// Create an empty world. Width and height must be positive.
    pub fn new(config: WorldConfig) -> Result<Self> {
        if config.width <= 0 || config.height <= 0 {
            return Err(Error::Validation(format!(
                "world dimensions must be positive, got {}x{}",
                config.width, config.height
            )));
        }
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        let grid = Grid::new(config.width, config.height);
        Ok(Self {
            grid,
            organisms: HashMap::new(),
            config,
            rng,
            next_id: 1,
            turn: 0,
        })
    }

    /// Completed turns so far.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Number of living organisms.
    pub fn population(&self) -> usize {
        self.organisms.len()
    }

    /// Read-only access to the occupant of a cell.
    pub fn organism_at(&self, pos: Position) -> Option<&Organism> {
        self.grid.get(pos).and_then(|id| self.organisms.get(&id))
    }

    /// All living organisms of one kind, in row-major grid order.
    pub fn organisms_by_kind(&self, kind: Kind) -> Vec<&Organism> {
        self.grid
            .occupied_cells()
            .filter_map(|(_, id)| self.organisms.get(&id))
            .filter(|organism| organism.kind() == kind)
            .collect()
    }

    /// Live population counts per kind.
    pub fn statistics(&self) -> Statistics {
        let mut stats = Statistics::default();
        for organism in self.organisms.values() {
            match organism.kind() {
                Kind::Producer => stats.producers += 1,
                Kind::Herbivore => stats.herbivores += 1,
                Kind::Carnivore => stats.carnivores += 1,
            }
        }
        stats
    }

    /// Both mobile kinds have died out. Producers alone cannot revive them.
    pub fn is_extinct(&self) -> bool {
        let stats = self.statistics();
        stats.herbivores == 0 && stats.carnivores == 0
    }

    /// Moore-neighborhood occupants of `pos` whose kind is in `kinds`, in the
    /// grid's fixed enumeration order.
    pub fn neighbors_of_kind(&self, pos: Position, kinds: &[Kind]) -> Vec<OrganismId> {
        self.grid
            .occupied_neighbors(pos)
            .into_iter()
            .filter_map(|(_, id)| {
                let organism = self.organisms.get(&id)?;
                kinds.contains(&organism.kind()).then_some(id)
            })
            .collect()
    }

    /// Create an organism of `kind` at `position`, assigning the next id.
    /// Returns `None` if the cell is occupied or out of bounds.
    pub fn spawn(&mut self, kind: Kind, position: Position) -> Option<OrganismId> {
        if !self.grid.is_empty(position) {
            return None;
        }
        let id = OrganismId(self.next_id);
        self.next_id += 1;
        let organism = Organism::new(id, kind, position);
        self.grid.place(&organism);
        self.organisms.insert(id, organism);
        Some(id)
    }

    /// Place the requested counts at random empty cells, with a bounded number
    /// of placement attempts per individual. Silently under-populates when the
    /// grid is too crowded.
    pub fn populate_randomly(&mut self, producers: u32, herbivores: u32, carnivores: u32) {
        let kinds = [
            (Kind::Producer, producers),
            (Kind::Herbivore, herbivores),
            (Kind::Carnivore, carnivores),
        ];
        let mut placed = 0;
        for (kind, count) in kinds {
            for _ in 0..count {
                if self
                    .spawn_at_random(kind, self.config.populate_retry_budget)
                    .is_some()
                {
                    placed += 1;
                }
            }
        }
        debug!(
            placed,
            requested = producers + herbivores + carnivores,
            "world populated"
        );
    }

    fn spawn_at_random(&mut self, kind: Kind, attempts: u32) -> Option<OrganismId> {
        for _ in 0..attempts {
            let pos = Position::new(
                self.rng.gen_range(0..self.grid.width),
                self.rng.gen_range(0..self.grid.height),
            );
            if self.grid.is_empty(pos) {
                return self.spawn(kind, pos);
            }
        }
        trace!(kind = %kind, "no empty cell found within the retry budget");
        None
    }

    /// Advance the world by exactly one turn.
    ///
    /// Every living organism acts once, in uniformly shuffled order: feeding,
    /// then movement, then breeding. A cleanup pass then ages every survivor
    /// and reaps the dead, and every fifth turn a wave of new producers is
    /// seeded at random empty cells.
    pub fn simulate(&mut self) {
        let mut order: Vec<OrganismId> = self
            .grid
            .occupied_cells()
            .filter_map(|(_, id)| self.organisms.get(&id))
            .filter(|organism| organism.is_alive())
            .map(|organism| organism.id())
            .collect();
        order.shuffle(&mut self.rng);

        for id in order {
            // Consumed by an earlier predator this turn.
            if !self.organisms.contains_key(&id) {
                continue;
            }
            self.resolve_feeding(id);
            self.resolve_movement(id);
            self.resolve_breeding(id);
        }

        self.update_and_cleanup();

        if self.config.spawn_interval > 0 && self.turn % self.config.spawn_interval == 0 {
            self.spawn_producer_wave(self.config.spawn_count);
        }
        self.turn += 1;

        debug!(
            turn = self.turn,
            population = self.organisms.len(),
            "turn resolved"
        );
    }

    fn resolve_feeding(&mut self, id: OrganismId) {
        let Some(organism) = self.organisms.get(&id) else {
            return;
        };
        let diet = organism.diet();
        if diet.is_empty() || organism.eating_cooldown() != 0 {
            return;
        }
        let pos = organism.position();
        let Some(prey_id) = self.neighbors_of_kind(pos, diet).into_iter().next() else {
            return;
        };
        if let Some(organism) = self.organisms.get_mut(&id) {
            organism.eat();
        }
        if let Some(prey) = self.organisms.remove(&prey_id) {
            self.grid.remove(prey.position());
            trace!(predator = %id, prey = %prey_id, kind = %prey.kind(), "prey consumed");
        }
    }

    fn resolve_movement(&mut self, id: OrganismId) {
        let Some(organism) = self.organisms.get(&id) else {
            return;
        };
        if !organism.is_alive() || !organism.can_move() {
            return;
        }
        let seeks_partner = organism.can_breed() && !organism.has_bred_this_turn();

        if seeks_partner && self.move_towards_partner(id) {
            return;
        }

        let Some(organism) = self.organisms.get(&id) else {
            return;
        };
        let candidates = self.grid.empty_neighbors(organism.position());
        if candidates.is_empty() {
            return;
        }
        let target = candidates[self.rng.gen_range(0..candidates.len())];
        if let Some(organism) = self.organisms.get_mut(&id) {
            self.grid.move_organism(organism, target);
        }
    }

    /// Step one cell toward the nearest breed-eligible partner within the
    /// courtship window. Returns whether a move was actually performed.
    fn move_towards_partner(&mut self, id: OrganismId) -> bool {
        let Some(organism) = self.organisms.get(&id) else {
            return false;
        };
        let pos = organism.position();
        let kind = organism.kind();

        let mut closest: Option<(i32, Position)> = None;
        for dy in -PARTNER_SCAN_RADIUS..=PARTNER_SCAN_RADIUS {
            for dx in -PARTNER_SCAN_RADIUS..=PARTNER_SCAN_RADIUS {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let candidate = pos.add(dx, dy);
                let Some(partner_id) = self.grid.get(candidate) else {
                    continue;
                };
                let Some(partner) = self.organisms.get(&partner_id) else {
                    continue;
                };
                if partner.kind() == kind
                    && partner.can_breed()
                    && !partner.has_bred_this_turn()
                    && partner.is_alive()
                {
                    // Strict comparison: the first candidate in scan order
                    // wins ties.
                    let distance = pos.distance_squared(candidate);
                    if closest.map_or(true, |(best, _)| distance < best) {
                        closest = Some((distance, candidate));
                    }
                }
            }
        }

        let Some((_, partner_pos)) = closest else {
            return false;
        };
        let step = pos.step_towards(partner_pos);
        if !self.grid.is_empty(step) {
            return false;
        }
        match self.organisms.get_mut(&id) {
            Some(organism) => self.grid.move_organism(organism, step),
            None => false,
        }
    }

    fn resolve_breeding(&mut self, id: OrganismId) {
        let Some(organism) = self.organisms.get(&id) else {
            return;
        };
        if !organism.is_alive() || !organism.can_breed() || organism.has_bred_this_turn() {
            return;
        }
        let pos = organism.position();
        let kind = organism.kind();
        let energy = organism.energy();

        // Without an empty neighbor cell there is nowhere for offspring to
        // go, so breeding is not attempted at all.
        let open = self.grid.empty_neighbors(pos);
        if open.is_empty() {
            return;
        }

        let min_energy = kind.params().breed_min_energy;

        if kind == Kind::Producer {
            if energy < min_energy {
                return;
            }
            if let Some(organism) = self.organisms.get_mut(&id) {
                organism.breed();
            }
            let spawn_pos = open[self.rng.gen_range(0..open.len())];
            let child = self.spawn(kind, spawn_pos);
            debug!(parent = %id, child = ?child, kind = %kind, "producer spread");
            return;
        }

        let Some(partner_id) = self.find_adjacent_partner(id) else {
            return;
        };
        let Some(partner) = self.organisms.get(&partner_id) else {
            return;
        };
        if energy < min_energy || partner.energy() < min_energy {
            return;
        }

        if let Some(organism) = self.organisms.get_mut(&id) {
            organism.breed();
        }
        if let Some(partner) = self.organisms.get_mut(&partner_id) {
            partner.breed();
        }
        let spawn_pos = open[self.rng.gen_range(0..open.len())];
        let child = self.spawn(kind, spawn_pos);
        debug!(
            parent = %id,
            partner = %partner_id,
            child = ?child,
            kind = %kind,
            "offspring born"
        );
    }

    /// First radius-1 Moore neighbor, in the grid's fixed enumeration order,
    /// that is a breed-eligible partner of the same kind.
    fn find_adjacent_partner(&self, id: OrganismId) -> Option<OrganismId> {
        let organism = self.organisms.get(&id)?;
        let kind = organism.kind();
        self.grid
            .occupied_neighbors(organism.position())
            .into_iter()
            .find_map(|(_, partner_id)| {
                let partner = self.organisms.get(&partner_id)?;
                (partner.kind() == kind
                    && partner.can_breed()
                    && !partner.has_bred_this_turn()
                    && partner.is_alive())
                .then_some(partner_id)
            })
    }

    /// Age every survivor, then reap everything at or below zero energy. This
    /// walks the whole grid rather than the turn's action list so nothing the
    /// turn produced or starved is missed.
    fn update_and_cleanup(&mut self) {
        let occupied: Vec<(Position, OrganismId)> = self.grid.occupied_cells().collect();
        for (pos, id) in occupied {
            let alive = match self.organisms.get_mut(&id) {
                Some(organism) => {
                    if organism.is_alive() {
                        organism.advance_turn();
                    }
                    organism.is_alive()
                }
                None => continue,
            };
            if !alive {
                if let Some(dead) = self.organisms.remove(&id) {
                    self.grid.remove(pos);
                    trace!(organism = %id, kind = %dead.kind(), "organism died");
                }
            }
        }
    }

    fn spawn_producer_wave(&mut self, count: u32) {
        let mut spawned = 0;
        for _ in 0..count {
            if self
                .spawn_at_random(Kind::Producer, self.config.spawn_retry_budget)
                .is_some()
            {
                spawned += 1;
            }
        }
        if spawned > 0 {
            trace!(turn = self.turn, spawned, "producer wave seeded");
        }
    }
}
