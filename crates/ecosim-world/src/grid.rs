//! 2D single-occupancy grid for the world.

use crate::organism::Organism;
use ecosim_core::{OrganismId, Position};
use serde::{Deserialize, Serialize};

/// Moore-neighborhood offsets in row-major order (`dy` outer, `dx` inner).
///
/// Every neighborhood query walks this list in order, which makes "first
/// matching neighbor" and "random pick among candidates" reproducible for a
/// given seed.
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// A bounded 2D grid holding at most one organism id per cell.
///
/// The grid stores ids, not organisms; the world owns the organisms and keeps
/// each organism's stored position in sync with its cell by routing every
/// position change through [`Grid::move_organism`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    cells: Vec<Option<OrganismId>>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        let size = (width * height) as usize;
        Self {
            width,
            height,
            cells: vec![None; size],
        }
    }

    pub fn is_valid_position(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Valid and unoccupied
    pub fn is_empty(&self, pos: Position) -> bool {
        self.is_valid_position(pos) && self.cells[self.pos_to_index(pos)].is_none()
    }

    /// Occupant of a cell, or `None` for empty or out-of-bounds coordinates.
    pub fn get(&self, pos: Position) -> Option<OrganismId> {
        if !self.is_valid_position(pos) {
            return None;
        }
        self.cells[self.pos_to_index(pos)]
    }

    /// Put an organism on its own stored position. Fails if that cell is
    /// occupied or out of bounds.
    pub fn place(&mut self, organism: &Organism) -> bool {
        let pos = organism.position();
        if !self.is_empty(pos) {
            return false;
        }
        let index = self.pos_to_index(pos);
        self.cells[index] = Some(organism.id());
        true
    }

    /// Clear a cell; no-op for invalid coordinates.
    pub fn remove(&mut self, pos: Position) {
        if self.is_valid_position(pos) {
            let index = self.pos_to_index(pos);
            self.cells[index] = None;
        }
    }

    /// Move an organism from its stored position to `to`.
    ///
    /// Succeeds iff the organism is movable, its stored cell actually holds
    /// it, and the destination is empty. Clears the source, occupies the
    /// destination, and updates the organism's stored position in one step so
    /// the two can never disagree.
    pub fn move_organism(&mut self, organism: &mut Organism, to: Position) -> bool {
        if !organism.can_move() {
            return false;
        }
        let from = organism.position();
        if self.get(from) != Some(organism.id()) || !self.is_empty(to) {
            return false;
        }
        let from_index = self.pos_to_index(from);
        let to_index = self.pos_to_index(to);
        self.cells[from_index] = None;
        self.cells[to_index] = Some(organism.id());
        organism.set_position(to);
        true
    }

    /// Empty Moore-neighborhood cells of `pos`, bounds-clipped, in the fixed
    /// enumeration order.
    pub fn empty_neighbors(&self, pos: Position) -> Vec<Position> {
        NEIGHBOR_OFFSETS
            .iter()
            .map(|&(dx, dy)| pos.add(dx, dy))
            .filter(|&neighbor| self.is_empty(neighbor))
            .collect()
    }

    /// Occupied Moore-neighborhood cells of `pos`, bounds-clipped, in the
    /// fixed enumeration order.
    pub fn occupied_neighbors(&self, pos: Position) -> Vec<(Position, OrganismId)> {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(dx, dy)| {
                let neighbor = pos.add(dx, dy);
                self.get(neighbor).map(|id| (neighbor, id))
            })
            .collect()
    }

    /// Iterator over all occupied cells in row-major order.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (Position, OrganismId)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| cell.map(|id| (self.index_to_pos(i), id)))
    }

    fn pos_to_index(&self, pos: Position) -> usize {
        (pos.y * self.width + pos.x) as usize
    }

    fn index_to_pos(&self, index: usize) -> Position {
        let x = (index as i32) % self.width;
        let y = (index as i32) / self.width;
        Position::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecosim_core::Kind;

    fn organism(id: u64, kind: Kind, x: i32, y: i32) -> Organism {
        Organism::new(OrganismId(id), kind, Position::new(x, y))
    }

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(10, 10);
        assert_eq!(grid.width, 10);
        assert_eq!(grid.height, 10);
        assert!(grid.is_empty(Position::new(0, 0)));
        assert!(grid.is_empty(Position::new(9, 9)));
    }

    #[test]
    fn test_bounds() {
        let grid = Grid::new(10, 5);
        assert!(grid.is_valid_position(Position::new(0, 0)));
        assert!(grid.is_valid_position(Position::new(9, 4)));
        assert!(!grid.is_valid_position(Position::new(10, 0)));
        assert!(!grid.is_valid_position(Position::new(0, 5)));
        assert!(!grid.is_valid_position(Position::new(-1, 2)));

        // Out-of-bounds queries answer, never panic.
        assert!(!grid.is_empty(Position::new(-1, -1)));
        assert_eq!(grid.get(Position::new(99, 99)), None);
    }

    #[test]
    fn test_place_and_remove() {
        let mut grid = Grid::new(10, 10);
        let herbivore = organism(1, Kind::Herbivore, 3, 4);

        assert!(grid.place(&herbivore));
        assert_eq!(grid.get(Position::new(3, 4)), Some(OrganismId(1)));
        assert!(!grid.is_empty(Position::new(3, 4)));

        // Second placement on the same cell fails.
        let intruder = organism(2, Kind::Producer, 3, 4);
        assert!(!grid.place(&intruder));
        assert_eq!(grid.get(Position::new(3, 4)), Some(OrganismId(1)));

        grid.remove(Position::new(3, 4));
        assert!(grid.is_empty(Position::new(3, 4)));

        // Removing an invalid cell is a no-op.
        grid.remove(Position::new(-5, 0));
    }

    #[test]
    fn test_move_organism() {
        let mut grid = Grid::new(10, 10);
        let mut herbivore = organism(1, Kind::Herbivore, 2, 2);
        grid.place(&herbivore);

        assert!(grid.move_organism(&mut herbivore, Position::new(3, 2)));
        assert_eq!(herbivore.position(), Position::new(3, 2));
        assert!(grid.is_empty(Position::new(2, 2)));
        assert_eq!(grid.get(Position::new(3, 2)), Some(OrganismId(1)));
    }

    #[test]
    fn test_move_to_occupied_cell_fails() {
        let mut grid = Grid::new(10, 10);
        let mut herbivore = organism(1, Kind::Herbivore, 2, 2);
        let other = organism(2, Kind::Herbivore, 3, 2);
        grid.place(&herbivore);
        grid.place(&other);

        assert!(!grid.move_organism(&mut herbivore, Position::new(3, 2)));
        assert_eq!(herbivore.position(), Position::new(2, 2));
        assert_eq!(grid.get(Position::new(2, 2)), Some(OrganismId(1)));
    }

    #[test]
    fn test_immobile_organism_never_moves() {
        let mut grid = Grid::new(10, 10);
        let mut producer = organism(1, Kind::Producer, 5, 5);
        grid.place(&producer);

        assert!(!grid.move_organism(&mut producer, Position::new(5, 6)));
        assert_eq!(producer.position(), Position::new(5, 5));
        assert_eq!(grid.get(Position::new(5, 5)), Some(OrganismId(1)));
    }

    #[test]
    fn test_empty_neighbors_order_and_clipping() {
        let grid = Grid::new(10, 10);

        // Interior cell: all eight, row-major offset order.
        let neighbors = grid.empty_neighbors(Position::new(5, 5));
        assert_eq!(
            neighbors,
            vec![
                Position::new(4, 4),
                Position::new(5, 4),
                Position::new(6, 4),
                Position::new(4, 5),
                Position::new(6, 5),
                Position::new(4, 6),
                Position::new(5, 6),
                Position::new(6, 6),
            ]
        );

        // Corner cell: clipped to three.
        let corner = grid.empty_neighbors(Position::new(0, 0));
        assert_eq!(
            corner,
            vec![Position::new(1, 0), Position::new(0, 1), Position::new(1, 1)]
        );
    }

    #[test]
    fn test_occupied_neighbors_order() {
        let mut grid = Grid::new(10, 10);
        grid.place(&organism(1, Kind::Producer, 6, 6));
        grid.place(&organism(2, Kind::Producer, 4, 4));
        grid.place(&organism(3, Kind::Producer, 6, 4));

        let occupied = grid.occupied_neighbors(Position::new(5, 5));
        // Row above before row below.
        assert_eq!(
            occupied,
            vec![
                (Position::new(4, 4), OrganismId(2)),
                (Position::new(6, 4), OrganismId(3)),
                (Position::new(6, 6), OrganismId(1)),
            ]
        );
    }

    #[test]
    fn test_occupied_cells_row_major() {
        let mut grid = Grid::new(4, 4);
        grid.place(&organism(1, Kind::Producer, 3, 2));
        grid.place(&organism(2, Kind::Producer, 0, 0));
        grid.place(&organism(3, Kind::Producer, 2, 0));

        let cells: Vec<_> = grid.occupied_cells().collect();
        assert_eq!(
            cells,
            vec![
                (Position::new(0, 0), OrganismId(2)),
                (Position::new(2, 0), OrganismId(3)),
                (Position::new(3, 2), OrganismId(1)),
            ]
        );
    }
}
