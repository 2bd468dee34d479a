//! The square-grid battlefield.
//!
//! The engine treats the map as a plain collaborator: cells, Manhattan
//! distances, orthogonal neighbours, and one-unit-per-cell occupancy.
//! All occupancy changes go through `place`/`vacate` so a cell can never
//! hold two units at once.

use serde::Serialize;

use super::unit::UnitId;

/// A cell coordinate on the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    pub const fn new(x: u32, y: u32) -> Self {
        Position { x, y }
    }

    /// Manhattan distance to another cell.
    pub fn distance(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Returns true if the cells are orthogonally adjacent (distance 1).
    pub fn is_adjacent(self, other: Position) -> bool {
        self.distance(other) == 1
    }
}

/// A size x size grid of cells, each holding at most one unit.
#[derive(Debug, Clone)]
pub struct Field {
    size: u32,
    cells: Vec<Option<UnitId>>,
}

impl Field {
    /// Creates an empty square field of the given side length.
    pub fn new(size: u32) -> Self {
        Field {
            size,
            cells: vec![None; size as usize * size as usize],
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x < self.size && pos.y < self.size
    }

    fn index(&self, pos: Position) -> usize {
        pos.y as usize * self.size as usize + pos.x as usize
    }

    /// Returns the unit occupying a cell, if any.
    pub fn unit_at(&self, pos: Position) -> Option<UnitId> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.cells[self.index(pos)]
    }

    /// Places a unit on an empty cell. Returns false if the cell is out of
    /// bounds or already occupied.
    pub fn place(&mut self, pos: Position, unit: UnitId) -> bool {
        if !self.in_bounds(pos) {
            return false;
        }
        let idx = self.index(pos);
        if self.cells[idx].is_some() {
            return false;
        }
        self.cells[idx] = Some(unit);
        true
    }

    /// Empties a cell, returning the unit that occupied it.
    pub fn vacate(&mut self, pos: Position) -> Option<UnitId> {
        if !self.in_bounds(pos) {
            return None;
        }
        let idx = self.index(pos);
        self.cells[idx].take()
    }

    /// Returns the in-bounds orthogonal neighbours of a cell.
    pub fn neighbours(&self, pos: Position) -> Vec<Position> {
        let mut out = Vec::with_capacity(4);
        if pos.x > 0 {
            out.push(Position::new(pos.x - 1, pos.y));
        }
        if pos.y > 0 {
            out.push(Position::new(pos.x, pos.y - 1));
        }
        if pos.x + 1 < self.size {
            out.push(Position::new(pos.x + 1, pos.y));
        }
        if pos.y + 1 < self.size {
            out.push(Position::new(pos.x, pos.y + 1));
        }
        out
    }

    /// A full grid is connected whenever it has at least one cell.
    pub fn is_connected(&self) -> bool {
        self.size > 0
    }
}
