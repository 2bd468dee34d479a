//! The player command surface.
//!
//! Two layers: generic unit operations (`equip_unit`, `move_unit`,
//! `give_item`, `trade_items`) that any caller with unit ids can drive, and
//! the coordinate-based controller commands a front-end issues on behalf of
//! the acting tactician (`select_unit_at`, `use_item_on`, ...). Every
//! command validates first and mutates only on success.

use crate::board::{Position, UnitId};

use super::{ActionError, AttackOutcome, Game};

impl Game {
    // --- generic unit operations --------------------------------------

    /// Equips the item at `index` in `unit`'s inventory, subject to the
    /// kind capability table.
    pub fn equip_unit(&mut self, unit: UnitId, index: usize) -> Result<(), ActionError> {
        if !self.unit(unit).alive {
            return Err(ActionError::DeadUnit);
        }
        if index >= self.unit(unit).items().len() {
            return Err(ActionError::NoSuchItem(index));
        }
        if !self.unit_mut(unit).equip(index) {
            return Err(ActionError::CannotEquip);
        }
        Ok(())
    }

    /// Moves a unit to an empty in-bounds cell within its movement budget.
    /// Each unit moves at most once per turn; the flag resets when its
    /// owner's turn ends. Occupancy swaps in a single step.
    pub fn move_unit(&mut self, unit: UnitId, x: u32, y: u32) -> Result<(), ActionError> {
        let target = Position::new(x, y);
        if !self.field.in_bounds(target) {
            return Err(ActionError::OutOfBounds(x, y));
        }
        let mover = self.unit(unit);
        if !mover.alive {
            return Err(ActionError::DeadUnit);
        }
        let from = mover.position.ok_or(ActionError::Unplaced)?;
        if mover.has_moved {
            return Err(ActionError::AlreadyMoved);
        }
        if from.distance(target) > mover.movement {
            return Err(ActionError::TooFar);
        }
        if self.field.unit_at(target).is_some() {
            return Err(ActionError::Occupied);
        }
        self.field.vacate(from);
        self.field.place(target, unit);
        let mover = self.unit_mut(unit);
        mover.position = Some(target);
        mover.has_moved = true;
        Ok(())
    }

    /// One-directional transfer of `giver`'s item at `index` to an adjacent
    /// `receiver` with free capacity. Unequips the gift first if needed.
    pub fn give_item(
        &mut self,
        giver: UnitId,
        receiver: UnitId,
        index: usize,
    ) -> Result<(), ActionError> {
        self.require_adjacent(giver, receiver)?;
        if index >= self.unit(giver).items().len() {
            return Err(ActionError::NoSuchItem(index));
        }
        let recv = self.unit(receiver);
        if recv.items().len() >= recv.max_items {
            return Err(ActionError::InventoryFull);
        }
        let gift = self
            .unit_mut(giver)
            .remove_item(index)
            .ok_or(ActionError::NoSuchItem(index))?;
        self.unit_mut(receiver).add_item(gift);
        Ok(())
    }

    /// Atomic swap between adjacent units: `a` hands over its item at
    /// `give_index` and takes `b`'s item at `take_index`. Both items are
    /// unequipped by the swap; inventory sizes are unchanged, so capacity
    /// cannot be violated.
    pub fn trade_items(
        &mut self,
        a: UnitId,
        b: UnitId,
        give_index: usize,
        take_index: usize,
    ) -> Result<(), ActionError> {
        self.require_adjacent(a, b)?;
        if give_index >= self.unit(a).items().len() {
            return Err(ActionError::NoSuchItem(give_index));
        }
        if take_index >= self.unit(b).items().len() {
            return Err(ActionError::NoSuchItem(take_index));
        }
        let given = self
            .unit_mut(a)
            .remove_item(give_index)
            .ok_or(ActionError::NoSuchItem(give_index))?;
        let taken = self
            .unit_mut(b)
            .remove_item(take_index)
            .ok_or(ActionError::NoSuchItem(take_index))?;
        self.unit_mut(a).add_item(taken);
        self.unit_mut(b).add_item(given);
        Ok(())
    }

    fn require_adjacent(&self, a: UnitId, b: UnitId) -> Result<(), ActionError> {
        let ua = self.unit(a);
        let ub = self.unit(b);
        if !ua.alive || !ub.alive {
            return Err(ActionError::DeadUnit);
        }
        let pa = ua.position.ok_or(ActionError::Unplaced)?;
        let pb = ub.position.ok_or(ActionError::Unplaced)?;
        if pa.distance(pb) > 1 {
            return Err(ActionError::NotAdjacent);
        }
        Ok(())
    }

    // --- controller commands (acting tactician) -----------------------

    fn require_active(&self) -> Result<(), ActionError> {
        if !self.started {
            return Err(ActionError::NotStarted);
        }
        if self.winners.is_some() {
            return Err(ActionError::MatchDecided);
        }
        Ok(())
    }

    fn occupant(&self, x: u32, y: u32) -> Result<UnitId, ActionError> {
        let pos = Position::new(x, y);
        if !self.field.in_bounds(pos) {
            return Err(ActionError::OutOfBounds(x, y));
        }
        self.field.unit_at(pos).ok_or(ActionError::EmptyCell(x, y))
    }

    fn selected(&self) -> Result<UnitId, ActionError> {
        self.tactician(self.current)
            .selected_unit
            .ok_or(ActionError::NoUnitSelected)
    }

    /// Selects the acting tactician's unit at a cell.
    pub fn select_unit_at(&mut self, x: u32, y: u32) -> Result<(), ActionError> {
        self.require_active()?;
        let id = self.occupant(x, y)?;
        if self.unit(id).owner != Some(self.current) {
            return Err(ActionError::NotYourUnit);
        }
        let current = self.current;
        let player = self.player_mut(current);
        player.selected_unit = Some(id);
        player.selected_item = None;
        Ok(())
    }

    /// The acting tactician's selected unit, if any.
    pub fn selected_unit(&self) -> Option<UnitId> {
        if !self.started {
            return None;
        }
        self.tactician(self.current).selected_unit
    }

    /// Marks an inventory slot of the selected unit for a later give.
    pub fn select_item(&mut self, index: usize) -> Result<(), ActionError> {
        self.require_active()?;
        let unit = self.selected()?;
        if index >= self.unit(unit).items().len() {
            return Err(ActionError::NoSuchItem(index));
        }
        let current = self.current;
        self.player_mut(current).selected_item = Some(index);
        Ok(())
    }

    /// Equips an inventory slot of the selected unit.
    pub fn equip_item(&mut self, index: usize) -> Result<(), ActionError> {
        self.require_active()?;
        let unit = self.selected()?;
        self.equip_unit(unit, index)
    }

    /// Moves the selected unit.
    pub fn move_selected_to(&mut self, x: u32, y: u32) -> Result<(), ActionError> {
        self.require_active()?;
        let unit = self.selected()?;
        self.move_unit(unit, x, y)
    }

    /// Uses the selected unit's equipped item on the cell's occupant:
    /// an attack against an enemy, a heal when the item is a staff.
    pub fn use_item_on(&mut self, x: u32, y: u32) -> Result<AttackOutcome, ActionError> {
        self.require_active()?;
        let unit = self.selected()?;
        let target = self.occupant(x, y)?;
        self.resolve_attack(unit, target)
    }

    /// Gives the selected item to the cell's occupant.
    pub fn give_item_to(&mut self, x: u32, y: u32) -> Result<(), ActionError> {
        self.require_active()?;
        let unit = self.selected()?;
        let index = self
            .tactician(self.current)
            .selected_item
            .ok_or(ActionError::NoItemSelected)?;
        let receiver = self.occupant(x, y)?;
        self.give_item(unit, receiver, index)?;
        let current = self.current;
        self.player_mut(current).selected_item = None;
        Ok(())
    }

    /// Trades between the selected unit and the cell's occupant.
    pub fn trade_with(
        &mut self,
        x: u32,
        y: u32,
        give_index: usize,
        take_index: usize,
    ) -> Result<(), ActionError> {
        self.require_active()?;
        let unit = self.selected()?;
        let other = self.occupant(x, y)?;
        self.trade_items(unit, other, give_index, take_index)
    }
}
