//! Units: hit points, movement, inventory, and the equip capability table.
//!
//! A single `Unit` struct carries a `UnitKind` tag; what a unit may equip is
//! decided by `UnitKind::can_equip` instead of per-kind subtypes. Inventory
//! and the equipped slot are private so the `equipped`-points-into-inventory
//! invariant cannot be broken from outside.

use serde::Serialize;

use super::field::Position;
use super::item::{CombatItem, WeaponKind};
use super::tactician::TacticianId;

/// Stable handle into the match's unit arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct UnitId(pub u32);

/// The seven unit kinds of a standard roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnitKind {
    Alpaca,
    Archer,
    Cleric,
    Fighter,
    Hero,
    Sorcerer,
    SwordMaster,
}

/// All kinds, in roster order.
pub const ALL_KINDS: [UnitKind; 7] = [
    UnitKind::Alpaca,
    UnitKind::Archer,
    UnitKind::Cleric,
    UnitKind::Fighter,
    UnitKind::Hero,
    UnitKind::Sorcerer,
    UnitKind::SwordMaster,
];

impl UnitKind {
    /// The equip capability table. An alpaca can carry items but never wield
    /// one; a sorcerer wields any of the three magic categories; everyone
    /// else is bound to a single weapon kind.
    pub fn can_equip(self, weapon: WeaponKind) -> bool {
        match self {
            UnitKind::Alpaca => false,
            UnitKind::Archer => weapon == WeaponKind::Bow,
            UnitKind::Cleric => weapon == WeaponKind::Staff,
            UnitKind::Fighter => weapon == WeaponKind::Axe,
            UnitKind::Hero => weapon == WeaponKind::Spear,
            UnitKind::Sorcerer => weapon.is_magic(),
            UnitKind::SwordMaster => weapon == WeaponKind::Sword,
        }
    }

    /// Losing a hero eliminates its owner from the match.
    pub const fn is_hero(self) -> bool {
        matches!(self, UnitKind::Hero)
    }
}

/// A unit on (or off) the battlefield.
#[derive(Debug, Clone)]
pub struct Unit {
    pub kind: UnitKind,
    pub max_hp: u32,
    /// Healing is capped at `max_hp`, but damage is never floored at zero;
    /// death is detected explicitly, so overkill damage stays observable.
    pub current_hp: f64,
    pub movement: u32,
    pub max_items: usize,
    pub position: Option<Position>,
    pub owner: Option<TacticianId>,
    pub alive: bool,
    pub has_moved: bool,
    items: Vec<CombatItem>,
    equipped: Option<usize>,
}

impl Unit {
    /// Creates a unit with full hit points, no items, and no position.
    /// Non-positive `max_hp` is not rejected; the inert-not-fatal policy
    /// applies to configuration errors throughout the engine.
    pub fn new(kind: UnitKind, max_hp: u32, movement: u32, max_items: usize) -> Self {
        Unit {
            kind,
            max_hp,
            current_hp: max_hp as f64,
            movement,
            max_items,
            position: None,
            owner: None,
            alive: true,
            has_moved: false,
            items: Vec::new(),
            equipped: None,
        }
    }

    /// Builds the default-configured unit for a kind: the stock stats and
    /// starting weapon a standard roster hands out.
    pub fn default_of(kind: UnitKind) -> Self {
        let mut unit = match kind {
            UnitKind::Alpaca => Unit::new(kind, 60, 4, usize::MAX),
            _ => Unit::new(kind, 50, 3, 3),
        };
        if let Some(item) = default_weapon(kind) {
            unit.add_item(item);
        }
        unit
    }

    pub fn items(&self) -> &[CombatItem] {
        &self.items
    }

    pub fn equipped_index(&self) -> Option<usize> {
        self.equipped
    }

    pub fn equipped_item(&self) -> Option<&CombatItem> {
        self.equipped.map(|i| &self.items[i])
    }

    /// Adds an item if there is capacity. Returns false when full.
    pub fn add_item(&mut self, item: CombatItem) -> bool {
        if self.items.len() >= self.max_items {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Removes and returns the item at `index`, unequipping it first if it
    /// was the equipped one and re-pointing the equipped slot otherwise.
    pub fn remove_item(&mut self, index: usize) -> Option<CombatItem> {
        if index >= self.items.len() {
            return None;
        }
        match self.equipped {
            Some(e) if e == index => self.equipped = None,
            Some(e) if e > index => self.equipped = Some(e - 1),
            _ => {}
        }
        Some(self.items.remove(index))
    }

    /// Equips the inventory item at `index` if this unit's kind can wield
    /// it. Returns false (leaving the current equip untouched) otherwise.
    pub fn equip(&mut self, index: usize) -> bool {
        match self.items.get(index) {
            Some(item) if self.kind.can_equip(item.kind) => {
                self.equipped = Some(index);
                true
            }
            _ => false,
        }
    }

    pub fn unequip(&mut self) {
        self.equipped = None;
    }
}

/// The starting weapon for a kind, or None for the alpaca.
fn default_weapon(kind: UnitKind) -> Option<CombatItem> {
    let item = match kind {
        UnitKind::Alpaca => return None,
        UnitKind::Archer => CombatItem::new("Bow", 10.0, 2, 3, WeaponKind::Bow),
        UnitKind::Cleric => CombatItem::new("Staff", 15.0, 1, 2, WeaponKind::Staff),
        UnitKind::Fighter => CombatItem::new("Axe", 10.0, 1, 2, WeaponKind::Axe),
        UnitKind::Hero => CombatItem::new("Spear", 10.0, 1, 2, WeaponKind::Spear),
        UnitKind::Sorcerer => CombatItem::new("Dark tome", 10.0, 1, 2, WeaponKind::Dark),
        UnitKind::SwordMaster => CombatItem::new("Sword", 10.0, 1, 2, WeaponKind::Sword),
    };
    Some(item)
}
