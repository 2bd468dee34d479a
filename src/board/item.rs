//! Equippable weapons and the type-matchup table.
//!
//! The matchup table is the balance core of the game: the physical triangle
//! (Axe > Sword > Spear > Axe) and the magic triangle (Dark > Anima > Light
//! > Dark) grant a 1.5x bonus with the advantage and a flat -20 penalty
//! (floored at 0) against it. Magic and mundane weapons are strong against
//! each other both ways. Staves deal negative damage, i.e. they heal.

use serde::Serialize;

/// Flat power penalty applied when attacking into a triangle disadvantage.
pub const TRIANGLE_PENALTY: f64 = 20.0;

/// Power multiplier applied when attacking with a triangle advantage, or
/// across the magic/mundane divide.
pub const TRIANGLE_BONUS: f64 = 1.5;

/// The category of a combat item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WeaponKind {
    Axe,
    Sword,
    Spear,
    Bow,
    Staff,
    Anima,
    Light,
    Dark,
}

impl WeaponKind {
    /// Returns true for the three magic categories.
    pub const fn is_magic(self) -> bool {
        matches!(self, WeaponKind::Anima | WeaponKind::Light | WeaponKind::Dark)
    }

    /// The kind this kind has a triangle advantage against, if it sits in a
    /// triangle at all (Bow and Staff do not).
    pub const fn beats(self) -> Option<WeaponKind> {
        match self {
            WeaponKind::Axe => Some(WeaponKind::Sword),
            WeaponKind::Sword => Some(WeaponKind::Spear),
            WeaponKind::Spear => Some(WeaponKind::Axe),
            WeaponKind::Dark => Some(WeaponKind::Anima),
            WeaponKind::Anima => Some(WeaponKind::Light),
            WeaponKind::Light => Some(WeaponKind::Dark),
            WeaponKind::Bow | WeaponKind::Staff => None,
        }
    }
}

/// An equippable weapon.
///
/// Immutable once created. Power and ranges are not validated: an item with
/// non-positive or inverted ranges is inert rather than an error, because no
/// real battlefield distance can ever satisfy its range gate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombatItem {
    pub name: String,
    pub power: f64,
    pub min_range: i32,
    pub max_range: i32,
    pub kind: WeaponKind,
}

impl CombatItem {
    pub fn new(
        name: impl Into<String>,
        power: f64,
        min_range: i32,
        max_range: i32,
        kind: WeaponKind,
    ) -> Self {
        CombatItem {
            name: name.into(),
            power,
            min_range,
            max_range,
            kind,
        }
    }

    /// Returns true if a target at the given distance is reachable.
    pub fn in_range(&self, distance: u32) -> bool {
        let d = distance as i64;
        d >= self.min_range as i64 && d <= self.max_range as i64
    }

    /// Damage this item deals against a defender equipped with `defender`.
    ///
    /// Use the raw `power` instead when the defender holds nothing.
    pub fn matchup(&self, defender: WeaponKind) -> f64 {
        if self.kind == WeaponKind::Staff {
            return -self.power;
        }
        if self.kind == defender {
            return self.power;
        }
        if self.kind.beats() == Some(defender) {
            return self.power * TRIANGLE_BONUS;
        }
        if defender.beats() == Some(self.kind) {
            return (self.power - TRIANGLE_PENALTY).max(0.0);
        }
        if self.kind.is_magic() != defender.is_magic() {
            return self.power * TRIANGLE_BONUS;
        }
        self.power
    }
}
