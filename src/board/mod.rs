//! Board representation: the field grid, items, units, and tacticians.
//!
//! Contains the leaf data structures the match aggregate is built from.
//! Nothing here knows about turn order or victory; that lives in `game`.

pub mod field;
pub mod item;
pub mod tactician;
pub mod unit;

pub use field::{Field, Position};
pub use item::{CombatItem, WeaponKind, TRIANGLE_BONUS, TRIANGLE_PENALTY};
pub use tactician::{Tactician, TacticianId};
pub use unit::{Unit, UnitId, UnitKind, ALL_KINDS};
