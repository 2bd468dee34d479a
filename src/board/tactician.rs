//! Tacticians: the players of a match.
//!
//! A tactician owns a roster of unit ids plus the turn-scoped selection
//! state (selected unit, selected inventory slot). Selections are cleared
//! when the tactician's turn ends.

use serde::Serialize;

use super::unit::UnitId;

/// Stable handle into the match's tactician arena. Eliminated tacticians
/// keep their arena entry; only the live turn order forgets them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TacticianId(pub u32);

/// A player and their turn-scoped state.
#[derive(Debug, Clone)]
pub struct Tactician {
    pub name: String,
    pub units: Vec<UnitId>,
    pub selected_unit: Option<UnitId>,
    pub selected_item: Option<usize>,
}

impl Tactician {
    pub fn new(name: impl Into<String>) -> Self {
        Tactician {
            name: name.into(),
            units: Vec::new(),
            selected_unit: None,
            selected_item: None,
        }
    }

    /// Drops both selections; called when the turn passes on.
    pub fn clear_selection(&mut self) {
        self.selected_unit = None;
        self.selected_item = None;
    }
}
