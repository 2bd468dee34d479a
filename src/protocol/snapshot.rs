//! JSON state snapshots.
//!
//! Builds a serializable view of a match so front-ends can poll the full
//! state in one `dump` call. Snapshots are plain copies: mutating a
//! snapshot never touches the match.

use serde::Serialize;

use crate::board::{CombatItem, Position, UnitKind};
use crate::game::Game;

/// Full match state at a point in time.
#[derive(Debug, Clone, Serialize)]
pub struct MatchSnapshot {
    pub round: u32,
    /// -1 when the match has no round limit.
    pub max_rounds: i32,
    /// The acting tactician, absent before the match starts.
    pub turn: Option<String>,
    /// Winner names; absent while the match is undecided.
    pub winners: Option<Vec<String>>,
    /// Live tacticians in the current turn order.
    pub tacticians: Vec<TacticianSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TacticianSnapshot {
    pub name: String,
    pub units: Vec<UnitSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnitSnapshot {
    pub kind: UnitKind,
    pub current_hp: f64,
    pub max_hp: u32,
    pub movement: u32,
    pub position: Option<Position>,
    pub alive: bool,
    pub has_moved: bool,
    pub equipped: Option<usize>,
    pub items: Vec<CombatItem>,
}

/// Captures the current match state.
pub fn snapshot(game: &Game) -> MatchSnapshot {
    let tacticians = game
        .tacticians()
        .map(|t| TacticianSnapshot {
            name: t.name.clone(),
            units: t
                .units
                .iter()
                .map(|&uid| {
                    let u = game.unit(uid);
                    UnitSnapshot {
                        kind: u.kind,
                        current_hp: u.current_hp,
                        max_hp: u.max_hp,
                        movement: u.movement,
                        position: u.position,
                        alive: u.alive,
                        has_moved: u.has_moved,
                        equipped: u.equipped_index(),
                        items: u.items().to_vec(),
                    }
                })
                .collect(),
        })
        .collect();

    MatchSnapshot {
        round: game.round(),
        max_rounds: game.max_rounds(),
        turn: game.turn_owner().map(|t| t.name.clone()),
        winners: game
            .winner_names()
            .map(|names| names.into_iter().map(str::to_string).collect()),
        tacticians,
    }
}

/// Renders the snapshot as a single JSON line.
pub fn to_json(game: &Game) -> String {
    serde_json::to_string(&snapshot(game)).expect("snapshot types are always serializable")
}
