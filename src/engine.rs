//! Engine session management.
//!
//! Holds the current match between protocol commands and maps each parsed
//! `Command` onto the match's public operations. Action commands print
//! nothing on success; a front-end observes effects by re-querying `state`
//! or `dump`. Rejected actions are reported on stderr only, so the stdout
//! stream stays machine-readable.

use std::io::Write;

use crate::game::Game;
use crate::protocol::to_json;

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub game: Option<Game>,
}

impl Engine {
    /// Creates a new engine with no match in progress.
    pub fn new() -> Self {
        Engine { game: None }
    }

    fn game_mut(&mut self) -> Option<&mut Game> {
        if self.game.is_none() {
            eprintln!("no match in progress");
        }
        self.game.as_mut()
    }

    /// Handles `init`: builds and starts a fresh match, replacing any
    /// previous one, and acknowledges with `matchok`.
    pub fn handle_init<W: Write>(
        &mut self,
        players: u32,
        size: u32,
        rounds: Option<i32>,
        seed: Option<u64>,
        out: &mut W,
    ) {
        let mut game = match seed {
            Some(s) => Game::with_seed(players, size, s),
            None => Game::new(players, size),
        };
        game.init_match(rounds.unwrap_or(-1));
        self.game = Some(game);
        writeln!(out, "matchok").unwrap();
        out.flush().unwrap();
    }

    /// Handles `state`: a short human-readable summary, one fact per line.
    pub fn handle_state<W: Write>(&mut self, out: &mut W) {
        let Some(game) = self.game_mut() else { return };
        if game.max_rounds() > 0 {
            writeln!(out, "round {} of {}", game.round(), game.max_rounds()).unwrap();
        } else {
            writeln!(out, "round {} of unlimited", game.round()).unwrap();
        }
        match game.turn_owner() {
            Some(t) => writeln!(out, "turn {}", t.name).unwrap(),
            None => writeln!(out, "turn -").unwrap(),
        }
        let order: Vec<&str> = game.tacticians().map(|t| t.name.as_str()).collect();
        writeln!(out, "order {}", order.join(",")).unwrap();
        match game.winner_names() {
            Some(names) => writeln!(out, "winners {}", names.join(",")).unwrap(),
            None => writeln!(out, "winners -").unwrap(),
        }
        out.flush().unwrap();
    }

    /// Handles `dump`: the full match as one JSON line.
    pub fn handle_dump<W: Write>(&mut self, out: &mut W) {
        let Some(game) = self.game_mut() else { return };
        writeln!(out, "{}", to_json(game)).unwrap();
        out.flush().unwrap();
    }

    pub fn handle_endturn(&mut self) {
        if let Some(game) = self.game_mut() {
            game.end_turn();
        }
    }

    pub fn handle_select(&mut self, x: u32, y: u32) {
        if let Some(game) = self.game_mut() {
            if let Err(e) = game.select_unit_at(x, y) {
                eprintln!("select rejected: {}", e);
            }
        }
    }

    pub fn handle_selectitem(&mut self, index: usize) {
        if let Some(game) = self.game_mut() {
            if let Err(e) = game.select_item(index) {
                eprintln!("selectitem rejected: {}", e);
            }
        }
    }

    pub fn handle_equip(&mut self, index: usize) {
        if let Some(game) = self.game_mut() {
            if let Err(e) = game.equip_item(index) {
                eprintln!("equip rejected: {}", e);
            }
        }
    }

    pub fn handle_move(&mut self, x: u32, y: u32) {
        if let Some(game) = self.game_mut() {
            if let Err(e) = game.move_selected_to(x, y) {
                eprintln!("move rejected: {}", e);
            }
        }
    }

    pub fn handle_attack(&mut self, x: u32, y: u32) {
        if let Some(game) = self.game_mut() {
            if let Err(e) = game.use_item_on(x, y) {
                eprintln!("attack rejected: {}", e);
            }
        }
    }

    pub fn handle_give(&mut self, x: u32, y: u32) {
        if let Some(game) = self.game_mut() {
            if let Err(e) = game.give_item_to(x, y) {
                eprintln!("give rejected: {}", e);
            }
        }
    }

    pub fn handle_trade(&mut self, x: u32, y: u32, give: usize, take: usize) {
        if let Some(game) = self.game_mut() {
            if let Err(e) = game.trade_with(x, y, give, take) {
                eprintln!("trade rejected: {}", e);
            }
        }
    }

    pub fn handle_remove(&mut self, name: &str) {
        if let Some(game) = self.game_mut() {
            game.remove_tactician(name);
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
