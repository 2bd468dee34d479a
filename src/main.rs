//! Skirmish -- a turn-based tactics rules engine.
//!
//! This binary reads commands from stdin and writes responses to stdout,
//! one command per line, so a front-end can drive a match over pipes.

use std::io::{self, BufRead};

use skirmish::engine::Engine;
use skirmish::protocol::parser::{parse_command, Command};

/// Runs the main protocol loop, reading commands from stdin
/// and writing responses to stdout.
fn main() {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::Init {
                players,
                size,
                rounds,
                seed,
            } => {
                engine.handle_init(players, size, rounds, seed, &mut out);
            }
            Command::State => {
                engine.handle_state(&mut out);
            }
            Command::Dump => {
                engine.handle_dump(&mut out);
            }
            Command::EndTurn => {
                engine.handle_endturn();
            }
            Command::Select { x, y } => {
                engine.handle_select(x, y);
            }
            Command::SelectItem { index } => {
                engine.handle_selectitem(index);
            }
            Command::Equip { index } => {
                engine.handle_equip(index);
            }
            Command::Move { x, y } => {
                engine.handle_move(x, y);
            }
            Command::Attack { x, y } => {
                engine.handle_attack(x, y);
            }
            Command::Give { x, y } => {
                engine.handle_give(x, y);
            }
            Command::Trade { x, y, give, take } => {
                engine.handle_trade(x, y, give, take);
            }
            Command::Remove { name } => {
                engine.handle_remove(&name);
            }
            Command::Quit => {
                break;
            }
        }
    }
}
