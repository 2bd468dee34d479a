//! Command parser for the front-end protocol.
//!
//! Parses incoming line-oriented commands from raw text into structured
//! `Command` variants that the engine main loop can dispatch on. The
//! protocol carries no replies for actions; front-ends re-query `state` or
//! `dump` after each command.

/// Largest field side length `init` accepts; zero and anything bigger are
/// rejected with a stderr diagnostic.
pub const MAX_FIELD_SIZE: u32 = 1024;

/// A parsed front-end command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start a match: `init <players> <size> [rounds <n>] [seed <s>]`.
    /// Without `rounds` the match is endless.
    Init {
        players: u32,
        size: u32,
        rounds: Option<i32>,
        seed: Option<u64>,
    },

    /// Finish the acting tactician's turn.
    EndTurn,

    /// Print a human-readable match summary.
    State,

    /// Print a JSON snapshot of the full match.
    Dump,

    /// Select the acting tactician's unit at a cell.
    Select { x: u32, y: u32 },

    /// Mark an inventory slot of the selected unit.
    SelectItem { index: usize },

    /// Equip an inventory slot of the selected unit.
    Equip { index: usize },

    /// Move the selected unit.
    Move { x: u32, y: u32 },

    /// Use the selected unit's equipped item on a cell's occupant.
    Attack { x: u32, y: u32 },

    /// Give the selected item to a cell's occupant.
    Give { x: u32, y: u32 },

    /// Trade with a cell's occupant: `trade <x> <y> <give_i> <take_i>`.
    Trade {
        x: u32,
        y: u32,
        give: usize,
        take: usize,
    },

    /// Remove a tactician from the match by name.
    Remove { name: String },

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging to stderr.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    match tokens[0] {
        "endturn" => Some(Command::EndTurn),
        "state" => Some(Command::State),
        "dump" => Some(Command::Dump),
        "quit" => Some(Command::Quit),

        "init" => parse_init(&tokens),
        "select" => parse_cell(&tokens, "select").map(|(x, y)| Command::Select { x, y }),
        "move" => parse_cell(&tokens, "move").map(|(x, y)| Command::Move { x, y }),
        "attack" => parse_cell(&tokens, "attack").map(|(x, y)| Command::Attack { x, y }),
        "give" => parse_cell(&tokens, "give").map(|(x, y)| Command::Give { x, y }),
        "selectitem" => parse_index(&tokens, "selectitem").map(|index| Command::SelectItem { index }),
        "equip" => parse_index(&tokens, "equip").map(|index| Command::Equip { index }),
        "trade" => parse_trade(&tokens),
        "remove" => parse_remove(&tokens, trimmed),

        other => {
            eprintln!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `init <players> <size> [rounds <n>] [seed <s>]`.
fn parse_init(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 {
        eprintln!("malformed init: expected 'init <players> <size> [rounds <n>] [seed <s>]'");
        return None;
    }
    let players = match tokens[1].parse::<u32>() {
        Ok(v) => v,
        Err(_) => {
            eprintln!("invalid player count: '{}'", tokens[1]);
            return None;
        }
    };
    let size = match tokens[2].parse::<u32>() {
        Ok(v) if v >= 1 && v <= MAX_FIELD_SIZE => v,
        Ok(v) => {
            eprintln!("field size {} out of range (1-{})", v, MAX_FIELD_SIZE);
            return None;
        }
        Err(_) => {
            eprintln!("invalid field size: '{}'", tokens[2]);
            return None;
        }
    };

    let mut rounds = None;
    let mut seed = None;
    let mut i = 3;
    while i < tokens.len() {
        match tokens[i] {
            "rounds" => {
                i += 1;
                if i < tokens.len() {
                    match tokens[i].parse::<i32>() {
                        Ok(v) => rounds = Some(v),
                        Err(_) => eprintln!("invalid rounds value: '{}'", tokens[i]),
                    }
                }
            }
            "seed" => {
                i += 1;
                if i < tokens.len() {
                    match tokens[i].parse::<u64>() {
                        Ok(v) => seed = Some(v),
                        Err(_) => eprintln!("invalid seed value: '{}'", tokens[i]),
                    }
                }
            }
            other => {
                eprintln!("unknown init argument: '{}'", other);
            }
        }
        i += 1;
    }

    Some(Command::Init {
        players,
        size,
        rounds,
        seed,
    })
}

/// Parses `<cmd> <x> <y>`.
fn parse_cell(tokens: &[&str], cmd: &str) -> Option<(u32, u32)> {
    if tokens.len() < 3 {
        eprintln!("malformed {}: expected '{} <x> <y>'", cmd, cmd);
        return None;
    }
    match (tokens[1].parse::<u32>(), tokens[2].parse::<u32>()) {
        (Ok(x), Ok(y)) => Some((x, y)),
        _ => {
            eprintln!("invalid coordinates: '{} {}'", tokens[1], tokens[2]);
            None
        }
    }
}

/// Parses `<cmd> <index>`.
fn parse_index(tokens: &[&str], cmd: &str) -> Option<usize> {
    if tokens.len() < 2 {
        eprintln!("malformed {}: expected '{} <index>'", cmd, cmd);
        return None;
    }
    match tokens[1].parse::<usize>() {
        Ok(i) => Some(i),
        Err(_) => {
            eprintln!("invalid index: '{}'", tokens[1]);
            None
        }
    }
}

/// Parses `trade <x> <y> <give_i> <take_i>`.
fn parse_trade(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 5 {
        eprintln!("malformed trade: expected 'trade <x> <y> <give_i> <take_i>'");
        return None;
    }
    let parsed = (
        tokens[1].parse::<u32>(),
        tokens[2].parse::<u32>(),
        tokens[3].parse::<usize>(),
        tokens[4].parse::<usize>(),
    );
    match parsed {
        (Ok(x), Ok(y), Ok(give), Ok(take)) => Some(Command::Trade { x, y, give, take }),
        _ => {
            eprintln!("invalid trade arguments");
            None
        }
    }
}

/// Parses `remove <name>`; the name is everything after the keyword, so
/// multi-word names like "Player 2" survive.
fn parse_remove(tokens: &[&str], line: &str) -> Option<Command> {
    if tokens.len() < 2 {
        eprintln!("malformed remove: expected 'remove <name>'");
        return None;
    }
    let name = line["remove".len()..].trim().to_string();
    Some(Command::Remove { name })
}
