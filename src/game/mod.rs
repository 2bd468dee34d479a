//! The match aggregate.
//!
//! `Game` owns the field, the unit arena, and the tactician arena, and is
//! the single writer over all of them. Weak references in the domain model
//! (unit -> tactician, cell -> unit) are plain ids into these arenas.
//! Submodules split the behavior: `turn` drives the round state machine,
//! `combat` resolves attacks, `actions` carries the player command surface.

pub mod actions;
pub mod combat;
pub mod turn;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::{Field, Position, Tactician, TacticianId, Unit, UnitId, ALL_KINDS};

pub use combat::{clamp_damage, AttackOutcome};
pub use turn::shuffle_keeping_last_out;

/// Why a player command was rejected. A rejected command never mutates
/// state; callers that ignore the error observe the original silent-no-op
/// behavior.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("match has not started")]
    NotStarted,

    #[error("match is already decided")]
    MatchDecided,

    #[error("cell ({0}, {1}) is out of bounds")]
    OutOfBounds(u32, u32),

    #[error("no unit at ({0}, {1})")]
    EmptyCell(u32, u32),

    #[error("unit does not belong to the acting tactician")]
    NotYourUnit,

    #[error("no unit selected")]
    NoUnitSelected,

    #[error("no item selected")]
    NoItemSelected,

    #[error("no item at inventory slot {0}")]
    NoSuchItem(usize),

    #[error("this unit kind cannot wield that weapon")]
    CannotEquip,

    #[error("no item equipped")]
    NothingEquipped,

    #[error("target is out of range")]
    OutOfRange,

    #[error("destination is occupied")]
    Occupied,

    #[error("destination is beyond movement range")]
    TooFar,

    #[error("unit already moved this turn")]
    AlreadyMoved,

    #[error("units are not adjacent")]
    NotAdjacent,

    #[error("receiver's inventory is full")]
    InventoryFull,

    #[error("unit is dead")]
    DeadUnit,

    #[error("unit is not placed on the field")]
    Unplaced,
}

/// A complete match: field, units, players, and turn/round state.
#[derive(Debug, Clone)]
pub struct Game {
    field: Field,
    field_size: u32,
    n_players: u32,
    units: Vec<Unit>,
    players: Vec<Tactician>,
    turn_order: Vec<TacticianId>,
    current: TacticianId,
    round: u32,
    max_rounds: i32,
    winners: Option<Vec<TacticianId>>,
    started: bool,
    rng: SmallRng,
}

impl Game {
    /// Creates an idle match shell for `n_players` on a `field_size` x
    /// `field_size` grid, seeded from entropy.
    pub fn new(n_players: u32, field_size: u32) -> Self {
        Self::with_rng(n_players, field_size, SmallRng::from_entropy())
    }

    /// Same as `new` but with a fixed seed; turn-order shuffling is the only
    /// source of randomness, so a seeded match is fully deterministic.
    pub fn with_seed(n_players: u32, field_size: u32, seed: u64) -> Self {
        Self::with_rng(n_players, field_size, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(n_players: u32, field_size: u32, rng: SmallRng) -> Self {
        Game {
            field: Field::new(field_size),
            field_size,
            n_players,
            units: Vec::new(),
            players: Vec::new(),
            turn_order: Vec::new(),
            current: TacticianId(0),
            round: 1,
            max_rounds: -1,
            winners: None,
            started: false,
            rng,
        }
    }

    /// Starts a standard match: `n_players` tacticians named "Player 0"..,
    /// one unit of every kind each, deployed row-major across the field.
    /// `max_rounds` of -1 means no round limit.
    pub fn init_match(&mut self, max_rounds: i32) {
        self.units.clear();
        self.players.clear();
        self.field = Field::new(self.field_size);
        let ids: Vec<TacticianId> = (0..self.n_players)
            .map(|i| self.add_tactician(format!("Player {}", i)))
            .collect();
        for &tid in &ids {
            for kind in ALL_KINDS {
                self.add_unit(Unit::default_of(kind), tid);
            }
        }
        self.deploy();
        self.start(max_rounds);
    }

    /// Starts a standard match with no round limit.
    pub fn init_endless_match(&mut self) {
        self.init_match(-1);
    }

    /// Adds a tactician to the arena. Intended for hand-built matches; the
    /// standard roster path goes through `init_match`.
    pub fn add_tactician(&mut self, name: impl Into<String>) -> TacticianId {
        let id = TacticianId(self.players.len() as u32);
        self.players.push(Tactician::new(name));
        id
    }

    /// Adds a unit to the arena under `owner`'s roster and returns its id.
    pub fn add_unit(&mut self, mut unit: Unit, owner: TacticianId) -> UnitId {
        let id = UnitId(self.units.len() as u32);
        unit.owner = Some(owner);
        self.units.push(unit);
        self.players[owner.0 as usize].units.push(id);
        id
    }

    /// Moves into the InProgress state with the tacticians added so far:
    /// round 1, freshly shuffled turn order.
    pub fn start(&mut self, max_rounds: i32) {
        self.winners = None;
        self.round = 1;
        self.max_rounds = max_rounds;
        self.started = true;
        let ids: Vec<TacticianId> = (0..self.players.len())
            .map(|i| TacticianId(i as u32))
            .collect();
        self.turn_order = turn::shuffle_keeping_last_out(&ids, &mut self.rng);
        if let Some(&first) = self.turn_order.first() {
            self.current = first;
        }
    }

    /// Deploys every roster unit onto consecutive cells, row-major. Units
    /// that do not fit on the field stay unplaced.
    fn deploy(&mut self) {
        let total = self.field_size as u64 * self.field_size as u64;
        let mut cell = 0u64;
        for idx in 0..self.units.len() {
            if cell >= total {
                break;
            }
            let size = self.field_size as u64;
            let pos = Position::new((cell % size) as u32, (cell / size) as u32);
            let id = UnitId(idx as u32);
            self.field.place(pos, id);
            self.units[idx].position = Some(pos);
            cell += 1;
        }
    }

    /// Puts a living unit on a free cell, vacating its previous cell in the
    /// same step. Intended for hand-built matches and redeployments.
    pub fn place_unit(&mut self, id: UnitId, x: u32, y: u32) -> Result<(), ActionError> {
        let pos = Position::new(x, y);
        if !self.field.in_bounds(pos) {
            return Err(ActionError::OutOfBounds(x, y));
        }
        let idx = id.0 as usize;
        if !self.units[idx].alive {
            return Err(ActionError::DeadUnit);
        }
        if self.field.unit_at(pos).is_some() {
            return Err(ActionError::Occupied);
        }
        if let Some(old) = self.units[idx].position.take() {
            self.field.vacate(old);
        }
        self.field.place(pos, id);
        self.units[idx].position = Some(pos);
        Ok(())
    }

    /// Kills a unit: clears the alive flag, vacates its cell, and drops it
    /// from its owner's roster. A hero's death eliminates the owner
    /// entirely.
    pub(crate) fn kill_unit(&mut self, id: UnitId) {
        let idx = id.0 as usize;
        if !self.units[idx].alive {
            return;
        }
        self.units[idx].alive = false;
        if let Some(pos) = self.units[idx].position.take() {
            self.field.vacate(pos);
        }
        let owner = self.units[idx].owner;
        let kind = self.units[idx].kind;
        if let Some(owner) = owner {
            let player = &mut self.players[owner.0 as usize];
            player.units.retain(|&u| u != id);
            if player.selected_unit == Some(id) {
                player.clear_selection();
            }
            if kind.is_hero() {
                self.remove_tactician_id(owner);
            }
        }
    }

    // --- queries -----------------------------------------------------

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn is_decided(&self) -> bool {
        self.winners.is_some()
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn max_rounds(&self) -> i32 {
        self.max_rounds
    }

    /// The winning tacticians, unset while the match is undecided.
    pub fn winners(&self) -> Option<&[TacticianId]> {
        self.winners.as_deref()
    }

    /// Winner names, for callers that don't hold ids.
    pub fn winner_names(&self) -> Option<Vec<&str>> {
        self.winners
            .as_ref()
            .map(|ids| ids.iter().map(|id| self.tactician(*id).name.as_str()).collect())
    }

    /// The tactician whose turn it is. None before the match starts, and
    /// None again once the turn order is empty (a zero-player match, or
    /// every tactician removed), so degenerate matches stay inert.
    pub fn turn_owner(&self) -> Option<&Tactician> {
        if !self.started || self.turn_order.is_empty() {
            return None;
        }
        Some(self.tactician(self.current))
    }

    pub fn turn_owner_id(&self) -> Option<TacticianId> {
        (self.started && !self.turn_order.is_empty()).then_some(self.current)
    }

    /// Live tacticians in the current turn order.
    pub fn tacticians(&self) -> impl Iterator<Item = &Tactician> {
        self.turn_order.iter().map(|id| self.tactician(*id))
    }

    /// The current turn order as ids.
    pub fn turn_order(&self) -> &[TacticianId] {
        &self.turn_order
    }

    pub fn tactician(&self, id: TacticianId) -> &Tactician {
        &self.players[id.0 as usize]
    }

    /// Looks up a live tactician by name.
    pub fn tactician_id(&self, name: &str) -> Option<TacticianId> {
        self.turn_order
            .iter()
            .copied()
            .find(|id| self.tactician(*id).name == name)
    }

    pub fn unit(&self, id: UnitId) -> &Unit {
        &self.units[id.0 as usize]
    }

    pub(crate) fn unit_mut(&mut self, id: UnitId) -> &mut Unit {
        &mut self.units[id.0 as usize]
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    /// The unit occupying a cell, if any.
    pub fn unit_at(&self, x: u32, y: u32) -> Option<UnitId> {
        self.field.unit_at(Position::new(x, y))
    }

    pub(crate) fn player_mut(&mut self, id: TacticianId) -> &mut Tactician {
        &mut self.players[id.0 as usize]
    }
}
