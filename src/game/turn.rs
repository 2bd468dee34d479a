//! Turn and round progression.
//!
//! Implements the re-seeding turn-order shuffle, `end_turn`/`end_round`
//! sequencing, draw-by-round-limit, and tactician removal. The current
//! player is tracked by identity (`TacticianId`), never by raw list index,
//! so removals cannot leave a stale pointer behind.

use rand::Rng;

use crate::board::TacticianId;

use super::Game;

/// Reorders `order` so that its last entry is not pinned to any fixed slot:
/// the last entry is held out, the rest are extracted one by one at random
/// from a shrinking pool, and the held-out entry is reinserted at a uniform
/// index in `[0, N)`.
///
/// This is a re-seeding shuffle, not a rotation: the formerly-last entry is
/// never forced anywhere by construction, but may still land first or last
/// by chance.
pub fn shuffle_keeping_last_out<R: Rng>(order: &[TacticianId], rng: &mut R) -> Vec<TacticianId> {
    let n = order.len();
    if n == 0 {
        return Vec::new();
    }
    let mut pool = order.to_vec();
    let last = pool.pop().expect("n > 0");
    let mut shuffled = Vec::with_capacity(n);
    while !pool.is_empty() {
        let i = rng.gen_range(0..pool.len());
        shuffled.push(pool.remove(i));
    }
    let at = rng.gen_range(0..n);
    shuffled.insert(at, last);
    shuffled
}

impl Game {
    /// Finishes the current tactician's turn: resets their units' per-turn
    /// movement flags, clears their selections, and passes control on. Ends
    /// the round when the current tactician was last in the order.
    ///
    /// A no-op once the match is decided (or before it starts), so winners
    /// never change after the fact.
    pub fn end_turn(&mut self) {
        if !self.started || self.winners.is_some() || self.turn_order.is_empty() {
            return;
        }
        let current = self.current;
        let roster = self.tactician(current).units.clone();
        for uid in roster {
            self.unit_mut(uid).has_moved = false;
        }
        self.player_mut(current).clear_selection();

        if self.turn_order.len() <= 1 {
            self.winners = Some(self.turn_order.clone());
            return;
        }
        let Some(pos) = self.turn_order.iter().position(|&t| t == current) else {
            return;
        };
        if pos + 1 == self.turn_order.len() {
            self.end_round();
        } else {
            self.current = self.turn_order[pos + 1];
        }
    }

    /// Closes a round once every tactician has played: declares a draw among
    /// all survivors at the round limit, otherwise reshuffles the order and
    /// hands the new head the first turn of the next round.
    fn end_round(&mut self) {
        if self.turn_order.len() <= 1 {
            self.winners = Some(self.turn_order.clone());
        } else if self.max_rounds > 0 && self.round as i32 == self.max_rounds {
            // Draw: every remaining tactician wins.
            self.winners = Some(self.turn_order.clone());
        } else {
            self.round += 1;
            let order = self.turn_order.clone();
            self.turn_order = shuffle_keeping_last_out(&order, &mut self.rng);
            self.current = self.turn_order[0];
        }
    }

    /// Removes a tactician by name: their units vacate the field and die,
    /// and they leave the turn order. Unknown or already-removed names are
    /// a no-op. If at most one tactician remains afterwards the match is
    /// decided on the spot: a sole survivor wins, an emptied order ends
    /// the match with no winners.
    pub fn remove_tactician(&mut self, name: &str) {
        let Some(id) = self.tactician_id(name) else {
            return;
        };
        self.remove_tactician_id(id);
    }

    /// Removal by id; shared by `remove_tactician` and hero-death
    /// elimination. When the removed tactician is the one currently acting,
    /// control passes to its positional successor, wrapping to the head of
    /// the order when the removed entry was last.
    pub(crate) fn remove_tactician_id(&mut self, id: TacticianId) {
        if self.winners.is_some() {
            return;
        }
        let Some(pos) = self.turn_order.iter().position(|&t| t == id) else {
            return;
        };
        let roster = std::mem::take(&mut self.player_mut(id).units);
        for uid in roster {
            let unit = self.unit_mut(uid);
            unit.alive = false;
            if let Some(p) = unit.position.take() {
                self.field.vacate(p);
            }
        }
        self.player_mut(id).clear_selection();

        if self.current == id && self.turn_order.len() >= 2 {
            self.current = self.turn_order[(pos + 1) % self.turn_order.len()];
        }
        self.turn_order.remove(pos);
        if self.turn_order.len() <= 1 {
            // One survivor wins outright; removing the sole tactician of a
            // one-player match decides it with nobody left standing.
            self.winners = Some(self.turn_order.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn ids(n: u32) -> Vec<TacticianId> {
        (0..n).map(TacticianId).collect()
    }

    #[test]
    fn shuffle_is_a_permutation() {
        for seed in 0..100 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let order = ids(6);
            let shuffled = shuffle_keeping_last_out(&order, &mut rng);
            assert_eq!(shuffled.len(), 6);
            let mut sorted: Vec<u32> = shuffled.iter().map(|t| t.0).collect();
            sorted.sort_unstable();
            assert_eq!(sorted, vec![0, 1, 2, 3, 4, 5]);
        }
    }

    #[test]
    fn shuffle_does_not_pin_the_last_entry() {
        // The held-out entry must be able to land anywhere, including first
        // and last, across seeds.
        let order = ids(4);
        let mut positions = std::collections::HashSet::new();
        for seed in 0..200 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let shuffled = shuffle_keeping_last_out(&order, &mut rng);
            let pos = shuffled.iter().position(|&t| t == TacticianId(3)).unwrap();
            positions.insert(pos);
        }
        assert_eq!(positions.len(), 4, "held-out entry stuck to slots {:?}", positions);
    }

    #[test]
    fn shuffle_handles_tiny_lists() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(shuffle_keeping_last_out(&[], &mut rng).is_empty());
        assert_eq!(
            shuffle_keeping_last_out(&ids(1), &mut rng),
            vec![TacticianId(0)]
        );
        let two = shuffle_keeping_last_out(&ids(2), &mut rng);
        assert_eq!(two.len(), 2);
    }

    #[test]
    fn end_turn_advances_within_a_round() {
        let mut game = Game::with_seed(4, 10, 7);
        game.init_match(2);
        let first = game.turn_owner_id().unwrap();
        game.end_turn();
        let second = game.turn_owner_id().unwrap();
        assert_ne!(first, second);
        assert_eq!(game.round(), 1);
        assert_eq!(game.turn_order()[1], second);
    }

    #[test]
    fn full_round_increments_and_reshuffles() {
        let mut game = Game::with_seed(4, 10, 7);
        game.init_match(5);
        for _ in 0..4 {
            game.end_turn();
        }
        assert_eq!(game.round(), 2);
        assert!(game.winners().is_none());
        // The new round starts at the head of the new order.
        assert_eq!(game.turn_owner_id().unwrap(), game.turn_order()[0]);
    }

    #[test]
    fn round_limit_ends_in_a_draw_among_survivors() {
        let mut game = Game::with_seed(4, 10, 7);
        game.init_match(2);
        for _ in 0..8 {
            game.end_turn();
        }
        let winners = game.winners().expect("decided at round limit");
        assert_eq!(winners.len(), 4);
    }

    #[test]
    fn end_turn_is_idempotent_after_decided() {
        let mut game = Game::with_seed(4, 10, 7);
        game.init_match(2);
        for _ in 0..8 {
            game.end_turn();
        }
        let winners: Vec<_> = game.winners().unwrap().to_vec();
        let round = game.round();
        game.end_turn();
        game.end_turn();
        assert_eq!(game.winners().unwrap(), &winners[..]);
        assert_eq!(game.round(), round);
    }

    #[test]
    fn endless_match_never_draws_on_rounds() {
        let mut game = Game::with_seed(3, 10, 11);
        game.init_endless_match();
        for _ in 0..30 {
            game.end_turn();
        }
        assert!(game.winners().is_none());
        assert_eq!(game.round(), 11);
    }

    #[test]
    fn end_turn_resets_movement_flags() {
        let mut game = Game::with_seed(2, 10, 3);
        game.init_match(-1);
        let owner = game.turn_owner_id().unwrap();
        let uid = game.tactician(owner).units[0];
        game.unit_mut(uid).has_moved = true;
        game.end_turn();
        assert!(!game.unit(uid).has_moved);
    }

    #[test]
    fn remove_unknown_tactician_is_a_no_op() {
        let mut game = Game::with_seed(3, 10, 5);
        game.init_match(-1);
        game.remove_tactician("Player 99");
        assert_eq!(game.tacticians().count(), 3);
        assert!(game.winners().is_none());
    }

    #[test]
    fn removing_down_to_one_declares_an_immediate_winner() {
        let mut game = Game::with_seed(3, 10, 5);
        game.init_match(-1);
        let names: Vec<String> = game.tacticians().map(|t| t.name.clone()).collect();
        game.remove_tactician(&names[0]);
        assert!(game.winners().is_none());
        game.remove_tactician(&names[1]);
        // No end_turn needed: the survivor wins on the spot.
        let winners = game.winner_names().unwrap();
        assert_eq!(winners, vec![names[2].as_str()]);
    }

    #[test]
    fn removing_the_sole_tactician_decides_an_empty_match() {
        let mut game = Game::with_seed(1, 4, 7);
        game.init_match(-1);
        game.remove_tactician("Player 0");
        assert!(game.winners().is_some());
        assert!(game.winners().unwrap().is_empty());
        assert!(game.turn_owner().is_none());
        // Decided: further turns change nothing.
        game.end_turn();
        assert!(game.winners().unwrap().is_empty());
    }

    #[test]
    fn removing_the_current_tactician_passes_control_to_its_successor() {
        let mut game = Game::with_seed(4, 10, 7);
        game.init_match(-1);
        let order: Vec<TacticianId> = game.turn_order().to_vec();
        let current = game.turn_owner_id().unwrap();
        assert_eq!(current, order[0]);
        let name = game.tactician(current).name.clone();
        game.remove_tactician(&name);
        assert_eq!(game.turn_owner_id().unwrap(), order[1]);
        assert_eq!(game.tacticians().count(), 3);
    }

    #[test]
    fn removing_a_current_last_tactician_wraps_to_the_head() {
        let mut game = Game::with_seed(4, 10, 7);
        game.init_match(-1);
        // Walk the turn to the last tactician in the order.
        for _ in 0..3 {
            game.end_turn();
        }
        let order: Vec<TacticianId> = game.turn_order().to_vec();
        let current = game.turn_owner_id().unwrap();
        assert_eq!(current, order[3]);
        let name = game.tactician(current).name.clone();
        game.remove_tactician(&name);
        assert_eq!(game.turn_owner_id().unwrap(), order[0]);
    }

    #[test]
    fn removal_vacates_the_losers_units() {
        let mut game = Game::with_seed(2, 10, 9);
        game.init_match(-1);
        let victim = game.turn_order()[1];
        let roster = game.tactician(victim).units.clone();
        let name = game.tactician(victim).name.clone();
        game.remove_tactician(&name);
        for uid in roster {
            assert!(!game.unit(uid).alive);
            assert!(game.unit(uid).position.is_none());
        }
        assert!(game.tactician(victim).units.is_empty());
    }
}
