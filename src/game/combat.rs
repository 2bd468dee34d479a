//! Attack resolution.
//!
//! One exchange is at most two strikes: the attacker hits, and if the
//! defender survives a positive hit while equipped, in range, and not
//! holding a staff, it retaliates exactly once. Damage is clamped so that
//! healing (negative damage, staves) can never push hit points above the
//! maximum, while positive damage is never capped and may drive hit points
//! arbitrarily negative.

use crate::board::{UnitId, WeaponKind};

use super::{ActionError, Game};

/// The result of one resolved exchange, so callers and tests can observe
/// each leg instead of re-deriving it from hit points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackOutcome {
    /// Damage applied to the defender (negative when the attacker healed it).
    pub damage: f64,
    /// Damage applied back to the attacker by the single counter-attack.
    pub counter_damage: Option<f64>,
    pub defender_died: bool,
    pub attacker_died: bool,
}

/// Clamps a damage value against the target's hit points: non-positive
/// damage (healing) is reduced so the target lands exactly on max HP
/// instead of above it; positive damage passes through untouched.
pub fn clamp_damage(damage: f64, max_hp: u32, current_hp: f64) -> f64 {
    let max_hp = max_hp as f64;
    if damage <= 0.0 && current_hp - damage >= max_hp {
        -(max_hp - current_hp)
    } else {
        damage
    }
}

impl Game {
    /// Resolves one attack from `attacker` to `defender`.
    ///
    /// The gate (both alive and placed, attacker equipped, target within the
    /// equipped item's range) rejects without touching any state; validating
    /// reachability up front is the caller's job. An undefended target takes
    /// the item's raw power, otherwise the matchup table decides.
    pub fn resolve_attack(
        &mut self,
        attacker: UnitId,
        defender: UnitId,
    ) -> Result<AttackOutcome, ActionError> {
        let atk = self.unit(attacker);
        if !atk.alive {
            return Err(ActionError::DeadUnit);
        }
        let apos = atk.position.ok_or(ActionError::Unplaced)?;
        let weapon = atk
            .equipped_item()
            .cloned()
            .ok_or(ActionError::NothingEquipped)?;

        let def = self.unit(defender);
        if !def.alive {
            return Err(ActionError::DeadUnit);
        }
        let dpos = def.position.ok_or(ActionError::Unplaced)?;

        let dist = apos.distance(dpos);
        if !weapon.in_range(dist) {
            return Err(ActionError::OutOfRange);
        }

        let defense = def.equipped_item().cloned();
        let base = match &defense {
            Some(held) => weapon.matchup(held.kind),
            None => weapon.power,
        };
        let damage = clamp_damage(base, def.max_hp, def.current_hp);
        self.unit_mut(defender).current_hp -= damage;

        let mut outcome = AttackOutcome {
            damage,
            counter_damage: None,
            defender_died: false,
            attacker_died: false,
        };

        if self.unit(defender).current_hp <= 0.0 {
            outcome.defender_died = true;
            self.kill_unit(defender);
            return Ok(outcome);
        }

        // Single-level counter-attack; staves never retaliate.
        if damage > 0.0 {
            if let Some(held) = defense {
                if held.kind != WeaponKind::Staff && held.in_range(dist) {
                    let atk = self.unit(attacker);
                    let counter =
                        clamp_damage(held.matchup(weapon.kind), atk.max_hp, atk.current_hp);
                    self.unit_mut(attacker).current_hp -= counter;
                    outcome.counter_damage = Some(counter);
                    if self.unit(attacker).current_hp <= 0.0 {
                        outcome.attacker_died = true;
                        self.kill_unit(attacker);
                    }
                }
            }
        }
        Ok(outcome)
    }
}
