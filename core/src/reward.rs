//! Reward computation for won battles.

use serde::{Deserialize, Serialize};

use crate::rng::BattleRng;

/// Experience granted per enemy level
pub const EXP_PER_LEVEL: i32 = 20;
/// Base of the turn-speed bonus
pub const SPEED_BONUS_BASE: i32 = 50;
/// Turn-speed bonus lost per round elapsed
pub const SPEED_BONUS_DECAY: i32 = 5;
/// Experience granted per point of best combo
pub const EXP_PER_COMBO: i32 = 15;
/// Gold granted per enemy level
pub const GOLD_PER_LEVEL: i32 = 10;
/// Upper bound (inclusive) of the random gold bonus
pub const GOLD_BONUS_MAX: i32 = 10;
/// Probability that a won battle drops an item
pub const ITEM_DROP_CHANCE: f32 = 0.25;

/// Spoils granted for a player victory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BattleRewards {
    pub experience: i32,
    pub gold: i32,
    pub item_dropped: bool,
}

/// Compute the spoils for a player victory
///
/// Faster wins and longer combos pay better. Gold carries a small random
/// bonus; the item roll is one draw against a fixed chance.
pub fn compute(
    enemy_level: u32,
    rounds: u32,
    max_combo: u32,
    rng: &mut impl BattleRng,
) -> BattleRewards {
    let speed_bonus = (SPEED_BONUS_BASE - SPEED_BONUS_DECAY * rounds as i32).max(0);
    let experience =
        enemy_level as i32 * EXP_PER_LEVEL + speed_bonus + max_combo as i32 * EXP_PER_COMBO;
    let gold = enemy_level as i32 * GOLD_PER_LEVEL + rng.gen_range(GOLD_BONUS_MAX as usize + 1) as i32;
    let item_dropped = rng.chance(ITEM_DROP_CHANCE);
    BattleRewards {
        experience,
        gold,
        item_dropped,
    }
}
