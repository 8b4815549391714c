//! Deterministic turn-based battle resolution.
//!
//! The engine takes two validated combatants, resolves an automated fight
//! round by round, and produces an ordered [`BattleAction`] log plus a
//! terminal [`BattleResult`]. All randomness flows through an injectable
//! [`BattleRng`], so identical seeds replay identical battles.

mod action;
mod battle;
mod combatant;
mod damage;
mod error;
mod reward;
mod rng;
mod selector;
mod session;
mod skill;
mod status;
mod templates;
mod types;
mod view;

#[cfg(test)]
mod tests;

pub use action::BattleAction;
pub use battle::{BattlePhase, BattleState, FieldEffect, Winner, MAX_ROUNDS};
pub use combatant::{Combatant, MonsterTemplate, PlayerProfile, Stats};
pub use damage::{resolve, SkillOutcome, StatusTarget};
pub use error::{BattleError, CombatantError};
pub use reward::BattleRewards;
pub use rng::{BattleRng, XorShiftRng};
pub use selector::select;
pub use session::{Actions, BattleResult, BattleSession};
pub use skill::{Skill, SkillCatalog, SkillEffect, SkillInstance};
pub use status::{StatDeltas, StatusInstance, StatusKind, StatusRegistry, StatusTemplate};
pub use templates::{
    monster_for_level, monster_template, roster, standard_catalog, standard_effects,
    standard_player,
};
pub use types::{BattleId, CombatantId, DamageKind, EffectId, Element, Side, SkillId};
pub use view::{BattleView, CombatantView, FieldEffectView, SkillView, StatusView};
