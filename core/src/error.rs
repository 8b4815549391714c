//! Error types for battle setup.
//!
//! Validation happens when combatants and sessions are constructed, so a
//! running battle never has to surface an error mid-round. Enum variants
//! carry the offending values for caller-side reporting.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{CombatantId, EffectId, Side, SkillId};

/// Errors raised while constructing a combatant
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CombatantError {
    /// Integral stat below its minimum valid bound
    #[error("stat `{stat}` out of range: {value} (minimum {min})")]
    StatOutOfRange { stat: String, value: i32, min: i32 },
    /// Chance stat outside [0, 1]
    #[error("chance `{stat}` out of range: {value}")]
    ChanceOutOfRange { stat: String, value: f32 },
    /// Critical damage multiplier below 1.0
    #[error("critical damage multiplier below 1.0: {value}")]
    CritMultiplierTooLow { value: f32 },
    /// Combatant level below 1
    #[error("invalid level: {value}")]
    InvalidLevel { value: u32 },
    /// Skill loadout is empty
    #[error("skill loadout is empty")]
    EmptyLoadout,
    /// Loadout references a skill id missing from the catalog
    #[error("unknown skill id `{id}` in loadout")]
    UnknownSkill { id: SkillId },
}

/// Errors raised while constructing a battle session
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BattleError {
    /// Combatant assigned to the wrong side for its slot
    #[error("combatant `{id}` must be on the {expected:?} side")]
    WrongSide { id: CombatantId, expected: Side },
    /// Both combatants share one id
    #[error("combatants share the id `{id}`")]
    DuplicateId { id: CombatantId },
    /// A skill references a status effect missing from the registry
    #[error("skill `{skill}` references unknown status effect `{status}`")]
    UnknownStatusEffect { skill: SkillId, status: EffectId },
}
