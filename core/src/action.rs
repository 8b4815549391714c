//! The immutable per-skill record making up the battle log.

use serde::{Deserialize, Serialize};

use crate::types::{CombatantId, SkillId};

/// One resolved skill use in the ordered battle log
///
/// `timestamp` is a per-session sequence number rather than wall-clock
/// time, so a serialized log replays identically wherever it is rendered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BattleAction {
    /// Round the action happened in (1-indexed)
    pub round: u32,
    /// Monotonic sequence number within the session (1-indexed)
    pub timestamp: u64,
    pub attacker: CombatantId,
    pub target: CombatantId,
    pub skill: SkillId,
    pub skill_name: String,
    /// Damage dealt to the target, absent for non-damage skills
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<i32>,
    /// Hp restored, absent for non-heal skills
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healing: Option<i32>,
    #[serde(default)]
    pub critical: bool,
    #[serde(default)]
    pub evaded: bool,
    /// Elemental multiplier, present only when it differed from 1.0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elemental: Option<f32>,
    /// Name of the status effect the skill applied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_applied: Option<String>,
    /// Attacker's combo counter after this action resolved
    #[serde(default)]
    pub combo: u32,
}
