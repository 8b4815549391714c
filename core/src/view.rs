//! View types for UI serialization
//!
//! Deep-copied snapshots of live battle state. Handing one out never
//! exposes the engine's mutable internals, so a renderer cannot corrupt a
//! running battle.

use serde::{Deserialize, Serialize};

use crate::battle::{BattlePhase, BattleState, FieldEffect};
use crate::combatant::Combatant;
use crate::skill::SkillInstance;
use crate::status::{StatDeltas, StatusInstance, StatusKind};
use crate::types::{BattleId, CombatantId, EffectId, Side, SkillId};

/// View of one skill slot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SkillView {
    pub id: SkillId,
    pub name: String,
    pub mp_cost: i32,
    pub cooldown: u32,
    pub current_cooldown: u32,
    pub ready: bool,
}

impl From<&SkillInstance> for SkillView {
    fn from(slot: &SkillInstance) -> Self {
        Self {
            id: slot.skill.id.clone(),
            name: slot.skill.name.clone(),
            mp_cost: slot.skill.mp_cost,
            cooldown: slot.skill.cooldown,
            current_cooldown: slot.current_cooldown,
            ready: slot.is_ready(),
        }
    }
}

/// View of an active status effect
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusView {
    pub id: EffectId,
    pub name: String,
    pub kind: StatusKind,
    pub remaining: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_per_turn: Option<i32>,
}

impl From<&StatusInstance> for StatusView {
    fn from(status: &StatusInstance) -> Self {
        Self {
            id: status.template.id.clone(),
            name: status.template.name.clone(),
            kind: status.template.kind.clone(),
            remaining: status.remaining,
            damage_per_turn: status.template.damage_per_turn,
        }
    }
}

/// View of one combatant with effective stats already folded in
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CombatantView {
    pub id: CombatantId,
    pub name: String,
    pub side: Side,
    pub level: u32,
    pub hp: i32,
    pub max_hp: i32,
    pub mp: i32,
    pub max_mp: i32,
    /// Attack after buffs, debuffs, and field modifiers
    pub attack: i32,
    pub defense: i32,
    pub magic_attack: i32,
    pub magic_defense: i32,
    pub speed: i32,
    pub skills: Vec<SkillView>,
    pub statuses: Vec<StatusView>,
}

impl CombatantView {
    fn from_combatant(combatant: &Combatant, field: &StatDeltas) -> Self {
        Self {
            id: combatant.id.clone(),
            name: combatant.name.clone(),
            side: combatant.side,
            level: combatant.stats.level,
            hp: combatant.hp,
            max_hp: combatant.stats.max_hp,
            mp: combatant.mp,
            max_mp: combatant.stats.max_mp,
            attack: combatant.effective_attack(field),
            defense: combatant.effective_defense(field),
            magic_attack: combatant.effective_magic_attack(field),
            magic_defense: combatant.effective_magic_defense(field),
            speed: combatant.effective_speed(field),
            skills: combatant.skills.iter().map(SkillView::from).collect(),
            statuses: combatant.statuses.iter().map(StatusView::from).collect(),
        }
    }
}

/// View of an active battlefield modifier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FieldEffectView {
    pub name: String,
    pub remaining: u32,
}

impl From<&FieldEffect> for FieldEffectView {
    fn from(effect: &FieldEffect) -> Self {
        Self {
            name: effect.name.clone(),
            remaining: effect.remaining,
        }
    }
}

/// The complete battle view sent to renderers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BattleView {
    pub id: BattleId,
    pub round: u32,
    pub phase: BattlePhase,
    pub player: CombatantView,
    pub enemy: CombatantView,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field_effects: Vec<FieldEffectView>,
    /// How many actions the log holds so far
    pub actions_emitted: usize,
}

impl BattleView {
    /// Construct a deep-copied view of the current state
    pub fn from_state(state: &BattleState) -> Self {
        let field = state.field_deltas();
        Self {
            id: state.id,
            round: state.round,
            phase: state.phase.clone(),
            player: CombatantView::from_combatant(&state.player, &field),
            enemy: CombatantView::from_combatant(&state.enemy, &field),
            field_effects: state
                .field_effects
                .iter()
                .map(FieldEffectView::from)
                .collect(),
            actions_emitted: state.actions.len(),
        }
    }
}
