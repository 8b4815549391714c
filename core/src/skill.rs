//! Skill definitions, per-combatant instances, and the skill catalog.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{DamageKind, EffectId, Element, SkillId};

/// What a skill does when it resolves
///
/// The variant decides the implicit target: damage and debuffs hit the
/// opponent, heals and buffs land on the caster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SkillEffect {
    /// Deal elemental damage, optionally applying a status to the defender
    Damage {
        kind: DamageKind,
        element: Element,
        power: i32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        status: Option<EffectId>,
    },
    /// Restore the caster's hp, optionally applying a status to the caster
    Heal {
        amount: i32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        status: Option<EffectId>,
    },
    /// Apply a beneficial status to the caster
    Buff { status: EffectId },
    /// Apply a detrimental status to the opponent
    Debuff { status: EffectId },
}

fn default_accuracy() -> f32 {
    1.0
}

/// A skill as authored in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    pub effect: SkillEffect,
    /// Hit probability in [0, 1]; 1.0 leaves evasion as the only miss source
    #[serde(default = "default_accuracy")]
    pub accuracy: f32,
    #[serde(default)]
    pub mp_cost: i32,
    /// Rounds before the skill can be used again (0 = every round)
    #[serde(default)]
    pub cooldown: u32,
    /// Skills this one chains after for combo bonuses
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub combo_with: Vec<SkillId>,
}

impl Skill {
    pub fn new(id: &str, name: &str, effect: SkillEffect) -> Self {
        Self {
            id: SkillId::new(id),
            name: name.to_string(),
            effect,
            accuracy: 1.0,
            mp_cost: 0,
            cooldown: 0,
            combo_with: vec![],
        }
    }

    pub fn with_accuracy(mut self, accuracy: f32) -> Self {
        self.accuracy = accuracy;
        self
    }

    pub fn with_mp_cost(mut self, mp_cost: i32) -> Self {
        self.mp_cost = mp_cost;
        self
    }

    pub fn with_cooldown(mut self, cooldown: u32) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn with_combo_after(mut self, ids: &[&str]) -> Self {
        self.combo_with = ids.iter().map(|id| SkillId::new(*id)).collect();
        self
    }

    /// Status effect this skill applies, if any
    pub fn status_ref(&self) -> Option<&EffectId> {
        match &self.effect {
            SkillEffect::Damage { status, .. } | SkillEffect::Heal { status, .. } => {
                status.as_ref()
            }
            SkillEffect::Buff { status } | SkillEffect::Debuff { status } => Some(status),
        }
    }

    pub fn is_damage(&self) -> bool {
        matches!(self.effect, SkillEffect::Damage { .. })
    }

    pub fn is_heal(&self) -> bool {
        matches!(self.effect, SkillEffect::Heal { .. })
    }

    /// Raw power of a damage skill, 0 for anything else
    pub fn power(&self) -> i32 {
        match self.effect {
            SkillEffect::Damage { power, .. } => power,
            _ => 0,
        }
    }
}

/// A skill slot on a combatant (tracks the live cooldown)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SkillInstance {
    pub skill: Skill,
    /// Rounds until usable again; 0 means ready
    pub current_cooldown: u32,
}

impl SkillInstance {
    pub fn from_skill(skill: Skill) -> Self {
        Self {
            skill,
            current_cooldown: 0,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.current_cooldown == 0
    }

    /// Put the skill on cooldown after a use
    pub fn trigger_cooldown(&mut self) {
        self.current_cooldown = self.skill.cooldown;
    }

    /// Count one round down, saturating at ready
    pub fn tick_cooldown(&mut self) {
        self.current_cooldown = self.current_cooldown.saturating_sub(1);
    }
}

/// Immutable collection of skills keyed by id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillCatalog {
    skills: BTreeMap<SkillId, Skill>,
}

impl SkillCatalog {
    pub fn new() -> Self {
        Self {
            skills: BTreeMap::new(),
        }
    }

    /// Insert a skill, replacing any previous entry with the same id
    pub fn register(&mut self, skill: Skill) {
        self.skills.insert(skill.id.clone(), skill);
    }

    pub fn get(&self, id: &SkillId) -> Option<&Skill> {
        self.skills.get(id)
    }

    pub fn contains(&self, id: &SkillId) -> bool {
        self.skills.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}
