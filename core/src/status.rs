//! Status effect templates, live instances, and the runtime registry.
//!
//! Templates are immutable catalog data; an application clones a template
//! into a [`StatusInstance`] on the holder, which counts down to expiry at
//! round boundaries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::EffectId;

/// Whether an effect helps or hinders its holder
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum StatusKind {
    Buff,
    Debuff,
}

/// Additive stat modifiers contributed by an active effect
///
/// Deltas never touch hp or mp; damage over time is modeled separately.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatDeltas {
    pub attack: i32,
    pub defense: i32,
    pub magic_attack: i32,
    pub magic_defense: i32,
    pub speed: i32,
}

/// Immutable definition of a status effect
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusTemplate {
    pub id: EffectId,
    pub name: String,
    pub kind: StatusKind,
    /// Rounds the effect stays active, counted from the round it lands
    pub duration: u32,
    /// Damage applied to the holder at the start of each round
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_per_turn: Option<i32>,
    /// Stat modifiers while the effect is active
    #[serde(default)]
    pub deltas: StatDeltas,
    /// Whether repeat applications pile up or refresh the timer
    #[serde(default)]
    pub stackable: bool,
}

impl StatusTemplate {
    pub fn new(id: &str, name: &str, kind: StatusKind, duration: u32) -> Self {
        Self {
            id: EffectId::new(id),
            name: name.to_string(),
            kind,
            duration,
            damage_per_turn: None,
            deltas: StatDeltas::default(),
            stackable: false,
        }
    }

    pub fn with_damage_per_turn(mut self, damage: i32) -> Self {
        self.damage_per_turn = Some(damage);
        self
    }

    pub fn with_deltas(mut self, deltas: StatDeltas) -> Self {
        self.deltas = deltas;
        self
    }

    pub fn with_stacking(mut self) -> Self {
        self.stackable = true;
        self
    }
}

/// A status effect applied to a combatant (tracks rounds remaining)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusInstance {
    pub template: StatusTemplate,
    /// Rounds left including the current one
    pub remaining: u32,
}

impl StatusInstance {
    pub fn from_template(template: StatusTemplate) -> Self {
        let remaining = template.duration;
        Self {
            template,
            remaining,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }
}

/// Immutable collection of status templates shared by battle sessions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusRegistry {
    effects: BTreeMap<EffectId, StatusTemplate>,
}

impl StatusRegistry {
    pub fn new() -> Self {
        Self {
            effects: BTreeMap::new(),
        }
    }

    /// Insert a template, replacing any previous entry with the same id
    pub fn register(&mut self, template: StatusTemplate) {
        self.effects.insert(template.id.clone(), template);
    }

    pub fn get(&self, id: &EffectId) -> Option<&StatusTemplate> {
        self.effects.get(id)
    }

    pub fn contains(&self, id: &EffectId) -> bool {
        self.effects.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
