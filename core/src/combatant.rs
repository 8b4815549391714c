//! Combatants and the provider-facing inputs they are built from.
//!
//! Construction validates every stat against its minimum bound and resolves
//! the skill loadout against the catalog, so a session never starts with a
//! half-formed participant.

use serde::{Deserialize, Serialize};

use crate::error::CombatantError;
use crate::skill::{SkillCatalog, SkillInstance};
use crate::status::{StatDeltas, StatusInstance, StatusTemplate};
use crate::types::{CombatantId, EffectId, Element, Side, SkillId};

/// Default critical hit probability when a profile does not override it
pub const DEFAULT_CRITICAL_CHANCE: f32 = 0.05;
/// Default critical damage multiplier
pub const DEFAULT_CRITICAL_DAMAGE: f32 = 1.5;
/// Default evasion probability
pub const DEFAULT_EVASION_CHANCE: f32 = 0.05;

/// Base statistics of a combatant before any status modifiers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub level: u32,
    pub max_hp: i32,
    pub max_mp: i32,
    pub attack: i32,
    pub defense: i32,
    pub magic_attack: i32,
    pub magic_defense: i32,
    pub speed: i32,
    /// Probability of a critical hit in [0, 1]
    pub critical_chance: f32,
    /// Damage multiplier on a critical hit, at least 1.0
    pub critical_damage: f32,
    /// Probability of dodging an incoming damage skill in [0, 1]
    pub evasion_chance: f32,
}

impl Stats {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        level: u32,
        max_hp: i32,
        max_mp: i32,
        attack: i32,
        defense: i32,
        magic_attack: i32,
        magic_defense: i32,
        speed: i32,
    ) -> Self {
        Self {
            level,
            max_hp,
            max_mp,
            attack,
            defense,
            magic_attack,
            magic_defense,
            speed,
            critical_chance: DEFAULT_CRITICAL_CHANCE,
            critical_damage: DEFAULT_CRITICAL_DAMAGE,
            evasion_chance: DEFAULT_EVASION_CHANCE,
        }
    }

    pub fn with_critical(mut self, chance: f32, damage: f32) -> Self {
        self.critical_chance = chance;
        self.critical_damage = damage;
        self
    }

    pub fn with_evasion(mut self, chance: f32) -> Self {
        self.evasion_chance = chance;
        self
    }

    /// Check every field against its minimum valid bound
    pub fn validate(&self) -> Result<(), CombatantError> {
        if self.level < 1 {
            return Err(CombatantError::InvalidLevel { value: self.level });
        }
        check_min("maxHp", self.max_hp, 1)?;
        check_min("maxMp", self.max_mp, 0)?;
        check_min("attack", self.attack, 0)?;
        check_min("defense", self.defense, 0)?;
        check_min("magicAttack", self.magic_attack, 0)?;
        check_min("magicDefense", self.magic_defense, 0)?;
        check_min("speed", self.speed, 0)?;
        check_chance("criticalChance", self.critical_chance)?;
        check_chance("evasionChance", self.evasion_chance)?;
        if self.critical_damage < 1.0 {
            return Err(CombatantError::CritMultiplierTooLow {
                value: self.critical_damage,
            });
        }
        Ok(())
    }
}

fn check_min(stat: &str, value: i32, min: i32) -> Result<(), CombatantError> {
    if value < min {
        return Err(CombatantError::StatOutOfRange {
            stat: stat.to_string(),
            value,
            min,
        });
    }
    Ok(())
}

fn check_chance(stat: &str, value: f32) -> Result<(), CombatantError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(CombatantError::ChanceOutOfRange {
            stat: stat.to_string(),
            value,
        });
    }
    Ok(())
}

/// Input bundle for building the player-side combatant
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    pub id: CombatantId,
    pub name: String,
    pub stats: Stats,
    /// Skill ids resolved against the catalog at construction
    pub loadout: Vec<SkillId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resistances: Vec<Element>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weaknesses: Vec<Element>,
}

/// Catalog entry describing an enemy archetype
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonsterTemplate {
    pub id: String,
    pub name: String,
    pub stats: Stats,
    pub loadout: Vec<SkillId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resistances: Vec<Element>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weaknesses: Vec<Element>,
}

impl MonsterTemplate {
    pub fn new(id: &str, name: &str, stats: Stats, loadout: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            stats,
            loadout: loadout.iter().map(|s| SkillId::new(*s)).collect(),
            resistances: vec![],
            weaknesses: vec![],
        }
    }

    pub fn with_resistances(mut self, elements: &[Element]) -> Self {
        self.resistances = elements.to_vec();
        self
    }

    pub fn with_weaknesses(mut self, elements: &[Element]) -> Self {
        self.weaknesses = elements.to_vec();
        self
    }
}

/// A battle participant with live hp/mp, skill slots, and active effects
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub side: Side,
    pub stats: Stats,
    pub hp: i32,
    pub mp: i32,
    pub skills: Vec<SkillInstance>,
    pub statuses: Vec<StatusInstance>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resistances: Vec<Element>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weaknesses: Vec<Element>,
    /// Id of the last skill this combatant executed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_skill: Option<SkillId>,
    /// Consecutive combo links this combatant has chained
    #[serde(default)]
    pub combo_count: u32,
}

impl Combatant {
    /// Build the player-side combatant from profile data
    pub fn from_player_profile(
        profile: &PlayerProfile,
        catalog: &SkillCatalog,
    ) -> Result<Self, CombatantError> {
        Self::build(
            profile.id.clone(),
            profile.name.clone(),
            Side::Player,
            profile.stats.clone(),
            &profile.loadout,
            profile.resistances.clone(),
            profile.weaknesses.clone(),
            catalog,
        )
    }

    /// Build the enemy-side combatant from a monster template
    pub fn from_monster_template(
        template: &MonsterTemplate,
        catalog: &SkillCatalog,
    ) -> Result<Self, CombatantError> {
        Self::build(
            CombatantId::new(template.id.clone()),
            template.name.clone(),
            Side::Enemy,
            template.stats.clone(),
            &template.loadout,
            template.resistances.clone(),
            template.weaknesses.clone(),
            catalog,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn build(
        id: CombatantId,
        name: String,
        side: Side,
        stats: Stats,
        loadout: &[SkillId],
        resistances: Vec<Element>,
        weaknesses: Vec<Element>,
        catalog: &SkillCatalog,
    ) -> Result<Self, CombatantError> {
        stats.validate()?;
        if loadout.is_empty() {
            return Err(CombatantError::EmptyLoadout);
        }
        let mut skills = Vec::with_capacity(loadout.len());
        for skill_id in loadout {
            let skill = catalog
                .get(skill_id)
                .ok_or_else(|| CombatantError::UnknownSkill {
                    id: skill_id.clone(),
                })?;
            skills.push(SkillInstance::from_skill(skill.clone()));
        }
        let hp = stats.max_hp;
        let mp = stats.max_mp;
        Ok(Self {
            id,
            name,
            side,
            stats,
            hp,
            mp,
            skills,
            statuses: Vec::new(),
            resistances,
            weaknesses,
            last_skill: None,
            combo_count: 0,
        })
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Fraction of max hp remaining, in [0, 1]
    pub fn hp_fraction(&self) -> f32 {
        self.hp as f32 / self.stats.max_hp as f32
    }

    // ==========================================
    // EFFECTIVE STATS (base + statuses + field)
    // ==========================================

    fn delta_sum(&self, pick: impl Fn(&StatDeltas) -> i32) -> i32 {
        self.statuses
            .iter()
            .map(|s| pick(&s.template.deltas))
            .sum()
    }

    /// Attack with active buffs, debuffs, and field modifiers, floored at 0
    pub fn effective_attack(&self, field: &StatDeltas) -> i32 {
        (self.stats.attack + self.delta_sum(|d| d.attack) + field.attack).max(0)
    }

    pub fn effective_defense(&self, field: &StatDeltas) -> i32 {
        (self.stats.defense + self.delta_sum(|d| d.defense) + field.defense).max(0)
    }

    pub fn effective_magic_attack(&self, field: &StatDeltas) -> i32 {
        (self.stats.magic_attack + self.delta_sum(|d| d.magic_attack) + field.magic_attack)
            .max(0)
    }

    pub fn effective_magic_defense(&self, field: &StatDeltas) -> i32 {
        (self.stats.magic_defense + self.delta_sum(|d| d.magic_defense) + field.magic_defense)
            .max(0)
    }

    pub fn effective_speed(&self, field: &StatDeltas) -> i32 {
        (self.stats.speed + self.delta_sum(|d| d.speed) + field.speed).max(0)
    }

    // ==========================================
    // ELEMENT AFFINITY
    // ==========================================

    pub fn is_weak_to(&self, element: Element) -> bool {
        self.weaknesses.contains(&element)
    }

    pub fn resists(&self, element: Element) -> bool {
        self.resistances.contains(&element)
    }

    // ==========================================
    // MUTATION
    // ==========================================

    /// Apply damage, clamping hp at 0
    pub fn take_damage(&mut self, amount: i32) {
        self.hp = (self.hp - amount).max(0);
    }

    /// Heal up to max hp, returning the amount actually restored
    pub fn heal(&mut self, amount: i32) -> i32 {
        let healed = amount.min(self.stats.max_hp - self.hp);
        self.hp += healed;
        healed
    }

    pub fn spend_mp(&mut self, cost: i32) {
        self.mp -= cost;
    }

    /// Apply a status effect, refreshing duration on non-stackable repeats
    pub fn apply_status(&mut self, template: &StatusTemplate) {
        if !template.stackable {
            if let Some(existing) = self
                .statuses
                .iter_mut()
                .find(|s| s.template.id == template.id)
            {
                existing.remaining = template.duration;
                return;
            }
        }
        self.statuses.push(StatusInstance::from_template(template.clone()));
    }

    pub fn has_status(&self, id: &EffectId) -> bool {
        self.statuses.iter().any(|s| &s.template.id == id)
    }

    /// Total damage-over-time this combatant suffers at round start
    pub fn dot_damage(&self) -> i32 {
        self.statuses
            .iter()
            .filter_map(|s| s.template.damage_per_turn)
            .sum()
    }

    /// Count every status down one round and drop the expired
    pub fn decay_statuses(&mut self) {
        for status in &mut self.statuses {
            status.remaining = status.remaining.saturating_sub(1);
        }
        self.statuses.retain(|s| !s.is_expired());
    }

    /// Count every skill cooldown down one round
    pub fn tick_cooldowns(&mut self) {
        for slot in &mut self.skills {
            slot.tick_cooldown();
        }
    }

    /// Indices of skills that are off cooldown and affordable right now
    pub fn usable_skills(&self) -> Vec<usize> {
        self.skills
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_ready() && slot.skill.mp_cost <= self.mp)
            .map(|(i, _)| i)
            .collect()
    }
}
