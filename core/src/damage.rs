//! Damage resolution pipeline.
//!
//! [`resolve`] is pure with respect to battle state: it reads the attacker,
//! defender, and skill, draws from the injected generator, and returns an
//! outcome for the scheduler to apply. Nothing here mutates a combatant.

use crate::combatant::Combatant;
use crate::rng::BattleRng;
use crate::skill::{Skill, SkillEffect};
use crate::status::StatDeltas;
use crate::types::{DamageKind, EffectId, Element};

/// Multiplier when the defender is weak to the skill's element
pub const WEAKNESS_MULTIPLIER: f32 = 1.5;
/// Multiplier when the defender resists the skill's element
pub const RESISTANCE_MULTIPLIER: f32 = 0.5;
/// Damage bonus per combo link
pub const COMBO_STEP: f32 = 0.1;
/// Lower bound of the variance roll
pub const VARIANCE_MIN: f32 = 0.9;
/// Width of the variance roll
pub const VARIANCE_SPAN: f32 = 0.2;

/// Which combatant a skill's status effect lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTarget {
    Caster,
    Opponent,
}

/// Resolved outcome of one skill use, before any state mutation
#[derive(Debug, Clone, PartialEq)]
pub struct SkillOutcome {
    pub evaded: bool,
    pub damage: Option<i32>,
    pub healing: Option<i32>,
    pub critical: bool,
    /// Elemental multiplier when it differed from 1.0
    pub elemental: Option<f32>,
    /// Status effect to apply and who receives it
    pub status: Option<(EffectId, StatusTarget)>,
    /// Attacker's combo counter after this use
    pub combo: u32,
}

/// Resolve a skill use into its outcome
///
/// Draw order is fixed: evasion, then critical, then variance. An evaded
/// use consumes exactly one draw, so replays stay aligned.
pub fn resolve(
    attacker: &Combatant,
    defender: &Combatant,
    skill: &Skill,
    field: &StatDeltas,
    rng: &mut impl BattleRng,
) -> SkillOutcome {
    match &skill.effect {
        SkillEffect::Damage {
            kind,
            element,
            power,
            status,
        } => resolve_damage(
            attacker,
            defender,
            skill,
            *kind,
            *element,
            *power,
            status.as_ref(),
            field,
            rng,
        ),
        SkillEffect::Heal { amount, status } => {
            let healed = (*amount).min(attacker.stats.max_hp - attacker.hp);
            SkillOutcome {
                evaded: false,
                damage: None,
                healing: Some(healed),
                critical: false,
                elemental: None,
                status: status.clone().map(|id| (id, StatusTarget::Caster)),
                combo: attacker.combo_count,
            }
        }
        SkillEffect::Buff { status } => SkillOutcome {
            evaded: false,
            damage: None,
            healing: None,
            critical: false,
            elemental: None,
            status: Some((status.clone(), StatusTarget::Caster)),
            combo: attacker.combo_count,
        },
        SkillEffect::Debuff { status } => SkillOutcome {
            evaded: false,
            damage: None,
            healing: None,
            critical: false,
            elemental: None,
            status: Some((status.clone(), StatusTarget::Opponent)),
            combo: attacker.combo_count,
        },
    }
}

#[allow(clippy::too_many_arguments)]
fn resolve_damage(
    attacker: &Combatant,
    defender: &Combatant,
    skill: &Skill,
    kind: DamageKind,
    element: Element,
    power: i32,
    status: Option<&EffectId>,
    field: &StatDeltas,
    rng: &mut impl BattleRng,
) -> SkillOutcome {
    // Combo bookkeeping happens before the evade draw, so a dodged link
    // keeps the chain alive.
    let combo = match &attacker.last_skill {
        Some(prev) if skill.combo_with.contains(prev) => attacker.combo_count + 1,
        _ => 0,
    };

    let miss_chance =
        (defender.stats.evasion_chance + (1.0 - skill.accuracy)).clamp(0.0, 1.0);
    if rng.chance(miss_chance) {
        return SkillOutcome {
            evaded: true,
            damage: None,
            healing: None,
            critical: false,
            elemental: None,
            status: None,
            combo,
        };
    }

    let (attack_stat, defense_stat) = match kind {
        DamageKind::Physical => (
            attacker.effective_attack(field),
            defender.effective_defense(field),
        ),
        DamageKind::Magical => (
            attacker.effective_magic_attack(field),
            defender.effective_magic_defense(field),
        ),
    };
    let base = attack_stat as f32 * (power as f32 / 100.0) - defense_stat as f32 / 2.0;

    let elemental = elemental_multiplier(defender, element);
    let critical = rng.chance(attacker.stats.critical_chance);
    let crit_mult = if critical {
        attacker.stats.critical_damage
    } else {
        1.0
    };
    let variance = VARIANCE_MIN + VARIANCE_SPAN * rng.fraction();
    let combo_mult = 1.0 + COMBO_STEP * combo as f32;

    // A connected damage skill always deals at least 1, even against a
    // defense that swallows the whole base.
    let total = base * elemental * crit_mult * variance * combo_mult;
    let damage = total.max(1.0).floor() as i32;

    SkillOutcome {
        evaded: false,
        damage: Some(damage),
        healing: None,
        critical,
        elemental: (elemental != 1.0).then_some(elemental),
        status: status.cloned().map(|id| (id, StatusTarget::Opponent)),
        combo,
    }
}

/// Elemental multiplier from the defender's weakness and resistance sets
pub fn elemental_multiplier(defender: &Combatant, element: Element) -> f32 {
    if element == Element::Neutral {
        return 1.0;
    }
    if defender.is_weak_to(element) {
        WEAKNESS_MULTIPLIER
    } else if defender.resists(element) {
        RESISTANCE_MULTIPLIER
    } else {
        1.0
    }
}
