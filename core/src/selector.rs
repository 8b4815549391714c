//! Deterministic skill selection.
//!
//! Given identical state the selector always picks the same skill; every
//! random element of a battle lives in the damage resolver instead.

use crate::action::BattleAction;
use crate::combatant::Combatant;
use crate::skill::SkillEffect;
use crate::status::StatusKind;

/// Hp fraction below which a heal takes priority
pub const LOW_HP_THRESHOLD: f32 = 0.3;

/// Pick the index of the skill the attacker uses this turn
///
/// Rules apply in order, first match wins: emergency heal at low hp, open
/// with a buff when none is active, chain a declared combo off the
/// attacker's own immediately preceding action, exploit a defender
/// weakness, then the strongest usable damage skill with a fallback to any
/// usable skill. Returns `None` when nothing is usable; that turn is a
/// no-op.
pub fn select(
    attacker: &Combatant,
    defender: &Combatant,
    last_action: Option<&BattleAction>,
) -> Option<usize> {
    let usable = attacker.usable_skills();
    if usable.is_empty() {
        return None;
    }

    // 1. Emergency heal
    if attacker.hp_fraction() < LOW_HP_THRESHOLD {
        if let Some(&i) = usable
            .iter()
            .find(|&&i| attacker.skills[i].skill.is_heal())
        {
            return Some(i);
        }
    }

    // 2. Open with a buff when none is active
    let has_buff = attacker
        .statuses
        .iter()
        .any(|s| s.template.kind == StatusKind::Buff);
    if !has_buff {
        if let Some(&i) = usable.iter().find(|&&i| {
            matches!(attacker.skills[i].skill.effect, SkillEffect::Buff { .. })
        }) {
            return Some(i);
        }
    }

    // 3. Chain a combo off this attacker's previous action
    if let Some(last) = last_action {
        if last.attacker == attacker.id {
            if let Some(&i) = usable
                .iter()
                .find(|&&i| attacker.skills[i].skill.combo_with.contains(&last.skill))
            {
                return Some(i);
            }
        }
    }

    // 4. Exploit an elemental weakness
    if !defender.weaknesses.is_empty() {
        if let Some(&i) = usable.iter().find(|&&i| match attacker.skills[i].skill.effect {
            SkillEffect::Damage { element, .. } => defender.is_weak_to(element),
            _ => false,
        }) {
            return Some(i);
        }
    }

    // 5. Strongest damage skill, falling back to anything usable
    let mut best: Option<usize> = None;
    for &i in &usable {
        if !attacker.skills[i].skill.is_damage() {
            continue;
        }
        let power = attacker.skills[i].skill.power();
        if best.map_or(true, |b| power > attacker.skills[b].skill.power()) {
            best = Some(i);
        }
    }
    best.or_else(|| usable.first().copied())
}
