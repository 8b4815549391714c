mod rounds;
mod status;

use crate::battle::Winner;
use crate::combatant::{Combatant, MonsterTemplate, PlayerProfile, Stats};
use crate::rng::BattleRng;
use crate::session::{BattleResult, BattleSession};
use crate::skill::{Skill, SkillCatalog, SkillEffect};
use crate::status::{StatDeltas, StatusKind, StatusRegistry, StatusTemplate};
use crate::types::*;

// ==========================================
// HELPER FUNCTIONS (Boilerplate Reduction)
// ==========================================

/// RNG that replays a scripted sequence of draws, for forcing exact
/// outcomes. Draws past the end of the script repeat the final value.
struct ScriptRng {
    values: Vec<u32>,
    index: usize,
}

impl ScriptRng {
    /// Script the raw `next_u32` outputs directly
    fn raw(values: &[u32]) -> Self {
        Self {
            values: values.to_vec(),
            index: 0,
        }
    }

    /// Script the upcoming `fraction()` results; values must be in [0, 1)
    fn fractions(values: &[f32]) -> Self {
        Self::raw(
            &values
                .iter()
                .map(|f| ((f * (1u32 << 24) as f32) as u32) << 8)
                .collect::<Vec<_>>(),
        )
    }
}

impl BattleRng for ScriptRng {
    fn next_u32(&mut self) -> u32 {
        let value = self.values[self.index.min(self.values.len() - 1)];
        self.index += 1;
        value
    }
}

/// Flat stats with crit and evasion zeroed so only scripted draws matter
fn create_stats(max_hp: i32, attack: i32, defense: i32, speed: i32) -> Stats {
    Stats::new(1, max_hp, 50, attack, defense, attack, defense, speed)
        .with_critical(0.0, 1.5)
        .with_evasion(0.0)
}

fn create_damage_skill(id: &str, element: Element, power: i32) -> Skill {
    Skill::new(
        id,
        id,
        SkillEffect::Damage {
            kind: DamageKind::Physical,
            element,
            power,
            status: None,
        },
    )
}

fn create_heal_skill(id: &str, amount: i32) -> Skill {
    Skill::new(id, id, SkillEffect::Heal {
        amount,
        status: None,
    })
}

fn catalog_with(skills: Vec<Skill>) -> SkillCatalog {
    let mut catalog = SkillCatalog::new();
    for skill in skills {
        catalog.register(skill);
    }
    catalog
}

fn registry_with(templates: Vec<StatusTemplate>) -> StatusRegistry {
    let mut registry = StatusRegistry::new();
    for template in templates {
        registry.register(template);
    }
    registry
}

fn create_player(stats: Stats, loadout: &[&str], catalog: &SkillCatalog) -> Combatant {
    let profile = PlayerProfile {
        id: CombatantId::new("hero"),
        name: "Hero".to_string(),
        stats,
        loadout: loadout.iter().map(|id| SkillId::new(*id)).collect(),
        resistances: Vec::new(),
        weaknesses: Vec::new(),
    };
    Combatant::from_player_profile(&profile, catalog).expect("player should build")
}

fn create_enemy(stats: Stats, loadout: &[&str], catalog: &SkillCatalog) -> Combatant {
    let template = MonsterTemplate::new("dummy", "Dummy", stats, loadout);
    Combatant::from_monster_template(&template, catalog).expect("enemy should build")
}

fn run_battle(
    player: Combatant,
    enemy: Combatant,
    registry: StatusRegistry,
    seed: u64,
) -> BattleResult {
    let mut session =
        BattleSession::seeded(player, enemy, registry, seed).expect("session should build");
    session.run()
}

/// Full battle over the built-in content, level 5 hero versus the closest
/// roster monster
fn run_standard_battle(seed: u64) -> BattleResult {
    let catalog = crate::templates::standard_catalog();
    let profile = crate::templates::standard_player(5);
    let player =
        Combatant::from_player_profile(&profile, &catalog).expect("player should build");
    let template = crate::templates::monster_for_level(5).expect("roster has a level 5 pick");
    let enemy =
        Combatant::from_monster_template(&template, &catalog).expect("enemy should build");
    run_battle(player, enemy, crate::templates::standard_effects(), seed)
}
