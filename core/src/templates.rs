//! Builtin skills, status effects, and monsters.
//!
//! A compact content set so simulators and tests can exercise every
//! mechanic without external data files. Deployments register their own
//! catalogs; nothing in the engine depends on these entries.

use crate::combatant::{MonsterTemplate, PlayerProfile, Stats};
use crate::skill::{Skill, SkillCatalog, SkillEffect};
use crate::status::{StatDeltas, StatusKind, StatusRegistry, StatusTemplate};
use crate::types::{CombatantId, DamageKind, EffectId, Element, SkillId};

/// Status effects referenced by the standard catalog
pub fn standard_effects() -> StatusRegistry {
    let mut registry = StatusRegistry::new();

    registry.register(
        StatusTemplate::new("poison", "Poison", StatusKind::Debuff, 3).with_damage_per_turn(5),
    );
    registry.register(
        StatusTemplate::new("burn", "Burn", StatusKind::Debuff, 2).with_damage_per_turn(8),
    );
    registry.register(
        StatusTemplate::new("might", "Might", StatusKind::Buff, 3).with_deltas(StatDeltas {
            attack: 8,
            ..Default::default()
        }),
    );
    registry.register(
        StatusTemplate::new("iron_guard", "Iron Guard", StatusKind::Buff, 3).with_deltas(
            StatDeltas {
                defense: 10,
                ..Default::default()
            },
        ),
    );
    registry.register(
        StatusTemplate::new("haste", "Haste", StatusKind::Buff, 2).with_deltas(StatDeltas {
            speed: 12,
            ..Default::default()
        }),
    );
    registry.register(
        StatusTemplate::new("weakness", "Weakness", StatusKind::Debuff, 3).with_deltas(
            StatDeltas {
                attack: -6,
                ..Default::default()
            },
        ),
    );
    registry.register(
        StatusTemplate::new("sluggish", "Sluggish", StatusKind::Debuff, 2).with_deltas(
            StatDeltas {
                speed: -10,
                ..Default::default()
            },
        ),
    );

    registry
}

/// The standard skill catalog
pub fn standard_catalog() -> SkillCatalog {
    let mut catalog = SkillCatalog::new();

    // Free basic attack every loadout should carry
    catalog.register(Skill::new(
        "strike",
        "Strike",
        SkillEffect::Damage {
            kind: DamageKind::Physical,
            element: Element::Neutral,
            power: 100,
            status: None,
        },
    ));

    catalog.register(
        Skill::new(
            "fireball",
            "Fireball",
            SkillEffect::Damage {
                kind: DamageKind::Magical,
                element: Element::Fire,
                power: 130,
                status: None,
            },
        )
        .with_mp_cost(8),
    );
    catalog.register(
        Skill::new(
            "flame_burst",
            "Flame Burst",
            SkillEffect::Damage {
                kind: DamageKind::Magical,
                element: Element::Fire,
                power: 160,
                status: None,
            },
        )
        .with_mp_cost(12)
        .with_cooldown(2)
        .with_combo_after(&["fireball"]),
    );
    catalog.register(
        Skill::new(
            "aqua_lance",
            "Aqua Lance",
            SkillEffect::Damage {
                kind: DamageKind::Magical,
                element: Element::Water,
                power: 125,
                status: None,
            },
        )
        .with_mp_cost(8),
    );
    catalog.register(
        Skill::new(
            "stone_edge",
            "Stone Edge",
            SkillEffect::Damage {
                kind: DamageKind::Physical,
                element: Element::Earth,
                power: 120,
                status: None,
            },
        )
        .with_mp_cost(6),
    );
    catalog.register(
        Skill::new(
            "gale_slash",
            "Gale Slash",
            SkillEffect::Damage {
                kind: DamageKind::Physical,
                element: Element::Wind,
                power: 110,
                status: None,
            },
        )
        .with_mp_cost(5),
    );
    catalog.register(
        Skill::new(
            "venom_strike",
            "Venom Strike",
            SkillEffect::Damage {
                kind: DamageKind::Physical,
                element: Element::Neutral,
                power: 90,
                status: Some(EffectId::new("poison")),
            },
        )
        .with_mp_cost(6)
        .with_accuracy(0.95),
    );

    catalog.register(
        Skill::new(
            "mend",
            "Mend",
            SkillEffect::Heal {
                amount: 30,
                status: None,
            },
        )
        .with_mp_cost(10)
        .with_cooldown(2),
    );

    catalog.register(
        Skill::new(
            "war_cry",
            "War Cry",
            SkillEffect::Buff {
                status: EffectId::new("might"),
            },
        )
        .with_mp_cost(6)
        .with_cooldown(3),
    );
    catalog.register(
        Skill::new(
            "stone_skin",
            "Stone Skin",
            SkillEffect::Buff {
                status: EffectId::new("iron_guard"),
            },
        )
        .with_mp_cost(6)
        .with_cooldown(3),
    );
    catalog.register(
        Skill::new(
            "enfeeble",
            "Enfeeble",
            SkillEffect::Debuff {
                status: EffectId::new("weakness"),
            },
        )
        .with_mp_cost(5)
        .with_cooldown(2),
    );
    catalog.register(
        Skill::new(
            "slow_hex",
            "Slow Hex",
            SkillEffect::Debuff {
                status: EffectId::new("sluggish"),
            },
        )
        .with_mp_cost(5)
        .with_cooldown(2),
    );

    catalog
}

/// The standard monster roster, ordered by level
pub fn roster() -> Vec<MonsterTemplate> {
    vec![
        MonsterTemplate::new(
            "slime",
            "Slime",
            Stats::new(1, 40, 10, 8, 4, 4, 4, 6),
            &["strike"],
        )
        .with_weaknesses(&[Element::Fire]),
        MonsterTemplate::new(
            "goblin_raider",
            "Goblin Raider",
            Stats::new(3, 70, 20, 14, 8, 6, 6, 12),
            &["strike", "gale_slash"],
        ),
        MonsterTemplate::new(
            "orc_brute",
            "Orc Brute",
            Stats::new(5, 120, 25, 22, 14, 8, 10, 9),
            &["strike", "stone_edge", "war_cry"],
        )
        .with_weaknesses(&[Element::Wind]),
        MonsterTemplate::new(
            "frost_wraith",
            "Frost Wraith",
            Stats::new(7, 150, 60, 12, 12, 26, 20, 14),
            &["strike", "aqua_lance", "slow_hex"],
        )
        .with_resistances(&[Element::Water])
        .with_weaknesses(&[Element::Fire]),
        MonsterTemplate::new(
            "ember_drake",
            "Ember Drake",
            Stats::new(10, 220, 80, 28, 18, 30, 22, 16),
            &["strike", "fireball", "flame_burst", "war_cry"],
        )
        .with_resistances(&[Element::Fire])
        .with_weaknesses(&[Element::Water]),
    ]
}

/// Look up a roster monster by template id
pub fn monster_template(id: &str) -> Option<MonsterTemplate> {
    roster().into_iter().find(|t| t.id == id)
}

/// The roster monster closest to the requested level
pub fn monster_for_level(level: u32) -> Option<MonsterTemplate> {
    roster()
        .into_iter()
        .min_by_key(|t| t.stats.level.abs_diff(level))
}

/// A balanced starter profile for simulations
pub fn standard_player(level: u32) -> PlayerProfile {
    let lv = level as i32;
    PlayerProfile {
        id: CombatantId::new("hero"),
        name: "Hero".to_string(),
        stats: Stats::new(
            level,
            80 + 15 * lv,
            30 + 5 * lv,
            12 + 3 * lv,
            8 + 2 * lv,
            10 + 3 * lv,
            8 + 2 * lv,
            10 + lv,
        )
        .with_critical(0.1, 1.5)
        .with_evasion(0.05),
        loadout: ["strike", "fireball", "flame_burst", "mend", "war_cry"]
            .iter()
            .map(|id| SkillId::new(*id))
            .collect(),
        resistances: vec![],
        weaknesses: vec![],
    }
}
