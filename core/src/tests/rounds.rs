use super::*;
use crate::battle::MAX_ROUNDS;

#[test]
fn test_faster_side_acts_first() {
    let catalog = catalog_with(vec![create_damage_skill("strike", Element::Neutral, 100)]);
    let player = create_player(create_stats(500, 10, 10, 5), &["strike"], &catalog);
    let enemy = create_enemy(create_stats(500, 10, 10, 20), &["strike"], &catalog);

    let mut session = BattleSession::seeded(player, enemy, StatusRegistry::new(), 1)
        .expect("session should build");
    let first = session.next_action().expect("round 1 has actions");

    assert_eq!(first.attacker, CombatantId::new("dummy"));
}

#[test]
fn test_speed_tie_goes_to_the_player() {
    let catalog = catalog_with(vec![create_damage_skill("strike", Element::Neutral, 100)]);
    let player = create_player(create_stats(500, 10, 10, 10), &["strike"], &catalog);
    let enemy = create_enemy(create_stats(500, 10, 10, 10), &["strike"], &catalog);

    let mut session = BattleSession::seeded(player, enemy, StatusRegistry::new(), 1)
        .expect("session should build");
    let first = session.next_action().expect("round 1 has actions");

    assert_eq!(first.attacker, CombatantId::new("hero"));
}

#[test]
fn test_turn_order_uses_buffed_speed() {
    let catalog = catalog_with(vec![create_damage_skill("strike", Element::Neutral, 100)]);
    let mut player = create_player(create_stats(500, 10, 10, 10), &["strike"], &catalog);
    let enemy = create_enemy(create_stats(500, 10, 10, 12), &["strike"], &catalog);

    // Raw speed loses 10 to 12; a haste brings the player to 15
    let haste = StatusTemplate::new("haste", "Haste", StatusKind::Buff, 5).with_deltas(
        StatDeltas {
            speed: 5,
            ..StatDeltas::default()
        },
    );
    player.apply_status(&haste);

    let mut session = BattleSession::seeded(player, enemy, StatusRegistry::new(), 1)
        .expect("session should build");
    let first = session.next_action().expect("round 1 has actions");

    assert_eq!(first.attacker, CombatantId::new("hero"));
}

#[test]
fn test_first_mover_kill_skips_the_second_turn() {
    let catalog = catalog_with(vec![create_damage_skill("strike", Element::Neutral, 100)]);
    let player = create_player(create_stats(100, 20, 0, 20), &["strike"], &catalog);
    let enemy = create_enemy(create_stats(1, 10, 0, 5), &["strike"], &catalog);

    let result = run_battle(player, enemy, StatusRegistry::new(), 7);

    assert_eq!(result.winner, Winner::Player);
    assert_eq!(result.rounds, 1);
    assert_eq!(result.actions.len(), 1, "the dead enemy never swings back");
    assert_eq!(result.actions[0].attacker, CombatantId::new("hero"));
}

#[test]
fn test_cooldown_sits_out_the_advertised_rounds() {
    let catalog = catalog_with(vec![
        create_damage_skill("nova", Element::Neutral, 150).with_cooldown(3),
        create_damage_skill("strike", Element::Neutral, 100),
        create_damage_skill("pebble", Element::Neutral, 50),
    ]);
    let player = create_player(
        create_stats(500, 20, 10, 20),
        &["nova", "strike"],
        &catalog,
    );
    let enemy = create_enemy(create_stats(500, 5, 10, 5), &["pebble"], &catalog);

    let result = run_battle(player, enemy, StatusRegistry::new(), 11);

    // Used in round 1, the cooldown counts 3, 2, 1 at the next three round
    // ends, so the skill returns in round 4.
    let hero = CombatantId::new("hero");
    let picks: Vec<&str> = result
        .actions
        .iter()
        .filter(|a| a.attacker == hero)
        .take(4)
        .map(|a| a.skill.as_str())
        .collect();
    assert_eq!(picks, ["nova", "strike", "strike", "nova"]);
}

#[test]
fn test_tick_kill_ends_the_round_before_anyone_acts() {
    let poison = StatusTemplate::new("poison", "Poison", StatusKind::Debuff, 3)
        .with_damage_per_turn(10);
    let venom = Skill::new(
        "venom_jab",
        "Venom Jab",
        SkillEffect::Damage {
            kind: DamageKind::Physical,
            element: Element::Neutral,
            power: 100,
            status: Some(EffectId::new("poison")),
        },
    );
    let catalog = catalog_with(vec![venom, create_damage_skill("pebble", Element::Neutral, 50)]);
    // The opening hit lands for 18..=21, leaving the enemy alive on 4..=7
    // hp; the round 2 tick then takes all of it.
    let player = create_player(create_stats(100, 20, 10, 20), &["venom_jab"], &catalog);
    let enemy = create_enemy(create_stats(25, 5, 0, 5), &["pebble"], &catalog);

    let result = run_battle(player, enemy, registry_with(vec![poison]), 3);

    assert_eq!(result.winner, Winner::Player);
    assert_eq!(result.rounds, 2);
    assert!(
        result.actions.iter().all(|a| a.round == 1),
        "round 2 died at the tick, before any turn"
    );
    let opener = &result.actions[0];
    assert_eq!(opener.status_applied.as_deref(), Some("Poison"));
}

#[test]
fn test_simultaneous_tick_deaths_draw() {
    let rot = StatusTemplate::new("rot", "Rot", StatusKind::Debuff, 2).with_damage_per_turn(50);
    let catalog = catalog_with(vec![create_damage_skill("strike", Element::Neutral, 100)]);
    let mut player = create_player(create_stats(30, 10, 10, 10), &["strike"], &catalog);
    let mut enemy = create_enemy(create_stats(30, 10, 10, 10), &["strike"], &catalog);
    player.apply_status(&rot);
    enemy.apply_status(&rot);

    let result = run_battle(player, enemy, registry_with(vec![rot]), 5);

    assert_eq!(result.winner, Winner::None);
    assert_eq!(result.rounds, 1);
    assert!(result.actions.is_empty());
    assert_eq!(result.rewards, None, "a draw pays nothing");
}

#[test]
fn test_round_cap_forces_a_draw() {
    // Two healers never hurt each other; the cap is the only way out
    let catalog = catalog_with(vec![create_heal_skill("mend", 30)]);
    let player = create_player(create_stats(100, 10, 10, 10), &["mend"], &catalog);
    let enemy = create_enemy(create_stats(100, 10, 10, 10), &["mend"], &catalog);

    let result = run_battle(player, enemy, StatusRegistry::new(), 9);

    assert_eq!(result.winner, Winner::None);
    assert_eq!(result.rounds, MAX_ROUNDS);
    assert_eq!(result.rewards, None);
}

#[test]
fn test_exhausted_mp_means_noop_turns() {
    let catalog = catalog_with(vec![
        create_damage_skill("nova", Element::Neutral, 100).with_mp_cost(30),
        create_damage_skill("strike", Element::Neutral, 100),
    ]);
    // Mp 50 covers a single cast and never regenerates
    let player = create_player(create_stats(100, 20, 0, 20), &["nova"], &catalog);
    let enemy = create_enemy(create_stats(100, 10, 0, 5), &["strike"], &catalog);

    let result = run_battle(player, enemy, StatusRegistry::new(), 13);

    let hero = CombatantId::new("hero");
    let hero_actions = result.actions.iter().filter(|a| a.attacker == hero).count();
    assert_eq!(hero_actions, 1, "one cast, then silence");
    assert_eq!(result.winner, Winner::Enemy);
    assert_eq!(result.rewards, None, "losses pay nothing");
}

#[test]
fn test_hp_stays_within_bounds_over_full_battles() {
    for seed in 1..=20u64 {
        let catalog = crate::templates::standard_catalog();
        let profile = crate::templates::standard_player(5);
        let player =
            Combatant::from_player_profile(&profile, &catalog).expect("player should build");
        let template =
            crate::templates::monster_for_level(5).expect("roster has a level 5 pick");
        let enemy =
            Combatant::from_monster_template(&template, &catalog).expect("enemy should build");
        let mut session =
            BattleSession::seeded(player, enemy, crate::templates::standard_effects(), seed)
                .expect("session should build");

        let result = session.run();
        let view = session.snapshot();
        for side in [&view.player, &view.enemy] {
            assert!(side.hp >= 0, "seed {}: hp went negative", seed);
            assert!(side.hp <= side.max_hp, "seed {}: hp overflowed max", seed);
        }
        for action in &result.actions {
            if let Some(damage) = action.damage {
                assert!(damage >= 1, "seed {}: a landed hit dealt {}", seed, damage);
            }
            if let Some(healing) = action.healing {
                assert!(healing >= 0, "seed {}: negative healing", seed);
            }
        }
    }
}
