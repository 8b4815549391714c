use super::*;

fn poison() -> StatusTemplate {
    StatusTemplate::new("poison", "Poison", StatusKind::Debuff, 3).with_damage_per_turn(5)
}

fn might() -> StatusTemplate {
    StatusTemplate::new("might", "Might", StatusKind::Buff, 3).with_deltas(StatDeltas {
        attack: 8,
        ..StatDeltas::default()
    })
}

fn plain_combatant() -> Combatant {
    let catalog = catalog_with(vec![create_damage_skill("strike", Element::Neutral, 100)]);
    create_player(create_stats(100, 20, 10, 10), &["strike"], &catalog)
}

#[test]
fn test_apply_and_decay() {
    let mut combatant = plain_combatant();
    combatant.apply_status(&poison());

    assert!(combatant.has_status(&EffectId::new("poison")));
    assert_eq!(combatant.statuses[0].remaining, 3);

    combatant.decay_statuses();
    assert_eq!(combatant.statuses[0].remaining, 2);

    combatant.decay_statuses();
    combatant.decay_statuses();
    assert!(combatant.statuses.is_empty(), "expired statuses are dropped");
}

#[test]
fn test_reapply_refreshes_instead_of_stacking() {
    let mut combatant = plain_combatant();
    combatant.apply_status(&poison());
    combatant.decay_statuses();
    assert_eq!(combatant.statuses[0].remaining, 2);

    combatant.apply_status(&poison());
    assert_eq!(combatant.statuses.len(), 1, "no second instance appears");
    assert_eq!(combatant.statuses[0].remaining, 3, "duration snaps back to full");
}

#[test]
fn test_stackable_status_accumulates() {
    let acid = StatusTemplate::new("acid", "Acid", StatusKind::Debuff, 3)
        .with_damage_per_turn(4)
        .with_stacking();
    let mut combatant = plain_combatant();
    combatant.apply_status(&acid);
    combatant.apply_status(&acid);

    assert_eq!(combatant.statuses.len(), 2);
    assert_eq!(combatant.dot_damage(), 8);
}

#[test]
fn test_dot_damage_sums_across_statuses() {
    let burn = StatusTemplate::new("burn", "Burn", StatusKind::Debuff, 2).with_damage_per_turn(8);
    let mut combatant = plain_combatant();
    combatant.apply_status(&poison());
    combatant.apply_status(&burn);
    combatant.apply_status(&might());

    assert_eq!(combatant.dot_damage(), 13, "buffs contribute no dot");
}

#[test]
fn test_deltas_shift_effective_stats() {
    let mut combatant = plain_combatant();
    let field = StatDeltas::default();
    assert_eq!(combatant.effective_attack(&field), 20);

    combatant.apply_status(&might());
    assert_eq!(combatant.effective_attack(&field), 28);

    let weakness = StatusTemplate::new("weakness", "Weakness", StatusKind::Debuff, 3)
        .with_deltas(StatDeltas {
            attack: -6,
            ..StatDeltas::default()
        });
    combatant.apply_status(&weakness);
    assert_eq!(combatant.effective_attack(&field), 22);
}

#[test]
fn test_field_deltas_stack_with_statuses() {
    let mut combatant = plain_combatant();
    combatant.apply_status(&might());

    let field = StatDeltas {
        attack: 5,
        speed: -3,
        ..StatDeltas::default()
    };
    assert_eq!(combatant.effective_attack(&field), 33);
    assert_eq!(combatant.effective_speed(&field), 7);
}

#[test]
fn test_effective_stats_floor_at_zero() {
    let crush = StatusTemplate::new("crush", "Crush", StatusKind::Debuff, 3).with_deltas(
        StatDeltas {
            attack: -100,
            ..StatDeltas::default()
        },
    );
    let mut combatant = plain_combatant();
    combatant.apply_status(&crush);

    assert_eq!(combatant.effective_attack(&StatDeltas::default()), 0);
}

#[test]
fn test_hp_and_mp_ignore_deltas() {
    // Deltas only cover the five combat stats; hp and mp pools never move
    let mut combatant = plain_combatant();
    combatant.apply_status(&might());

    assert_eq!(combatant.hp, 100);
    assert_eq!(combatant.mp, 50);
}

#[test]
fn test_registry_round_trip() {
    let registry = registry_with(vec![poison(), might()]);

    assert_eq!(registry.len(), 2);
    assert!(registry.contains(&EffectId::new("poison")));
    assert!(!registry.contains(&EffectId::new("burn")));

    let template = registry
        .get(&EffectId::new("might"))
        .expect("might was registered");
    assert_eq!(template.kind, StatusKind::Buff);
    assert_eq!(template.deltas.attack, 8);
}

#[test]
fn test_duration_one_expires_without_ever_ticking() {
    // Applied mid-round, decayed at the round end, gone before the next
    // round's dot step
    let sting = StatusTemplate::new("sting", "Sting", StatusKind::Debuff, 1)
        .with_damage_per_turn(50);
    let mut combatant = plain_combatant();
    combatant.apply_status(&sting);
    assert_eq!(combatant.dot_damage(), 50);

    combatant.decay_statuses();
    assert!(combatant.statuses.is_empty());
    assert_eq!(combatant.dot_damage(), 0);
}
