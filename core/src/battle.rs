//! Round execution: status ticks, turn order, skill resolution, and
//! end-of-round bookkeeping.
//!
//! [`BattleState`] owns both combatants and the action log. The scheduler
//! advances in small stages so a session can hand out one action at a time;
//! state is always consistent between stages.

use serde::{Deserialize, Serialize};

use crate::action::BattleAction;
use crate::combatant::Combatant;
use crate::damage::{self, StatusTarget};
use crate::rng::BattleRng;
use crate::selector;
use crate::skill::SkillEffect;
use crate::status::{StatDeltas, StatusRegistry};
use crate::types::{BattleId, Side};

/// Hard cap on rounds; a battle that completes this many ends in a draw
pub const MAX_ROUNDS: u32 = 200;

/// Lifecycle phase of a battle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum BattlePhase {
    Preparing,
    Fighting,
    Finished,
    Interrupted,
}

/// Side that won a finished battle, if any
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Winner {
    Player,
    Enemy,
    None,
}

/// A battlefield-wide modifier applied to both sides while active
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FieldEffect {
    pub name: String,
    pub deltas: StatDeltas,
    /// Rounds left including the current one
    pub remaining: u32,
}

/// Where the scheduler stands inside the current round
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
enum RoundStage {
    StatusTick,
    FirstTurn,
    SecondTurn,
    EndOfRound,
}

/// Complete mutable state of one battle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleState {
    pub id: BattleId,
    pub player: Combatant,
    pub enemy: Combatant,
    /// Round currently executing (1-indexed; 0 before the battle starts)
    pub round: u32,
    pub phase: BattlePhase,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field_effects: Vec<FieldEffect>,
    /// Every action emitted so far, in execution order
    pub actions: Vec<BattleAction>,
    /// Highest combo counter observed on either side
    pub max_combo: u32,
    stage: RoundStage,
    first_actor: Side,
    next_timestamp: u64,
}

impl BattleState {
    pub fn new(id: BattleId, player: Combatant, enemy: Combatant) -> Self {
        Self {
            id,
            player,
            enemy,
            round: 0,
            phase: BattlePhase::Preparing,
            field_effects: Vec::new(),
            actions: Vec::new(),
            max_combo: 0,
            stage: RoundStage::StatusTick,
            first_actor: Side::Player,
            next_timestamp: 1,
        }
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self.phase,
            BattlePhase::Finished | BattlePhase::Interrupted
        )
    }

    /// Sum of the active battlefield modifiers
    pub fn field_deltas(&self) -> StatDeltas {
        let mut total = StatDeltas::default();
        for effect in &self.field_effects {
            total.attack += effect.deltas.attack;
            total.defense += effect.deltas.defense;
            total.magic_attack += effect.deltas.magic_attack;
            total.magic_defense += effect.deltas.magic_defense;
            total.speed += effect.deltas.speed;
        }
        total
    }

    /// Winner of a terminal battle, by surviving side
    pub fn winner(&self) -> Winner {
        match self.phase {
            BattlePhase::Finished => match (self.player.is_alive(), self.enemy.is_alive()) {
                (true, false) => Winner::Player,
                (false, true) => Winner::Enemy,
                _ => Winner::None,
            },
            _ => Winner::None,
        }
    }

    /// Move out of the preparing phase
    pub(crate) fn begin(&mut self) {
        if self.phase == BattlePhase::Preparing {
            self.phase = BattlePhase::Fighting;
            log::info!(
                "battle {}: {} vs {}",
                self.id,
                self.player.name,
                self.enemy.name
            );
        }
    }

    /// Run the scheduler forward one stage
    ///
    /// Returns the action the stage emitted, if any. Callers loop while the
    /// phase is still `Fighting`.
    pub(crate) fn step(
        &mut self,
        registry: &StatusRegistry,
        stop_requested: bool,
        rng: &mut impl BattleRng,
    ) -> Option<BattleAction> {
        if self.phase != BattlePhase::Fighting {
            return None;
        }
        match self.stage {
            RoundStage::StatusTick => self.stage_status_tick(),
            RoundStage::FirstTurn => self.stage_turn(true, registry, rng),
            RoundStage::SecondTurn => self.stage_turn(false, registry, rng),
            RoundStage::EndOfRound => self.stage_end_of_round(stop_requested),
        }
    }

    // ==========================================
    // ROUND STAGES
    // ==========================================

    fn stage_status_tick(&mut self) -> Option<BattleAction> {
        self.round += 1;
        log::debug!("battle {} round {}", self.id, self.round);

        let player_dot = self.player.dot_damage();
        if player_dot > 0 {
            self.player.take_damage(player_dot);
            log::trace!("{} takes {} from active effects", self.player.name, player_dot);
        }
        let enemy_dot = self.enemy.dot_damage();
        if enemy_dot > 0 {
            self.enemy.take_damage(enemy_dot);
            log::trace!("{} takes {} from active effects", self.enemy.name, enemy_dot);
        }

        // A tick kill ends the round before anyone acts. Both sides dying
        // here is the one way a fight produces a draw besides the cap.
        if !self.player.is_alive() || !self.enemy.is_alive() {
            self.finish();
            return None;
        }

        let field = self.field_deltas();
        let player_speed = self.player.effective_speed(&field);
        let enemy_speed = self.enemy.effective_speed(&field);
        // Ties go to the player, never to a coin flip
        self.first_actor = if enemy_speed > player_speed {
            Side::Enemy
        } else {
            Side::Player
        };
        self.stage = RoundStage::FirstTurn;
        None
    }

    fn stage_turn(
        &mut self,
        first: bool,
        registry: &StatusRegistry,
        rng: &mut impl BattleRng,
    ) -> Option<BattleAction> {
        let side = if first {
            self.first_actor
        } else {
            self.first_actor.opponent()
        };
        let action = self.execute_turn(side, registry, rng);

        // A first-mover kill skips the second actor entirely
        if !self.player.is_alive() || !self.enemy.is_alive() {
            self.finish();
            return action;
        }
        self.stage = if first {
            RoundStage::SecondTurn
        } else {
            RoundStage::EndOfRound
        };
        action
    }

    fn stage_end_of_round(&mut self, stop_requested: bool) -> Option<BattleAction> {
        self.player.tick_cooldowns();
        self.enemy.tick_cooldowns();
        self.player.decay_statuses();
        self.enemy.decay_statuses();
        for effect in &mut self.field_effects {
            effect.remaining = effect.remaining.saturating_sub(1);
        }
        self.field_effects.retain(|e| e.remaining > 0);

        if stop_requested {
            log::info!("battle {} interrupted after round {}", self.id, self.round);
            self.phase = BattlePhase::Interrupted;
        } else if self.round >= MAX_ROUNDS {
            log::warn!("battle {} reached the round cap, drawn", self.id);
            self.phase = BattlePhase::Finished;
        } else {
            self.stage = RoundStage::StatusTick;
        }
        None
    }

    /// One combatant's turn: select, pay, resolve, apply, record
    ///
    /// Returns `None` for a no-op turn (nothing usable); no MP, cooldown,
    /// or log change happens in that case.
    fn execute_turn(
        &mut self,
        side: Side,
        registry: &StatusRegistry,
        rng: &mut impl BattleRng,
    ) -> Option<BattleAction> {
        let field = self.field_deltas();
        let (attacker, defender) = match side {
            Side::Player => (&self.player, &self.enemy),
            Side::Enemy => (&self.enemy, &self.player),
        };

        let index = selector::select(attacker, defender, self.actions.last())?;
        let skill = attacker.skills[index].skill.clone();
        let outcome = damage::resolve(attacker, defender, &skill, &field, rng);

        let (attacker, defender) = match side {
            Side::Player => (&mut self.player, &mut self.enemy),
            Side::Enemy => (&mut self.enemy, &mut self.player),
        };

        attacker.spend_mp(skill.mp_cost);
        attacker.skills[index].trigger_cooldown();
        attacker.last_skill = Some(skill.id.clone());
        if skill.is_damage() {
            attacker.combo_count = outcome.combo;
        }

        if let Some(amount) = outcome.damage {
            defender.take_damage(amount);
        }
        let healing = outcome.healing.map(|amount| attacker.heal(amount));

        let mut status_applied = None;
        if let Some((effect_id, target)) = &outcome.status {
            // Registry membership was validated at session construction
            if let Some(template) = registry.get(effect_id) {
                let receiver = match target {
                    StatusTarget::Caster => &mut *attacker,
                    StatusTarget::Opponent => &mut *defender,
                };
                receiver.apply_status(template);
                status_applied = Some(template.name.clone());
            }
        }

        let target_id = match skill.effect {
            SkillEffect::Damage { .. } | SkillEffect::Debuff { .. } => defender.id.clone(),
            SkillEffect::Heal { .. } | SkillEffect::Buff { .. } => attacker.id.clone(),
        };
        let action = BattleAction {
            round: self.round,
            timestamp: self.next_timestamp,
            attacker: attacker.id.clone(),
            target: target_id,
            skill: skill.id.clone(),
            skill_name: skill.name.clone(),
            damage: outcome.damage,
            healing,
            critical: outcome.critical,
            evaded: outcome.evaded,
            elemental: outcome.elemental,
            status_applied,
            combo: outcome.combo,
        };
        log::trace!(
            "battle {} r{}: {} used {} ({:?} damage, {:?} healing)",
            self.id,
            self.round,
            action.attacker,
            action.skill_name,
            action.damage,
            action.healing
        );

        self.next_timestamp += 1;
        self.max_combo = self.max_combo.max(outcome.combo);
        self.actions.push(action.clone());
        Some(action)
    }

    fn finish(&mut self) {
        self.phase = BattlePhase::Finished;
        log::info!(
            "battle {} finished in round {} ({:?})",
            self.id,
            self.round,
            self.winner()
        );
    }
}
