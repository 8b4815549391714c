//! Battle session lifecycle and the public driving API.
//!
//! A session owns its state, registry, and generator outright; any number
//! of sessions can run in parallel flows without shared mutable state. All
//! mutation happens inside [`BattleSession::next_action`], never while the
//! caller holds a yielded action, so a panic in consumer code leaves the
//! battle consistent at the last completed step.

use serde::{Deserialize, Serialize};

use crate::action::BattleAction;
use crate::battle::{BattlePhase, BattleState, FieldEffect, Winner};
use crate::combatant::Combatant;
use crate::error::BattleError;
use crate::reward::{self, BattleRewards};
use crate::rng::{BattleRng, XorShiftRng};
use crate::status::StatusRegistry;
use crate::types::{BattleId, Side};
use crate::view::BattleView;

/// Terminal artifact of a battle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BattleResult {
    pub winner: Winner,
    /// Rounds elapsed when the battle ended
    pub rounds: u32,
    /// The full ordered action log
    pub actions: Vec<BattleAction>,
    /// Present only when the player won
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rewards: Option<BattleRewards>,
}

/// A running battle
///
/// Construction validates both combatants and every status reference, then
/// the session is driven either action by action ([`Self::next_action`],
/// [`Self::actions`]) or to completion in one call ([`Self::run`]).
pub struct BattleSession<R: BattleRng> {
    state: BattleState,
    registry: StatusRegistry,
    rng: R,
    stop_requested: bool,
    rewards: Option<BattleRewards>,
    rewards_computed: bool,
}

impl BattleSession<XorShiftRng> {
    /// Session with the built-in xorshift generator; the seed doubles as
    /// the battle id
    pub fn seeded(
        player: Combatant,
        enemy: Combatant,
        registry: StatusRegistry,
        seed: u64,
    ) -> Result<Self, BattleError> {
        let session = Self::new(player, enemy, registry, XorShiftRng::seed_from_u64(seed))?;
        Ok(session.with_id(seed))
    }
}

impl<R: BattleRng> BattleSession<R> {
    pub fn new(
        player: Combatant,
        enemy: Combatant,
        registry: StatusRegistry,
        rng: R,
    ) -> Result<Self, BattleError> {
        if player.side != Side::Player {
            return Err(BattleError::WrongSide {
                id: player.id,
                expected: Side::Player,
            });
        }
        if enemy.side != Side::Enemy {
            return Err(BattleError::WrongSide {
                id: enemy.id,
                expected: Side::Enemy,
            });
        }
        if player.id == enemy.id {
            return Err(BattleError::DuplicateId { id: player.id });
        }
        for combatant in [&player, &enemy] {
            for slot in &combatant.skills {
                if let Some(status) = slot.skill.status_ref() {
                    if !registry.contains(status) {
                        return Err(BattleError::UnknownStatusEffect {
                            skill: slot.skill.id.clone(),
                            status: status.clone(),
                        });
                    }
                }
            }
        }
        Ok(Self {
            state: BattleState::new(0, player, enemy),
            registry,
            rng,
            stop_requested: false,
            rewards: None,
            rewards_computed: false,
        })
    }

    pub fn with_id(mut self, id: BattleId) -> Self {
        self.state.id = id;
        self
    }

    pub fn with_field_effects(mut self, effects: Vec<FieldEffect>) -> Self {
        self.state.field_effects = effects;
        self
    }

    pub fn id(&self) -> BattleId {
        self.state.id
    }

    pub fn phase(&self) -> BattlePhase {
        self.state.phase.clone()
    }

    pub fn round(&self) -> u32 {
        self.state.round
    }

    pub fn winner(&self) -> Winner {
        self.state.winner()
    }

    /// Deep-copied snapshot safe to hand to a renderer
    pub fn snapshot(&self) -> BattleView {
        BattleView::from_state(&self.state)
    }

    /// Request a cooperative stop
    ///
    /// Takes effect at the next round boundary; the in-flight round
    /// completes first.
    pub fn stop(&mut self) {
        self.stop_requested = true;
    }

    /// Advance the battle to its next emitted action
    ///
    /// The first call moves the session out of `preparing`. No-op turns
    /// and round bookkeeping advance silently. Returns `None` once the
    /// battle has reached a terminal phase.
    pub fn next_action(&mut self) -> Option<BattleAction> {
        self.state.begin();
        while self.state.phase == BattlePhase::Fighting {
            if let Some(action) =
                self.state
                    .step(&self.registry, self.stop_requested, &mut self.rng)
            {
                return Some(action);
            }
        }
        None
    }

    /// Iterator over the remaining actions; lazy, finite, non-restartable
    pub fn actions(&mut self) -> Actions<'_, R> {
        Actions { session: self }
    }

    /// Drive the battle to its end and assemble the result
    pub fn run(&mut self) -> BattleResult {
        while self.next_action().is_some() {}
        self.build_result()
    }

    /// Result of a terminal battle; `None` while still running
    pub fn result(&mut self) -> Option<BattleResult> {
        if !self.state.is_terminal() {
            return None;
        }
        Some(self.build_result())
    }

    fn build_result(&mut self) -> BattleResult {
        self.ensure_rewards();
        BattleResult {
            winner: self.state.winner(),
            rounds: self.state.round,
            actions: self.state.actions.clone(),
            rewards: self.rewards.clone(),
        }
    }

    /// Rewards are drawn once; repeat result calls reuse them
    fn ensure_rewards(&mut self) {
        if self.rewards_computed {
            return;
        }
        if self.state.winner() == Winner::Player {
            self.rewards = Some(reward::compute(
                self.state.enemy.stats.level,
                self.state.round,
                self.state.max_combo,
                &mut self.rng,
            ));
        }
        self.rewards_computed = true;
    }
}

/// Lazy stream of battle actions
pub struct Actions<'a, R: BattleRng> {
    session: &'a mut BattleSession<R>,
}

impl<R: BattleRng> Iterator for Actions<'_, R> {
    type Item = BattleAction;

    fn next(&mut self) -> Option<BattleAction> {
        self.session.next_action()
    }
}
