//! Drives a single encounter: starting it, resolving one player action per
//! turn, and settling the result once it is over.

use crate::battle::ai::{Matchup, MoveOption, OpponentStrategy, RandomUsableMove};
use crate::battle::calculators::{calculate_damage_with, DamageParams, DamageResult};
use crate::battle::catch::{attempt_capture_with, CaptureAttempt};
use crate::battle::escape::{attempt_escape_with, EscapeAttempt};
use crate::battle::state::{
    BattleEvent, BattleGhostState, BattlePhase, BattleState, EndReason, ExecutingAction, RollKind,
    Side, TurnRng,
};
use crate::battle::stats::{effective_attack, effective_defense, effective_speed};
use crate::battle::turn_order::{determine_turn_order, TurnOrder};
use crate::config::BattleConfig;
use crate::errors::{BattleError, BattleResult};
use crate::ghost::OwnedGhost;
use crate::master_data::MasterDataSource;
use crate::progression::{add_experience, calculate_exp_gain_with, moves_learned_between, ExperienceGain};
use schema::{GhostType, ItemData, ItemKind};
use serde::{Deserialize, Serialize};

/// What the player chose from the command menu this turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayerAction {
    Attack { move_index: usize },
    UseItem { item_id: String, heal_amount: u16 },
    Capture { item_bonus: u16 },
    Escape,
}

impl PlayerAction {
    /// Build the action for using `item` from the bag: healing items heal
    /// their listed amount, capture items are thrown with their bonus.
    pub fn from_item(item: &ItemData) -> Self {
        match item.kind {
            ItemKind::Heal { amount } => PlayerAction::UseItem {
                item_id: item.id.clone(),
                heal_amount: amount,
            },
            ItemKind::Capture { bonus } => PlayerAction::Capture { item_bonus: bonus },
        }
    }
}

/// Everything that happened while resolving one player action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnResult {
    /// The turn number that was resolved.
    pub turn: u32,
    pub events: Vec<BattleEvent>,
    pub messages: Vec<String>,
    pub battle_ended: bool,
    pub end_reason: Option<EndReason>,
    pub turn_order: Option<TurnOrder>,
    /// Damage dealt by the player's ghost.
    pub player_damage: Option<DamageResult>,
    /// Damage dealt by the enemy ghost.
    pub enemy_damage: Option<DamageResult>,
    pub healed: Option<u16>,
    pub capture: Option<CaptureAttempt>,
    pub escape: Option<EscapeAttempt>,
}

impl TurnResult {
    fn new(turn: u32) -> Self {
        Self {
            turn,
            events: Vec::new(),
            messages: Vec::new(),
            battle_ended: false,
            end_reason: None,
            turn_order: None,
            player_damage: None,
            enemy_damage: None,
            healed: None,
            capture: None,
            escape: None,
        }
    }
}

/// The post-battle snapshot handed back to the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleSettlement {
    pub end_reason: EndReason,
    pub turns: u32,
    /// The player's ghost with battle HP, spent PP and any experience applied.
    pub ghost: OwnedGhost,
    pub experience: Option<ExperienceGain>,
    /// Moves learned into free slots on level-up.
    pub learned_moves: Vec<String>,
    /// Moves unlocked on level-up that did not fit.
    pub pending_moves: Vec<String>,
    pub captured: Option<OwnedGhost>,
}

/// Types of both combatants, fixed for the whole turn.
#[derive(Debug, Clone, Copy)]
struct Combatants {
    player: GhostType,
    enemy: GhostType,
}

impl Combatants {
    fn matchup(self, attacker: Side) -> Matchup {
        match attacker {
            Side::Player => Matchup {
                attacker: self.player,
                defender: self.enemy,
            },
            Side::Enemy => Matchup {
                attacker: self.enemy,
                defender: self.player,
            },
        }
    }
}

pub struct BattleEngine<'d> {
    data: &'d dyn MasterDataSource,
    config: BattleConfig,
    strategy: Box<dyn OpponentStrategy>,
}

impl<'d> BattleEngine<'d> {
    pub fn new(data: &'d dyn MasterDataSource) -> Self {
        Self {
            data,
            config: BattleConfig::default(),
            strategy: Box::new(RandomUsableMove),
        }
    }

    pub fn with_config(mut self, config: BattleConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_strategy(mut self, strategy: impl OpponentStrategy + 'static) -> Self {
        self.strategy = Box::new(strategy);
        self
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// Open a battle between the player's ghost and a wild one.
    pub fn start_battle(&self, player: OwnedGhost, enemy: OwnedGhost) -> BattleState {
        let player_name = self.display_name(&player);
        let enemy_name = self.display_name(&enemy);
        tracing::debug!(player = %player_name, enemy = %enemy_name, "battle started");

        let mut state = BattleState::new(
            BattleGhostState::new(player, player_name),
            BattleGhostState::new(enemy, enemy_name),
        );
        state.narrate(&BattleEvent::GhostAppeared { side: Side::Enemy });
        state.narrate(&BattleEvent::GhostAppeared { side: Side::Player });
        state
    }

    fn display_name(&self, ghost: &OwnedGhost) -> String {
        self.data
            .species(&ghost.species_id)
            .map(|species| species.name.clone())
            .unwrap_or_else(|| ghost.species_id.clone())
    }

    /// Resolve one player action. Always counts as a turn, even when it turns
    /// out to be a no-op.
    pub fn execute_player_action(
        &self,
        state: &mut BattleState,
        action: &PlayerAction,
        player_type: GhostType,
        enemy_type: GhostType,
        rng: &mut TurnRng,
    ) -> TurnResult {
        let turn = state.turn_count;
        state.turn_count += 1;

        let mut result = TurnResult::new(turn);
        emit(state, &mut result, BattleEvent::TurnStarted { turn_number: turn });

        if !state.is_active {
            emit(state, &mut result, BattleEvent::BattleAlreadyOver);
            result.battle_ended = true;
            result.end_reason = state.end_reason;
            return result;
        }

        tracing::debug!(turn, ?action, "resolving player action");
        let combatants = Combatants {
            player: player_type,
            enemy: enemy_type,
        };

        match action {
            PlayerAction::Attack { move_index } => {
                self.resolve_attack(state, *move_index, combatants, rng, &mut result)
            }
            PlayerAction::UseItem {
                item_id,
                heal_amount,
            } => self.resolve_item(state, item_id, *heal_amount, combatants, rng, &mut result),
            PlayerAction::Capture { item_bonus } => {
                self.resolve_capture(state, *item_bonus, combatants, rng, &mut result)
            }
            PlayerAction::Escape => self.resolve_escape(state, combatants, rng, &mut result),
        }

        if state.is_active {
            state.set_phase(BattlePhase::CommandSelect);
        }

        result.battle_ended = !state.is_active;
        result.end_reason = state.end_reason;
        result
    }

    fn resolve_attack(
        &self,
        state: &mut BattleState,
        move_index: usize,
        combatants: Combatants,
        rng: &mut TurnRng,
        result: &mut TurnResult,
    ) {
        state.enter_phase(BattlePhase::MoveSelect);

        let chosen = state
            .player
            .ghost
            .moves
            .get(move_index)
            .and_then(|owned| self.data.move_data(&owned.move_id).map(|data| (owned.has_pp(), data)));

        match chosen {
            None => {
                tracing::debug!(move_index, "player chose an empty or unknown move slot");
                emit(
                    state,
                    result,
                    BattleEvent::UnknownMove {
                        side: Side::Player,
                        move_index,
                    },
                );
                return;
            }
            Some((false, move_data)) => {
                emit(
                    state,
                    result,
                    BattleEvent::NoPpRemaining {
                        side: Side::Player,
                        move_name: move_data.name.clone(),
                    },
                );
                return;
            }
            Some((true, _)) => {}
        }

        let order = self.turn_order(state, rng);
        result.turn_order = Some(order);

        for side in [order.first, order.second] {
            if !state.is_active {
                break;
            }
            match side {
                Side::Player => {
                    self.perform_attack(state, Side::Player, move_index, combatants, rng, result)
                }
                Side::Enemy => self.enemy_acts(state, combatants, rng, result),
            }
        }
    }

    fn turn_order(&self, state: &BattleState, rng: &mut TurnRng) -> TurnOrder {
        let player_speed = effective_speed(&state.player);
        let enemy_speed = effective_speed(&state.enemy);
        let tie_breaker = (player_speed == enemy_speed).then(|| rng.next_roll(RollKind::SpeedTie));

        let order = determine_turn_order(player_speed, enemy_speed, tie_breaker);
        tracing::debug!(
            player_speed,
            enemy_speed,
            first = ?order.first,
            tie = order.was_speed_tie,
            "turn order decided"
        );
        order
    }

    /// `side` uses the move in `move_index` against the other side.
    fn perform_attack(
        &self,
        state: &mut BattleState,
        side: Side,
        move_index: usize,
        combatants: Combatants,
        rng: &mut TurnRng,
        result: &mut TurnResult,
    ) {
        let Some(owned) = state.ghost_mut(side).ghost.moves.get_mut(move_index) else {
            emit(state, result, BattleEvent::UnknownMove { side, move_index });
            return;
        };
        let Some(move_data) = self.data.move_data(&owned.move_id) else {
            tracing::warn!(move_id = %owned.move_id, "move missing from master data");
            emit(state, result, BattleEvent::UnknownMove { side, move_index });
            return;
        };
        owned.use_pp();

        emit(
            state,
            result,
            BattleEvent::MoveUsed {
                side,
                move_name: move_data.name.clone(),
            },
        );

        let target = side.opponent();
        let matchup = combatants.matchup(side);
        let params = {
            let attacker = state.ghost(side);
            let defender = state.ghost(target);
            DamageParams {
                move_power: move_data.power,
                move_type: move_data.move_type,
                attacker_attack: effective_attack(attacker),
                attacker_type: matchup.attacker,
                attacker_level: attacker.ghost.level,
                defender_defense: effective_defense(defender),
                defender_type: matchup.defender,
            }
        };

        let critical_roll = rng.next_roll(match side {
            Side::Player => RollKind::PlayerCritical,
            Side::Enemy => RollKind::EnemyCritical,
        });
        let outcome = calculate_damage_with(&self.config.damage, &params, Some(critical_roll));
        tracing::debug!(?side, move_id = %move_data.id, damage = outcome.damage, critical = outcome.is_critical, "attack resolved");

        match side {
            Side::Player => result.player_damage = Some(outcome),
            Side::Enemy => result.enemy_damage = Some(outcome),
        }

        if outcome.is_critical {
            emit(state, result, BattleEvent::CriticalHit { attacker: side });
        }
        emit(
            state,
            result,
            BattleEvent::AttackTypeEffectiveness {
                multiplier: outcome.effectiveness,
            },
        );
        if outcome.damage == 0 {
            return;
        }

        let defender = state.ghost_mut(target);
        defender.take_damage(outcome.damage);
        let remaining_hp = defender.current_hp;
        emit(
            state,
            result,
            BattleEvent::DamageDealt {
                target,
                damage: outcome.damage,
                remaining_hp,
            },
        );

        if remaining_hp == 0 {
            emit(state, result, BattleEvent::GhostFainted { side: target });
            let reason = match target {
                Side::Enemy => EndReason::PlayerWin,
                Side::Player => EndReason::PlayerLose,
            };
            self.conclude(state, reason, result);
        }
    }

    /// The wild ghost takes its half of the turn.
    fn enemy_acts(
        &self,
        state: &mut BattleState,
        combatants: Combatants,
        rng: &mut TurnRng,
        result: &mut TurnResult,
    ) {
        let choice = {
            let options: Vec<MoveOption> = state
                .enemy
                .ghost
                .moves
                .iter()
                .enumerate()
                .map(|(index, owned)| MoveOption {
                    index,
                    owned,
                    data: self.data.move_data(&owned.move_id),
                })
                .collect();

            if options.is_empty() {
                None
            } else {
                let roll = rng.next_roll(RollKind::EnemyMove);
                self.strategy
                    .select_move(&options, combatants.matchup(Side::Enemy), roll)
            }
        };

        match choice {
            Some(index) => self.perform_attack(state, Side::Enemy, index, combatants, rng, result),
            None => emit(state, result, BattleEvent::NoUsableMove { side: Side::Enemy }),
        }
    }

    fn resolve_item(
        &self,
        state: &mut BattleState,
        item_id: &str,
        heal_amount: u16,
        combatants: Combatants,
        rng: &mut TurnRng,
        result: &mut TurnResult,
    ) {
        state.enter_phase(BattlePhase::ItemSelect);

        let item = match self.data.item(item_id) {
            Some(item) if matches!(item.kind, ItemKind::Heal { .. }) => item,
            _ => {
                emit(
                    state,
                    result,
                    BattleEvent::UnknownItem {
                        item_id: item_id.to_string(),
                    },
                );
                return;
            }
        };

        let healed = state.player.heal(heal_amount);
        result.healed = Some(healed);

        let event = if healed == 0 {
            BattleEvent::AlreadyFullHp {
                side: Side::Player,
                item_name: item.name.clone(),
            }
        } else {
            BattleEvent::GhostHealed {
                side: Side::Player,
                item_name: item.name.clone(),
                amount: healed,
                new_hp: state.player.current_hp,
            }
        };
        emit(state, result, event);

        self.enemy_acts(state, combatants, rng, result);
    }

    fn resolve_capture(
        &self,
        state: &mut BattleState,
        item_bonus: u16,
        combatants: Combatants,
        rng: &mut TurnRng,
        result: &mut TurnResult,
    ) {
        state.enter_phase(BattlePhase::Executing(ExecutingAction::Capture));

        let roll = rng.next_roll(RollKind::Capture);
        let attempt = attempt_capture_with(
            &self.config.capture,
            state.enemy.current_hp,
            state.enemy.max_hp(),
            item_bonus,
            roll,
        );
        result.capture = Some(attempt);
        tracing::debug!(rate = attempt.rate, roll, success = attempt.success, "capture attempted");

        emit(state, result, BattleEvent::CaptureAttempted { rate: attempt.rate });
        if attempt.success {
            emit(state, result, BattleEvent::CaptureSucceeded);
            self.conclude(state, EndReason::Capture, result);
        } else {
            emit(state, result, BattleEvent::CaptureFailed);
            self.enemy_acts(state, combatants, rng, result);
        }
    }

    fn resolve_escape(
        &self,
        state: &mut BattleState,
        combatants: Combatants,
        rng: &mut TurnRng,
        result: &mut TurnResult,
    ) {
        state.enter_phase(BattlePhase::Executing(ExecutingAction::Escape));

        let attempts = state.escape_attempts;
        state.escape_attempts += 1;

        let roll = rng.next_roll(RollKind::Escape);
        let attempt = attempt_escape_with(
            &self.config.escape,
            effective_speed(&state.player),
            effective_speed(&state.enemy),
            attempts,
            roll,
        );
        result.escape = Some(attempt);
        tracing::debug!(rate = attempt.rate, roll, attempts, success = attempt.success, "escape attempted");

        if attempt.success {
            emit(state, result, BattleEvent::EscapeSucceeded);
            self.conclude(state, EndReason::Escape, result);
        } else {
            emit(state, result, BattleEvent::EscapeFailed);
            self.enemy_acts(state, combatants, rng, result);
        }
    }

    fn conclude(&self, state: &mut BattleState, reason: EndReason, result: &mut TurnResult) {
        state.finish(reason);
        emit(state, result, BattleEvent::BattleEnded { reason });
    }

    /// Settle a finished battle into the snapshots the persistence layer stores.
    pub fn end_battle(&self, state: &BattleState) -> BattleResult<BattleSettlement> {
        let end_reason = match (state.is_active, state.end_reason) {
            (false, Some(reason)) => reason,
            _ => return Err(BattleError::BattleStillActive.into()),
        };

        let mut ghost = state.player.ghost.clone();
        ghost.current_hp = state.player.current_hp;

        let mut settlement = BattleSettlement {
            end_reason,
            turns: state.turn_count.saturating_sub(1),
            ghost,
            experience: None,
            learned_moves: Vec::new(),
            pending_moves: Vec::new(),
            captured: None,
        };

        match end_reason {
            EndReason::PlayerWin => self.award_experience(&mut settlement, state.enemy.ghost.level),
            EndReason::Capture => {
                let mut captured = state.enemy.ghost.clone();
                captured.current_hp = state.enemy.current_hp;
                settlement.captured = Some(captured);
            }
            EndReason::PlayerLose | EndReason::Escape => {}
        }

        tracing::debug!(?end_reason, turns = settlement.turns, "battle settled");
        Ok(settlement)
    }

    fn award_experience(&self, settlement: &mut BattleSettlement, defeated_level: u8) {
        let ghost = &mut settlement.ghost;
        let gained = calculate_exp_gain_with(defeated_level, self.config.exp_per_level);
        let gain = add_experience(ghost.level, ghost.experience, gained, self.config.max_level);
        let previous_level = ghost.level;

        ghost.level = gain.new_level;
        ghost.experience = gain.new_exp;
        settlement.experience = Some(gain);
        tracing::debug!(gained, new_level = gain.new_level, "experience awarded");

        if !gain.leveled_up {
            return;
        }

        let Some(species) = self.data.species(&ghost.species_id) else {
            tracing::warn!(species = %ghost.species_id, "species missing from master data; stats not recalculated");
            return;
        };
        ghost.recalculate_stats(&species.base_stats);

        for entry in moves_learned_between(species, previous_level, gain.new_level) {
            let Some(move_data) = self.data.move_data(&entry.move_id) else {
                tracing::warn!(move_id = %entry.move_id, "learnset move missing from master data");
                continue;
            };
            if ghost.knows_move(&move_data.id) {
                continue;
            }
            if ghost.learn_move(move_data) {
                settlement.learned_moves.push(move_data.id.clone());
            } else {
                settlement.pending_moves.push(move_data.id.clone());
            }
        }
    }
}

/// Record an event on the turn and append its narration to both logs.
fn emit(state: &mut BattleState, result: &mut TurnResult, event: BattleEvent) {
    if let Some(message) = state.narrate(&event) {
        result.messages.push(message);
    }
    result.events.push(event);
}
