use crate::ghost::OwnedGhost;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Lowest and highest stat stage a modifier can reach.
pub const MIN_STAT_STAGE: i8 = -6;
pub const MAX_STAT_STAGE: i8 = 6;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StatType {
    Attack,
    Defense,
    Speed,
}

/// Battle-local stat stages. Never persisted.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatModifiers {
    pub attack: i8,
    pub defense: i8,
    pub speed: i8,
}

impl StatModifiers {
    pub fn get(&self, stat: StatType) -> i8 {
        match stat {
            StatType::Attack => self.attack,
            StatType::Defense => self.defense,
            StatType::Speed => self.speed,
        }
    }

    /// Shift a stage by `delta`, clamped to -6..=6. Returns the new stage.
    pub fn adjust(&mut self, stat: StatType, delta: i8) -> i8 {
        let slot = match stat {
            StatType::Attack => &mut self.attack,
            StatType::Defense => &mut self.defense,
            StatType::Speed => &mut self.speed,
        };
        *slot = slot.saturating_add(delta).clamp(MIN_STAT_STAGE, MAX_STAT_STAGE);
        *slot
    }
}

/// One combatant's battle-local view: the snapshot it entered with plus an
/// HP shadow and stat stages that only live for this battle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BattleGhostState {
    pub ghost: OwnedGhost,
    pub name: String,
    pub current_hp: u16,
    pub stat_modifiers: StatModifiers,
}

impl BattleGhostState {
    pub fn new(ghost: OwnedGhost, name: String) -> Self {
        let current_hp = ghost.current_hp.min(ghost.max_hp);
        Self {
            ghost,
            name,
            current_hp,
            stat_modifiers: StatModifiers::default(),
        }
    }

    pub fn max_hp(&self) -> u16 {
        self.ghost.max_hp
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    /// Subtract damage, flooring HP at 0. Returns the HP actually lost.
    pub fn take_damage(&mut self, damage: u16) -> u16 {
        let lost = damage.min(self.current_hp);
        self.current_hp -= lost;
        lost
    }

    /// Restore up to `amount` HP without passing max HP. Returns the HP restored.
    pub fn heal(&mut self, amount: u16) -> u16 {
        let healed = amount.min(self.max_hp().saturating_sub(self.current_hp));
        self.current_hp += healed;
        healed
    }

    pub fn apply_stat_modifier(&mut self, stat: StatType, delta: i8) -> i8 {
        self.stat_modifiers.adjust(stat, delta)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExecutingAction {
    Capture,
    Escape,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BattlePhase {
    CommandSelect,
    MoveSelect,
    ItemSelect,
    Executing(ExecutingAction),
    Result,
    CaptureSuccess,
}

impl BattlePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, BattlePhase::Result | BattlePhase::CaptureSuccess)
    }

    /// The only edges the battle flow may take.
    pub fn can_transition_to(self, next: BattlePhase) -> bool {
        use BattlePhase::*;
        match (self, next) {
            (CommandSelect, MoveSelect | ItemSelect | Executing(_)) => true,
            (MoveSelect | ItemSelect | Executing(_), CommandSelect | Result) => true,
            (Executing(ExecutingAction::Capture), CaptureSuccess) => true,
            _ => false,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    PlayerWin,
    PlayerLose,
    Escape,
    Capture,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Battle Management
    GhostAppeared {
        side: Side,
    },
    TurnStarted {
        turn_number: u32,
    },
    BattleAlreadyOver,

    // Moves
    MoveUsed {
        side: Side,
        move_name: String,
    },
    NoPpRemaining {
        side: Side,
        move_name: String,
    },
    UnknownMove {
        side: Side,
        move_index: usize,
    },
    NoUsableMove {
        side: Side,
    },
    CriticalHit {
        attacker: Side,
    },
    AttackTypeEffectiveness {
        multiplier: f64,
    },
    DamageDealt {
        target: Side,
        damage: u16,
        remaining_hp: u16,
    },
    GhostFainted {
        side: Side,
    },

    // Items
    GhostHealed {
        side: Side,
        item_name: String,
        amount: u16,
        new_hp: u16,
    },
    AlreadyFullHp {
        side: Side,
        item_name: String,
    },
    UnknownItem {
        item_id: String,
    },

    // Capture & Escape
    CaptureAttempted {
        rate: f64,
    },
    CaptureSucceeded,
    CaptureFailed,
    EscapeSucceeded,
    EscapeFailed,

    BattleEnded {
        reason: EndReason,
    },
}

impl BattleEvent {
    /// Formats the event into a human-readable string using battle context.
    /// Returns None for silent events that should not produce user-visible text.
    pub fn format(&self, battle_state: &BattleState) -> Option<String> {
        let name = move |side: Side| battle_state.ghost(side).name.as_str();

        match self {
            BattleEvent::GhostAppeared { side } => match side {
                Side::Enemy => Some(format!("A wild {} appeared!", name(*side))),
                Side::Player => Some(format!("Go, {}!", name(*side))),
            },
            BattleEvent::TurnStarted { .. } => None,
            BattleEvent::BattleAlreadyOver => Some("The battle is already over.".to_string()),

            BattleEvent::MoveUsed { side, move_name } => {
                Some(format!("{} used {}!", Self::actor(battle_state, *side), move_name))
            }
            BattleEvent::NoPpRemaining { side, move_name } => Some(format!(
                "{} has no PP left for {}!",
                Self::actor(battle_state, *side),
                move_name
            )),
            BattleEvent::UnknownMove { side, move_index } => Some(format!(
                "{} doesn't know a move in slot {}!",
                Self::actor(battle_state, *side),
                move_index + 1
            )),
            BattleEvent::NoUsableMove { side } => Some(format!(
                "{} has no moves it can use!",
                Self::actor(battle_state, *side)
            )),
            BattleEvent::CriticalHit { .. } => Some("A critical hit!".to_string()),
            BattleEvent::AttackTypeEffectiveness { multiplier } => match *multiplier {
                m if m > 1.0 => Some("It's super effective!".to_string()),
                m if m < 1.0 && m > 0.0 => Some("It's not very effective...".to_string()),
                m if m == 0.0 => Some("It had no effect!".to_string()),
                _ => None, // Normal effectiveness, no message
            },
            BattleEvent::DamageDealt { target, damage, .. } => Some(format!(
                "{} took {} damage!",
                Self::actor(battle_state, *target),
                damage
            )),
            BattleEvent::GhostFainted { side } => {
                Some(format!("{} fainted!", Self::actor(battle_state, *side)))
            }

            BattleEvent::GhostHealed {
                side,
                item_name,
                amount,
                ..
            } => Some(format!(
                "Used {}! {} recovered {} HP!",
                item_name,
                name(*side),
                amount
            )),
            BattleEvent::AlreadyFullHp { side, item_name } => Some(format!(
                "Used {}! {}'s HP is already full.",
                item_name,
                name(*side)
            )),
            BattleEvent::UnknownItem { item_id } => {
                Some(format!("There is no item called \"{}\"!", item_id))
            }

            BattleEvent::CaptureAttempted { .. } => Some(format!(
                "You tried to capture the wild {}!",
                battle_state.enemy.name
            )),
            BattleEvent::CaptureSucceeded => {
                Some(format!("Gotcha! {} was captured!", battle_state.enemy.name))
            }
            BattleEvent::CaptureFailed => {
                Some(format!("Oh no! {} broke free!", battle_state.enemy.name))
            }
            BattleEvent::EscapeSucceeded => Some("Got away safely!".to_string()),
            BattleEvent::EscapeFailed => Some("Can't escape!".to_string()),

            BattleEvent::BattleEnded { reason } => match reason {
                EndReason::PlayerWin => Some("You won the battle!".to_string()),
                EndReason::PlayerLose => Some(format!(
                    "{} can't fight anymore... You lost the battle.",
                    battle_state.player.name
                )),
                // Already announced by the escape/capture events.
                EndReason::Escape | EndReason::Capture => None,
            },
        }
    }

    fn actor(battle_state: &BattleState, side: Side) -> String {
        let name = &battle_state.ghost(side).name;
        match side {
            Side::Player => name.clone(),
            Side::Enemy => format!("The wild {}", name),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BattleState {
    pub phase: BattlePhase,
    pub player: BattleGhostState,
    pub enemy: BattleGhostState,
    pub turn_count: u32,
    pub escape_attempts: u32,
    pub messages: Vec<String>,
    pub is_active: bool,
    pub end_reason: Option<EndReason>,
}

impl BattleState {
    pub fn new(player: BattleGhostState, enemy: BattleGhostState) -> Self {
        Self {
            phase: BattlePhase::CommandSelect,
            player,
            enemy,
            turn_count: 1,
            escape_attempts: 0,
            messages: Vec::new(),
            is_active: true,
            end_reason: None,
        }
    }

    pub fn ghost(&self, side: Side) -> &BattleGhostState {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    pub fn ghost_mut(&mut self, side: Side) -> &mut BattleGhostState {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }

    /// Move along a legal edge. Illegal transitions are refused and leave the
    /// phase untouched.
    pub(crate) fn set_phase(&mut self, next: BattlePhase) -> bool {
        if self.phase == next {
            return true;
        }
        if !self.phase.can_transition_to(next) {
            tracing::warn!(from = ?self.phase, to = ?next, "refused illegal phase transition");
            return false;
        }
        tracing::debug!(from = ?self.phase, to = ?next, "phase transition");
        self.phase = next;
        true
    }

    /// Route to `target` through the command menu when coming from another
    /// selection screen.
    pub(crate) fn enter_phase(&mut self, target: BattlePhase) {
        if self.phase != target && self.phase != BattlePhase::CommandSelect {
            self.set_phase(BattlePhase::CommandSelect);
        }
        self.set_phase(target);
    }

    pub fn open_move_select(&mut self) -> bool {
        self.is_active && self.set_phase(BattlePhase::MoveSelect)
    }

    pub fn open_item_select(&mut self) -> bool {
        self.is_active && self.set_phase(BattlePhase::ItemSelect)
    }

    pub fn return_to_command(&mut self) -> bool {
        self.is_active && self.set_phase(BattlePhase::CommandSelect)
    }

    /// End the battle. The phase becomes `CaptureSuccess` for captures and
    /// `Result` for everything else.
    pub(crate) fn finish(&mut self, reason: EndReason) {
        let terminal = match reason {
            EndReason::Capture => BattlePhase::CaptureSuccess,
            _ => BattlePhase::Result,
        };
        self.set_phase(terminal);
        self.is_active = false;
        self.end_reason = Some(reason);
        tracing::debug!(?reason, turn = self.turn_count, "battle ended");
    }

    /// Format an event and append its narration (if any) to the battle log.
    pub(crate) fn narrate(&mut self, event: &BattleEvent) -> Option<String> {
        let message = event.format(self)?;
        self.messages.push(message.clone());
        Some(message)
    }
}

/// Every probabilistic decision in a turn.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RollKind {
    PlayerCritical,
    EnemyCritical,
    SpeedTie,
    Capture,
    Escape,
    EnemyMove,
}

/// Injected rolls in `[0, 1)`. Any roll left as `None` is drawn from the
/// turn's random source instead.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
#[serde(default)]
pub struct RandomValues {
    pub player_critical: Option<f64>,
    pub enemy_critical: Option<f64>,
    pub speed_tie: Option<f64>,
    pub capture: Option<f64>,
    pub escape: Option<f64>,
    pub enemy_move: Option<f64>,
}

impl RandomValues {
    fn take(&mut self, kind: RollKind) -> Option<f64> {
        match kind {
            RollKind::PlayerCritical => self.player_critical.take(),
            RollKind::EnemyCritical => self.enemy_critical.take(),
            RollKind::SpeedTie => self.speed_tie.take(),
            RollKind::Capture => self.capture.take(),
            RollKind::Escape => self.escape.take(),
            RollKind::EnemyMove => self.enemy_move.take(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TurnRng {
    injected: RandomValues,
    source: StdRng,
}

impl TurnRng {
    pub fn new_random() -> Self {
        Self {
            injected: RandomValues::default(),
            source: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            injected: RandomValues::default(),
            source: StdRng::seed_from_u64(seed),
        }
    }

    /// Fixed rolls for tests, with a fixed-seed fallback for anything not injected.
    pub fn new_for_test(values: RandomValues) -> Self {
        Self::seeded(0).with_values(values)
    }

    pub fn with_values(mut self, values: RandomValues) -> Self {
        self.injected = values;
        self
    }

    /// Next roll in `[0, 1)` for `kind`. Injected values are used once.
    pub fn next_roll(&mut self, kind: RollKind) -> f64 {
        match self.injected.take(kind) {
            Some(roll) => {
                tracing::trace!(?kind, roll, "consumed injected roll");
                roll
            }
            None => {
                let roll = self.source.random::<f64>();
                tracing::trace!(?kind, roll, "drew roll");
                roll
            }
        }
    }
}
