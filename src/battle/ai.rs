//! Move selection for the wild opponent.

use crate::ghost::OwnedMove;
use ordered_float::OrderedFloat;
use schema::{GhostType, MoveData};
use std::cmp::Reverse;

/// One of the opponent's move slots, with its master data when the lookup
/// succeeded.
#[derive(Debug, Clone, Copy)]
pub struct MoveOption<'a> {
    pub index: usize,
    pub owned: &'a OwnedMove,
    pub data: Option<&'a MoveData>,
}

impl MoveOption<'_> {
    /// A slot the opponent can actually use: PP left and known master data.
    pub fn is_usable(&self) -> bool {
        self.owned.has_pp() && self.data.is_some()
    }
}

/// Types of the acting ghost and its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Matchup {
    pub attacker: GhostType,
    pub defender: GhostType,
}

/// A replaceable policy for choosing the opponent's move each turn.
pub trait OpponentStrategy: Send + Sync {
    /// Pick a slot index from `options`. `roll` is a uniform value in `[0, 1)`
    /// the strategy may use for randomness. `None` means nothing can be used.
    fn select_move(&self, options: &[MoveOption], matchup: Matchup, roll: f64) -> Option<usize>;
}

/// Uniformly random among slots with PP left; the first slot when all are
/// depleted.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomUsableMove;

impl OpponentStrategy for RandomUsableMove {
    fn select_move(&self, options: &[MoveOption], _matchup: Matchup, roll: f64) -> Option<usize> {
        let usable: Vec<&MoveOption> = options.iter().filter(|o| o.is_usable()).collect();
        if usable.is_empty() {
            return options.first().map(|o| o.index);
        }

        let pick = ((roll.clamp(0.0, 1.0) * usable.len() as f64) as usize).min(usable.len() - 1);
        Some(usable[pick].index)
    }
}

/// Greedy: the usable move with the highest expected damage multiplier
/// (power x effectiveness x STAB). Ties go to the lowest slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrongestMove;

impl StrongestMove {
    fn score(data: &MoveData, matchup: Matchup) -> f64 {
        let effectiveness = GhostType::type_effectiveness(data.move_type, matchup.defender);
        let stab = if data.move_type == matchup.attacker { 1.5 } else { 1.0 };
        data.power as f64 * effectiveness * stab
    }
}

impl OpponentStrategy for StrongestMove {
    fn select_move(&self, options: &[MoveOption], matchup: Matchup, roll: f64) -> Option<usize> {
        let best = options
            .iter()
            .filter(|o| o.owned.has_pp())
            .filter_map(|o| o.data.map(|data| (o.index, Self::score(data, matchup))))
            .max_by_key(|(index, score)| (OrderedFloat(*score), Reverse(*index)))
            .map(|(index, _)| index);

        best.or_else(|| RandomUsableMove.select_move(options, matchup, roll))
    }
}
